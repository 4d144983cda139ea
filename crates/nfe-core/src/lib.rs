#![deny(missing_docs)]

//! # nfe-core: Domain Types for the NFe Gateway
//!
//! This crate defines the request schemas and the field validator shared by
//! the gateway. It has no internal crate dependencies; only `serde` and
//! `serde_json` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Wire-format fidelity.** Struct fields carry the provider's Portuguese
//!    names so no rename layer sits between the caller and the provider.
//!    Unknown fields survive round-trips through a flattened extras map on
//!    every struct.
//!
//! 2. **Validation is a pure function.** [`validate::validate_issuance`] maps
//!    a request to an ordered [`Violation`] list in a single pass; it never
//!    short-circuits on the first failure and never performs I/O.
//!
//! 3. **Loose numerics stay out of serde.** Fields the provider accepts as
//!    either a JSON number or a numeric string deserialize into
//!    `Option<String>` and are range-checked by the validator, so a bad
//!    amount produces a field violation instead of a deserialization error.

pub mod types;
pub mod validate;

// Re-export primary types at crate root for ergonomic imports.
pub use types::{CancelRequest, Cliente, IssuanceRequest, Pedido, Produto, Violation};
pub use validate::{validate_cancel, validate_chave, validate_issuance};
