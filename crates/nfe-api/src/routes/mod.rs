//! # API Route Modules
//!
//! One module per surface. The gateway exposes a single surface today:
//!
//! - `nfe`: invoice issuance, consultation, cancellation, certificate
//!   validity, SEFAZ availability, and the provider notification callback.

pub mod nfe;
