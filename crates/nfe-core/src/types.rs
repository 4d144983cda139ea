//! Request schemas for invoice issuance and cancellation.
//!
//! Field names follow the provider's wire format (Portuguese), so a struct
//! serializes directly into a provider request body. Every struct carries a
//! flattened `extra` map: fields we do not model are preserved verbatim
//! rather than dropped, which keeps the gateway forward-compatible with
//! provider-side schema additions.
//!
//! Amount and identifier fields the provider accepts as either a JSON number
//! or a numeric string (`44.90` vs `"44.90"`) deserialize through
//! [`de::flexible`] into `Option<String>`. Range and format checks live in
//! [`crate::validate`], not in serde, so a malformed amount surfaces as a
//! field violation instead of a 4xx deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single field-level validation failure.
///
/// The `field` is a dotted path into the request body (`cliente.email`,
/// `produtos[0].ncm`); the `message` is the human-readable reason, in the
/// provider's language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path of the offending field within the request body.
    pub field: String,
    /// Human-readable description of the failed rule.
    pub message: String,
}

impl Violation {
    /// Builds a violation for `field` with the given message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Top-level invoice issuance request.
///
/// Mirrors the provider's issuance body. All fields are optional at the type
/// level; presence and format are enforced by
/// [`crate::validate::validate_issuance`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuanceRequest {
    /// Order identifier, a positive integer. Accepted as a number or a
    /// numeric string on the wire.
    #[serde(
        rename = "ID",
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Operation kind code (1 = outbound, 2 = inbound).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operacao: Option<i64>,

    /// Free-text description of the fiscal operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natureza_operacao: Option<String>,

    /// Document model code (1 = NF-e, 2 = NFC-e).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo: Option<i64>,

    /// Issuance purpose code (1-4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalidade: Option<i64>,

    /// Target environment code (1 = production, 2 = staging).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiente: Option<i64>,

    /// Recipient of the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente: Option<Cliente>,

    /// Line items. At least one is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produtos: Option<Vec<Produto>>,

    /// Order-level payment and freight data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pedido: Option<Pedido>,

    /// Unmodeled fields, forwarded to the provider untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Invoice recipient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    /// Natural-person tax id (CPF), with or without punctuation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    /// Full legal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_completo: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,

    /// Address complement (apartment, suite).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,

    /// Street number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<i64>,

    /// Neighborhood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,

    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,

    /// Two-letter state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,

    /// Postal code (CEP).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,

    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,

    /// Contact e-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Unmodeled fields, forwarded to the provider untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single invoice line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    /// Product display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,

    /// Merchant SKU or internal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,

    /// Mercosur tariff classification (NCM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncm: Option<String>,

    /// Tax substitution code (CEST).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cest: Option<String>,

    /// Quantity sold. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantidade: Option<String>,

    /// Commercial unit (UN, KG, CX).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,

    /// Unit weight in kilograms. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub peso: Option<String>,

    /// Merchandise origin code (0-8).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origem: Option<i64>,

    /// Unit price before discounts. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtotal: Option<String>,

    /// Line total. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<String>,

    /// Provider-side tax class reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classe_imposto: Option<String>,

    /// Unmodeled fields, forwarded to the provider untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Order-level payment and freight data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pedido {
    /// Payment indicator code (0 = cash, 1 = installments, 2 = other).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagamento: Option<i64>,

    /// Buyer presence indicator code (0-4 or 9).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presenca: Option<i64>,

    /// Freight modality code (0-4 or 9).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidade_frete: Option<i64>,

    /// Freight amount. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub frete: Option<String>,

    /// Discount amount. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub desconto: Option<String>,

    /// Order grand total. Accepted as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "de::flexible",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<String>,

    /// Unmodeled fields, forwarded to the provider untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Invoice cancellation request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelRequest {
    /// Cancellation reason, required by the tax authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,

    /// Unmodeled fields, forwarded to the provider untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub(crate) mod de {
    //! Custom deserializers for provider-lenient fields.

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accepts a JSON string or number and yields its string form.
    ///
    /// `null` and absent both map to `None`. Non-scalar values are
    /// stringified rather than rejected; the validator turns them into
    /// field violations when they fail to parse.
    pub fn flexible<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => Some(other.to_string()),
        })
    }
}
