use folio_models::form::RawFormFields;
use serde::{Deserialize, Serialize};

/// Absent and `null` fields are both read as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiQuoteForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFormSubmitted {
    pub success: bool,
    pub message_id: String,
}

impl From<ApiContactForm> for RawFormFields {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
            service: None,
        }
    }
}

impl From<ApiQuoteForm> for RawFormFields {
    fn from(value: ApiQuoteForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
            service: value.service,
        }
    }
}
