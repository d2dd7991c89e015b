//! Transfer objects for bearer token exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::tokens;

pub const BEARER: &str = "Bearer";

fn default_token_type() -> String {
    BEARER.to_string()
}

/// Access/refresh pair handed to and accepted from clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: DateTime<Utc>,
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
}

impl BaseToken {
    pub fn bearer(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires,
            token_type: default_token_type(),
        }
    }

    /// Value for an `Authorization` header, e.g. `Bearer abc`.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl From<&tokens::Model> for BaseToken {
    fn from(model: &tokens::Model) -> Self {
        Self::bearer(
            model.access_token.clone(),
            model.refresh_token.clone(),
            model.expires,
        )
    }
}

impl From<tokens::Model> for BaseToken {
    fn from(model: tokens::Model) -> Self {
        Self::bearer(model.access_token, model.refresh_token, model.expires)
    }
}
