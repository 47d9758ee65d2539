use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::source::FetchError;

/// A user as exposed by the listing endpoint.
///
/// Has no password field; the listing query never selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// `{ success, data?, message? }` wrapper used on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<UserRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListingEnvelope {
    pub fn ok(users: Vec<UserRecord>) -> Self {
        Self {
            success: true,
            data: Some(users),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Trust the `success` flag, not the transport status.
    pub fn into_records(self) -> Result<Vec<UserRecord>, FetchError> {
        match (self.success, self.data) {
            (true, Some(users)) => Ok(users),
            (true, None) => Err(FetchError::Parse("success without data".to_string())),
            (false, _) => Err(FetchError::Unsuccessful(self.message)),
        }
    }
}
