use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::db::{list_users, Database};
use crate::domain::ListingEnvelope;
use crate::listing::FETCH_USERS_ERROR;

/// Why a listing could not be turned into records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("listing returned status {0}")]
    Status(u16),

    #[error("malformed listing: {0}")]
    Parse(String),

    #[error("listing reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    Unsuccessful(Option<String>),

    #[error("fetch worker went away before answering")]
    Disconnected,

    #[error("no answer within {0:?}")]
    Timeout(Duration),
}

/// Where the report view gets its listing from.
pub trait UserSource: Send + 'static {
    fn fetch_users(&self) -> Result<ListingEnvelope, FetchError>;
}

/// Reads the store in-process, producing the same envelope the endpoint does.
pub struct StoreSource {
    db: Database,
}

impl StoreSource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl UserSource for StoreSource {
    fn fetch_users(&self) -> Result<ListingEnvelope, FetchError> {
        match self.db.with_conn(|conn| list_users(conn)) {
            Ok(users) => Ok(ListingEnvelope::ok(users)),
            Err(e) => {
                error!(error = %e, "Error fetching users");
                Ok(ListingEnvelope::failure(FETCH_USERS_ERROR))
            }
        }
    }
}

/// Fetches the listing endpoint over HTTP.
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl UserSource for HttpSource {
    fn fetch_users(&self) -> Result<ListingEnvelope, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(url = %self.url, "Fetching user listing");
        let resp = client
            .get(&self.url)
            .header("Accept", mime::APPLICATION_JSON.as_ref())
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_listing_body(status, &body)
    }
}

/// Validates the transport status, then the body shape.
pub fn parse_listing_body(status: u16, body: &[u8]) -> Result<ListingEnvelope, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }
    serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))
}
