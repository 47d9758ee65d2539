// listing.rs
use tracing::{debug, error};

use crate::db::{list_users, Database};
use crate::domain::ListingEnvelope;
use crate::responses::{json_response, ResultResp};

/// The only failure text a client ever sees.
pub const FETCH_USERS_ERROR: &str = "Error fetching users";

/// `GET /api/report/users`
pub fn list_users_response(db: &Database) -> ResultResp {
    match db.with_conn(|conn| list_users(conn)) {
        Ok(users) => {
            debug!(count = users.len(), "Listing users");
            json_response(200, &ListingEnvelope::ok(users))
        }
        Err(e) => {
            error!(error = %e, "Error fetching users");
            json_response(500, &ListingEnvelope::failure(FETCH_USERS_ERROR))
        }
    }
}
