use crate::errors::ServerError;
use crate::listing::list_users_response;
use crate::report::routes::{report_download, report_shell, report_table_partial};
use crate::responses::{redirect, ResultResp};
use crate::state::AppState;
use astra::Request;
use tracing::debug;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = req.uri().query();
    debug!(method, path, "Handling request");

    match (method, path) {
        ("GET", "/") => redirect("/report"),

        // Listing service
        ("GET", "/api/report/users") => list_users_response(&state.db),

        // Report view
        ("GET", "/report") => report_shell(query),
        ("GET", "/report/table") => report_table_partial(state, query),
        ("GET", "/report/download") => report_download(state, query),

        _ => Err(ServerError::NotFound),
    }
}
