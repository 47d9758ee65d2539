use crate::config::Config;
use crate::db::{init_db, Database};
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod db;
mod documents;
mod domain;
mod errors;
mod listing;
mod report;
mod responses;
mod router;
mod state;
mod templates;


fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration failed");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        error!(error = %e, "Database initialization failed");
        std::process::exit(1);
    }

    let addr = config.addr;
    let max_workers = config.max_workers;
    let state = AppState::new(db, config);

    info!("Starting server at http://{addr}");
    let server = Server::bind(addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status() >= 500 {
                error!(error = %err, "Request failed");
            } else {
                warn!(error = %err, "Request rejected");
            }
            responses::html_error_response(err)
        }
    });

    if let Err(e) = result {
        error!(error = %e, "Server ended with error");
    }

    info!("Server shut down cleanly.");
}
