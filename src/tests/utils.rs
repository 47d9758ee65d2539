use crate::config::Config;
use crate::db::{init_db, Database};
use crate::errors::ServerError;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::state::AppState;
use astra::{Body, Response};
use chrono::{DateTime, TimeZone, Utc};
use http::{Method, Request};
use rusqlite::params;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;
use tempfile::TempDir;

/// A database file inside a temporary directory, removed on drop.
pub struct TestDb {
    db: Database,
    _temp_dir: TempDir,
}

impl TestDb {
    /// A fresh database with the production schema applied.
    pub fn new() -> Self {
        let test_db = Self::broken();
        init_db(&test_db.db, "sql/schema.sql")
            .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
        test_db
    }

    /// A database without any tables, so every listing query fails.
    pub fn broken() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("report.sqlite3");
        Self {
            db: Database::new(path.to_string_lossy().into_owned()),
            _temp_dir: temp_dir,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

pub fn test_state(test_db: &TestDb) -> AppState {
    let db = test_db.db().clone();
    let config = Config {
        db_path: db.path().to_string(),
        fetch_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    AppState::new(db, config)
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn seed_user(db: &TestDb, id: &str, first: &str, last: &str, created_at: DateTime<Utc>) {
    db.db().with_conn(|conn| {
        conn.execute(
            "insert into users (id, first_name, last_name, email, password, account_type, created_at)
             values (?, ?, ?, ?, ?, ?, ?)",
            params![
                id,
                first,
                last,
                format!("{}@example.com", id),
                "$2b$10$secret-hash",
                "Student",
                created_at
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))
    })
    .expect("Failed to seed user");
}

/// Runs a GET through the router, rendering errors the way `main` does.
pub fn get(state: &AppState, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    }
}

pub fn body_bytes(resp: Response) -> Vec<u8> {
    let mut body = Vec::new();
    resp.into_body().reader().read_to_end(&mut body).unwrap();
    body
}

pub fn body_string(resp: Response) -> String {
    String::from_utf8(body_bytes(resp)).unwrap()
}

/// Answers exactly one HTTP request with `status` and a JSON `body`.
/// Returns the URL to point an `HttpSource` at.
pub fn serve_once(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{addr}/api/report/users")
}

/// Accepts one connection and holds it open without ever answering.
pub fn serve_nothing(hold_for: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            std::thread::sleep(hold_for);
            drop(stream);
        }
    });

    format!("http://{addr}/api/report/users")
}

#[test]
fn test_db_is_removed_on_drop() {
    let test_db = TestDb::new();
    let path = std::path::PathBuf::from(test_db.db().path());
    assert!(path.exists());

    drop(test_db);
    assert!(!path.exists());
}
