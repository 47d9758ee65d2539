use crate::tests::utils::{
    at, body_bytes, body_string, get, seed_user, serve_nothing,
    serve_once, test_state, TestDb,
};
use std::time::Duration;

#[test]
fn root_redirects_to_the_report() {
    let db = TestDb::new();
    let state = test_state(&db);

    let resp = get(&state, "/");
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/report"
    );
}

#[test]
fn report_page_starts_with_a_loading_indicator() {
    let db = TestDb::new();
    let state = test_state(&db);

    let resp = get(&state, "/report?start=2024-02-01");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("User Report"));
    assert!(body.contains("Loading..."));
    assert!(body.contains(r#"hx-get="/report/table?start=2024-02-01&amp;limit=all""#));
}

#[test]
fn table_filters_by_date_range() {
    let db = TestDb::new();
    seed_user(&db, "jan", "January", "User", at(2024, 1, 15));
    seed_user(&db, "feb", "February", "User", at(2024, 2, 15));
    seed_user(&db, "mar", "March", "User", at(2024, 3, 15));
    let state = test_state(&db);

    let body = body_string(get(&state, "/report/table?start=2024-02-01&end=2024-02-28"));

    assert!(body.contains("February User"));
    assert!(!body.contains("January User"));
    assert!(!body.contains("March User"));
    assert!(body.contains("2/15/2024, 12:00:00 PM"));
    // Partial only, for htmx swapping.
    assert!(!body.contains("<html"));
}

#[test]
fn unfiltered_table_shows_everyone() {
    let db = TestDb::new();
    seed_user(&db, "jan", "January", "User", at(2024, 1, 15));
    seed_user(&db, "feb", "February", "User", at(2024, 2, 15));
    let state = test_state(&db);

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("January User"));
    assert!(body.contains("February User"));
    assert!(body.contains("Download PDF"));
    assert!(body.contains(r#"href="/report/download?limit=all""#));
}

#[test]
fn empty_store_shows_the_empty_state() {
    let db = TestDb::new();
    let state = test_state(&db);

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("No users found."));
    assert!(!body.contains("<table"));
    assert!(!body.contains("Download PDF"));
}

#[test]
fn store_failure_shows_the_error_and_a_toast() {
    let db = TestDb::broken();
    let state = test_state(&db);

    let resp = get(&state, "/report/table");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Could not fetch users"));
    assert!(body.contains(r#"class="toast toast-error""#));
    assert!(body.contains("Error fetching users"));
    assert!(!body.contains("<table"));
}

#[test]
fn limit_applies_to_export_but_not_to_the_table() {
    let db = TestDb::new();
    for (i, id) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        seed_user(&db, id, &id.to_uppercase(), "Person", at(2024, 4, i as u32 + 1));
    }
    let state = test_state(&db);

    let body = body_string(get(&state, "/report/table?limit=2"));
    assert_eq!(body.matches("<tr>").count(), 6, "header row plus five users");
    assert!(body.contains("E Person"));

    let resp = get(&state, "/report/download?limit=2");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers()
            .get("Content-Disposition")
            .unwrap()
            .to_str()
            .unwrap(),
        r#"attachment; filename="user-report.pdf""#
    );
    assert!(body_bytes(resp).starts_with(b"%PDF"));
}

#[test]
fn download_fails_when_the_listing_is_unavailable() {
    let db = TestDb::broken();
    let state = test_state(&db);

    let resp = get(&state, "/report/download");
    assert_eq!(resp.status(), 503);
}

#[test]
fn malformed_controls_are_bad_requests() {
    let db = TestDb::new();
    let state = test_state(&db);

    assert_eq!(get(&state, "/report/table?limit=0").status(), 400);
    assert_eq!(get(&state, "/report/table?limit=many").status(), 400);
    assert_eq!(get(&state, "/report/download?end=28-02-2024").status(), 400);
}

#[test]
fn http_source_treats_success_false_as_an_error() {
    let db = TestDb::new();
    let mut state = test_state(&db);
    state.config.source_url = Some(serve_once(
        200,
        r#"{"success":false,"message":"Error fetching users"}"#,
    ));

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("Could not fetch users"));
    assert!(body.contains("toast-error"));
}

#[test]
fn http_source_renders_a_remote_listing() {
    let db = TestDb::new();
    let mut state = test_state(&db);
    state.config.source_url = Some(serve_once(
        200,
        r#"{"success":true,"data":[{"id":"r1","firstName":"Remote","lastName":"User",
            "email":"remote@example.com","accountType":"Admin","createdAt":"2024-02-15T12:00:00Z"}]}"#,
    ));

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("Remote User"));
    assert!(body.contains("remote@example.com"));
}

#[test]
fn http_source_treats_server_errors_as_errors() {
    let db = TestDb::new();
    let mut state = test_state(&db);
    state.config.source_url = Some(serve_once(
        500,
        r#"{"success":false,"message":"Error fetching users"}"#,
    ));

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("Could not fetch users"));
}

#[test]
fn http_source_that_never_answers_settles_to_an_error() {
    let db = TestDb::new();
    let mut state = test_state(&db);
    state.config.fetch_timeout = Duration::from_secs(1);
    state.config.source_url = Some(serve_nothing(Duration::from_secs(5)));

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("Could not fetch users"));
    assert!(body.contains("toast-error"));
    assert!(!body.contains("Loading..."));
}

#[test]
fn http_source_accepts_mongo_style_ids() {
    let db = TestDb::new();
    let mut state = test_state(&db);
    state.config.source_url = Some(serve_once(
        200,
        r#"{"success":true,"data":[{"_id":"65d0c0ffee","firstName":"Mongo","lastName":"User",
            "email":"mongo@example.com","accountType":"Student","createdAt":"2024-02-15T12:00:00.000Z"}]}"#,
    ));

    let body = body_string(get(&state, "/report/table"));
    assert!(body.contains("65d0c0ffee"));
    assert!(body.contains("Mongo User"));
}
