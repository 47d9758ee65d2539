use crate::tests::utils::{at, body_string, get, seed_user, test_state, TestDb};
use serde_json::Value;

#[test]
fn lists_users_without_passwords() {
    let db = TestDb::new();
    seed_user(&db, "u1", "Ada", "Lovelace", at(2024, 1, 15));
    seed_user(&db, "u2", "Alan", "Turing", at(2024, 2, 15));
    let state = test_state(&db);

    let resp = get(&state, "/api/report/users");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let body = body_string(resp);
    assert!(!body.contains("password"));
    assert!(!body.contains("secret-hash"));

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], "u1");
    assert_eq!(users[0]["firstName"], "Ada");
    assert_eq!(users[0]["lastName"], "Lovelace");
    assert_eq!(users[0]["email"], "u1@example.com");
    assert_eq!(users[0]["accountType"], "Student");
    assert_eq!(users[0]["createdAt"], "2024-01-15T12:00:00Z");
}

#[test]
fn lists_users_oldest_first() {
    let db = TestDb::new();
    seed_user(&db, "mar", "Mar", "User", at(2024, 3, 1));
    seed_user(&db, "jan", "Jan", "User", at(2024, 1, 1));
    seed_user(&db, "feb", "Feb", "User", at(2024, 2, 1));
    let state = test_state(&db);

    let json: Value = serde_json::from_str(&body_string(get(&state, "/api/report/users"))).unwrap();
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["jan", "feb", "mar"]);
}

#[test]
fn empty_store_is_an_empty_success() {
    let db = TestDb::new();
    let state = test_state(&db);

    let resp = get(&state, "/api/report/users");
    assert_eq!(resp.status(), 200);
    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true, "data": [] }));
}

#[test]
fn store_failure_is_a_generic_500() {
    let db = TestDb::broken();
    let state = test_state(&db);

    let resp = get(&state, "/api/report/users");
    assert_eq!(resp.status(), 500);

    let body = body_string(resp);
    assert!(!body.contains("no such table"), "store detail leaked: {body}");
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "message": "Error fetching users" })
    );
}

#[test]
fn unknown_routes_are_not_found() {
    let db = TestDb::new();
    let state = test_state(&db);

    assert_eq!(get(&state, "/api/report/nope").status(), 404);
    assert_eq!(get(&state, "/users").status(), 404);
}
