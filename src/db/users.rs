// src/db/users.rs
use crate::domain::UserRecord;
use crate::errors::ServerError;
use rusqlite::Connection;

/// All users, oldest first. `password` is not part of the projection.
pub fn list_users(conn: &Connection) -> Result<Vec<UserRecord>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT id, first_name, last_name, email, account_type, created_at
            FROM users
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare list users failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
                account_type: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list users failed: {e}")))?;

    let mut users = Vec::new();
    for r in rows {
        users.push(r.map_err(|e| ServerError::DbError(format!("read user row failed: {e}")))?);
    }
    Ok(users)
}
