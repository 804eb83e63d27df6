use crate::auth::sessions::create_session;
use crate::db::auth::get_or_create_user;
use crate::db::connection::{init_db, Database};
use astra::Response;
use rusqlite::Connection;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Apply the production schema to a bare (usually in-memory) connection.
pub fn apply_schema(conn: &Connection) {
    conn.execute_batch(include_str!("../../sql/schema.sql"))
        .expect("schema should apply cleanly");
}

/// Get current unix timestamp
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Fresh temp-file test DB using the production schema. Every caller gets
/// its own file (the per-thread connection slot means a test must stick to
/// one database anyway).
pub fn test_db(name: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "motormart_{name}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db, "sql/schema.sql").unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn seed_user(db: &Database, email: &str) -> i64 {
    db.with_conn(|conn| get_or_create_user(conn, email, now_unix()))
        .expect("seed user")
}

/// Create a signed-in session and return the Cookie header value for it.
pub fn login_cookie(db: &Database, email: &str) -> String {
    let user_id = seed_user(db, email);
    let token = db
        .with_conn(|conn| create_session(conn, user_id, now_unix()))
        .expect("create session");
    format!("session={token}")
}

pub fn read_body(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .expect("response body should be utf-8");
    body
}
