// src/db/drafts.rs
use rusqlite::{params, OptionalExtension};

use crate::db::connection::Database;
use crate::domain::posting::PostDraft;
use crate::errors::ServerError;

/// One draft per user, stored as JSON so the posting flow can be resumed in
/// a later session exactly where it was left.
pub fn save_draft(
    db: &Database,
    user_id: i64,
    draft: &PostDraft,
    now: i64,
) -> Result<(), ServerError> {
    let json = serde_json::to_string(draft)
        .map_err(|e| ServerError::DbError(format!("serialize draft failed: {e}")))?;

    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into listing_drafts (user_id, draft_json, updated_at)
            values (?1, ?2, ?3)
            on conflict(user_id) do update set
                draft_json = excluded.draft_json,
                updated_at = excluded.updated_at
            "#,
            params![user_id, json, now],
        )
        .map_err(|e| ServerError::DbError(format!("save draft failed: {e}")))?;
        Ok(())
    })
}

/// A draft that no longer parses (older shape) is dropped rather than
/// wedging the posting flow.
pub fn load_draft(db: &Database, user_id: i64) -> Result<Option<PostDraft>, ServerError> {
    let json: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "select draft_json from listing_drafts where user_id = ?",
            params![user_id],
            |r| r.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("load draft failed: {e}")))
    })?;

    let Some(json) = json else {
        return Ok(None);
    };

    match serde_json::from_str(&json) {
        Ok(draft) => Ok(Some(draft)),
        Err(e) => {
            eprintln!("Dropping unreadable draft for user {user_id}: {e}");
            delete_draft(db, user_id)?;
            Ok(None)
        }
    }
}

pub fn delete_draft(db: &Database, user_id: i64) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            "delete from listing_drafts where user_id = ?",
            params![user_id],
        )
        .map_err(|e| ServerError::DbError(format!("delete draft failed: {e}")))?;
        Ok(())
    })
}
