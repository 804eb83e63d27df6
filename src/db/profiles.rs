// src/db/profiles.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::connection::Database;
use crate::domain::seller::{DealerProfile, PrivateSeller, Seller};
use crate::errors::ServerError;

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BusinessUpdate {
    pub business_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
}

pub fn upsert_profile(
    db: &Database,
    user_id: i64,
    update: &ProfileUpdate,
    now: i64,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into profiles (user_id, display_name, phone, location, updated_at)
            values (?1, ?2, ?3, ?4, ?5)
            on conflict(user_id) do update set
                display_name = excluded.display_name,
                phone = excluded.phone,
                location = excluded.location,
                updated_at = excluded.updated_at
            "#,
            params![user_id, update.display_name, update.phone, update.location, now],
        )
        .map_err(|e| ServerError::DbError(format!("upsert profile failed: {e}")))?;
        Ok(())
    })
}

pub fn upsert_business_profile(
    db: &Database,
    user_id: i64,
    update: &BusinessUpdate,
    now: i64,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into business_profiles (user_id, business_name, phone, location, about, updated_at)
            values (?1, ?2, ?3, ?4, ?5, ?6)
            on conflict(user_id) do update set
                business_name = excluded.business_name,
                phone = excluded.phone,
                location = excluded.location,
                about = excluded.about,
                updated_at = excluded.updated_at
            "#,
            params![
                user_id,
                update.business_name,
                update.phone,
                update.location,
                update.about,
                now
            ],
        )
        .map_err(|e| ServerError::DbError(format!("upsert business profile failed: {e}")))?;
        Ok(())
    })
}

pub fn delete_business_profile(db: &Database, user_id: i64) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            "delete from business_profiles where user_id = ?",
            params![user_id],
        )
        .map_err(|e| ServerError::DbError(format!("delete business profile failed: {e}")))?;
        Ok(())
    })
}

/// Resolve who a user is as a seller, once, at fetch time. A business
/// profile makes them a dealer; otherwise their personal profile (or, for a
/// bare account, the email's local part) makes them a private seller.
pub fn load_seller(conn: &Connection, user_id: i64) -> Result<Seller, ServerError> {
    let dealer = conn
        .query_row(
            "select business_name, phone, location, about
             from business_profiles where user_id = ?",
            params![user_id],
            |r| {
                Ok(DealerProfile {
                    business_name: r.get(0)?,
                    phone: r.get(1)?,
                    location: r.get(2)?,
                    about: r.get(3)?,
                })
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select business profile failed: {e}")))?;

    if let Some(profile) = dealer {
        return Ok(Seller::Dealer(profile));
    }

    let private = conn
        .query_row(
            "select display_name, phone, location from profiles where user_id = ?",
            params![user_id],
            |r| {
                Ok(PrivateSeller {
                    display_name: r.get(0)?,
                    phone: r.get(1)?,
                    location: r.get(2)?,
                })
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select profile failed: {e}")))?;

    if let Some(profile) = private {
        return Ok(Seller::Private(profile));
    }

    // Bare account with no profile yet.
    let email: String = conn
        .query_row(
            "select email from users where id = ?",
            params![user_id],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("select user email failed: {e}")))?;
    let display_name = email.split('@').next().unwrap_or("seller").to_string();

    Ok(Seller::Private(PrivateSeller {
        display_name,
        phone: None,
        location: None,
    }))
}

pub fn seller_for_user(db: &Database, user_id: i64) -> Result<Seller, ServerError> {
    db.with_conn(|conn| load_seller(conn, user_id))
}
