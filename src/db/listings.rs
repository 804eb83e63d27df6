use crate::db::connection::Database;
use crate::domain::listing::{ListingDetail, ListingSummary};
use crate::domain::posting::NewListingInput;
use crate::domain::pricing::PricingFields;
use crate::domain::promotion::PromotionFlags;
use crate::errors::ServerError;
use base64::Engine;
use rand::RngCore;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Search/pagination window as it arrives from the query string. Filters are
/// applied in SQL; the placement engine only ever sees the resulting page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub location: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub const DEFAULT_PAGE_SIZE: i64 = 24;

/// A promotion tier as written by the account page. Mirrors the flag/expiry
/// column pairs on the listings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionTier {
    Featured,
    TopSpot,
    Boosted,
    Urgent,
}

impl PromotionTier {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "featured" => Some(PromotionTier::Featured),
            "top_spot" => Some(PromotionTier::TopSpot),
            "boosted" => Some(PromotionTier::Boosted),
            "urgent" => Some(PromotionTier::Urgent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromotionTier::Featured => "featured",
            PromotionTier::TopSpot => "top_spot",
            PromotionTier::Boosted => "boosted",
            PromotionTier::Urgent => "urgent",
        }
    }

    fn flag_column(self) -> &'static str {
        match self {
            PromotionTier::Featured => "is_featured",
            PromotionTier::TopSpot => "is_top_spot",
            PromotionTier::Boosted => "is_boosted",
            PromotionTier::Urgent => "is_urgent",
        }
    }

    fn until_column(self) -> &'static str {
        match self {
            PromotionTier::Featured => "featured_until",
            PromotionTier::TopSpot => "top_spot_until",
            PromotionTier::Boosted => "boosted_until",
            PromotionTier::Urgent => "urgent_until",
        }
    }
}

/// Listing ids are opaque url-safe tokens, not rowids.
fn new_listing_id() -> String {
    let mut bytes = [0u8; 9];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

const SUMMARY_COLUMNS: &str = "
    l.id,                    -- 0
    l.title,                 -- 1
    l.vehicle_type,          -- 2
    l.make,                  -- 3
    l.model,                 -- 4
    l.year,                  -- 5
    l.mileage_km,            -- 6
    l.fuel_type,             -- 7
    l.transmission,          -- 8
    l.location,              -- 9
    (select url from listing_photos p
      where p.listing_id = l.id
      order by p.position limit 1), -- 10 thumbnail
    l.view_count,            -- 11
    l.is_sold,               -- 12
    l.created_at,            -- 13

    l.is_featured,           -- 14
    l.featured_until,        -- 15
    l.is_top_spot,           -- 16
    l.top_spot_until,        -- 17
    l.is_boosted,            -- 18
    l.boosted_until,         -- 19
    l.is_urgent,             -- 20
    l.urgent_until,          -- 21

    l.pricing_type,          -- 22
    l.price,                 -- 23
    l.negotiable,            -- 24
    l.finance_type,          -- 25
    l.finance_provider,      -- 26
    l.original_amount,       -- 27
    l.outstanding_balance,   -- 28
    l.asking_price,          -- 29
    l.monthly_payment,       -- 30
    l.remaining_term_months, -- 31
    l.early_settlement       -- 32
";

fn summary_from_row(row: &Row) -> rusqlite::Result<ListingSummary> {
    Ok(ListingSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        vehicle_type: row.get(2)?,
        make: row.get(3)?,
        model: row.get(4)?,
        year: row.get(5)?,
        mileage_km: row.get(6)?,
        fuel_type: row.get(7)?,
        transmission: row.get(8)?,
        location: row.get(9)?,
        thumbnail: row.get(10)?,
        view_count: row.get(11)?,
        is_sold: row.get(12)?,
        created_at: row.get(13)?,
        promotions: PromotionFlags {
            is_featured: row.get(14)?,
            featured_until: row.get(15)?,
            is_top_spot: row.get(16)?,
            top_spot_until: row.get(17)?,
            is_boosted: row.get(18)?,
            boosted_until: row.get(19)?,
            is_urgent: row.get(20)?,
            urgent_until: row.get(21)?,
        },
        pricing: PricingFields {
            pricing_type: row.get(22)?,
            price: row.get(23)?,
            negotiable: row.get(24)?,
            finance_type: row.get(25)?,
            finance_provider: row.get(26)?,
            original_amount: row.get(27)?,
            outstanding_balance: row.get(28)?,
            asking_price: row.get(29)?,
            monthly_payment: row.get(30)?,
            remaining_term_months: row.get(31)?,
            early_settlement: row.get(32)?,
        },
    })
}

/// Filtered, paginated browse query. Unsold listings only, newest first.
/// Classification into placement buckets happens on the returned page.
pub fn browse_listings(
    db: &Database,
    filter: &ListingFilter,
) -> Result<Vec<ListingSummary>, ServerError> {
    let mut sql = format!("select {SUMMARY_COLUMNS} from listings l where l.is_sold = 0");
    let mut values: Vec<Value> = Vec::new();

    if let Some(vt) = filter.vehicle_type.as_deref().filter(|v| !v.is_empty()) {
        sql.push_str(" and l.vehicle_type = ?");
        values.push(Value::from(vt.to_string()));
    }
    if let Some(make) = filter.make.as_deref().filter(|v| !v.is_empty()) {
        sql.push_str(" and l.make = ? collate nocase");
        values.push(Value::from(make.to_string()));
    }
    if let Some(model) = filter.model.as_deref().filter(|v| !v.is_empty()) {
        sql.push_str(" and l.model = ? collate nocase");
        values.push(Value::from(model.to_string()));
    }
    if let Some(min) = filter.min_price {
        sql.push_str(" and l.price >= ?");
        values.push(Value::from(min));
    }
    if let Some(max) = filter.max_price {
        sql.push_str(" and l.price <= ?");
        values.push(Value::from(max));
    }
    if let Some(location) = filter.location.as_deref().filter(|v| !v.is_empty()) {
        sql.push_str(" and l.location like ?");
        values.push(Value::from(format!("%{location}%")));
    }

    sql.push_str(" order by l.created_at desc, l.id limit ? offset ?");
    values.push(Value::from(filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1)));
    values.push(Value::from(filter.offset.unwrap_or(0).max(0)));

    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), summary_from_row)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// Everything the seller posted, sold or not, newest first.
pub fn listings_by_seller(
    db: &Database,
    seller_id: i64,
) -> Result<Vec<ListingSummary>, ServerError> {
    let sql = format!(
        "select {SUMMARY_COLUMNS} from listings l where l.seller_id = ? order by l.created_at desc, l.id"
    );
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let rows = stmt
            .query_map(params![seller_id], summary_from_row)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

pub fn get_listing(db: &Database, id: &str) -> Result<Option<ListingDetail>, ServerError> {
    let sql = format!(
        "select {SUMMARY_COLUMNS},
            l.seller_id,   -- 33
            l.description, -- 34
            l.color,       -- 35
            l.seats,       -- 36
            l.engine_cc,   -- 37
            l.payload_kg   -- 38
         from listings l where l.id = ?"
    );

    db.with_conn(|conn| {
        let detail = conn
            .query_row(&sql, params![id], |row| {
                Ok(ListingDetail {
                    summary: summary_from_row(row)?,
                    seller_id: row.get(33)?,
                    description: row.get(34)?,
                    color: row.get(35)?,
                    seats: row.get(36)?,
                    engine_cc: row.get(37)?,
                    payload_kg: row.get(38)?,
                    photos: Vec::new(),
                })
            })
            .optional()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let Some(mut detail) = detail else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare("select url from listing_photos where listing_id = ? order by position")
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let rows = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        for row in rows {
            detail
                .photos
                .push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }

        Ok(Some(detail))
    })
}

/// Insert a published draft and its photos in one transaction.
/// Returns the new listing id.
pub fn create_listing(
    db: &Database,
    seller_id: i64,
    input: &NewListingInput,
    now: i64,
) -> Result<String, ServerError> {
    let id = new_listing_id();

    db.with_conn(|conn: &mut Connection| {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        tx.execute(
            r#"
            insert into listings (
                id, seller_id, title,
                vehicle_type, make, model, year,
                mileage_km, fuel_type, transmission, color, seats, engine_cc, payload_kg,
                location, description,
                pricing_type, price, negotiable,
                finance_type, finance_provider, original_amount, outstanding_balance,
                asking_price, monthly_payment, remaining_term_months, early_settlement,
                created_at
            ) values (
                ?1, ?2, ?3,
                ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                ?15, ?16,
                ?17, ?18, ?19,
                ?20, ?21, ?22, ?23,
                ?24, ?25, ?26, ?27,
                ?28
            )
            "#,
            params![
                id,
                seller_id,
                input.title(),
                input.vehicle_type.as_str(),
                input.make,
                input.model,
                input.year,
                input.mileage_km,
                input.fuel_type,
                input.transmission,
                input.color,
                input.seats,
                input.engine_cc,
                input.payload_kg,
                input.location,
                input.description,
                input.pricing.pricing_type,
                input.pricing.price,
                input.pricing.negotiable,
                input.pricing.finance_type,
                input.pricing.finance_provider,
                input.pricing.original_amount,
                input.pricing.outstanding_balance,
                input.pricing.asking_price,
                input.pricing.monthly_payment,
                input.pricing.remaining_term_months,
                input.pricing.early_settlement,
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

        for (position, url) in input.photos.iter().enumerate() {
            tx.execute(
                "insert into listing_photos (listing_id, position, url) values (?1, ?2, ?3)",
                params![id, position as i64, url],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })?;

    Ok(id)
}

pub fn increment_view_count(db: &Database, id: &str) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            "update listings set view_count = view_count + 1 where id = ?",
            params![id],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

/// Mark a listing sold. Owner-scoped: returns false when the listing does
/// not exist or belongs to someone else.
pub fn mark_sold(db: &Database, id: &str, seller_id: i64) -> Result<bool, ServerError> {
    db.with_conn(|conn| {
        let updated = conn
            .execute(
                "update listings set is_sold = 1 where id = ? and seller_id = ?",
                params![id, seller_id],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(updated == 1)
    })
}

/// Apply a promotion tier to an owned listing: sets the flag and its expiry
/// (None = no expiry). Returns false when not owned/found.
pub fn apply_promotion(
    db: &Database,
    id: &str,
    seller_id: i64,
    tier: PromotionTier,
    until: Option<i64>,
) -> Result<bool, ServerError> {
    let sql = format!(
        "update listings set {} = 1, {} = ? where id = ? and seller_id = ?",
        tier.flag_column(),
        tier.until_column()
    );
    db.with_conn(|conn| {
        let updated = conn
            .execute(&sql, params![until, id, seller_id])
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(updated == 1)
    })
}
