// src/domain/listing.rs

use crate::domain::pricing::PricingFields;
use crate::domain::promotion::PromotionFlags;

/// One row of a browse result: everything a card needs, including the
/// promotion flags the placement engine and badge resolver read.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub vehicle_type: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub mileage_km: Option<i64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub location: String,
    pub thumbnail: Option<String>,
    pub view_count: i64,
    pub is_sold: bool,
    pub created_at: i64,
    pub promotions: PromotionFlags,
    pub pricing: PricingFields,
}

/// Full detail-page record. The seller is resolved separately (once, at
/// fetch time) into a `Seller` value via the profiles store.
#[derive(Debug, Clone)]
pub struct ListingDetail {
    pub summary: ListingSummary,
    pub seller_id: i64,
    pub description: Option<String>,
    pub color: Option<String>,
    pub seats: Option<i64>,
    pub engine_cc: Option<i64>,
    pub payload_kg: Option<i64>,
    pub photos: Vec<String>,
}
