// src/domain/promotion.rs

/// Promotion state as stored on a listing row: one flag per tier plus an
/// optional expiry (unix seconds). A missing expiry means the promotion does
/// not lapse on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionFlags {
    pub is_featured: bool,
    pub featured_until: Option<i64>,
    pub is_top_spot: bool,
    pub top_spot_until: Option<i64>,
    pub is_boosted: bool,
    pub boosted_until: Option<i64>,
    pub is_urgent: bool,
    pub urgent_until: Option<i64>,
}

/// The flags that are actually live at a given instant. This is the only
/// place expiry is checked; everything downstream (badges, buckets) consumes
/// this and never looks at timestamps again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivePromotions {
    pub featured: bool,
    pub top_spot: bool,
    pub boosted: bool,
    pub urgent: bool,
}

impl PromotionFlags {
    /// Evaluate every flag against `now`. An expiry exactly equal to `now`
    /// counts as lapsed.
    pub fn active_at(&self, now: i64) -> ActivePromotions {
        ActivePromotions {
            featured: flag_active(self.is_featured, self.featured_until, now),
            top_spot: flag_active(self.is_top_spot, self.top_spot_until, now),
            boosted: flag_active(self.is_boosted, self.boosted_until, now),
            urgent: flag_active(self.is_urgent, self.urgent_until, now),
        }
    }
}

impl ActivePromotions {
    pub fn any(&self) -> bool {
        self.featured || self.top_spot || self.boosted || self.urgent
    }
}

fn flag_active(flag: bool, until: Option<i64>, now: i64) -> bool {
    flag && until.map(|t| t > now).unwrap_or(true)
}
