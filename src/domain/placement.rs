// src/domain/placement.rs

use crate::domain::listing::ListingSummary;

/// Featured placement is exclusive: at most this many listings per page.
pub const FEATURED_CAP: usize = 2;

/// The four disjoint buckets for one page of candidates. Every input listing
/// lands in exactly one.
#[derive(Debug, Default)]
pub struct Buckets {
    pub featured: Vec<ListingSummary>,
    pub top_spot: Vec<ListingSummary>,
    pub boosted: Vec<ListingSummary>,
    pub regular: Vec<ListingSummary>,
}

impl Buckets {
    pub fn total(&self) -> usize {
        self.featured.len() + self.top_spot.len() + self.boosted.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Partition a page of candidates into placement buckets.
///
/// Expiry is checked here, explicitly, via `PromotionFlags::active_at`: an
/// expired promotion never places or badges a listing, whatever the stored
/// boolean says. Bucket membership follows strict precedence (featured >
/// top spot > boosted > regular): a listing placed in a tier is never
/// re-tested for lower ones.
///
/// The featured bucket is capped at `FEATURED_CAP`. Winners are chosen
/// deterministically: soonest-expiring promotion first (indefinite ones
/// last), then newest listing, then id. Candidates that lose the cap fall
/// through to the remaining precedence tests so no listing drops off the
/// page.
///
/// Pagination happens upstream in the store query; this sees only the
/// requested window.
pub fn classify(listings: Vec<ListingSummary>, now: i64) -> Buckets {
    // Indices remember the store's ordering: the classifier ranks featured
    // winners but never reorders the rest of the page.
    let mut featured_candidates: Vec<(usize, ListingSummary)> = Vec::new();
    let mut rest: Vec<(usize, ListingSummary)> = Vec::new();

    for (idx, listing) in listings.into_iter().enumerate() {
        if listing.promotions.active_at(now).featured {
            featured_candidates.push((idx, listing));
        } else {
            rest.push((idx, listing));
        }
    }

    featured_candidates.sort_by(|(_, a), (_, b)| featured_rank(a).cmp(&featured_rank(b)));
    let overflow =
        featured_candidates.split_off(FEATURED_CAP.min(featured_candidates.len()));

    // Cap losers rejoin the page at their original position.
    rest.extend(overflow);
    rest.sort_by_key(|(idx, _)| *idx);

    let mut buckets = Buckets {
        featured: featured_candidates.into_iter().map(|(_, l)| l).collect(),
        ..Default::default()
    };

    for (_, listing) in rest {
        let active = listing.promotions.active_at(now);
        if active.top_spot {
            buckets.top_spot.push(listing);
        } else if active.boosted {
            buckets.boosted.push(listing);
        } else {
            buckets.regular.push(listing);
        }
    }

    buckets
}

type FeaturedRank = (i64, i64, String);

fn featured_rank(listing: &ListingSummary) -> FeaturedRank {
    let expiry = listing.promotions.featured_until.unwrap_or(i64::MAX);
    (expiry, -listing.created_at, listing.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::promotion::PromotionFlags;

    fn listing(id: &str, promotions: PromotionFlags) -> ListingSummary {
        ListingSummary {
            id: id.to_string(),
            title: format!("2018 Test {id}"),
            vehicle_type: "car".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2018,
            mileage_km: Some(60_000),
            fuel_type: Some("petrol".to_string()),
            transmission: Some("automatic".to_string()),
            location: "Addis Ababa".to_string(),
            thumbnail: None,
            view_count: 0,
            is_sold: false,
            created_at: 0,
            promotions,
            pricing: Default::default(),
        }
    }

    fn featured() -> PromotionFlags {
        PromotionFlags {
            is_featured: true,
            ..Default::default()
        }
    }

    fn ids(bucket: &[ListingSummary]) -> Vec<&str> {
        bucket.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn every_listing_lands_in_exactly_one_bucket() {
        let all_flags = PromotionFlags {
            is_featured: true,
            is_top_spot: true,
            is_boosted: true,
            is_urgent: true,
            ..Default::default()
        };
        let input = vec![
            listing("a", featured()),
            listing("b", all_flags),
            listing("c", PromotionFlags {
                is_top_spot: true,
                is_boosted: true,
                ..Default::default()
            }),
            listing("d", PromotionFlags {
                is_boosted: true,
                ..Default::default()
            }),
            listing("e", PromotionFlags::default()),
        ];

        let buckets = classify(input, 100);
        assert_eq!(buckets.total(), 5);
        // Precedence is exclusive: b carries every flag but only shows featured.
        assert_eq!(ids(&buckets.featured).len(), 2);
        assert!(ids(&buckets.featured).contains(&"a"));
        assert!(ids(&buckets.featured).contains(&"b"));
        assert_eq!(ids(&buckets.top_spot), vec!["c"]);
        assert_eq!(ids(&buckets.boosted), vec!["d"]);
        assert_eq!(ids(&buckets.regular), vec!["e"]);
    }

    #[test]
    fn featured_bucket_never_exceeds_cap() {
        let input: Vec<ListingSummary> = (0..5)
            .map(|i| listing(&format!("f{i}"), featured()))
            .collect();
        let buckets = classify(input, 100);
        assert_eq!(buckets.featured.len(), FEATURED_CAP);
        // Cap losers stay on the page.
        assert_eq!(buckets.total(), 5);
        assert_eq!(buckets.regular.len(), 3);
    }

    #[test]
    fn featured_cap_prefers_soonest_expiring_then_newest() {
        let mut indefinite = listing("indefinite", featured());
        indefinite.created_at = 50;

        let mut lapsing_soon = listing("lapsing-soon", featured());
        lapsing_soon.promotions.featured_until = Some(200);
        lapsing_soon.created_at = 10;

        let mut lapsing_later = listing("lapsing-later", featured());
        lapsing_later.promotions.featured_until = Some(900);
        lapsing_later.created_at = 99;

        let buckets = classify(vec![indefinite, lapsing_soon, lapsing_later], 100);
        assert_eq!(ids(&buckets.featured), vec!["lapsing-soon", "lapsing-later"]);
        assert_eq!(ids(&buckets.regular), vec!["indefinite"]);
    }

    #[test]
    fn featured_cap_loser_falls_to_its_next_active_tier() {
        let mut winner_a = listing("wa", featured());
        winner_a.promotions.featured_until = Some(200);
        let mut winner_b = listing("wb", featured());
        winner_b.promotions.featured_until = Some(300);

        let mut loser = listing("loser", featured());
        loser.promotions.is_top_spot = true;

        let buckets = classify(vec![loser, winner_a, winner_b], 100);
        assert_eq!(ids(&buckets.featured), vec!["wa", "wb"]);
        assert_eq!(ids(&buckets.top_spot), vec!["loser"]);
    }

    #[test]
    fn expired_promotions_classify_as_regular() {
        let mut lapsed = listing("lapsed", featured());
        lapsed.promotions.featured_until = Some(90);

        let mut lapsed_boost = listing("lapsed-boost", PromotionFlags {
            is_boosted: true,
            boosted_until: Some(50),
            ..Default::default()
        });
        lapsed_boost.created_at = 1;

        let buckets = classify(vec![lapsed, lapsed_boost], 100);
        assert!(buckets.featured.is_empty());
        assert!(buckets.boosted.is_empty());
        assert_eq!(buckets.regular.len(), 2);
    }

    #[test]
    fn urgent_alone_is_a_badge_not_a_tier() {
        let input = vec![listing("u", PromotionFlags {
            is_urgent: true,
            ..Default::default()
        })];
        let buckets = classify(input, 100);
        assert_eq!(ids(&buckets.regular), vec!["u"]);
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let buckets = classify(Vec::new(), 100);
        assert!(buckets.is_empty());
    }
}
