use maud::{html, Markup};

use crate::domain::badges::{resolve_badges, BadgeStyle};
use crate::domain::listing::ListingSummary;
use crate::domain::pricing::resolve_pricing;
use crate::templates::components::badges::badge_row;
use crate::templates::components::price::format_amount;

/// One browse-feed card. Badges come from the listing's live promotions at
/// `now`; the displayed amount from the pricing resolver.
pub fn listing_card(listing: &ListingSummary, now: i64) -> Markup {
    let badges = resolve_badges(
        &listing.promotions.active_at(now),
        &BadgeStyle::default(),
    );
    let price = resolve_pricing(&listing.pricing, None);

    html! {
        a class="card listing-card" href=(format!("/listings/{}", listing.id)) {
            @if let Some(thumbnail) = &listing.thumbnail {
                img class="card-thumb" src=(thumbnail) alt=(listing.title);
            } @else {
                div class="card-thumb placeholder" {}
            }

            div class="card-body" {
                (badge_row(&badges))
                h2 { (listing.title) }

                p class="card-specs" {
                    (listing.year)
                    @if let Some(mileage) = listing.mileage_km {
                        " · " (mileage) " km"
                    }
                    @if let Some(fuel) = &listing.fuel_type {
                        " · " (fuel)
                    }
                    @if let Some(transmission) = &listing.transmission {
                        " · " (transmission)
                    }
                }

                p class="card-price" {
                    strong { (format_amount(price.primary_amount)) }
                    @if price.negotiable {
                        span class="price-negotiable" { " Negotiable" }
                    }
                }

                p class="card-meta" {
                    (listing.location) " · " (listing.view_count) " views"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::PricingFields;
    use crate::domain::promotion::PromotionFlags;

    fn summary() -> ListingSummary {
        ListingSummary {
            id: "abc123".to_string(),
            title: "2019 Toyota Corolla".to_string(),
            vehicle_type: "car".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2019,
            mileage_km: Some(45_000),
            fuel_type: Some("petrol".to_string()),
            transmission: Some("automatic".to_string()),
            location: "Addis Ababa".to_string(),
            thumbnail: None,
            view_count: 12,
            is_sold: false,
            created_at: 0,
            promotions: PromotionFlags {
                is_urgent: true,
                ..Default::default()
            },
            pricing: PricingFields {
                price: 1_200_000,
                ..Default::default()
            },
        }
    }

    #[test]
    fn card_links_and_shows_badge_and_price() {
        let rendered = listing_card(&summary(), 100).into_string();
        assert!(rendered.contains("/listings/abc123"));
        assert!(rendered.contains("badge-urgent"));
        assert!(rendered.contains("1,200,000 Br"));
        assert!(rendered.contains("45000 km"));
    }

    #[test]
    fn expired_promotion_shows_no_badge() {
        let mut listing = summary();
        listing.promotions.urgent_until = Some(50);
        let rendered = listing_card(&listing, 100).into_string();
        assert!(!rendered.contains("badge-urgent"));
    }
}
