use maud::{html, Markup};

use crate::domain::badges::{resolve_badges, BadgeSize, BadgeStyle};
use crate::domain::listing::ListingDetail;
use crate::domain::pricing::{resolve_pricing, PricingMode};
use crate::domain::seller::Seller;
use crate::templates::components::{badge_row, format_amount, price_block};
use crate::templates::desktop_layout;

pub struct ListingPageVm<'a> {
    pub detail: &'a ListingDetail,
    pub seller: &'a Seller,
    pub now: i64,
    pub signed_in: bool,
}

pub fn listing_page(vm: &ListingPageVm) -> Markup {
    let listing = &vm.detail.summary;
    let badges = resolve_badges(
        &listing.promotions.active_at(vm.now),
        &BadgeStyle {
            size: BadgeSize::Large,
            show_label: true,
        },
    );
    let price = resolve_pricing(&listing.pricing, None);

    desktop_layout(
        &listing.title,
        vm.signed_in,
        html! {
            main class="container listing-detail" {
                (badge_row(&badges))
                @if listing.is_sold {
                    p class="sold-banner" { "This vehicle has been sold." }
                }
                h1 { (listing.title) }
                p class="detail-meta" {
                    (listing.location) " · " (listing.view_count) " views"
                }

                @if !vm.detail.photos.is_empty() {
                    div class="photo-strip" {
                        @for photo in &vm.detail.photos {
                            img src=(photo) alt=(listing.title);
                        }
                    }
                }

                (price_block(&price))

                section class="card" {
                    h3 { "Specifications" }
                    ul class="spec-list" {
                        li { "Make: " (listing.make) }
                        li { "Model: " (listing.model) }
                        li { "Year: " (listing.year) }
                        @if let Some(mileage) = listing.mileage_km {
                            li { "Mileage: " (mileage) " km" }
                        }
                        @if let Some(fuel) = &listing.fuel_type {
                            li { "Fuel: " (fuel) }
                        }
                        @if let Some(transmission) = &listing.transmission {
                            li { "Transmission: " (transmission) }
                        }
                        @if let Some(color) = &vm.detail.color {
                            li { "Color: " (color) }
                        }
                        @if let Some(seats) = vm.detail.seats {
                            li { "Seats: " (seats) }
                        }
                        @if let Some(engine_cc) = vm.detail.engine_cc {
                            li { "Engine: " (engine_cc) " cc" }
                        }
                        @if let Some(payload) = vm.detail.payload_kg {
                            li { "Payload: " (payload) " kg" }
                        }
                    }
                }

                @if let Some(description) = &vm.detail.description {
                    section class="card" {
                        h3 { "Description" }
                        p { (description) }
                    }
                }

                (seller_card(vm.seller))

                @if listing.pricing.mode() == PricingMode::Cash && !listing.is_sold {
                    (estimate_card(&listing.id, listing.pricing.price))
                }
            }
        },
    )
}

fn seller_card(seller: &Seller) -> Markup {
    html! {
        section class="card seller-card" {
            h3 { (seller.kind_label()) }
            p { strong { (seller.name()) } }
            @if let Some(phone) = seller.phone() {
                p { a href=(format!("tel:{phone}")) { (phone) } }
            }
            @if let Some(location) = seller.location() {
                p { (location) }
            }
            @if let Seller::Dealer(dealer) = seller {
                @if let Some(about) = &dealer.about {
                    p class="dealer-about" { (about) }
                }
            }
        }
    }
}

/// Monthly-payment estimator for cash listings. The math runs server-side;
/// htmx swaps the result in.
fn estimate_card(listing_id: &str, price: i64) -> Markup {
    html! {
        section class="card" id="estimate-card" {
            h3 { "Estimate a monthly payment" }
            p { "Vehicle price: " strong { (format_amount(price)) } }
            form
                hx-get=(format!("/listings/{listing_id}/estimate"))
                hx-target="#estimate-result"
                hx-swap="innerHTML"
            {
                label { "Down payment"
                    input type="number" name="down_payment" value="0" min="0";
                }
                label { "Annual rate (%)"
                    input type="number" name="annual_rate_pct" value="12" step="0.1" min="0";
                }
                label { "Months"
                    input type="number" name="months" value="60" min="1";
                }
                button type="submit" { "Estimate" }
            }
            div id="estimate-result" {}
        }
    }
}

/// The htmx partial: either a payment figure or why there isn't one.
pub fn estimate_result(payment: Option<i64>) -> Markup {
    html! {
        @match payment {
            Some(amount) => {
                p class="estimate-amount" {
                    "Estimated payment: " strong { (format_amount(amount)) } " / month"
                }
            }
            None => {
                p class="estimate-none" {
                    "No payment can be computed for those inputs."
                }
            }
        }
    }
}
