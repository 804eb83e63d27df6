use maud::{html, Markup};

use crate::db::listings::PromotionTier;
use crate::domain::badges::{resolve_badges, BadgeStyle};
use crate::domain::listing::ListingSummary;
use crate::domain::pricing::resolve_pricing;
use crate::domain::seller::Seller;
use crate::templates::components::{badge_row, format_amount};
use crate::templates::desktop_layout;

pub struct AccountVm<'a> {
    pub email: &'a str,
    pub seller: &'a Seller,
    pub listings: &'a [ListingSummary],
    pub now: i64,
}

pub fn account_page(vm: &AccountVm) -> Markup {
    desktop_layout(
        "Account",
        true,
        html! {
            main class="container" {
                h1 { "Your account" }
                p { "Signed in as " strong { (vm.email) } }

                (profile_card(vm.seller))
                (business_card(vm.seller))

                section class="card" {
                    h3 { "Your listings" }
                    @if vm.listings.is_empty() {
                        p { "Nothing posted yet. " a href="/sell" { "Sell your vehicle" } "." }
                    } @else {
                        @for listing in vm.listings {
                            (listing_row(listing, vm.now))
                        }
                    }
                }
            }
        },
    )
}

fn profile_card(seller: &Seller) -> Markup {
    let (name, phone, location) = match seller {
        Seller::Private(p) => (
            p.display_name.as_str(),
            p.phone.as_deref().unwrap_or(""),
            p.location.as_deref().unwrap_or(""),
        ),
        // A dealer's personal details live behind the business profile;
        // leave the form blank for fresh input.
        Seller::Dealer(_) => ("", "", ""),
    };

    html! {
        section class="card" {
            h3 { "Profile" }
            form action="/account/profile" method="post" {
                label { "Display name"
                    input type="text" name="display_name" value=(name) required;
                }
                label { "Phone"
                    input type="text" name="phone" value=(phone);
                }
                label { "Location"
                    input type="text" name="location" value=(location);
                }
                button type="submit" { "Save profile" }
            }
        }
    }
}

fn business_card(seller: &Seller) -> Markup {
    let (business_name, phone, location, about) = match seller {
        Seller::Dealer(d) => (
            d.business_name.as_str(),
            d.phone.as_deref().unwrap_or(""),
            d.location.as_deref().unwrap_or(""),
            d.about.as_deref().unwrap_or(""),
        ),
        Seller::Private(_) => ("", "", "", ""),
    };

    html! {
        section class="card" {
            h3 { "Dealer profile" }
            @if seller.is_dealer() {
                p { "Your listings are shown as dealer listings." }
            } @else {
                p { "Fill this in to sell as a registered dealer." }
            }
            form action="/account/business" method="post" {
                label { "Business name"
                    input type="text" name="business_name" value=(business_name);
                }
                label { "Phone"
                    input type="text" name="phone" value=(phone);
                }
                label { "Location"
                    input type="text" name="location" value=(location);
                }
                label { "About"
                    textarea name="about" rows="3" { (about) }
                }
                p class="hint" { "Leave the business name empty to switch back to a private profile." }
                button type="submit" { "Save dealer profile" }
            }
        }
    }
}

fn listing_row(listing: &ListingSummary, now: i64) -> Markup {
    let badges = resolve_badges(&listing.promotions.active_at(now), &BadgeStyle::default());
    let price = resolve_pricing(&listing.pricing, None);

    html! {
        div class="account-listing-row" {
            div {
                a href=(format!("/listings/{}", listing.id)) { strong { (listing.title) } }
                (badge_row(&badges))
                p class="card-meta" {
                    (format_amount(price.primary_amount))
                    " · " (listing.view_count) " views"
                    @if listing.is_sold { " · sold" }
                }
            }

            @if !listing.is_sold {
                div class="account-listing-actions" {
                    form action=(format!("/listings/{}/promote", listing.id)) method="post" {
                        select name="tier" {
                            @for (tier, label) in [
                                (PromotionTier::Featured, "Featured"),
                                (PromotionTier::TopSpot, "Top Spot"),
                                (PromotionTier::Boosted, "Boosted"),
                                (PromotionTier::Urgent, "Urgent"),
                            ] {
                                option value=(tier.as_str()) { (label) }
                            }
                        }
                        input type="number" name="days" min="1" placeholder="days" value="7";
                        button type="submit" { "Promote" }
                    }
                    form action=(format!("/listings/{}/sold", listing.id)) method="post" {
                        button type="submit" { "Mark sold" }
                    }
                }
            }
        }
    }
}
