use maud::{html, Markup};

use crate::db::listings::ListingFilter;
use crate::domain::sections::{PlanItem, RenderPlan, Section, SectionKind};
use crate::templates::components::{listing_card, search_form};
use crate::templates::desktop_layout;

pub struct BrowseVm<'a> {
    pub filter: &'a ListingFilter,
    pub plan: RenderPlan,
    pub now: i64,
    pub signed_in: bool,
}

pub fn browse_page(vm: &BrowseVm) -> Markup {
    desktop_layout(
        "Browse listings",
        vm.signed_in,
        html! {
            main class="container" {
                h1 { "Find your next vehicle" }
                (search_form(vm.filter))
                (feed(&vm.plan, vm.now))
            }
        },
    )
}

/// Render a composed plan. The section composer has already decided order,
/// headings and separators; this just walks the items.
pub fn feed(plan: &RenderPlan, now: i64) -> Markup {
    html! {
        @match plan {
            RenderPlan::Empty => {
                div class="empty-state" {
                    p { "No listings match your search." }
                    p { a href="/sell" { "Be the first to post one." } }
                }
            }
            RenderPlan::Feed(items) => {
                @for item in items {
                    @match item {
                        PlanItem::Separator => {
                            hr class="feed-separator";
                        }
                        PlanItem::Section(section) => {
                            (feed_section(section, now))
                        }
                    }
                }
            }
        }
    }
}

fn feed_section(section: &Section, now: i64) -> Markup {
    html! {
        section class=(section_class(section.kind)) {
            @if let Some(heading) = section.heading {
                h2 { (heading) }
            }
            div class="card-grid" {
                @for listing in &section.listings {
                    (listing_card(listing, now))
                }
            }
        }
    }
}

fn section_class(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Featured => "feed-section feed-featured",
        SectionKind::TopSpot => "feed-section feed-top-spot",
        SectionKind::Boosted => "feed-section feed-boosted",
        SectionKind::Regular => "feed-section feed-regular",
    }
}
