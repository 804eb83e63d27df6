use maud::{html, Markup};

use crate::db::listings::ListingFilter;
use crate::domain::sections::RenderPlan;
use crate::templates::components::search_form;
use crate::templates::desktop_layout;
use crate::templates::pages::browse::feed;

pub fn home_page(plan: &RenderPlan, now: i64, signed_in: bool) -> Markup {
    desktop_layout(
        "Home",
        signed_in,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Buy and sell vehicles across Ethiopia" }
                    p class="lead" {
                        "Cash sales and bank loan takeovers, from private sellers and dealers."
                    }
                    (search_form(&ListingFilter::default()))
                }

                (feed(plan, now))
            }
        },
    )
}
