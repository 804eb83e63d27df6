use maud::{html, Markup};

use crate::db::listings::ListingFilter;
use crate::domain::posting::VehicleType;

/// The browse filter bar. Submits as a plain GET so results are linkable.
pub fn search_form(filter: &ListingFilter) -> Markup {
    let selected_type = filter.vehicle_type.as_deref().unwrap_or("");

    html! {
        form class="search-form" action="/listings" method="get" {
            select name="vehicle_type" {
                option value="" selected[selected_type.is_empty()] { "Any vehicle" }
                @for vt in VehicleType::ALL {
                    option value=(vt.as_str()) selected[selected_type == vt.as_str()] {
                        (vt.label())
                    }
                }
            }
            input type="text" name="make" placeholder="Make"
                value=(filter.make.as_deref().unwrap_or(""));
            input type="text" name="model" placeholder="Model"
                value=(filter.model.as_deref().unwrap_or(""));
            input type="number" name="min_price" placeholder="Min price"
                value=(filter.min_price.map(|p| p.to_string()).unwrap_or_default());
            input type="number" name="max_price" placeholder="Max price"
                value=(filter.max_price.map(|p| p.to_string()).unwrap_or_default());
            input type="text" name="location" placeholder="Location"
                value=(filter.location.as_deref().unwrap_or(""));
            button type="submit" { "Search" }
        }
    }
}
