use maud::{html, Markup};

use crate::domain::posting::{
    field_rule, visible_fields, FieldError, FieldRule, PostDraft, PostStep, SpecField,
    VehicleType,
};
use crate::domain::pricing::PricingMode;
use crate::templates::desktop_layout;

pub struct PostVm<'a> {
    pub draft: &'a PostDraft,
    pub errors: &'a [FieldError],
}

pub fn post_page(vm: &PostVm) -> Markup {
    desktop_layout(
        "Sell your vehicle",
        true,
        html! {
            main class="container narrow" {
                h1 { "Sell your vehicle" }
                (step_indicator(vm.draft.step))
                (error_list(vm.errors))
                (step_form(vm.draft))
            }
        },
    )
}

fn step_indicator(current: PostStep) -> Markup {
    html! {
        ol class="step-indicator" {
            @for step in PostStep::ALL {
                li class=(if step == current { "step current" } else { "step" }) {
                    span class="step-number" { (step.position()) }
                    span class="step-label" { (step.label()) }
                }
            }
        }
    }
}

fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="error-banner" role="alert" {
                ul {
                    @for error in errors {
                        li { (error.field) ": " (error.message) }
                    }
                }
            }
        }
    }
}

fn step_form(draft: &PostDraft) -> Markup {
    let action = match draft.step {
        PostStep::Review => "/sell/publish",
        _ => "/sell/step",
    };
    let submit_label = match draft.step {
        PostStep::Review => "Publish listing",
        _ => "Continue",
    };

    html! {
        form class="post-form" action=(action) method="post" {
            @match draft.step {
                PostStep::Vehicle => { (vehicle_fields(draft)) }
                PostStep::Specs => { (spec_fields(draft)) }
                PostStep::Pricing => { (pricing_fields(draft)) }
                PostStep::Photos => { (photo_fields(draft)) }
                PostStep::Review => { (review_summary(draft)) }
            }
            button type="submit" { (submit_label) }
        }
        @if draft.step.prev().is_some() {
            form action="/sell/back" method="post" {
                button type="submit" class="link-button" { "Back" }
            }
        }
    }
}

fn vehicle_fields(draft: &PostDraft) -> Markup {
    html! {
        label { "Vehicle type"
            select name="vehicle_type" required {
                option value="" disabled selected[draft.vehicle_type.is_none()] {
                    "Choose a type..."
                }
                @for vt in VehicleType::ALL {
                    option value=(vt.as_str()) selected[draft.vehicle_type == Some(vt)] {
                        (vt.label())
                    }
                }
            }
        }
        label { "Make"
            input type="text" name="make" value=(opt_str(&draft.make)) required;
        }
        label { "Model"
            input type="text" name="model" value=(opt_str(&draft.model)) required;
        }
        label { "Year"
            input type="number" name="year" value=(opt_num(draft.year)) required;
        }
        label { "Location"
            input type="text" name="location" value=(opt_str(&draft.location)) required;
        }
    }
}

/// Spec inputs come straight from the requirement table: hidden fields are
/// not rendered, required ones carry the attribute.
fn spec_fields(draft: &PostDraft) -> Markup {
    let Some(vt) = draft.vehicle_type else {
        return html! { p { "Choose a vehicle type first." } };
    };

    html! {
        @for field in visible_fields(vt) {
            @let required = field_rule(vt, field) == FieldRule::Required;
            label { (field.label())
                @match field {
                    SpecField::FuelType => {
                        select name="fuel_type" required[required] {
                            option value="" selected[draft.fuel_type.is_none()] { "Select..." }
                            @for fuel in ["petrol", "diesel", "hybrid", "electric"] {
                                option value=(fuel)
                                    selected[draft.fuel_type.as_deref() == Some(fuel)] {
                                    (fuel)
                                }
                            }
                        }
                    }
                    SpecField::Transmission => {
                        select name="transmission" required[required] {
                            option value="" selected[draft.transmission.is_none()] { "Select..." }
                            @for gearbox in ["manual", "automatic"] {
                                option value=(gearbox)
                                    selected[draft.transmission.as_deref() == Some(gearbox)] {
                                    (gearbox)
                                }
                            }
                        }
                    }
                    SpecField::Color => {
                        input type="text" name="color" value=(opt_str(&draft.color));
                    }
                    SpecField::Mileage => {
                        input type="number" name="mileage_km" min="0"
                            value=(opt_num(draft.mileage_km)) required[required];
                    }
                    SpecField::Seats => {
                        input type="number" name="seats" min="1"
                            value=(opt_num(draft.seats)) required[required];
                    }
                    SpecField::EngineCc => {
                        input type="number" name="engine_cc" min="1"
                            value=(opt_num(draft.engine_cc)) required[required];
                    }
                    SpecField::PayloadKg => {
                        input type="number" name="payload_kg" min="1"
                            value=(opt_num(draft.payload_kg)) required[required];
                    }
                }
            }
        }
        label { "Description"
            textarea name="description" rows="5" { (opt_str(&draft.description)) }
        }
    }
}

fn pricing_fields(draft: &PostDraft) -> Markup {
    let mode = PricingMode::parse(draft.pricing_type.as_deref());

    html! {
        label { "How is it priced?"
            select name="pricing_type" {
                option value="cash" selected[mode == PricingMode::Cash] { "Cash sale" }
                option value="finance" selected[mode == PricingMode::Finance] {
                    "Finance takeover"
                }
            }
        }
        p class="hint" { "Press Continue after switching the pricing type to update the fields." }

        @match mode {
            PricingMode::Cash => {
                label { "Asking price"
                    input type="number" name="price" min="1"
                        value=(opt_num(draft.price)) required;
                }
            }
            PricingMode::Finance => {
                label { "Outstanding balance"
                    input type="number" name="outstanding_balance" min="1"
                        value=(opt_num(draft.outstanding_balance)) required;
                }
                label { "Asking price (optional)"
                    input type="number" name="asking_price" min="1"
                        value=(opt_num(draft.asking_price));
                }
                label { "Monthly payment (optional)"
                    input type="number" name="monthly_payment" min="1"
                        value=(opt_num(draft.monthly_payment));
                }
                label { "Remaining term, months (optional)"
                    input type="number" name="remaining_term_months" min="1"
                        value=(opt_num(draft.remaining_term_months));
                }
                label { "Original loan amount (optional)"
                    input type="number" name="original_amount" min="1"
                        value=(opt_num(draft.original_amount));
                }
                label { "Finance type"
                    input type="text" name="finance_type" placeholder="bank loan"
                        value=(opt_str(&draft.finance_type));
                }
                label { "Provider"
                    input type="text" name="finance_provider" placeholder="e.g. Awash Bank"
                        value=(opt_str(&draft.finance_provider));
                }
                label class="checkbox" {
                    input type="checkbox" name="early_settlement"
                        checked[draft.early_settlement];
                    "Early settlement possible"
                }
            }
        }

        label class="checkbox" {
            input type="checkbox" name="negotiable" checked[draft.negotiable];
            "Price is negotiable"
        }
    }
}

fn photo_fields(draft: &PostDraft) -> Markup {
    html! {
        label { "Photo URLs (one per line)"
            textarea name="photo_urls" rows="6" {
                (draft.photos.join("\n"))
            }
        }
        p class="hint" { "Upload photos to your image host and paste the links here." }
    }
}

fn review_summary(draft: &PostDraft) -> Markup {
    html! {
        section class="card review-summary" {
            h3 { "Review your listing" }
            ul {
                li { "Vehicle: "
                    (draft.vehicle_type.map(|vt| vt.label()).unwrap_or("—"))
                    " — " (opt_str(&draft.make)) " " (opt_str(&draft.model))
                    " (" (opt_num(draft.year)) ")"
                }
                li { "Location: " (opt_str(&draft.location)) }
                li { "Pricing: "
                    (PricingMode::parse(draft.pricing_type.as_deref()).as_str())
                }
                li { "Photos: " (draft.photos.len()) }
            }
        }
    }
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn opt_num(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
