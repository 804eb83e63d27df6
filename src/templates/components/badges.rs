use maud::{html, Markup};

use crate::domain::badges::{Badge, BadgeSize};

/// Render a listing's badges in resolver order. Empty input renders nothing
/// at all, not a placeholder element.
pub fn badge_row(badges: &[Badge]) -> Markup {
    html! {
        @if !badges.is_empty() {
            div class="badge-row" {
                @for badge in badges {
                    span class=(badge_classes(badge)) title=(badge.kind.label()) {
                        @if badge.show_label {
                            (badge.kind.label())
                        }
                    }
                }
            }
        }
    }
}

fn badge_classes(badge: &Badge) -> String {
    match badge.size {
        BadgeSize::Small => badge.kind.css_class().to_string(),
        BadgeSize::Large => format!("{} badge-lg", badge.kind.css_class()),
    }
}
