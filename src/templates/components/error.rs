use maud::{html, Markup};

/// Inline error partial for htmx swaps and form failures.
pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="error-banner" role="alert" {
            p { (message) }
        }
    }
}
