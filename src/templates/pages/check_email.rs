use maud::{html, Markup};

/// htmx partial that replaces the sign-in form after a link is requested.
/// Deliberately not a full page: it must not carry the document shell.
pub fn check_email_partial(email: &str) -> Markup {
    html! {
        div class="check-email" {
            h2 { "Check your email" }
            p {
                "We sent a sign-in link to " strong { (email) } "."
            }
            p { "The link expires in 15 minutes." }
        }
    }
}
