use maud::{html, Markup};

/// The sign-in form. Posts via htmx and swaps itself for the
/// check-your-email partial.
pub fn email_cta_form() -> Markup {
    html! {
        form
            id="email-cta"
            action="/auth/request-link"
            method="post"
            hx-post="/auth/request-link"
            hx-target="#email-cta"
            hx-swap="outerHTML"
        {
            label for="email" { "Email address" }
            input
                type="email"
                name="email"
                id="email"
                placeholder="you@example.com"
                required;
            button type="submit" { "Send sign-in link" }
        }
    }
}
