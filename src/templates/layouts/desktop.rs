use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, signed_in: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · MotorMart" }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.js" defer {};
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="icon icon-tabler icon-tabler-car"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M7 17m-2 0a2 2 0 1 0 4 0a2 2 0 1 0 -4 0" {}
                        path d="M17 17m-2 0a2 2 0 1 0 4 0a2 2 0 1 0 -4 0" {}
                        path d="M5 17h-2v-6l2 -5h9l4 5h1a2 2 0 0 1 2 2v4h-2m-4 0h-6m-6 -6h15m-6 0v-5" {}
                    }
                    h3 { a href="/" { "MotorMart" } }
                    nav {
                        ul {
                            li { a href="/listings" { "Browse" } }
                            li { a href="/sell" { "Sell" } }
                        }
                    }

                    @if signed_in {
                        div class="inline" {
                            a href="/account" class="text-base font-medium hover:text-blue-600" { "Account" }
                            form action="/auth/logout" method="post" class="inline" {
                                button type="submit" { "Sign out" }
                            }
                        }
                    } @else {
                        a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" }
                    }
                }
                (content)
            }
        }
    }
}
