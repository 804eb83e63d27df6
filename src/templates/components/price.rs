use maud::{html, Markup};

use crate::domain::pricing::{FigureKind, PricePresentation};

/// Thousands-separated birr amount, e.g. 3500000 -> "3,500,000 Br".
pub fn format_amount(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped} Br")
    } else {
        format!("{grouped} Br")
    }
}

/// Render a resolved price presentation: primary amount, negotiable marker,
/// secondary figures, finance metadata.
pub fn price_block(presentation: &PricePresentation) -> Markup {
    html! {
        div class="price-block" {
            span class="price-primary" { (format_amount(presentation.primary_amount)) }
            @if presentation.negotiable {
                span class="price-negotiable" { "Negotiable" }
            }

            @if !presentation.secondary.is_empty() {
                ul class="price-secondary" {
                    @for figure in &presentation.secondary {
                        li {
                            span class="label" { (figure.kind.label()) ": " }
                            @match figure.kind {
                                FigureKind::RemainingTerm => {
                                    span { (figure.value) " months" }
                                }
                                _ => {
                                    span { (format_amount(figure.value)) }
                                }
                            }
                        }
                    }
                }
            }

            @if let Some(finance) = &presentation.finance {
                p class="finance-meta" {
                    "Finance takeover"
                    @if let Some(kind) = &finance.finance_type { " · " (kind) }
                    @if let Some(provider) = &finance.provider { " · " (provider) }
                    @if finance.early_settlement { " · early settlement possible" }
                }
            }
        }
    }
}
