// src/domain/pricing.rs

/// How a listing is priced: a straight cash sale, or a finance takeover where
/// the buyer assumes the seller's outstanding loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricingMode {
    #[default]
    Cash,
    Finance,
}

impl PricingMode {
    /// Anything that isn't literally "finance" is treated as cash; unknown
    /// and missing values degrade to the documented default.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("finance") => PricingMode::Finance,
            _ => PricingMode::Cash,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PricingMode::Cash => "cash",
            PricingMode::Finance => "finance",
        }
    }
}

/// Pricing columns as they come off a listing row. `price` is always present
/// (the store keeps a denormalized copy for sorting/filtering); the finance
/// fields are only meaningful in finance mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingFields {
    pub pricing_type: Option<String>,
    pub price: i64,
    pub negotiable: bool,
    pub finance_type: Option<String>,
    pub finance_provider: Option<String>,
    pub original_amount: Option<i64>,
    pub outstanding_balance: Option<i64>,
    pub asking_price: Option<i64>,
    pub monthly_payment: Option<i64>,
    pub remaining_term_months: Option<i64>,
    pub early_settlement: bool,
}

impl PricingFields {
    pub fn mode(&self) -> PricingMode {
        PricingMode::parse(self.pricing_type.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    OutstandingBalance,
    MonthlyPayment,
    RemainingTerm,
    OriginalAmount,
    EstimatedPayment,
}

impl FigureKind {
    pub fn label(self) -> &'static str {
        match self {
            FigureKind::OutstandingBalance => "Outstanding balance",
            FigureKind::MonthlyPayment => "Monthly payment",
            FigureKind::RemainingTerm => "Remaining term (months)",
            FigureKind::OriginalAmount => "Original loan amount",
            FigureKind::EstimatedPayment => "Est. monthly payment",
        }
    }
}

/// A labeled number shown under the primary amount. `RemainingTerm` carries a
/// month count rather than money; everything else is an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub kind: FigureKind,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinanceMeta {
    pub finance_type: Option<String>,
    pub provider: Option<String>,
    pub early_settlement: bool,
}

/// What the view layer renders for one listing's price block.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePresentation {
    pub primary_amount: i64,
    pub secondary: Vec<Figure>,
    pub negotiable: bool,
    pub finance: Option<FinanceMeta>,
}

/// Select which numbers are authoritative for display.
///
/// Finance: the buyer-facing asking price wins, falling back to the
/// outstanding balance, and, when both are missing on a row that claims to
/// be finance, to the raw `price` column so the view never shows a blank.
/// Cash: `price` is primary; `estimated_monthly` is a caller-computed number
/// (see `monthly_payment`) and appears only when supplied.
pub fn resolve_pricing(
    fields: &PricingFields,
    estimated_monthly: Option<i64>,
) -> PricePresentation {
    match fields.mode() {
        PricingMode::Finance => {
            let primary = fields
                .asking_price
                .or(fields.outstanding_balance)
                .unwrap_or(fields.price);

            let mut secondary = Vec::new();
            if let Some(balance) = fields.outstanding_balance {
                secondary.push(Figure {
                    kind: FigureKind::OutstandingBalance,
                    value: balance,
                });
            }
            if let Some(payment) = fields.monthly_payment {
                secondary.push(Figure {
                    kind: FigureKind::MonthlyPayment,
                    value: payment,
                });
            }
            if let Some(term) = fields.remaining_term_months {
                secondary.push(Figure {
                    kind: FigureKind::RemainingTerm,
                    value: term,
                });
            }
            if let Some(original) = fields.original_amount {
                secondary.push(Figure {
                    kind: FigureKind::OriginalAmount,
                    value: original,
                });
            }

            PricePresentation {
                primary_amount: primary,
                secondary,
                negotiable: fields.negotiable,
                finance: Some(FinanceMeta {
                    finance_type: fields.finance_type.clone(),
                    provider: fields.finance_provider.clone(),
                    early_settlement: fields.early_settlement,
                }),
            }
        }
        PricingMode::Cash => {
            let mut secondary = Vec::new();
            if let Some(estimate) = estimated_monthly {
                secondary.push(Figure {
                    kind: FigureKind::EstimatedPayment,
                    value: estimate,
                });
            }

            PricePresentation {
                primary_amount: fields.price,
                secondary,
                negotiable: fields.negotiable,
                finance: None,
            }
        }
    }
}

/// Standard fixed-rate amortized payment:
/// `M = P·r·(1+r)^n / ((1+r)^n − 1)`.
///
/// `principal` is the financed amount after any down payment. Returns `None`
/// when no payment can be computed (zero rate, zero term, nothing financed);
/// "cannot compute" is not zero.
pub fn monthly_payment(principal: i64, annual_rate_pct: f64, months: u32) -> Option<i64> {
    if principal <= 0 || months == 0 {
        return None;
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    if r <= 0.0 || !r.is_finite() {
        return None;
    }

    let p = principal as f64;
    let n = months as f64;
    let growth = (1.0 + r).powf(n);
    let payment = p * r * growth / (growth - 1.0);
    if !payment.is_finite() {
        return None;
    }

    Some(payment.round() as i64)
}
