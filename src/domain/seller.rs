// src/domain/seller.rs

/// A private individual's contact block.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateSeller {
    pub display_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// A registered dealership.
#[derive(Debug, Clone, PartialEq)]
pub struct DealerProfile {
    pub business_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
}

/// Who is behind a listing. Resolved once when the listing is fetched;
/// views branch on the variant instead of re-inferring dealer-ness from
/// whichever fields happen to be present.
#[derive(Debug, Clone, PartialEq)]
pub enum Seller {
    Dealer(DealerProfile),
    Private(PrivateSeller),
}

impl Seller {
    pub fn name(&self) -> &str {
        match self {
            Seller::Dealer(d) => &d.business_name,
            Seller::Private(p) => &p.display_name,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            Seller::Dealer(d) => d.phone.as_deref(),
            Seller::Private(p) => p.phone.as_deref(),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Seller::Dealer(d) => d.location.as_deref(),
            Seller::Private(p) => p.location.as_deref(),
        }
    }

    pub fn is_dealer(&self) -> bool {
        matches!(self, Seller::Dealer(_))
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Seller::Dealer(_) => "Dealer",
            Seller::Private(_) => "Private seller",
        }
    }
}
