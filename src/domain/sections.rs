// src/domain/sections.rs

use crate::domain::listing::ListingSummary;
use crate::domain::placement::Buckets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Featured,
    TopSpot,
    Boosted,
    Regular,
}

/// One rendered section: which tier it shows, an optional heading, and the
/// listings in display order.
#[derive(Debug)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: Option<&'static str>,
    pub listings: Vec<ListingSummary>,
}

#[derive(Debug)]
pub enum PlanItem {
    Section(Section),
    Separator,
}

/// The final display sequence for one page. `Empty` is an explicit marker;
/// the view renders a real empty state, not zero sections.
#[derive(Debug)]
pub enum RenderPlan {
    Empty,
    Feed(Vec<PlanItem>),
}

/// Assemble the render plan from classified buckets.
///
/// Order: featured, top spot, separator, boosted ("Recently Boosted"),
/// regular. A section only appears when its bucket is non-empty. The
/// separator appears iff a premium section (featured or top spot) was shown,
/// and the regular section is labeled "All Listings" iff the boosted section
/// was shown above it.
pub fn compose(buckets: Buckets) -> RenderPlan {
    if buckets.is_empty() {
        return RenderPlan::Empty;
    }

    let Buckets {
        featured,
        top_spot,
        boosted,
        regular,
    } = buckets;

    let mut items = Vec::new();
    let premium_shown = !featured.is_empty() || !top_spot.is_empty();
    let boosted_shown = !boosted.is_empty();

    if !featured.is_empty() {
        items.push(PlanItem::Section(Section {
            kind: SectionKind::Featured,
            heading: Some("Featured"),
            listings: featured,
        }));
    }
    if !top_spot.is_empty() {
        items.push(PlanItem::Section(Section {
            kind: SectionKind::TopSpot,
            heading: Some("Top Spots"),
            listings: top_spot,
        }));
    }
    if premium_shown {
        items.push(PlanItem::Separator);
    }
    if boosted_shown {
        items.push(PlanItem::Section(Section {
            kind: SectionKind::Boosted,
            heading: Some("Recently Boosted"),
            listings: boosted,
        }));
    }
    if !regular.is_empty() {
        items.push(PlanItem::Section(Section {
            kind: SectionKind::Regular,
            heading: boosted_shown.then_some("All Listings"),
            listings: regular,
        }));
    }

    RenderPlan::Feed(items)
}
