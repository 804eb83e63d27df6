// src/domain/badges.rs

use crate::domain::promotion::ActivePromotions;

/// Badge precedence is fixed: featured > top spot > boosted > urgent.
/// Unlike placement buckets, badges are additive: one listing can carry all
/// four at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Featured,
    TopSpot,
    Boosted,
    Urgent,
}

impl BadgeKind {
    pub fn label(self) -> &'static str {
        match self {
            BadgeKind::Featured => "Featured",
            BadgeKind::TopSpot => "Top Spot",
            BadgeKind::Boosted => "Boosted",
            BadgeKind::Urgent => "Urgent",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BadgeKind::Featured => "badge badge-featured",
            BadgeKind::TopSpot => "badge badge-top-spot",
            BadgeKind::Boosted => "badge badge-boosted",
            BadgeKind::Urgent => "badge badge-urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeSize {
    Small,
    Large,
}

/// Caller-side presentation knobs. Cards use the default; the detail page
/// asks for large badges with labels.
#[derive(Debug, Clone, Copy)]
pub struct BadgeStyle {
    pub size: BadgeSize,
    pub show_label: bool,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            size: BadgeSize::Small,
            show_label: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub size: BadgeSize,
    pub show_label: bool,
}

/// Map live promotions to badge descriptors, highest precedence first.
/// Pure: same input, same output. No expiry logic here; callers pass
/// promotions already filtered through `PromotionFlags::active_at`.
pub fn resolve_badges(active: &ActivePromotions, style: &BadgeStyle) -> Vec<Badge> {
    let mut badges = Vec::new();
    let mut push = |kind| {
        badges.push(Badge {
            kind,
            size: style.size,
            show_label: style.show_label,
        })
    };

    if active.featured {
        push(BadgeKind::Featured);
    }
    if active.top_spot {
        push(BadgeKind::TopSpot);
    }
    if active.boosted {
        push(BadgeKind::Boosted);
    }
    if active.urgent {
        push(BadgeKind::Urgent);
    }

    badges
}
