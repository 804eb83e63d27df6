pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{badge_row, email_cta_form, error_banner, format_amount, listing_card};
pub use layouts::desktop::desktop_layout;
