pub mod badges;
pub mod email_cta;
pub mod error;
pub mod listing_card;
pub mod price;
pub mod search;

// Re-exports for convenience
pub use badges::badge_row;
pub use email_cta::email_cta_form;
pub use error::error_banner;
pub use listing_card::listing_card;
pub use price::{format_amount, price_block};
pub use search::search_form;
