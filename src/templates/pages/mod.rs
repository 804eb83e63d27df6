pub mod account;
pub mod browse;
pub mod check_email;
pub mod home;
pub mod listing_detail;
pub mod login;
pub mod post;

pub use account::{account_page, AccountVm};
pub use browse::{browse_page, BrowseVm};
pub use check_email::check_email_partial;
pub use home::home_page;
pub use listing_detail::{estimate_result, listing_page, ListingPageVm};
pub use login::login_page;
pub use post::{post_page, PostVm};
