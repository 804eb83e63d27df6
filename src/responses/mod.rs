pub mod errors;
pub mod html;

pub use errors::{error_to_response, html_error_response, ResultResp};
pub use html::{file_response, html_response, redirect, redirect_with_cookie};
