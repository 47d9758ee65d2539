pub use crate::errors::ResultResp;
pub use crate::templates::components::html_error_response;
