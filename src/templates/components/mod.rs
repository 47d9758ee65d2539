use maud::{html, Markup};

pub mod error;
pub mod toast;

pub use error::html_error_response;
pub use toast::toasts;

pub fn loading_indicator() -> Markup {
    html! {
        div class="loading" { "Loading..." }
    }
}
