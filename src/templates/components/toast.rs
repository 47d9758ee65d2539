use maud::{html, Markup};

/// Error toasts that fade out on their own.
pub fn toasts(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            div class="toasts" role="status" aria-live="polite" {
                @for message in messages {
                    div class="toast toast-error" { (message) }
                }
            }
        }
    }
}
