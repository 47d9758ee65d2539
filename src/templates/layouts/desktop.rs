use maud::{html, Markup, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; background: #f3f4f6; margin: 0; color: #333; }
header { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.container { max-width: 1000px; margin: 2rem auto; padding: 20px; background: #f9f9f9; border-radius: 8px; box-shadow: 0 2px 5px rgba(0,0,0,.1); }
h1 { text-align: center; font-size: 2.2em; margin-bottom: 20px; }
.loading, .error, .empty { text-align: center; font-size: 1.2em; }
.loading { color: #555; }
.error { color: red; }
.empty { color: #666; }
.controls { display: flex; align-items: center; gap: 10px; margin-bottom: 20px; }
.controls input { padding: 5px; width: 160px; text-align: center; }
.download { display: inline-block; margin-bottom: 20px; padding: 10px 20px; background: #007bff; color: #fff; border-radius: 4px; text-decoration: none; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
thead { background: #007bff; color: #fff; }
th, td { padding: 10px; text-align: center; border: 1px solid #ddd; }
.toasts { position: fixed; top: 1rem; right: 1rem; }
.toast { padding: 0.75rem 1rem; margin-bottom: 0.5rem; border-radius: 6px; background: #fee2e2; color: #991b1b; animation: toast-out 4s forwards; }
@keyframes toast-out { 0%, 80% { opacity: 1; } 100% { opacity: 0; visibility: hidden; } }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(STYLES)) }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M14 3v4a1 1 0 0 0 1 1h4" {}
                        path d="M17 21h-10a2 2 0 0 1 -2 -2v-14a2 2 0 0 1 2 -2h7l5 5v11a2 2 0 0 1 -2 2z" {}
                    }
                    h3 { "Reports" }
                    nav {
                        a href="/report" { "User Report" }
                    }
                }
                (content)
            }
        }
    }
}
