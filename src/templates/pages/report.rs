use crate::documents::export_pdf::{format_created_at, REPORT_HEADERS};
use crate::domain::{RecordLimit, UserRecord};
use crate::report::query::ReportQuery;
use crate::report::view::FetchState;
use crate::templates::components::{loading_indicator, toasts};
use crate::templates::desktop_layout;
use chrono::FixedOffset;
use maud::{html, Markup};

pub struct ReportTableVm<'a> {
    pub state: &'a FetchState,
    /// Date-filtered records; the export limit is not applied here.
    pub visible: Vec<&'a UserRecord>,
    pub total: usize,
    pub query: ReportQuery,
    pub display_offset: FixedOffset,
    pub toasts: Vec<String>,
}

/// Full page. The table arrives as a partial once the listing is fetched.
pub fn report_page(query: &ReportQuery) -> Markup {
    desktop_layout(
        "User Report",
        html! {
            main class="container" {
                h1 { "User Report" }
                div
                    id="report-area"
                    hx-get=(query.url("/report/table"))
                    hx-trigger="load"
                    hx-swap="innerHTML"
                {
                    (loading_indicator())
                }
            }
        },
    )
}

pub fn report_table(vm: &ReportTableVm) -> Markup {
    match vm.state {
        FetchState::Init | FetchState::Loading => loading_indicator(),
        FetchState::Error(message) => html! {
            div class="error" { (message) }
            (toasts(&vm.toasts))
        },
        FetchState::Ready(_) if vm.total == 0 => html! {
            p class="empty" { "No users found." }
        },
        FetchState::Ready(_) => html! {
            a class="download" href=(vm.query.url("/report/download")) download="user-report.pdf" {
                "Download PDF"
            }
            (filter_controls(vm))
            (users_table(&vm.visible, &vm.display_offset))
        },
    }
}

fn filter_controls(vm: &ReportTableVm) -> Markup {
    let limit_value = match vm.query.limit {
        RecordLimit::All => String::new(),
        RecordLimit::Count(n) => n.to_string(),
    };
    let start = vm.query.range.start.map(|d| d.to_string()).unwrap_or_default();
    let end = vm.query.range.end.map(|d| d.to_string()).unwrap_or_default();

    html! {
        form
            id="report-filters"
            action="/report"
            method="get"
            hx-get="/report/table"
            hx-target="#report-area"
            hx-swap="innerHTML"
            hx-trigger="change"
        {
            div class="controls" {
                label for="limit" { "Enter number of records to download: " }
                input
                    type="number"
                    id="limit"
                    name="limit"
                    min="1"
                    max=(vm.total)
                    value=(limit_value)
                    placeholder="Enter number of records";
                span { "Leave empty for all" }
            }
            div class="controls" {
                label for="start" { "Select Start Date: " }
                input type="date" id="start" name="start" value=(start);
                label for="end" { "Select End Date: " }
                input type="date" id="end" name="end" value=(end);
            }
        }
    }
}

fn users_table(users: &[&UserRecord], offset: &FixedOffset) -> Markup {
    html! {
        table {
            thead {
                tr {
                    @for header in REPORT_HEADERS {
                        th { (header) }
                    }
                }
            }
            tbody {
                @for user in users {
                    tr {
                        td { (user.id) }
                        td { (user.full_name()) }
                        td { (user.email) }
                        td { (user.account_type) }
                        td { (format_created_at(&user.created_at, offset)) }
                    }
                }
            }
        }
    }
}
