use tracing::info;

use crate::report::notify::ToastNotifier;
use crate::report::query::ReportQuery;
use crate::report::source::{HttpSource, StoreSource};
use crate::report::view::{FetchState, ReportView};
use crate::responses::{html_response, pdf_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{report_page, report_table, ReportTableVm};

/// Mounts a fresh view for this request and waits for its one fetch.
///
/// The store is read on the request thread, which keeps that worker's cached
/// connection in use. Remote listings run on the view's fetch thread and are
/// given up on after `fetch_timeout`.
fn mounted_view(state: &AppState, query: &ReportQuery) -> ReportView<ToastNotifier> {
    let config = &state.config;
    let mut view = ReportView::new(ToastNotifier::default(), config.display_offset);
    view.set_range(query.range);
    view.set_limit(query.limit);

    match &config.source_url {
        Some(url) => {
            view.mount(HttpSource::new(url.as_str(), config.fetch_timeout));
            if *view.poll() == FetchState::Loading {
                view.wait_or_expire(config.fetch_timeout);
            }
        }
        None => view.mount_inline(StoreSource::new(state.db.clone())),
    }
    view
}

/// `GET /report`
pub fn report_shell(query: Option<&str>) -> ResultResp {
    let query = ReportQuery::parse(query)?;
    html_response(report_page(&query))
}

/// `GET /report/table`
pub fn report_table_partial(state: &AppState, query: Option<&str>) -> ResultResp {
    let view = mounted_view(state, &ReportQuery::parse(query)?);

    let vm = ReportTableVm {
        state: view.state(),
        visible: view.visible_records(),
        total: view.records().len(),
        query: ReportQuery {
            range: view.range(),
            limit: view.limit(),
        },
        display_offset: view.display_offset(),
        toasts: view.notifier().messages(),
    };
    html_response(report_table(&vm))
}

/// `GET /report/download`
pub fn report_download(state: &AppState, query: Option<&str>) -> ResultResp {
    let query = ReportQuery::parse(query)?;
    let view = mounted_view(state, &query);

    let export = view.download_report()?;
    info!(
        rows = export.rows.len(),
        limit = %view.limit(),
        "Exporting user report"
    );
    pdf_response(export.bytes, export.filename)
}
