//! The report view: one fetch per mount, then local filtering and export.
//!
//! `mount` spawns a single worker thread that asks a [`UserSource`] for the
//! listing. The result travels back over a channel and is applied by `poll`,
//! `wait` or `wait_or_expire`. Dropping the view raises the cancellation flag
//! so a late answer is discarded by the worker instead of being delivered.
//! `mount_inline` runs the fetch on the caller's thread instead.

use chrono::FixedOffset;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::documents::{export_users_pdf, ReportExport};
use crate::domain::{
    filter_by_date, select_for_export, DateRange, ListingEnvelope, RecordLimit, UserRecord,
};
use crate::errors::ServerError;
use crate::report::notify::Notifier;
use crate::report::source::{FetchError, UserSource};

/// Shown in place of the table when the fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Could not fetch users";
/// Toast emitted alongside [`FETCH_ERROR_MESSAGE`].
pub const FETCH_ERROR_TOAST: &str = "Error fetching users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Init,
    Loading,
    Ready(Vec<UserRecord>),
    Error(String),
}

struct PendingFetch {
    rx: Receiver<Result<ListingEnvelope, FetchError>>,
    cancel: Arc<AtomicBool>,
}

pub struct ReportView<N: Notifier> {
    state: FetchState,
    pending: Option<PendingFetch>,
    range: DateRange,
    limit: RecordLimit,
    display_offset: FixedOffset,
    notifier: N,
}

impl<N: Notifier> ReportView<N> {
    pub fn new(notifier: N, display_offset: FixedOffset) -> Self {
        Self {
            state: FetchState::Init,
            pending: None,
            range: DateRange::default(),
            limit: RecordLimit::All,
            display_offset,
            notifier,
        }
    }

    /// Starts the one-shot fetch. Only the first call has any effect.
    pub fn mount<S: UserSource>(&mut self, source: S) {
        if self.state != FetchState::Init {
            debug!("Report view already mounted, ignoring");
            return;
        }

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let cancelled = Arc::clone(&cancel);

        let spawned = thread::Builder::new()
            .name("report-fetch".into())
            .spawn(move || {
                let result = source.fetch_users();
                if cancelled.load(Ordering::Acquire) {
                    debug!("Report view gone, dropping fetch result");
                    return;
                }
                // The receiver may have been dropped in the meantime.
                let _ = tx.send(result);
            });

        self.state = FetchState::Loading;
        match spawned {
            Ok(_) => self.pending = Some(PendingFetch { rx, cancel }),
            Err(e) => {
                warn!(error = %e, "Could not spawn report fetch");
                self.settle(Err(FetchError::Disconnected));
            }
        }
    }

    /// Same lifecycle as `mount`, but the fetch runs on the calling thread.
    /// The view leaves this call already settled.
    pub fn mount_inline<S: UserSource>(&mut self, source: S) {
        if self.state != FetchState::Init {
            debug!("Report view already mounted, ignoring");
            return;
        }
        self.state = FetchState::Loading;
        let result = source.fetch_users();
        self.settle(result);
    }

    /// Applies the fetch result if it has arrived, without blocking.
    pub fn poll(&mut self) -> &FetchState {
        let received = match &self.pending {
            Some(pending) => pending.rx.try_recv(),
            None => return &self.state,
        };
        match received {
            Ok(result) => self.settle(result),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.settle(Err(FetchError::Disconnected)),
        }
        &self.state
    }

    /// Blocks up to `timeout` for the fetch result. Still `Loading` on timeout.
    pub fn wait(&mut self, timeout: Duration) -> &FetchState {
        let received = match &self.pending {
            Some(pending) => pending.rx.recv_timeout(timeout),
            None => return &self.state,
        };
        match received {
            Ok(result) => self.settle(result),
            Err(RecvTimeoutError::Timeout) => debug!(?timeout, "Report fetch still in flight"),
            Err(RecvTimeoutError::Disconnected) => self.settle(Err(FetchError::Disconnected)),
        }
        &self.state
    }

    /// Like `wait`, but a fetch still in flight after `timeout` is abandoned
    /// and the view settles to the error state.
    pub fn wait_or_expire(&mut self, timeout: Duration) -> &FetchState {
        if self.wait(timeout) == &FetchState::Loading {
            if let Some(pending) = self.pending.take() {
                pending.cancel.store(true, Ordering::Release);
            }
            self.settle(Err(FetchError::Timeout(timeout)));
        }
        &self.state
    }

    fn settle(&mut self, result: Result<ListingEnvelope, FetchError>) {
        self.pending = None;
        match result.and_then(|envelope| envelope.into_records()) {
            Ok(users) => {
                debug!(count = users.len(), "Report view ready");
                self.state = FetchState::Ready(users);
            }
            Err(e) => {
                warn!(error = %e, "Report fetch failed");
                self.state = FetchState::Error(FETCH_ERROR_MESSAGE.to_string());
                self.notifier.notify_error(FETCH_ERROR_TOAST);
            }
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn limit(&self) -> RecordLimit {
        self.limit
    }

    pub fn display_offset(&self) -> FixedOffset {
        self.display_offset
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    pub fn set_limit(&mut self, limit: RecordLimit) {
        self.limit = limit;
    }

    /// Every fetched record, unfiltered. Empty unless ready.
    pub fn records(&self) -> &[UserRecord] {
        match &self.state {
            FetchState::Ready(users) => users,
            _ => &[],
        }
    }

    /// The on-screen table: date filter only, the limit is for export.
    pub fn visible_records(&self) -> Vec<&UserRecord> {
        filter_by_date(self.records(), &self.range)
    }

    pub fn export_selection(&self) -> Vec<&UserRecord> {
        select_for_export(self.records(), &self.range, self.limit)
    }

    pub fn download_report(&self) -> Result<ReportExport, ServerError> {
        if !matches!(self.state, FetchState::Ready(_)) {
            return Err(ServerError::Unavailable(
                "user listing is not available".to_string(),
            ));
        }
        export_users_pdf(&self.export_selection(), &self.display_offset)
    }
}

impl<N: Notifier> Drop for ReportView<N> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.store(true, Ordering::Release);
        }
    }
}
