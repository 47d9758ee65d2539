pub mod export_pdf;

pub use export_pdf::{export_users_pdf, ReportExport};
