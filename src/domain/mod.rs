pub mod filter;
pub mod user;

pub use filter::{filter_by_date, select_for_export, DateRange, RecordLimit};
pub use user::{ListingEnvelope, UserRecord};
