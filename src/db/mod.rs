pub mod connection;
pub mod users;

pub use connection::{init_db, Database};
pub use users::list_users;
