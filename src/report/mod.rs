pub mod notify;
pub mod query;
pub mod routes;
pub mod source;
pub mod view;
