pub mod form;
pub mod query;
pub mod search;
pub mod transport;
