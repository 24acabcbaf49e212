// File: ./src/model/mod.rs
pub mod date;
pub mod query;
pub mod record;
pub mod variant;

pub use date::CalendarDate;
pub use query::IdentifierQuery;
pub use record::{FileRecord, sort_by_date};
pub use variant::{Company, SavRxFolder};
