pub mod date;
pub mod denylist;
pub mod identity;
pub mod merge;
pub mod types;

pub use date::{format_date, parse_date, same_calendar_day};
pub use denylist::should_remove;
pub use identity::identify;
pub use merge::{is_announcement, merge};
pub use types::{Record, RemovalEntry};
