// Shared helpers with no domain knowledge
pub mod time_utils;

// Re-export commonly used types
pub use time_utils::{TimeUtils, utc_now_string};
