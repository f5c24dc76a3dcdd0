pub mod messages;

pub use messages::*;

/// Storage key of the persisted quiz session record.
pub const SESSION_STORAGE_KEY: &str = "QUIZ_STATE";
/// Storage key of the persisted identity record.
pub const IDENTITY_STORAGE_KEY: &str = "QUIZ_USER";

pub const OPEN_TRIVIA_BASE_URL: &str = "https://opentdb.com/api.php";
pub const GENERAL_KNOWLEDGE_CATEGORY: u32 = 9;

pub const DEFAULT_TOTAL_QUESTIONS: usize = 10;
pub const DEFAULT_TOTAL_TIME_SECS: u32 = 300;
pub const DEFAULT_TICK_MILLIS: u64 = 1000;
pub const DEFAULT_AUTO_SAVE_MILLIS: u64 = 5000;
