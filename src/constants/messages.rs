pub const EMPTY_NAME_MESSAGE: &str = "Please enter your name";
pub const SHORT_NAME_MESSAGE: &str = "Name must be at least 2 characters";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch questions";
pub const NO_QUESTIONS_MESSAGE: &str = "No questions available. Please try again.";

pub const NOT_ANSWERED_LABEL: &str = "Not answered";
