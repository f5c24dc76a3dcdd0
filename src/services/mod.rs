pub mod identity_store;
pub mod question_source;
pub mod quiz_session_store;
pub mod scoring;
pub mod session_timers;
pub mod shuffle;

pub use identity_store::IdentityStore;
pub use question_source::{OpenTriviaClient, QuestionSource};
pub use quiz_session_store::{FetchTicket, QuizSessionStore, QuizSettings};
pub use scoring::{Grade, QuizResult, ReviewItem};
pub use session_timers::{SessionTimers, TimerEvent, TimerSlot};
