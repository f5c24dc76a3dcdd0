pub mod answer_record;
pub mod identity;
pub mod question;
pub mod quiz_session;
pub use answer_record::AnswerRecord;
pub use identity::Identity;
pub use question::Question;
pub use quiz_session::{QuizSession, QuizStatus};
