pub mod event_loop;
pub mod intent_handler;

pub use event_loop::run;
pub use intent_handler::{apply_intent, parse_intent, Intent, Outcome};
