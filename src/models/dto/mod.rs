pub mod open_trivia;
pub mod request;
