pub mod screens;

pub use screens::{format_time, render, ViewState};
