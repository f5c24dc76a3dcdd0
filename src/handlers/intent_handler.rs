use crate::{
    app_state::{AppState, Screen},
    services::FetchTicket,
    views::ViewState,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Login(String),
    Start,
    Back,
    Answer(usize),
    Continue,
    StartNew,
    Retry,
    ToggleReview,
    Logout,
    Quit,
    Unknown,
}

/// What the event loop should do after an intent was applied.
#[derive(Debug)]
pub enum Outcome {
    Render,
    Fetch(FetchTicket),
    Quit,
}

/// Interprets one line of input in the context of the current screen.
pub fn parse_intent(screen: Screen, line: &str) -> Intent {
    let input = line.trim();
    let command = input.to_ascii_lowercase();
    if command == "q" || command == "quit" {
        return Intent::Quit;
    }

    match screen {
        Screen::Login => Intent::Login(input.to_string()),
        Screen::Setup => match command.as_str() {
            "s" | "start" => Intent::Start,
            "b" | "back" => Intent::Back,
            _ => Intent::Unknown,
        },
        Screen::ResumePrompt => match command.as_str() {
            "c" | "continue" => Intent::Continue,
            "n" | "new" => Intent::StartNew,
            _ => Intent::Unknown,
        },
        Screen::Quiz => input
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| Intent::Answer(n - 1))
            .unwrap_or(Intent::Unknown),
        Screen::Result => match command.as_str() {
            "r" | "retry" => Intent::Retry,
            "v" | "review" => Intent::ToggleReview,
            "l" | "logout" => Intent::Logout,
            _ => Intent::Unknown,
        },
    }
}

pub fn apply_intent(app: &mut AppState, view: &mut ViewState, intent: Intent) -> Outcome {
    view.notice = None;

    match intent {
        Intent::Login(name) => match app.login(&name) {
            Ok(()) => view.login_error = None,
            Err(e) => view.login_error = Some(e.to_string()),
        },
        Intent::Start => match app.begin_start() {
            Ok(ticket) => return Outcome::Fetch(ticket),
            Err(e) => view.notice = Some(e.to_string()),
        },
        Intent::Back => app.back_to_login(),
        Intent::Answer(choice) => {
            if let Err(e) = app.answer_choice(choice) {
                log::debug!("Rejected answer {}: {}", choice + 1, e);
                view.notice = Some("Pick one of the listed answers".to_string());
            }
        }
        Intent::Continue => app.resume(),
        Intent::StartNew => app.start_new(),
        Intent::Retry => {
            view.show_review = false;
            app.retry();
        }
        Intent::ToggleReview => view.show_review = !view.show_review,
        Intent::Logout => {
            view.show_review = false;
            app.logout();
        }
        Intent::Quit => return Outcome::Quit,
        Intent::Unknown => view.notice = Some("Unrecognised input".to_string()),
    }

    Outcome::Render
}
