use std::fmt::Write;

use crate::{
    app_state::{AppState, Screen},
    constants::NOT_ANSWERED_LABEL,
    models::domain::QuizSession,
    services::QuizResult,
};

/// Presentation-only flags that do not belong to either store.
#[derive(Debug, Default)]
pub struct ViewState {
    pub login_error: Option<String>,
    pub notice: Option<String>,
    pub show_review: bool,
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn render(app: &AppState, view: &ViewState) -> String {
    let mut out = match app.screen() {
        Screen::Login => render_login(view.login_error.as_deref()),
        Screen::Setup => render_setup(app),
        Screen::ResumePrompt => render_resume_prompt(app.quiz.session()),
        Screen::Quiz => render_question(app.quiz.session()),
        Screen::Result => match app.result() {
            Some(result) => render_result(&result, view.show_review),
            None => render_setup(app),
        },
    };
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {}", notice);
    }
    out
}

pub fn render_login(error: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== dot.quiz ===");
    let _ = writeln!(out, "Test your knowledge!");
    let _ = writeln!(out);
    if let Some(error) = error {
        let _ = writeln!(out, "! {}", error);
    }
    let _ = writeln!(out, "Enter your name:");
    out
}

pub fn render_setup(app: &AppState) -> String {
    let settings = app.quiz.settings();
    let mut out = String::new();
    let _ = writeln!(out, "Hi, {}!", app.identity.name());
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total questions  {}", settings.total_questions);
    let _ = writeln!(out, "  Time limit       {}", describe_duration(settings.total_time));
    let _ = writeln!(out);
    if let Some(error) = app.quiz.error() {
        let _ = writeln!(out, "! {}", error);
    }
    if app.quiz.is_loading() {
        let _ = writeln!(out, "Loading questions...");
    } else {
        let _ = writeln!(out, "[s] start quiz   [b] back   [q] quit");
    }
    out
}

pub fn render_resume_prompt(session: &QuizSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome back! You have an unfinished quiz:");
    let _ = writeln!(
        out,
        "  Progress   {}/{} questions",
        session.current_index + 1,
        session.questions.len()
    );
    let _ = writeln!(out, "  Time left  {}", format_time(session.time_left));
    let _ = writeln!(out);
    let _ = writeln!(out, "[c] continue quiz   [n] start new quiz");
    out
}

pub fn render_question(session: &QuizSession) -> String {
    let mut out = String::new();
    let Some(question) = session.current_question() else {
        return out;
    };

    let _ = writeln!(
        out,
        "Question {}/{}   time left {}",
        session.current_index + 1,
        session.questions.len(),
        format_time(session.time_left)
    );
    let _ = writeln!(out, "[{} | {:?}]", question.category, question.difficulty);
    let _ = writeln!(out, "{}", question.question);
    for (i, answer) in question.all_answers.iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", i + 1, answer);
    }
    out
}

pub fn render_result(result: &QuizResult, show_review: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Quiz complete! ===");
    let _ = writeln!(out, "{}%  grade {}", result.percentage, result.grade);
    let _ = writeln!(out, "{}", result.grade.message());
    let _ = writeln!(
        out,
        "Correct {}   Wrong {}   Total {}",
        result.correct, result.wrong, result.total
    );
    let _ = writeln!(out);

    if show_review {
        for item in &result.review {
            let mark = if item.is_correct { "ok" } else { "x" };
            let _ = writeln!(out, "Q{}: {}", item.number, item.question);
            let _ = writeln!(
                out,
                "    Your answer: {} [{}]",
                item.selected_answer.as_deref().unwrap_or(NOT_ANSWERED_LABEL),
                mark
            );
            if !item.is_correct {
                let _ = writeln!(out, "    Correct: {}", item.correct_answer);
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "[r] try another quiz   [v] {} review   [l] logout   [q] quit",
        if show_review { "hide" } else { "show" }
    );
    out
}

fn describe_duration(seconds: u32) -> String {
    if seconds % 60 == 0 {
        let minutes = seconds / 60;
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        format_time(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_questions;

    #[test]
    fn test_formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(300), "5:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_describes_whole_minutes() {
        assert_eq!(describe_duration(300), "5 minutes");
        assert_eq!(describe_duration(60), "1 minute");
        assert_eq!(describe_duration(90), "1:30");
    }

    #[test]
    fn test_resume_prompt_shows_progress_and_time() {
        let mut session = QuizSession::in_progress(sample_questions(10), 300);
        session.record_answer("x").unwrap();
        session.record_answer("x").unwrap();
        session.time_left = 125;

        let text = render_resume_prompt(&session);

        assert!(text.contains("3/10 questions"));
        assert!(text.contains("2:05"));
    }

    #[test]
    fn test_question_lists_numbered_answers() {
        let session = QuizSession::in_progress(sample_questions(2), 300);

        let text = render_question(&session);

        assert!(text.contains("Question 1/2"));
        for i in 1..=4 {
            assert!(text.contains(&format!("  {}) ", i)));
        }
    }

    #[test]
    fn test_review_marks_unanswered_questions() {
        let mut session = QuizSession::in_progress(sample_questions(2), 1);
        session.tick();
        let result = QuizResult::from_session(&session);

        let text = render_result(&result, true);

        assert!(text.contains("0%  grade F"));
        assert!(text.contains(NOT_ANSWERED_LABEL));
        assert!(text.contains("Correct: Answer 1"));
    }
}
