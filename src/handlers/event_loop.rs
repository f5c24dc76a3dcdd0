use std::{future::Future, io::Write, pin::Pin};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    app_state::AppState,
    errors::AppResult,
    handlers::intent_handler::{apply_intent, parse_intent, Outcome},
    models::domain::{quiz_session::TickOutcome, Question},
    services::{FetchTicket, TimerSlot},
    views::{format_time, render, ViewState},
};

type FetchFuture = Pin<Box<dyn Future<Output = AppResult<Vec<Question>>> + Send>>;

struct PendingFetch {
    ticket: FetchTicket,
    future: FetchFuture,
}

/// Runs the terminal front end until the user quits or stdin closes.
///
/// Input lines, timer events and the question fetch are handled one at a time
/// on the current task, so a tick can never interleave with an answer.
pub async fn run(mut app: AppState) -> AppResult<()> {
    let mut timers = TimerSlot::new(app.config.tick_interval, app.config.auto_save_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<PendingFetch> = None;
    let mut view = ViewState::default();

    show(&app, &view);

    loop {
        timers.sync(&app.quiz);

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log::debug!("stdin closed");
                    break;
                };
                let intent = parse_intent(app.screen(), &line);
                match apply_intent(&mut app, &mut view, intent) {
                    Outcome::Quit => break,
                    Outcome::Fetch(ticket) => {
                        pending = Some(spawn_fetch(&app, ticket));
                    }
                    Outcome::Render => {}
                }
                if !app.quiz.is_loading() {
                    // a cancelled or superseded start abandons its fetch
                    pending = None;
                }
                show(&app, &view);
            }
            event = timers.next() => {
                match timers.dispatch(event, &mut app.quiz) {
                    Some(TickOutcome::Expired) => {
                        app.refresh_screen();
                        println!("Time's up!");
                        show(&app, &view);
                    }
                    Some(TickOutcome::Running) => announce_time(app.quiz.session().time_left),
                    _ => {}
                }
            }
            (ticket, result) = next_fetch(&mut pending) => {
                if let Err(e) = app.complete_start(ticket, result) {
                    log::debug!("Start failed: {}", e);
                }
                show(&app, &view);
            }
        }
    }

    app.quiz.auto_save();
    Ok(())
}

fn spawn_fetch(app: &AppState, ticket: FetchTicket) -> PendingFetch {
    let source = app.quiz.question_source();
    let request = ticket.request().clone();
    PendingFetch {
        ticket,
        future: Box::pin(async move { source.fetch_questions(&request).await }),
    }
}

/// Resolves when the in-flight fetch completes; pends forever if there is none.
async fn next_fetch(
    pending: &mut Option<PendingFetch>,
) -> (FetchTicket, AppResult<Vec<Question>>) {
    let Some(fetch) = pending.as_mut() else {
        return std::future::pending().await;
    };
    let result = fetch.future.as_mut().await;
    let ticket = fetch.ticket.clone();
    *pending = None;
    (ticket, result)
}

fn announce_time(time_left: u32) {
    if time_left <= 10 || time_left % 60 == 0 {
        println!("  ... {} left", format_time(time_left));
    }
}

fn show(app: &AppState, view: &ViewState) {
    println!();
    print!("{}> ", render(app, view));
    let _ = std::io::stdout().flush();
}
