use std::sync::Arc;

use crate::{
    config::Config,
    constants::NO_QUESTIONS_MESSAGE,
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz_session::TickOutcome, AnswerRecord, Question, QuizSession, QuizStatus,
        },
        dto::request::QuestionRequest,
    },
    repositories::SessionRepository,
    services::{question_source::QuestionSource, shuffle::shuffle},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    pub total_questions: usize,
    pub category: u32,
    pub question_type: String,
    pub total_time: u32,
}

impl QuizSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            total_questions: config.total_questions,
            category: config.category,
            question_type: config.question_type.clone(),
            total_time: config.total_time_secs,
        }
    }

    fn request(&self) -> QuestionRequest {
        QuestionRequest {
            amount: self.total_questions,
            category: self.category,
            question_type: self.question_type.clone(),
        }
    }
}

/// A fetch started by [`QuizSessionStore::begin_start`], tied to the session epoch it was issued for.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    epoch: u64,
    request: QuestionRequest,
}

impl FetchTicket {
    pub fn request(&self) -> &QuestionRequest {
        &self.request
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

pub struct QuizSessionStore {
    session: QuizSession,
    repository: SessionRepository,
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    epoch: u64,
    loading: bool,
    error: Option<String>,
}

impl QuizSessionStore {
    /// Creates the store, adopting a persisted session only if it is still in progress.
    pub fn new(
        repository: SessionRepository,
        source: Arc<dyn QuestionSource>,
        settings: QuizSettings,
    ) -> Self {
        let session = Self::restore(&repository, &settings);
        Self {
            session,
            repository,
            source,
            settings,
            epoch: 0,
            loading: false,
            error: None,
        }
    }

    fn restore(repository: &SessionRepository, settings: &QuizSettings) -> QuizSession {
        let fresh = || QuizSession::new(settings.total_questions, settings.total_time);

        let Some(saved) = repository.load() else {
            return fresh();
        };

        if saved.status == QuizStatus::InProgress && saved.is_resumable() {
            log::info!(
                "Resuming quiz at question {}/{} with {}s left",
                saved.current_index + 1,
                saved.questions.len(),
                saved.time_left
            );
            return saved;
        }

        log::info!("Discarding persisted quiz with status {:?}", saved.status);
        if let Err(e) = repository.clear() {
            log::warn!("Failed to clear stale quiz record: {}", e);
        }
        fresh()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn status(&self) -> QuizStatus {
        self.session.status
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Changes whenever the current session is replaced or discarded.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_unfinished_quiz(&self) -> bool {
        self.session.has_unfinished_quiz()
    }

    pub fn resume(&self) -> bool {
        self.session.status == QuizStatus::InProgress
    }

    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.source)
    }

    /// Fetches a batch and starts a new session. Prior state is untouched on failure.
    pub async fn start(&mut self) -> AppResult<()> {
        let ticket = self.begin_start()?;
        let source = self.question_source();
        let result = source.fetch_questions(ticket.request()).await;
        self.complete_start(ticket, result)
    }

    /// First half of [`start`](Self::start): marks the store loading and hands out the request.
    pub fn begin_start(&mut self) -> AppResult<FetchTicket> {
        if self.loading {
            return Err(AppError::InvalidState(
                "Questions are already being fetched".to_string(),
            ));
        }
        self.loading = true;
        self.error = None;
        Ok(FetchTicket {
            epoch: self.epoch,
            request: self.settings.request(),
        })
    }

    /// Second half of [`start`](Self::start). Results for a superseded epoch are dropped.
    pub fn complete_start(
        &mut self,
        ticket: FetchTicket,
        result: AppResult<Vec<Question>>,
    ) -> AppResult<()> {
        if ticket.epoch != self.epoch {
            log::debug!(
                "Dropping question batch for superseded session {} (current {})",
                ticket.epoch,
                self.epoch
            );
            return Ok(());
        }
        self.loading = false;

        let questions = result.and_then(|questions| {
            if questions.is_empty() || questions.len() != ticket.request.amount {
                log::warn!(
                    "Expected {} questions, source returned {}",
                    ticket.request.amount,
                    questions.len()
                );
                return Err(AppError::QuestionsUnavailable(
                    NO_QUESTIONS_MESSAGE.to_string(),
                ));
            }
            Ok(questions)
        });

        match questions {
            Ok(questions) => {
                self.session = QuizSession::in_progress(shuffle(&questions), self.settings.total_time);
                self.epoch += 1;
                log::info!(
                    "Quiz started with {} questions and {}s on the clock",
                    self.session.questions.len(),
                    self.session.total_time
                );
                self.persist();
                Ok(())
            }
            Err(e) => {
                log::warn!("Quiz could not start: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Abandons an in-flight start; its result will be dropped when it arrives.
    pub fn cancel_start(&mut self) {
        if self.loading {
            self.loading = false;
            self.epoch += 1;
            log::debug!("Cancelled pending quiz start");
        }
    }

    /// Records `selected_answer` for the current question.
    pub fn answer(&mut self, selected_answer: &str) -> AppResult<AnswerRecord> {
        let record = self.session.record_answer(selected_answer)?;
        if self.session.status == QuizStatus::Finished {
            log::info!(
                "Quiz finished: {}/{} correct",
                self.session.correct_count(),
                self.session.questions.len()
            );
        }
        self.persist();
        Ok(record)
    }

    /// Answers with the current question's answer at `choice` (0-based).
    pub fn answer_choice(&mut self, choice: usize) -> AppResult<AnswerRecord> {
        let selected = self
            .session
            .current_question()
            .and_then(|q| q.answer_at(choice))
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidState(format!("No answer option {}", choice + 1)))?;
        self.answer(&selected)
    }

    /// One countdown tick. Expiry finishes the session and is persisted with it.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Running => self.persist(),
            TickOutcome::Expired => {
                log::info!(
                    "Time is up with {}/{} questions answered",
                    self.session.user_answers.len(),
                    self.session.questions.len()
                );
                self.persist();
            }
        }
        outcome
    }

    /// Periodic save; only an in-progress session is written.
    pub fn auto_save(&mut self) {
        if self.session.status == QuizStatus::InProgress {
            self.persist();
        }
    }

    /// Discards the session and its persisted record.
    pub fn reset(&mut self) {
        self.session = QuizSession::new(self.settings.total_questions, self.settings.total_time);
        self.epoch += 1;
        self.loading = false;
        self.error = None;
        self.persist();
        log::debug!("Quiz reset");
    }

    fn persist(&mut self) {
        let result = match self.session.status {
            QuizStatus::Idle => self.repository.clear(),
            QuizStatus::InProgress | QuizStatus::Finished => {
                self.session.saved_at = Some(chrono::Utc::now());
                self.repository.save(&self.session)
            }
        };
        if let Err(e) = result {
            log::error!("Failed to persist quiz state: {}", e);
        }
    }
}
