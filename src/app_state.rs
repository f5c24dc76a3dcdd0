use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{AnswerRecord, Question, QuizStatus},
    repositories::{FileStore, KeyValueStore, SessionRepository},
    services::{
        FetchTicket, IdentityStore, OpenTriviaClient, QuestionSource, QuizResult,
        QuizSessionStore, QuizSettings,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    ResumePrompt,
    Setup,
    Quiz,
    Result,
}

/// Composition root: owns both stores and turns user intents into store calls.
pub struct AppState {
    pub identity: IdentityStore,
    pub quiz: QuizSessionStore,
    pub config: Arc<Config>,
    screen: Screen,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let store = Arc::new(FileStore::open(&config.data_dir)?);
        let source = Arc::new(OpenTriviaClient::from_config(&config)?);
        Ok(Self::with_parts(config, store, source))
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn QuestionSource>,
    ) -> Self {
        let identity = IdentityStore::new(Arc::clone(&store));
        let quiz = QuizSessionStore::new(
            SessionRepository::sessions(store),
            source,
            QuizSettings::from_config(&config),
        );

        let mut state = Self {
            identity,
            quiz,
            config: Arc::new(config),
            screen: Screen::Login,
        };
        state.screen = state.landing_screen();
        state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    fn landing_screen(&self) -> Screen {
        if !self.identity.is_logged_in() {
            Screen::Login
        } else if self.quiz.has_unfinished_quiz() {
            Screen::ResumePrompt
        } else if self.quiz.status() == QuizStatus::Finished {
            Screen::Result
        } else {
            Screen::Setup
        }
    }

    pub fn login(&mut self, name: &str) -> AppResult<()> {
        self.identity.login(name)?;
        self.screen = if self.quiz.has_unfinished_quiz() {
            Screen::ResumePrompt
        } else {
            Screen::Setup
        };
        Ok(())
    }

    pub fn back_to_login(&mut self) {
        self.quiz.cancel_start();
        self.screen = Screen::Login;
    }

    pub fn begin_start(&mut self) -> AppResult<FetchTicket> {
        if !self.identity.is_logged_in() {
            return Err(AppError::InvalidState("Log in before starting a quiz".to_string()));
        }
        self.quiz.begin_start()
    }

    pub fn complete_start(
        &mut self,
        ticket: FetchTicket,
        result: AppResult<Vec<Question>>,
    ) -> AppResult<()> {
        self.quiz.complete_start(ticket, result)?;
        self.refresh_screen();
        Ok(())
    }

    pub async fn start(&mut self) -> AppResult<()> {
        let ticket = self.begin_start()?;
        let source = self.quiz.question_source();
        let result = source.fetch_questions(ticket.request()).await;
        self.complete_start(ticket, result)
    }

    pub fn answer_choice(&mut self, choice: usize) -> AppResult<AnswerRecord> {
        let record = self.quiz.answer_choice(choice)?;
        self.refresh_screen();
        Ok(record)
    }

    /// Moves to the screen implied by the quiz status after a store change.
    pub fn refresh_screen(&mut self) {
        self.screen = match (self.screen, self.quiz.status()) {
            (Screen::Setup, QuizStatus::InProgress) => Screen::Quiz,
            (Screen::Quiz | Screen::ResumePrompt, QuizStatus::Finished) => Screen::Result,
            (Screen::Quiz, QuizStatus::Idle) => Screen::Setup,
            (screen, _) => screen,
        };
    }

    pub fn resume(&mut self) {
        self.screen = if self.quiz.resume() {
            Screen::Quiz
        } else if self.quiz.status() == QuizStatus::Finished {
            Screen::Result
        } else {
            Screen::Setup
        };
    }

    pub fn start_new(&mut self) {
        self.quiz.reset();
        self.screen = Screen::Setup;
    }

    pub fn retry(&mut self) {
        self.quiz.reset();
        self.screen = Screen::Setup;
    }

    pub fn logout(&mut self) {
        self.quiz.reset();
        self.identity.logout();
        self.screen = Screen::Login;
    }

    pub fn result(&self) -> Option<QuizResult> {
        (self.quiz.status() == QuizStatus::Finished)
            .then(|| QuizResult::from_session(self.quiz.session()))
    }
}
