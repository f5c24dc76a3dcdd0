use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::{
    models::domain::{quiz_session::TickOutcome, QuizStatus},
    services::quiz_session_store::QuizSessionStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
    AutoSave,
}

/// Countdown and autosave intervals for one in-progress session.
pub struct SessionTimers {
    epoch: u64,
    tick: Interval,
    auto_save: Interval,
}

impl SessionTimers {
    pub fn start(epoch: u64, tick_period: Duration, auto_save_period: Duration) -> Self {
        let now = Instant::now();
        let mut tick = interval_at(now + tick_period, tick_period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut auto_save = interval_at(now + auto_save_period, auto_save_period);
        auto_save.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            epoch,
            tick,
            auto_save,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub async fn next(&mut self) -> TimerEvent {
        tokio::select! {
            biased;
            _ = self.tick.tick() => TimerEvent::Tick,
            _ = self.auto_save.tick() => TimerEvent::AutoSave,
        }
    }
}

/// Holds the timers of the store's current session, if it is in progress.
///
/// Call [`sync`](TimerSlot::sync) after every store mutation: timers start on
/// entering IN_PROGRESS and are dropped on any other status or when the session
/// epoch changes, so nothing fires for a superseded session.
pub struct TimerSlot {
    timers: Option<SessionTimers>,
    tick_period: Duration,
    auto_save_period: Duration,
}

impl TimerSlot {
    pub fn new(tick_period: Duration, auto_save_period: Duration) -> Self {
        Self {
            timers: None,
            tick_period,
            auto_save_period,
        }
    }

    pub fn sync(&mut self, store: &QuizSessionStore) {
        if store.status() != QuizStatus::InProgress {
            if self.timers.take().is_some() {
                log::debug!("Stopped session timers");
            }
            return;
        }

        let current = self.timers.as_ref().map(SessionTimers::epoch);
        if current != Some(store.epoch()) {
            log::debug!("Started session timers for epoch {}", store.epoch());
            self.timers = Some(SessionTimers::start(
                store.epoch(),
                self.tick_period,
                self.auto_save_period,
            ));
        }
    }

    pub fn stop(&mut self) {
        self.timers = None;
    }

    pub fn is_running(&self) -> bool {
        self.timers.is_some()
    }

    /// Epoch of the session the running timers belong to.
    pub fn epoch(&self) -> Option<u64> {
        self.timers.as_ref().map(SessionTimers::epoch)
    }

    /// Waits for the next timer event; pends forever while stopped.
    pub async fn next(&mut self) -> TimerEvent {
        match self.timers.as_mut() {
            Some(timers) => timers.next().await,
            None => std::future::pending().await,
        }
    }

    /// Applies `event` to the store and re-syncs. Returns the tick outcome for ticks.
    pub fn dispatch(&mut self, event: TimerEvent, store: &mut QuizSessionStore) -> Option<TickOutcome> {
        let outcome = match event {
            TimerEvent::Tick => Some(store.tick()),
            TimerEvent::AutoSave => {
                store.auto_save();
                None
            }
        };
        self.sync(store);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{
        constants::SESSION_STORAGE_KEY,
        models::domain::QuizSession,
        repositories::{KeyValueStore, MemoryStore, SessionRepository},
        services::{
            question_source::MockQuestionSource, quiz_session_store::QuizSettings,
        },
        test_utils::fixtures::sample_questions,
    };

    fn settings(total_time: u32) -> QuizSettings {
        QuizSettings {
            total_questions: 4,
            category: 9,
            question_type: "multiple".to_string(),
            total_time,
        }
    }

    async fn running_store(total_time: u32) -> (QuizSessionStore, Arc<MemoryStore>) {
        let mut source = MockQuestionSource::new();
        source
            .expect_fetch_questions()
            .returning(|_| Ok(sample_questions(4)));
        let memory = Arc::new(MemoryStore::new());
        let mut store = QuizSessionStore::new(
            SessionRepository::sessions(memory.clone()),
            Arc::new(source),
            settings(total_time),
        );
        store.start().await.expect("start succeeds");
        (store, memory)
    }

    fn slot() -> TimerSlot {
        TimerSlot::new(Duration::from_secs(1), Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_runs_until_expiry_then_stops() {
        let (mut store, memory) = running_store(3).await;
        let mut timers = slot();
        timers.sync(&store);
        assert!(timers.is_running());

        let started = Instant::now();
        let mut ticks = 0;
        while timers.is_running() {
            let event = timers.next().await;
            if timers.dispatch(event, &mut store).is_some() {
                ticks += 1;
            }
        }

        assert_eq!(ticks, 3);
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(store.status(), QuizStatus::Finished);
        let raw = memory.get(SESSION_STORAGE_KEY).unwrap().unwrap();
        let saved: QuizSession = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.status, QuizStatus::Finished);
        assert_eq!(saved.time_left, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_save_fires_on_its_own_interval() {
        let (mut store, _) = running_store(60).await;
        let mut timers = slot();
        timers.sync(&store);

        let mut events = Vec::new();
        for _ in 0..6 {
            let event = timers.next().await;
            timers.dispatch(event, &mut store);
            events.push(event);
        }

        assert_eq!(
            events.iter().filter(|e| **e == TimerEvent::AutoSave).count(),
            1
        );
        assert_eq!(store.session().time_left, 55);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_drops_timers() {
        let (mut store, _) = running_store(60).await;
        let mut timers = slot();
        timers.sync(&store);

        store.reset();
        timers.sync(&store);

        assert!(!timers.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_session_replaces_timers() {
        let (mut store, _) = running_store(60).await;
        let mut timers = slot();
        timers.sync(&store);
        let first_epoch = store.epoch();

        store.start().await.expect("restart succeeds");
        timers.sync(&store);

        assert!(timers.is_running());
        assert_ne!(store.epoch(), first_epoch);
        assert_eq!(timers.epoch(), Some(store.epoch()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restored_session_keeps_counting_down() {
        let (mut first, memory) = running_store(60).await;
        first.answer("x").unwrap();
        first.tick();
        first.tick();
        drop(first);

        let mut restored = QuizSessionStore::new(
            SessionRepository::sessions(memory.clone()),
            Arc::new(MockQuestionSource::new()),
            settings(60),
        );
        assert_eq!(restored.session().time_left, 58);
        let mut timers = slot();
        timers.sync(&restored);
        assert_eq!(timers.epoch(), Some(0));

        let started = Instant::now();
        let event = timers.next().await;
        let outcome = timers.dispatch(event, &mut restored);

        assert_eq!(event, TimerEvent::Tick);
        assert_eq!(outcome, Some(TickOutcome::Running));
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(restored.session().time_left, 57);
        assert_eq!(restored.session().current_index, 1);
        let raw = memory.get(SESSION_STORAGE_KEY).unwrap().unwrap();
        let saved: QuizSession = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.time_left, 57);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answering_last_question_stops_timers() {
        let (mut store, _) = running_store(60).await;
        let mut timers = slot();
        timers.sync(&store);

        for _ in 0..4 {
            store.answer("x").unwrap();
            timers.sync(&store);
        }

        assert!(!timers.is_running());
    }
}
