//! Live workout session timer.
//!
//! A `LiveSession` is a small state machine (Idle → Running ⇄ Paused → Idle)
//! that accrues elapsed seconds, calories and a simulated heart rate once per
//! tick while Running. The `Ticker` drives ticks on the caller's thread at a
//! fixed interval.

use crate::clock::time_label;
use crate::types::{new_id, ExerciseItem, Intensity};
use chrono::NaiveDateTime;
use rand::Rng;
use std::time::Duration;

/// Sessions at or below this many calories are discarded on finish
pub const LOG_THRESHOLD_KCAL: f64 = 10.0;

/// Heart-rate jitter applied around the intensity baseline, in bpm
pub const HEART_RATE_JITTER: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Snapshot of the live metrics for display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveMetrics {
    pub state: TimerState,
    pub seconds: u32,
    pub calories: f64,
    pub heart_rate: u32,
    pub sets: u32,
    pub intensity: Intensity,
}

#[derive(Clone, Debug, Default)]
pub struct LiveSession {
    state: TimerState,
    seconds: u32,
    calories: f64,
    heart_rate: u32,
    sets: u32,
    intensity: Intensity,
}

impl LiveSession {
    pub fn new(intensity: Intensity) -> Self {
        Self {
            intensity,
            ..Self::default()
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Running or Paused
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    /// Simulated heart rate; zero whenever the timer is not running
    pub fn heart_rate(&self) -> u32 {
        if self.is_running() {
            self.heart_rate
        } else {
            0
        }
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn metrics(&self) -> LiveMetrics {
        LiveMetrics {
            state: self.state,
            seconds: self.seconds,
            calories: self.calories,
            heart_rate: self.heart_rate(),
            sets: self.sets,
            intensity: self.intensity,
        }
    }

    /// Start from Idle, or flip between Running and Paused
    pub fn toggle(&mut self) -> TimerState {
        self.state = match self.state {
            TimerState::Idle | TimerState::Paused => TimerState::Running,
            TimerState::Running => {
                self.heart_rate = 0;
                TimerState::Paused
            }
        };
        tracing::debug!("Live session now {:?} at {}s", self.state, self.seconds);
        self.state
    }

    /// Takes effect on the next tick
    pub fn set_intensity(&mut self, intensity: Intensity) {
        self.intensity = intensity;
    }

    /// Count one resistance set. Only counts while running.
    pub fn log_set(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.sets += 1;
        true
    }

    /// Advance one second. Returns false (and changes nothing) unless running.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.is_running() {
            return false;
        }

        self.seconds += 1;
        self.calories += self.intensity.burn_rate();

        let jitter = rng.gen_range(-HEART_RATE_JITTER..=HEART_RATE_JITTER);
        self.heart_rate = self.intensity.base_heart_rate().saturating_add_signed(jitter);
        true
    }

    /// End an armed session
    ///
    /// Returns the exercise entry to log when the session burned more than
    /// the threshold. Every metric is reset and the timer returns to Idle.
    /// Finishing an Idle timer is a no-op.
    pub fn finish(&mut self, now: NaiveDateTime) -> Option<ExerciseItem> {
        if !self.is_armed() {
            return None;
        }

        let entry = if self.calories > LOG_THRESHOLD_KCAL {
            Some(ExerciseItem {
                id: new_id(),
                name: format!("Live Session ({} Sets)", self.sets),
                calories: self.calories.floor(),
                time: time_label(now),
            })
        } else {
            tracing::info!(
                "Discarding live session: {:.2} kcal is under the {} kcal threshold",
                self.calories,
                LOG_THRESHOLD_KCAL
            );
            None
        };

        let intensity = self.intensity;
        *self = Self::new(intensity);
        entry
    }
}

/// Drives a live session at a fixed cadence
#[derive(Clone, Copy, Debug)]
pub struct Ticker {
    interval: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tick `session` up to `ticks` times, waiting one interval before each
    ///
    /// `on_tick` runs after every tick and may change the session (pause it,
    /// log a set, switch intensity). Stops early once the session is no
    /// longer running. Returns the number of ticks applied.
    pub fn run<R, F>(&self, session: &mut LiveSession, ticks: u32, rng: &mut R, mut on_tick: F) -> u32
    where
        R: Rng + ?Sized,
        F: FnMut(&mut LiveSession),
    {
        let mut applied = 0;
        while applied < ticks && session.is_running() {
            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
            if !session.tick(rng) {
                break;
            }
            applied += 1;
            on_tick(session);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    }

    fn run_ticks(session: &mut LiveSession, n: u32) {
        let mut rng = rng();
        for _ in 0..n {
            session.tick(&mut rng);
        }
    }

    #[test]
    fn test_starts_idle() {
        let session = LiveSession::new(Intensity::Med);
        assert_eq!(session.state(), TimerState::Idle);
        assert!(!session.is_armed());
        assert_eq!(session.heart_rate(), 0);
    }

    #[test]
    fn test_med_accrual_over_ten_ticks() {
        let mut session = LiveSession::new(Intensity::Med);
        session.toggle();

        let mut rng = rng();
        for _ in 0..10 {
            assert!(session.tick(&mut rng));
            let hr = session.heart_rate();
            assert!((128..=132).contains(&hr), "heart rate {} out of range", hr);
        }

        assert_eq!(session.seconds(), 10);
        assert!((session.calories() - 1.5).abs() < 1e-9);

        session.toggle();
        assert_eq!(session.state(), TimerState::Paused);
        assert_eq!(session.heart_rate(), 0);
    }

    #[test]
    fn test_paused_and_idle_do_not_accrue() {
        let mut session = LiveSession::new(Intensity::High);
        run_ticks(&mut session, 5);
        assert_eq!(session.seconds(), 0);

        session.toggle();
        run_ticks(&mut session, 2);
        session.toggle();
        run_ticks(&mut session, 5);
        assert_eq!(session.seconds(), 2);
        assert_eq!(session.calories(), 0.5);
    }

    #[test]
    fn test_intensity_change_applies_to_next_tick() {
        let mut session = LiveSession::new(Intensity::Low);
        session.toggle();
        run_ticks(&mut session, 1);
        session.set_intensity(Intensity::High);
        let mut rng = rng();
        session.tick(&mut rng);
        assert!((session.calories() - 0.35).abs() < 1e-9);
        assert!((158..=162).contains(&session.heart_rate()));
    }

    #[test]
    fn test_sets_only_count_while_running() {
        let mut session = LiveSession::new(Intensity::Med);
        assert!(!session.log_set());
        session.toggle();
        assert!(session.log_set());
        session.toggle();
        assert!(!session.log_set());
        assert_eq!(session.sets(), 1);
    }

    #[test]
    fn test_finish_under_threshold_logs_nothing() {
        let mut session = LiveSession::new(Intensity::High);
        session.toggle();
        run_ticks(&mut session, 32);
        assert_eq!(session.calories(), 8.0);

        assert!(session.finish(now()).is_none());
        assert_eq!(session.state(), TimerState::Idle);
        assert_eq!(session.seconds(), 0);
    }

    #[test]
    fn test_finish_over_threshold_logs_one_entry() {
        let mut session = LiveSession::new(Intensity::High);
        session.toggle();
        for _ in 0..3 {
            session.log_set();
        }
        run_ticks(&mut session, 48);
        assert_eq!(session.calories(), 12.0);

        let entry = session.finish(now()).unwrap();
        assert_eq!(entry.name, "Live Session (3 Sets)");
        assert_eq!(entry.calories, 12.0);
        assert_eq!(entry.time, "18:30");

        let metrics = session.metrics();
        assert_eq!(metrics.state, TimerState::Idle);
        assert_eq!(metrics.seconds, 0);
        assert_eq!(metrics.calories, 0.0);
        assert_eq!(metrics.heart_rate, 0);
        assert_eq!(metrics.sets, 0);
    }

    #[test]
    fn test_finish_floors_calories_and_works_from_pause() {
        let mut session = LiveSession::new(Intensity::Med);
        session.toggle();
        run_ticks(&mut session, 80); // 12.0 kcal, give or take float error
        session.toggle();
        let entry = session.finish(now()).unwrap();
        assert!(entry.calories == 11.0 || entry.calories == 12.0);
        assert_eq!(entry.calories.fract(), 0.0);
    }

    #[test]
    fn test_finish_when_idle_is_noop() {
        let mut session = LiveSession::new(Intensity::Low);
        assert!(session.finish(now()).is_none());
        assert_eq!(session.intensity(), Intensity::Low);
    }

    #[test]
    fn test_ticker_stops_when_paused() {
        let mut session = LiveSession::new(Intensity::Med);
        session.toggle();

        let ticker = Ticker::from_millis(0);
        let mut rng = rng();
        let applied = ticker.run(&mut session, 100, &mut rng, |s| {
            if s.seconds() == 4 {
                s.toggle();
            }
        });

        assert_eq!(applied, 4);
        assert_eq!(session.seconds(), 4);
        assert_eq!(session.state(), TimerState::Paused);
    }

    #[test]
    fn test_ticker_does_nothing_when_idle() {
        let mut session = LiveSession::new(Intensity::Med);
        let mut rng = rng();
        assert_eq!(Ticker::from_millis(0).run(&mut session, 10, &mut rng, |_| {}), 0);
    }
}
