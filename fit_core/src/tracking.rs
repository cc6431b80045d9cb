//! Per-profile tracking state and its mutation operations.
//!
//! `TrackingState` is the in-memory form of one profile's record: the daily
//! counters (water, food, exercise) plus the long-lived collections. All
//! mutations are plain in-place edits; persisting them is the store's job.

use crate::catalog::default_workouts;
use crate::clock::short_date_label;
use crate::types::*;
use chrono::NaiveDate;

/// Upper bound on daily water intake, in liters
pub const MAX_WATER_LITERS: f64 = 5.0;

/// Weight used for the seed entry and when a profile has none recorded
pub const DEFAULT_WEIGHT: f64 = 180.0;

/// Records addressed by a string id
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_identified!(
    FoodItem,
    ExerciseItem,
    WeightEntry,
    ProgressMedia,
    CoachSession,
    Workout,
    WorkoutHistory,
    ExerciseLog,
    ExerciseSet,
    BookingSlot,
    TrainerService,
    Post,
);

/// Replace the entry sharing `item`'s id. Returns false when no entry matched.
pub fn replace_by_id<T: Identified>(list: &mut [T], item: T) -> bool {
    match list.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// Remove every entry with `id`. Returns false when nothing was removed.
pub fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id() != id);
    list.len() != before
}

pub(crate) fn clamp_water(liters: f64) -> f64 {
    liters.clamp(0.0, MAX_WATER_LITERS)
}

/// The weight history a brand-new profile starts with
pub fn seed_weight_entry(label: impl Into<String>) -> WeightEntry {
    WeightEntry {
        id: "1".into(),
        date: label.into(),
        weight: DEFAULT_WEIGHT,
    }
}

/// All data owned by one profile
#[derive(Clone, Debug, PartialEq)]
pub struct TrackingState {
    pub water_intake: f64,
    /// Newest first
    pub food_log: Vec<FoodItem>,
    /// Newest first
    pub exercise_log: Vec<ExerciseItem>,
    /// Insertion order; first is the start weight, last the current one
    pub weight_data: Vec<WeightEntry>,
    pub progress_gallery: Vec<ProgressMedia>,
    pub coach_sessions: Vec<CoachSession>,
    pub workouts: Vec<Workout>,
    pub workout_history: Vec<WorkoutHistory>,
}

impl TrackingState {
    /// State for a profile with no stored record
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            water_intake: 0.0,
            food_log: Vec::new(),
            exercise_log: Vec::new(),
            weight_data: vec![seed_weight_entry(short_date_label(today))],
            progress_gallery: Vec::new(),
            coach_sessions: Vec::new(),
            workouts: default_workouts(),
            workout_history: Vec::new(),
        }
    }

    /// Clear the day-scoped counters, keeping every long-lived collection
    pub fn roll_over(&mut self) {
        self.water_intake = 0.0;
        self.food_log.clear();
        self.exercise_log.clear();
    }

    // ------------------------------------------------------------------
    // Food
    // ------------------------------------------------------------------

    pub fn add_food(&mut self, item: FoodItem) {
        tracing::debug!("Logging food {} ({} kcal)", item.name, item.calories);
        self.food_log.insert(0, item);
    }

    pub fn update_food(&mut self, item: FoodItem) -> bool {
        replace_by_id(&mut self.food_log, item)
    }

    pub fn delete_food(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.food_log, id)
    }

    // ------------------------------------------------------------------
    // Exercise
    // ------------------------------------------------------------------

    /// Prepend an exercise. Entries with a non-finite or negative burn are ignored.
    pub fn add_exercise(&mut self, item: ExerciseItem) -> bool {
        if !item.calories.is_finite() || item.calories < 0.0 {
            tracing::warn!("Ignoring exercise {} with calories {}", item.name, item.calories);
            return false;
        }
        self.exercise_log.insert(0, item);
        true
    }

    pub fn delete_exercise(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.exercise_log, id)
    }

    // ------------------------------------------------------------------
    // Water
    // ------------------------------------------------------------------

    /// Set the day's water intake, clamped to [0, 5] liters
    pub fn set_water(&mut self, liters: f64) -> f64 {
        if liters.is_finite() {
            self.water_intake = clamp_water(liters);
        }
        self.water_intake
    }

    /// Add to the day's water intake, clamped to [0, 5] liters
    pub fn add_water(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.water_intake = clamp_water(self.water_intake + delta);
        }
        self.water_intake
    }

    // ------------------------------------------------------------------
    // Weight and media
    // ------------------------------------------------------------------

    pub fn add_weight(&mut self, entry: WeightEntry) -> bool {
        if !entry.weight.is_finite() {
            return false;
        }
        self.weight_data.push(entry);
        true
    }

    pub fn update_weight(&mut self, entry: WeightEntry) -> bool {
        entry.weight.is_finite() && replace_by_id(&mut self.weight_data, entry)
    }

    pub fn delete_weight(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.weight_data, id)
    }

    pub fn add_media(&mut self, media: ProgressMedia) {
        self.progress_gallery.insert(0, media);
    }

    pub fn update_media(&mut self, media: ProgressMedia) -> bool {
        replace_by_id(&mut self.progress_gallery, media)
    }

    pub fn delete_media(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.progress_gallery, id)
    }

    // ------------------------------------------------------------------
    // Coach vault, workout library, history
    // ------------------------------------------------------------------

    pub fn add_coach_session(&mut self, session: CoachSession) {
        self.coach_sessions.insert(0, session);
    }

    pub fn update_coach_session(&mut self, session: CoachSession) -> bool {
        replace_by_id(&mut self.coach_sessions, session)
    }

    pub fn delete_coach_session(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.coach_sessions, id)
    }

    pub fn add_workout(&mut self, workout: Workout) {
        self.workouts.insert(0, workout);
    }

    pub fn update_workout(&mut self, workout: Workout) -> bool {
        replace_by_id(&mut self.workouts, workout)
    }

    pub fn delete_workout(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.workouts, id)
    }

    pub fn add_history(&mut self, entry: WorkoutHistory) {
        self.workout_history.insert(0, entry);
    }

    pub fn delete_history(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.workout_history, id)
    }

    // ------------------------------------------------------------------
    // Derived reads
    // ------------------------------------------------------------------

    pub fn total_calories_in(&self) -> u32 {
        self.food_log
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.calories))
    }

    /// Logged exercise plus whatever the in-progress live session has accrued
    pub fn total_calories_burned(&self, live_calories: f64) -> f64 {
        self.exercise_log.iter().map(|item| item.calories).sum::<f64>() + live_calories
    }

    pub fn net_balance(&self, live_calories: f64) -> f64 {
        f64::from(self.total_calories_in()) - self.total_calories_burned(live_calories)
    }

    pub fn remaining_budget(&self, calorie_goal: u32, live_calories: f64) -> f64 {
        f64::from(calorie_goal) - self.net_balance(live_calories)
    }

    pub fn macro_totals(&self) -> Macros {
        self.food_log
            .iter()
            .fold(Macros::default(), |acc, item| acc + item.macros)
    }
}
