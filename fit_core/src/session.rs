//! The logged-in user's working context.
//!
//! A `Session` owns the profile store, the active profile and its tracking
//! state, plus the in-memory boards (live timer, booking, feed, active
//! workout). Every mutation of tracking data is saved before the call
//! returns, so the stored record never lags the in-memory state.

use crate::booking::BookingBoard;
use crate::catalog::{daily_directive, Quote};
use crate::clock::short_date_label;
use crate::feed::Feed;
use crate::forms::{self, FoodForm};
use crate::live::LiveSession;
use crate::nutrition::{calorie_goal, macro_targets};
use crate::storage::KeyValueStore;
use crate::store::ProfileStore;
use crate::tracking::TrackingState;
use crate::training::ActiveWorkout;
use crate::types::*;
use crate::{Error, Result};
use rand::Rng;

/// Liters added by the quick-water control on the live screen
pub const LIVE_QUICK_WATER_LITERS: f64 = 0.25;

/// Today's numbers at a glance
#[derive(Clone, Debug, PartialEq)]
pub struct DailySummary {
    pub calorie_goal: u32,
    pub calories_in: u32,
    pub calories_burned: f64,
    pub net_balance: f64,
    pub remaining: f64,
    pub water_intake: f64,
    pub macros: Macros,
    pub macro_targets: Macros,
    pub directive: &'static Quote,
}

pub struct Session<S> {
    store: ProfileStore<S>,
    profile: UserProfile,
    state: TrackingState,
    live: LiveSession,
    booking: BookingBoard,
    feed: Feed,
    workout: Option<ActiveWorkout>,
}

impl<S: KeyValueStore> Session<S> {
    /// Make `profile` the active profile and load its data
    pub fn login(mut store: ProfileStore<S>, profile: UserProfile) -> Result<Self> {
        if profile.name.trim().is_empty() {
            return Err(Error::InvalidInput("profile name is required".into()));
        }
        store.set_active_profile(&profile)?;
        let state = store.load(&profile.name)?;
        tracing::info!("Logged in as {}", profile.name);
        let mut session = Self::open(store, profile, state);
        session.save()?;
        Ok(session)
    }

    /// Reopen the session of whoever is logged in
    pub fn resume(store: ProfileStore<S>) -> Result<Option<Self>> {
        let Some(profile) = store.active_profile()? else {
            return Ok(None);
        };
        let state = store.load(&profile.name)?;
        Ok(Some(Self::open(store, profile, state)))
    }

    fn open(store: ProfileStore<S>, profile: UserProfile, state: TrackingState) -> Self {
        Self {
            store,
            profile,
            state,
            live: LiveSession::default(),
            booking: BookingBoard::default(),
            feed: Feed::default(),
            workout: None,
        }
    }

    /// Clear the active-profile pointer and hand the store back
    pub fn logout(mut self) -> Result<ProfileStore<S>> {
        self.store.clear_active_profile()?;
        tracing::info!("Logged out {}", self.profile.name);
        Ok(self.store)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn store(&self) -> &ProfileStore<S> {
        &self.store
    }

    pub fn live(&self) -> &LiveSession {
        &self.live
    }

    pub fn live_mut(&mut self) -> &mut LiveSession {
        &mut self.live
    }

    pub fn booking(&self) -> &BookingBoard {
        &self.booking
    }

    pub fn booking_mut(&mut self) -> &mut BookingBoard {
        &mut self.booking
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    fn save(&mut self) -> Result<()> {
        self.store.save(&self.profile.name, &self.state)
    }

    /// Apply `change` to the tracking state and persist the result
    fn mutate<T>(&mut self, change: impl FnOnce(&mut TrackingState) -> T) -> Result<T> {
        let out = change(&mut self.state);
        self.save()?;
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    /// Replace the profile. State is saved under the old name first, then
    /// reloaded and saved under the new one.
    pub fn update_profile(&mut self, profile: UserProfile) -> Result<()> {
        if profile.name.trim().is_empty() {
            return Err(Error::InvalidInput("profile name is required".into()));
        }
        self.save()?;
        self.store.set_active_profile(&profile)?;
        self.state = self.store.load(&profile.name)?;
        self.profile = profile;
        self.save()
    }

    /// Set or clear the calorie goal override
    pub fn set_calorie_goal(&mut self, goal: Option<u32>) -> Result<()> {
        let mut profile = self.profile.clone();
        profile.custom_calories = goal.filter(|g| *g > 0);
        self.update_profile(profile)
    }

    /// Nudge the current goal; returns the new goal when it stays positive
    pub fn nudge_calorie_goal(&mut self, delta: i64) -> Result<Option<u32>> {
        let Some(next) = forms::nudge_goal(self.calorie_goal(), delta) else {
            return Ok(None);
        };
        self.set_calorie_goal(Some(next))?;
        Ok(Some(next))
    }

    pub fn set_earnings(&mut self, earnings: f64) -> Result<()> {
        if !earnings.is_finite() {
            return Err(Error::InvalidInput("earnings must be a number".into()));
        }
        let mut profile = self.profile.clone();
        profile.earnings_mtd = Some(earnings);
        self.update_profile(profile)
    }

    pub fn set_body_weight(&mut self, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::InvalidInput("weight must be a positive number".into()));
        }
        let mut profile = self.profile.clone();
        profile.weight = weight;
        self.update_profile(profile)
    }

    // ------------------------------------------------------------------
    // Food
    // ------------------------------------------------------------------

    pub fn add_food(&mut self, item: FoodItem) -> Result<()> {
        self.mutate(|state| state.add_food(item))
    }

    /// Submit the food form; `None` when it does not resolve to calories
    pub fn submit_food(&mut self, form: &FoodForm) -> Result<Option<FoodItem>> {
        let Some(item) = form.submit(self.store.now()) else {
            return Ok(None);
        };
        self.add_food(item.clone())?;
        Ok(Some(item))
    }

    pub fn quick_log(&mut self, calories: u32) -> Result<FoodItem> {
        let item = forms::quick_log(calories, self.store.now());
        self.add_food(item.clone())?;
        Ok(item)
    }

    /// Rewrite an existing entry from the form, keeping its id and time
    pub fn edit_food(&mut self, id: &str, form: &FoodForm) -> Result<bool> {
        let Some(existing) = self.state.food_log.iter().find(|item| item.id == id) else {
            return Ok(false);
        };
        let Some(updated) = form.submit_edit(existing) else {
            return Ok(false);
        };
        self.mutate(|state| state.update_food(updated))
    }

    pub fn update_food(&mut self, item: FoodItem) -> Result<bool> {
        self.mutate(|state| state.update_food(item))
    }

    pub fn delete_food(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_food(id))
    }

    // ------------------------------------------------------------------
    // Exercise and water
    // ------------------------------------------------------------------

    pub fn add_exercise(&mut self, item: ExerciseItem) -> Result<bool> {
        self.mutate(|state| state.add_exercise(item))
    }

    pub fn delete_exercise(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_exercise(id))
    }

    pub fn set_water(&mut self, liters: f64) -> Result<f64> {
        self.mutate(|state| state.set_water(liters))
    }

    pub fn add_water(&mut self, delta: f64) -> Result<f64> {
        self.mutate(|state| state.add_water(delta))
    }

    // ------------------------------------------------------------------
    // Weight, gallery, coach vault
    // ------------------------------------------------------------------

    /// Log a weight from form text, dated today
    pub fn log_weight(&mut self, weight: &str) -> Result<Option<WeightEntry>> {
        let date = short_date_label(self.store.today());
        let Some(entry) = forms::weight_entry(weight, &date) else {
            return Ok(None);
        };
        self.mutate(|state| state.add_weight(entry.clone()))?;
        Ok(Some(entry))
    }

    pub fn update_weight(&mut self, entry: WeightEntry) -> Result<bool> {
        self.mutate(|state| state.update_weight(entry))
    }

    pub fn delete_weight(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_weight(id))
    }

    pub fn add_media(&mut self, media: ProgressMedia) -> Result<()> {
        self.mutate(|state| state.add_media(media))
    }

    pub fn update_media(&mut self, media: ProgressMedia) -> Result<bool> {
        self.mutate(|state| state.update_media(media))
    }

    pub fn delete_media(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_media(id))
    }

    pub fn add_coach_session(&mut self, session: CoachSession) -> Result<()> {
        self.mutate(|state| state.add_coach_session(session))
    }

    pub fn update_coach_session(&mut self, session: CoachSession) -> Result<bool> {
        self.mutate(|state| state.update_coach_session(session))
    }

    pub fn delete_coach_session(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_coach_session(id))
    }

    // ------------------------------------------------------------------
    // Workouts
    // ------------------------------------------------------------------

    pub fn add_workout(&mut self, workout: Workout) -> Result<()> {
        self.mutate(|state| state.add_workout(workout))
    }

    pub fn update_workout(&mut self, workout: Workout) -> Result<bool> {
        self.mutate(|state| state.update_workout(workout))
    }

    pub fn delete_workout(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_workout(id))
    }

    pub fn delete_history(&mut self, id: &str) -> Result<bool> {
        self.mutate(|state| state.delete_history(id))
    }

    /// Begin recording a workout, from a library blueprint or from scratch
    pub fn start_workout(&mut self, blueprint_id: Option<&str>) -> Result<&mut ActiveWorkout> {
        let blueprint = match blueprint_id {
            Some(id) => Some(
                self.state
                    .workouts
                    .iter()
                    .find(|w| w.id == id)
                    .ok_or_else(|| Error::InvalidInput(format!("no workout with id {}", id)))?,
            ),
            None => None,
        };
        let active = ActiveWorkout::start(blueprint, self.store.now());
        Ok(self.workout.insert(active))
    }

    pub fn active_workout(&self) -> Option<&ActiveWorkout> {
        self.workout.as_ref()
    }

    pub fn active_workout_mut(&mut self) -> Option<&mut ActiveWorkout> {
        self.workout.as_mut()
    }

    /// Close the active workout and record it in history
    pub fn finish_workout(&mut self) -> Result<Option<WorkoutHistory>> {
        let Some(active) = self.workout.take() else {
            return Ok(None);
        };
        let entry = active.finish(self.store.now());
        self.mutate(|state| state.add_history(entry.clone()))?;
        Ok(Some(entry))
    }

    // ------------------------------------------------------------------
    // Live session
    // ------------------------------------------------------------------

    pub fn toggle_live(&mut self) {
        self.live.toggle();
    }

    pub fn tick_live<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.live.tick(rng)
    }

    pub fn log_live_set(&mut self) -> bool {
        self.live.log_set()
    }

    pub fn set_live_intensity(&mut self, intensity: Intensity) {
        self.live.set_intensity(intensity);
    }

    /// End the live session, logging it as exercise when it burned enough
    pub fn finish_live(&mut self) -> Result<Option<ExerciseItem>> {
        let Some(entry) = self.live.finish(self.store.now()) else {
            return Ok(None);
        };
        self.mutate(|state| state.add_exercise(entry.clone()))?;
        Ok(Some(entry))
    }

    /// Quick water from the live screen; only while the timer is armed
    pub fn live_quick_water(&mut self) -> Result<bool> {
        if !self.live.is_armed() {
            return Ok(false);
        }
        self.add_water(LIVE_QUICK_WATER_LITERS)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Derived
    // ------------------------------------------------------------------

    pub fn calorie_goal(&self) -> u32 {
        calorie_goal(&self.profile)
    }

    /// Calories left today, counting the running live session
    pub fn remaining_budget(&self) -> f64 {
        self.state
            .remaining_budget(self.calorie_goal(), self.live.calories())
    }

    pub fn summary(&self) -> DailySummary {
        let live = self.live.calories();
        let goal = self.calorie_goal();
        DailySummary {
            calorie_goal: goal,
            calories_in: self.state.total_calories_in(),
            calories_burned: self.state.total_calories_burned(live),
            net_balance: self.state.net_balance(live),
            remaining: self.state.remaining_budget(goal, live),
            water_intake: self.state.water_intake,
            macros: self.state.macro_totals(),
            macro_targets: macro_targets(goal),
            directive: daily_directive(&self.profile.goals, self.store.today()),
        }
    }
}
