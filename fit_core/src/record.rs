//! The persisted per-profile record and its tolerant decoder.
//!
//! Stored records may come from older app versions, be missing fields, or
//! carry a field with the wrong shape. Decoding therefore happens field by
//! field: a bad field is logged and replaced by its default, and only a record
//! that is not a JSON object at all is rejected.

use crate::catalog::default_workouts;
use crate::clock::day_label;
use crate::tracking::{clamp_water, seed_weight_entry, TrackingState};
use crate::types::*;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Label used for the seed weight entry when a stored record lacks weight data
pub const START_WEIGHT_LABEL: &str = "Start";

/// Borrowed view of a state, in the on-disk shape
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord<'a> {
    pub last_update_date: String,
    pub water_intake: f64,
    pub food_log: &'a [FoodItem],
    pub exercise_log: &'a [ExerciseItem],
    pub weight_data: &'a [WeightEntry],
    pub progress_gallery: &'a [ProgressMedia],
    pub coach_sessions: &'a [CoachSession],
    pub workouts: &'a [Workout],
    pub workout_history: &'a [WorkoutHistory],
}

impl<'a> StoredRecord<'a> {
    /// Stamp `state` with the given day
    pub fn new(state: &'a TrackingState, today: NaiveDate) -> Self {
        Self {
            last_update_date: day_label(today),
            water_intake: state.water_intake,
            food_log: &state.food_log,
            exercise_log: &state.exercise_log,
            weight_data: &state.weight_data,
            progress_gallery: &state.progress_gallery,
            coach_sessions: &state.coach_sessions,
            workouts: &state.workouts,
            workout_history: &state.workout_history,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A stored record with every field optional
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialRecord {
    pub last_update_date: Option<String>,
    pub water_intake: Option<f64>,
    pub food_log: Option<Vec<FoodItem>>,
    pub exercise_log: Option<Vec<ExerciseItem>>,
    pub weight_data: Option<Vec<WeightEntry>>,
    pub progress_gallery: Option<Vec<ProgressMedia>>,
    pub coach_sessions: Option<Vec<CoachSession>>,
    pub workouts: Option<Vec<Workout>>,
    pub workout_history: Option<Vec<WorkoutHistory>>,
}

impl PartialRecord {
    /// Decode raw record text
    ///
    /// Fails only when the text is not a JSON object. Every individual field
    /// that is missing, null, or of the wrong shape decodes to `None`. List
    /// elements are decoded one by one and bad ones are skipped.
    pub fn decode(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::MalformedRecord(e.to_string()))?;

        let Value::Object(mut fields) = value else {
            return Err(Error::MalformedRecord("expected a JSON object".into()));
        };

        Ok(Self {
            last_update_date: take_field(&mut fields, "lastUpdateDate"),
            water_intake: take_field(&mut fields, "waterIntake"),
            food_log: take_list(&mut fields, "foodLog"),
            exercise_log: take_list(&mut fields, "exerciseLog"),
            weight_data: take_list(&mut fields, "weightData"),
            progress_gallery: take_list(&mut fields, "progressGallery"),
            coach_sessions: take_list(&mut fields, "coachSessions"),
            workouts: take_list(&mut fields, "workouts"),
            workout_history: take_list(&mut fields, "workoutHistory"),
        })
    }

    /// True when the record was last saved on `today`
    pub fn is_from(&self, today: NaiveDate) -> bool {
        self.last_update_date.as_deref() == Some(day_label(today).as_str())
    }

    /// Fill every gap with its default, applying the daily rollover
    pub fn resolve(self, today: NaiveDate) -> TrackingState {
        let same_day = self.is_from(today);

        let (water_intake, food_log, exercise_log) = if same_day {
            (
                clamp_water(self.water_intake.unwrap_or(0.0)),
                self.food_log.unwrap_or_default(),
                self.exercise_log.unwrap_or_default(),
            )
        } else {
            tracing::info!(
                "Daily rollover: record last saved {:?}, today is {}",
                self.last_update_date,
                day_label(today)
            );
            (0.0, Vec::new(), Vec::new())
        };

        TrackingState {
            water_intake,
            food_log,
            exercise_log,
            weight_data: self
                .weight_data
                .unwrap_or_else(|| vec![seed_weight_entry(START_WEIGHT_LABEL)]),
            progress_gallery: self.progress_gallery.unwrap_or_default(),
            coach_sessions: self.coach_sessions.unwrap_or_default(),
            workouts: self.workouts.unwrap_or_else(default_workouts),
            workout_history: self.workout_history.unwrap_or_default(),
        }
    }
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, name: &str) -> Option<T> {
    match fields.remove(name) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Ignoring malformed field {}: {}", name, e);
                None
            }
        },
    }
}

fn take_list<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    name: &str,
) -> Option<Vec<T>> {
    let elements: Vec<Value> = take_field(fields, name)?;
    let total = elements.len();
    let kept: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping malformed {} entry {}: {}", name, index, e);
                None
            }
        })
        .collect();
    if kept.len() < total {
        tracing::warn!("Kept {} of {} {} entries", kept.len(), total, name);
    }
    Some(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_state() -> TrackingState {
        let mut state = TrackingState::fresh(day(1));
        state.add_water(1.75);
        state.add_food(FoodItem {
            id: "f1".into(),
            name: "Eggs".into(),
            calories: 210,
            time: "07:30".into(),
            meal_type: MealType::Breakfast,
            macros: Macros {
                protein: 18,
                carbs: 2,
                fats: 14,
            },
        });
        state.add_exercise(ExerciseItem {
            id: "e1".into(),
            name: "Rower".into(),
            calories: 120.0,
            time: "08:00".into(),
        });
        state.add_media(ProgressMedia {
            id: "m1".into(),
            date: "Jan 1".into(),
            url: "file:///front.jpg".into(),
            media_type: MediaType::Image,
            note: Some("day one".into()),
        });
        state
    }

    #[test]
    fn test_same_day_round_trip_is_unchanged() {
        let state = sample_state();
        let raw = StoredRecord::new(&state, day(1)).to_json().unwrap();

        let restored = PartialRecord::decode(&raw).unwrap().resolve(day(1));
        assert_eq!(restored, state);
    }

    #[test]
    fn test_later_day_rolls_over_daily_fields_only() {
        let state = sample_state();
        let raw = StoredRecord::new(&state, day(1)).to_json().unwrap();

        let restored = PartialRecord::decode(&raw).unwrap().resolve(day(2));
        assert_eq!(restored.water_intake, 0.0);
        assert!(restored.food_log.is_empty());
        assert!(restored.exercise_log.is_empty());

        // Long-lived collections serialize identically
        assert_eq!(
            serde_json::to_string(&restored.weight_data).unwrap(),
            serde_json::to_string(&state.weight_data).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&restored.progress_gallery).unwrap(),
            serde_json::to_string(&state.progress_gallery).unwrap()
        );
        assert_eq!(restored.workout_history, state.workout_history);
        assert_eq!(restored.workouts, state.workouts);
    }

    #[test]
    fn test_stored_shape_uses_camel_case_keys() {
        let state = sample_state();
        let raw = StoredRecord::new(&state, day(1)).to_json().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["lastUpdateDate"], "Mon Jan 01 2024");
        assert_eq!(value["waterIntake"], 1.75);
        for key in [
            "foodLog",
            "exerciseLog",
            "weightData",
            "progressGallery",
            "coachSessions",
            "workouts",
            "workoutHistory",
        ] {
            assert!(value[key].is_array(), "missing {}", key);
        }
    }

    #[test]
    fn test_missing_fields_default_independently() {
        let raw = r#"{"lastUpdateDate":"Mon Jan 01 2024","waterIntake":2}"#;
        let state = PartialRecord::decode(raw).unwrap().resolve(day(1));

        assert_eq!(state.water_intake, 2.0);
        assert!(state.food_log.is_empty());
        assert_eq!(state.weight_data, vec![seed_weight_entry("Start")]);
        assert_eq!(state.workouts, default_workouts());
        assert!(state.coach_sessions.is_empty());
    }

    #[test]
    fn test_malformed_field_does_not_fail_the_load() {
        let raw = r#"{
            "lastUpdateDate": "Mon Jan 01 2024",
            "waterIntake": "lots",
            "foodLog": "not a list",
            "exerciseLog": [{"id":"e1","name":"Bike","calories":90,"time":"06:00"}],
            "weightData": [{"id":"1","date":"Start","weight":200}],
            "workouts": null
        }"#;
        let state = PartialRecord::decode(raw).unwrap().resolve(day(1));

        assert_eq!(state.water_intake, 0.0);
        assert!(state.food_log.is_empty());
        assert_eq!(state.exercise_log.len(), 1);
        assert_eq!(state.weight_data[0].weight, 200.0);
        assert_eq!(state.workouts, default_workouts());
    }

    #[test]
    fn test_bad_list_element_keeps_its_siblings() {
        let raw = r#"{
            "lastUpdateDate": "Mon Jan 01 2024",
            "foodLog": [
                {"id":"f1","name":"Eggs","calories":210,"time":"07:30","mealType":"Breakfast",
                 "macros":{"protein":18,"carbs":2,"fats":14}},
                {"id":"f2","name":"Toast","calories":"lots"}
            ],
            "weightData": [{"id":"1","date":"Start","weight":200}, 42],
            "workouts": [
                {"id":"mine","title":"Mine","duration":30,"level":"Beginner",
                 "category":"Strength","imageUrl":""},
                {"id":"mine2","title":"Mine 2","duration":22.5,"level":"Beginner",
                 "category":"Strength","imageUrl":""}
            ]
        }"#;
        let state = PartialRecord::decode(raw).unwrap().resolve(day(1));

        let food_ids: Vec<&str> = state.food_log.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(food_ids, vec!["f1"]);
        assert_eq!(state.weight_data.len(), 1);
        assert_eq!(state.weight_data[0].weight, 200.0);
        let workout_ids: Vec<&str> = state.workouts.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(workout_ids, vec!["mine"]);
    }

    #[test]
    fn test_non_object_record_is_malformed() {
        assert!(matches!(
            PartialRecord::decode("{ invalid json }"),
            Err(Error::MalformedRecord(_))
        ));
        assert!(matches!(
            PartialRecord::decode("[1,2,3]"),
            Err(Error::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_missing_date_counts_as_a_new_day() {
        let raw = r#"{"waterIntake":3,"foodLog":[]}"#;
        let partial = PartialRecord::decode(raw).unwrap();
        assert!(!partial.is_from(day(1)));
        assert_eq!(partial.resolve(day(1)).water_intake, 0.0);
    }

    #[test]
    fn test_out_of_range_water_is_clamped_on_restore() {
        let raw = r#"{"lastUpdateDate":"Mon Jan 01 2024","waterIntake":9}"#;
        let state = PartialRecord::decode(raw).unwrap().resolve(day(1));
        assert_eq!(state.water_intake, 5.0);
    }
}
