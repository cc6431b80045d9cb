//! In-progress strength workouts and the blueprint library filter.
//!
//! An `ActiveWorkout` is the session a user is currently recording. It is
//! not persisted; finishing it produces the `WorkoutHistory` record that the
//! store keeps.

use crate::clock::history_date_label;
use crate::tracking::{remove_by_id, replace_by_id};
use crate::types::{new_id, ExerciseLog, ExerciseSet, MediaType, Workout, WorkoutHistory};
use chrono::NaiveDateTime;

/// Title used when a session is not started from a blueprint
pub const CUSTOM_SESSION_TITLE: &str = "Custom Session";

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveWorkout {
    session: WorkoutHistory,
    started_at: NaiveDateTime,
}

impl ActiveWorkout {
    /// Start a session, seeding one starter set per blueprint exercise
    pub fn start(blueprint: Option<&Workout>, now: NaiveDateTime) -> Self {
        let exercises = blueprint
            .and_then(|b| b.exercises.as_ref())
            .map(|names| names.iter().map(|name| new_exercise(name)).collect())
            .unwrap_or_default();

        let session = WorkoutHistory {
            id: new_id(),
            workout_id: blueprint.map(|b| b.id.clone()),
            title: blueprint
                .map(|b| b.title.clone())
                .unwrap_or_else(|| CUSTOM_SESSION_TITLE.to_string()),
            date: history_date_label(now.date()),
            duration: 0,
            exercises,
        };

        tracing::info!("Started workout session {}", session.title);
        Self {
            session,
            started_at: now,
        }
    }

    pub fn session(&self) -> &WorkoutHistory {
        &self.session
    }

    /// Whole minutes since the session started
    pub fn elapsed_minutes(&self, now: NaiveDateTime) -> u32 {
        let minutes = (now - self.started_at).num_minutes().max(0);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }

    /// Add an exercise brief with a starter set. Blank names are ignored.
    pub fn add_exercise(
        &mut self,
        name: &str,
        media: Option<(String, MediaType)>,
    ) -> Option<&ExerciseLog> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut exercise = new_exercise(name);
        if let Some((url, media_type)) = media {
            exercise.media_url = Some(url);
            exercise.media_type = Some(media_type);
        }
        self.session.exercises.push(exercise);
        self.session.exercises.last()
    }

    /// Replace an exercise brief, keeping its sets
    pub fn update_exercise(&mut self, exercise_id: &str, name: &str, media: Option<(String, MediaType)>) -> bool {
        let Some(exercise) = self.exercise_mut(exercise_id) else {
            return false;
        };
        exercise.name = name.trim().to_string();
        exercise.media_url = media.as_ref().map(|(url, _)| url.clone());
        exercise.media_type = media.map(|(_, media_type)| media_type);
        true
    }

    pub fn remove_exercise(&mut self, exercise_id: &str) -> bool {
        remove_by_id(&mut self.session.exercises, exercise_id)
    }

    /// Add a set that repeats the previous set's reps and weight
    pub fn add_set(&mut self, exercise_id: &str) -> bool {
        let Some(exercise) = self.exercise_mut(exercise_id) else {
            return false;
        };
        let set = match exercise.sets.last() {
            Some(last) => ExerciseSet {
                id: new_id(),
                reps: last.reps,
                weight: last.weight,
                completed: false,
            },
            None => ExerciseSet::starter(),
        };
        exercise.sets.push(set);
        true
    }

    pub fn update_set(&mut self, exercise_id: &str, set: ExerciseSet) -> bool {
        if !set.weight.is_finite() {
            return false;
        }
        self.exercise_mut(exercise_id)
            .map(|exercise| replace_by_id(&mut exercise.sets, set))
            .unwrap_or(false)
    }

    pub fn remove_set(&mut self, exercise_id: &str, set_id: &str) -> bool {
        self.exercise_mut(exercise_id)
            .map(|exercise| remove_by_id(&mut exercise.sets, set_id))
            .unwrap_or(false)
    }

    /// Close the session, recording how long it ran
    pub fn finish(mut self, now: NaiveDateTime) -> WorkoutHistory {
        self.session.duration = self.elapsed_minutes(now);
        tracing::info!(
            "Finished workout {} after {} min",
            self.session.title,
            self.session.duration
        );
        self.session
    }

    fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut ExerciseLog> {
        self.session
            .exercises
            .iter_mut()
            .find(|exercise| exercise.id == exercise_id)
    }
}

fn new_exercise(name: &str) -> ExerciseLog {
    ExerciseLog {
        id: new_id(),
        name: name.to_string(),
        sets: vec![ExerciseSet::starter()],
        media_url: None,
        media_type: None,
    }
}

/// Blueprints in a library category; `None` or "All" keeps everything
pub fn filter_workouts<'a>(workouts: &'a [Workout], category: Option<&str>) -> Vec<&'a Workout> {
    workouts
        .iter()
        .filter(|w| match category {
            None | Some("All") => true,
            Some(category) => w.category.eq_ignore_ascii_case(category),
        })
        .collect()
}

/// Volume lifted in a recorded session: sum of reps × weight over completed sets
pub fn completed_volume(history: &WorkoutHistory) -> f64 {
    history
        .exercises
        .iter()
        .flat_map(|exercise| exercise.sets.iter())
        .filter(|set| set.completed)
        .map(|set| f64::from(set.reps) * set.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_workouts;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap()
    }

    fn blueprint() -> Workout {
        let mut workout = default_workouts().remove(0);
        workout.exercises = Some(vec!["Bench Press".into(), "Row".into()]);
        workout
    }

    #[test]
    fn test_start_from_blueprint_seeds_starter_sets() {
        let bp = blueprint();
        let active = ActiveWorkout::start(Some(&bp), now());
        let session = active.session();

        assert_eq!(session.workout_id.as_deref(), Some("bp-setup-01"));
        assert_eq!(session.title, "Bench Press Setup");
        assert_eq!(session.date, "Jan 1, 2024");
        assert_eq!(session.exercises.len(), 2);
        for exercise in &session.exercises {
            assert_eq!(exercise.sets.len(), 1);
            assert_eq!(exercise.sets[0].reps, 10);
            assert_eq!(exercise.sets[0].weight, 0.0);
            assert!(!exercise.sets[0].completed);
        }
    }

    #[test]
    fn test_custom_session() {
        let active = ActiveWorkout::start(None, now());
        assert_eq!(active.session().title, CUSTOM_SESSION_TITLE);
        assert!(active.session().workout_id.is_none());
        assert!(active.session().exercises.is_empty());
    }

    #[test]
    fn test_set_editing() {
        let mut active = ActiveWorkout::start(None, now());
        let exercise_id = active.add_exercise("Squat", None).unwrap().id.clone();
        assert!(active.add_exercise("   ", None).is_none());

        let first = active.session().exercises[0].sets[0].clone();
        assert!(active.update_set(
            &exercise_id,
            ExerciseSet {
                reps: 5,
                weight: 225.0,
                completed: true,
                ..first.clone()
            }
        ));
        assert!(active.add_set(&exercise_id));

        let sets = &active.session().exercises[0].sets;
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].reps, 5);
        assert_eq!(sets[1].weight, 225.0);
        assert!(!sets[1].completed);

        assert!(active.remove_set(&exercise_id, &first.id));
        assert_eq!(active.session().exercises[0].sets.len(), 1);
        assert!(!active.add_set("missing"));
    }

    #[test]
    fn test_update_and_remove_exercise() {
        let mut active = ActiveWorkout::start(None, now());
        let id = active.add_exercise("Curl", None).unwrap().id.clone();
        assert!(active.update_exercise(
            &id,
            "Hammer Curl",
            Some(("file:///curl.mp4".into(), MediaType::Video))
        ));
        assert_eq!(active.session().exercises[0].name, "Hammer Curl");
        assert_eq!(
            active.session().exercises[0].media_type,
            Some(MediaType::Video)
        );
        assert!(active.remove_exercise(&id));
        assert!(active.session().exercises.is_empty());
    }

    #[test]
    fn test_finish_records_minutes() {
        let active = ActiveWorkout::start(None, now());
        let history = active.finish(now() + Duration::seconds(47 * 60 + 59));
        assert_eq!(history.duration, 47);
    }

    #[test]
    fn test_filter_workouts() {
        let workouts = default_workouts();
        assert_eq!(filter_workouts(&workouts, None).len(), 3);
        assert_eq!(filter_workouts(&workouts, Some("All")).len(), 3);
        let hiit = filter_workouts(&workouts, Some("hiit"));
        assert_eq!(hiit.len(), 1);
        assert_eq!(hiit[0].id, "ropes-01");
    }

    #[test]
    fn test_completed_volume() {
        let mut active = ActiveWorkout::start(None, now());
        let id = active.add_exercise("Deadlift", None).unwrap().id.clone();
        let set = active.session().exercises[0].sets[0].clone();
        active.update_set(
            &id,
            ExerciseSet {
                reps: 5,
                weight: 300.0,
                completed: true,
                ..set
            },
        );
        active.add_set(&id);
        let history = active.finish(now());
        assert_eq!(completed_volume(&history), 1500.0);
    }
}
