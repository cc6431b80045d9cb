//! Core domain types for the Twin Fit tracking system.
//!
//! This module defines the records that flow through the store:
//! - The user profile and its physiology/preference enums
//! - Daily tracking entries (food, exercise, water)
//! - Long-lived collections (weight, media, coach sessions, workouts, history)
//! - Booking and feed records that live only for a session
//!
//! Every persisted record serializes with camelCase field names so that the
//! on-disk JSON matches the shape the app has always written.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a fresh record id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn parse_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

// ============================================================================
// Profile Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s).as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(Error::InvalidInput(format!("unknown gender: {}", s))),
        }
    }
}

/// Training goal; a profile holds a non-empty set of these
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Goal {
    #[serde(rename = "Fat Loss")]
    FatLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    Maintenance,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Goal::FatLoss => "Fat Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Maintenance => "Maintenance",
        };
        f.write_str(label)
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s).as_str() {
            "fatloss" => Ok(Goal::FatLoss),
            "musclegain" => Ok(Goal::MuscleGain),
            "maintenance" => Ok(Goal::Maintenance),
            _ => Err(Error::InvalidInput(format!("unknown goal: {}", s))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s).as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(Error::InvalidInput(format!("unknown level: {}", s))),
        }
    }
}

/// The logged-in user. The name doubles as the persistence partition key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub goals: Vec<Goal>,
    pub level: Level,
    pub weight: f64,
    pub height: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trainer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_calories: Option<u32>,
    #[serde(default, rename = "earningsMTD", skip_serializing_if = "Option::is_none")]
    pub earnings_mtd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl UserProfile {
    pub fn has_goal(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }

    pub fn is_trainer(&self) -> bool {
        self.is_trainer.unwrap_or(false)
    }
}

/// Onboarding input, turned into a profile once the flow completes
#[derive(Clone, Debug)]
pub struct ProfileDraft {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub weight: f64,
    pub height: String,
    pub goals: Vec<Goal>,
    pub level: Level,
}

impl ProfileDraft {
    /// Finish onboarding. The name must be non-blank and at least one goal chosen.
    pub fn complete(self) -> crate::Result<UserProfile> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput("profile name is required".into()));
        }

        let mut goals = Vec::with_capacity(self.goals.len());
        for goal in self.goals {
            if !goals.contains(&goal) {
                goals.push(goal);
            }
        }
        if goals.is_empty() {
            return Err(Error::InvalidInput("select at least one goal".into()));
        }

        Ok(UserProfile {
            name,
            goals,
            level: self.level,
            weight: self.weight,
            height: self.height,
            age: self.age,
            gender: self.gender,
            is_trainer: None,
            custom_calories: None,
            earnings_mtd: None,
            uid: None,
        })
    }
}

// ============================================================================
// Daily Tracking Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s).as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(Error::InvalidInput(format!("unknown meal type: {}", s))),
        }
    }
}

/// Macronutrient breakdown in grams
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Macros {
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

impl Macros {
    /// Energy implied by the macros (4/4/9 kcal per gram), `None` past `u32::MAX`
    pub fn calories(&self) -> Option<u32> {
        let total = u64::from(self.protein) * 4
            + u64::from(self.carbs) * 4
            + u64::from(self.fats) * 9;
        u32::try_from(total).ok()
    }
}

impl std::ops::Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            protein: self.protein.saturating_add(other.protein),
            carbs: self.carbs.saturating_add(other.carbs),
            fats: self.fats.saturating_add(other.fats),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub calories: u32,
    pub time: String,
    pub meal_type: MealType,
    pub macros: Macros,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseItem {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub time: String,
}

// ============================================================================
// Progress Types
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub id: String,
    pub date: String,
    pub weight: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressMedia {
    pub id: String,
    pub date: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Coaching and Training Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CoachCategory {
    Strength,
    Conditioning,
    #[serde(rename = "PR")]
    Pr,
    #[serde(rename = "Form Check")]
    FormCheck,
}

/// A recorded client session kept in the trainer's vault
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachSession {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub description: String,
    pub timestamp: String,
    pub category: CoachCategory,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Clients,
    Private,
}

/// A reusable workout template ("blueprint")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub title: String,
    pub duration: u32,
    pub level: Level,
    pub category: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default, rename = "downloadURL", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_uid: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub id: String,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
}

impl ExerciseSet {
    /// The set every freshly added exercise starts with
    pub fn starter() -> Self {
        Self {
            id: new_id(),
            reps: 10,
            weight: 0.0,
            completed: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub id: String,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
}

/// One performed workout, optionally started from a blueprint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutHistory {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
    pub title: String,
    pub date: String,
    pub duration: u32,
    pub exercises: Vec<ExerciseLog>,
}

// ============================================================================
// Booking and Feed Types
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSlot {
    pub id: String,
    pub time: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_for: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainerService {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub duration: u32,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PostCategory {
    General,
    Workout,
    Nutrition,
    Achievement,
}

impl FromStr for PostCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s).as_str() {
            "general" => Ok(PostCategory::General),
            "workout" => Ok(PostCategory::Workout),
            "nutrition" => Ok(PostCategory::Nutrition),
            "achievement" => Ok(PostCategory::Achievement),
            _ => Err(Error::InvalidInput(format!("unknown post category: {}", s))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub likes: u32,
    pub comments: u32,
    pub timestamp: String,
    pub category: PostCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trainer: Option<bool>,
}

// ============================================================================
// Live Session Types
// ============================================================================

/// Effort setting for the live session timer
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Intensity {
    Low,
    #[default]
    Med,
    High,
}

impl Intensity {
    /// Calories accrued per one-second tick
    pub fn burn_rate(self) -> f64 {
        match self {
            Intensity::High => 0.25,
            Intensity::Med => 0.15,
            Intensity::Low => 0.10,
        }
    }

    /// Heart rate the simulation centres on
    pub fn base_heart_rate(self) -> u32 {
        match self {
            Intensity::High => 160,
            Intensity::Med => 130,
            Intensity::Low => 110,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s).as_str() {
            "low" => Ok(Intensity::Low),
            "med" | "medium" => Ok(Intensity::Med),
            "high" => Ok(Intensity::High),
            _ => Err(Error::InvalidInput(format!("unknown intensity: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_shape() {
        let json = r#"{
            "name": "Ana",
            "goals": ["Fat Loss", "Maintenance"],
            "level": "Intermediate",
            "weight": 150,
            "height": "5'6\"",
            "age": 31,
            "gender": "Female",
            "customCalories": 1900,
            "earningsMTD": 420.5
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.goals, vec![Goal::FatLoss, Goal::Maintenance]);
        assert_eq!(profile.custom_calories, Some(1900));
        assert_eq!(profile.earnings_mtd, Some(420.5));
        assert!(!profile.is_trainer());

        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["earningsMTD"], 420.5);
        assert!(out.get("isTrainer").is_none());
    }

    #[test]
    fn test_food_item_uses_camel_case() {
        let item = FoodItem {
            id: "f1".into(),
            name: "Oats".into(),
            calories: 300,
            time: "08:15".into(),
            meal_type: MealType::Breakfast,
            macros: Macros {
                protein: 10,
                carbs: 54,
                fats: 5,
            },
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["mealType"], "Breakfast");
        assert_eq!(value["macros"]["carbs"], 54);
    }

    #[test]
    fn test_macro_calories() {
        let macros = Macros {
            protein: 30,
            carbs: 40,
            fats: 10,
        };
        assert_eq!(macros.calories(), Some(30 * 4 + 40 * 4 + 10 * 9));

        let oversized = Macros {
            protein: 0,
            carbs: 0,
            fats: 500_000_000,
        };
        assert_eq!(oversized.calories(), None);
    }

    #[test]
    fn test_parse_enums_leniently() {
        assert_eq!("fat-loss".parse::<Goal>().unwrap(), Goal::FatLoss);
        assert_eq!("Muscle Gain".parse::<Goal>().unwrap(), Goal::MuscleGain);
        assert_eq!("SNACK".parse::<MealType>().unwrap(), MealType::Snack);
        assert_eq!("medium".parse::<Intensity>().unwrap(), Intensity::Med);
        assert!("bulk".parse::<Goal>().is_err());
    }

    #[test]
    fn test_draft_requires_name_and_goal() {
        let draft = ProfileDraft {
            name: "  ".into(),
            gender: Gender::Male,
            age: 30,
            weight: 180.0,
            height: "6'0\"".into(),
            goals: vec![Goal::Maintenance],
            level: Level::Beginner,
        };
        assert!(draft.clone().complete().is_err());

        let no_goals = ProfileDraft {
            name: "Sam".into(),
            goals: vec![],
            ..draft.clone()
        };
        assert!(no_goals.complete().is_err());

        let dupes = ProfileDraft {
            name: " Sam ".into(),
            goals: vec![Goal::FatLoss, Goal::FatLoss],
            ..draft
        };
        let profile = dupes.complete().unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.goals, vec![Goal::FatLoss]);
    }

    #[test]
    fn test_media_type_field_is_named_type() {
        let media = ProgressMedia {
            id: "m1".into(),
            date: "Oct 17".into(),
            url: "file:///front.jpg".into(),
            media_type: MediaType::Image,
            note: None,
        };
        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(value["type"], "image");
        assert!(value.get("note").is_none());
    }
}
