//! Turning raw form input into tracking records.
//!
//! Form fields arrive as text. Anything that fails to parse means the
//! submission is dropped (`None`) and the caller keeps its prior state;
//! nothing here returns an error.

use crate::clock::time_label;
use crate::types::{new_id, FoodItem, Macros, MealType, WeightEntry};
use chrono::NaiveDateTime;

/// Name given to food entries submitted without one
pub const DEFAULT_FOOD_NAME: &str = "Generic Fuel Entry";

/// Name of one-tap calorie entries
pub const QUICK_LOG_NAME: &str = "Quick Log";

/// Parse a leading integer the way a lenient form field would ("250kcal" is 250)
pub fn parse_int(input: &str) -> Option<u32> {
    let digits: String = input
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Parse a decimal amount; non-finite values are rejected
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Food entry form, as typed
#[derive(Clone, Debug, Default)]
pub struct FoodForm {
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub meal_type: MealType,
    /// Derive calories from the macros instead of the calories field
    pub use_macro_calc: bool,
}

impl FoodForm {
    fn macros(&self) -> Macros {
        Macros {
            protein: parse_int(&self.protein).unwrap_or(0),
            carbs: parse_int(&self.carbs).unwrap_or(0),
            fats: parse_int(&self.fats).unwrap_or(0),
        }
    }

    /// Calories the form resolves to, if any
    ///
    /// Macros too large to express as a calorie count drop the submission.
    pub fn calories(&self) -> Option<u32> {
        if self.use_macro_calc {
            let derived = self.macros().calories()?;
            if derived > 0 {
                return Some(derived);
            }
        }
        parse_int(&self.calories)
    }

    /// Build a new entry stamped with `now`
    pub fn submit(&self, now: NaiveDateTime) -> Option<FoodItem> {
        self.build(new_id(), time_label(now))
    }

    /// Rebuild an existing entry, keeping its id and logged time
    pub fn submit_edit(&self, existing: &FoodItem) -> Option<FoodItem> {
        self.build(existing.id.clone(), existing.time.clone())
    }

    fn build(&self, id: String, time: String) -> Option<FoodItem> {
        let calories = self.calories()?;
        let name = match self.name.trim() {
            "" => DEFAULT_FOOD_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };

        Some(FoodItem {
            id,
            name,
            calories,
            time,
            meal_type: self.meal_type,
            macros: self.macros(),
        })
    }

    /// Pre-fill the form from an existing entry for editing
    pub fn from_item(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            calories: item.calories.to_string(),
            protein: item.macros.protein.to_string(),
            carbs: item.macros.carbs.to_string(),
            fats: item.macros.fats.to_string(),
            meal_type: item.meal_type,
            use_macro_calc: false,
        }
    }
}

/// One-tap snack entry for a calorie amount
pub fn quick_log(calories: u32, now: NaiveDateTime) -> FoodItem {
    FoodItem {
        id: new_id(),
        name: QUICK_LOG_NAME.into(),
        calories,
        time: time_label(now),
        meal_type: MealType::Snack,
        macros: Macros::default(),
    }
}

/// New weight entry, or `None` when the weight does not parse
pub fn weight_entry(weight: &str, date: &str) -> Option<WeightEntry> {
    Some(WeightEntry {
        id: new_id(),
        date: date.trim().to_string(),
        weight: parse_amount(weight)?,
    })
}

/// Explicit goal entry; must parse to a positive number
pub fn parse_goal(input: &str) -> Option<u32> {
    parse_int(input).filter(|goal| *goal > 0)
}

/// Nudge a goal by `delta`; rejected when the result would not stay positive
pub fn nudge_goal(current: u32, delta: i64) -> Option<u32> {
    let next = i64::from(current) + delta;
    if next > 0 {
        u32::try_from(next).ok()
    } else {
        None
    }
}
