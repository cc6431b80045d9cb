//! Calorie and macro targets derived from a profile and a food log.

use crate::tracking::DEFAULT_WEIGHT;
use crate::{FoodItem, Gender, Goal, Macros, MealType, UserProfile};

/// Floor applied to computed daily goals
pub const MIN_CALORIE_GOAL: u32 = 1200;

/// Daily calorie goal for a profile
///
/// A positive custom override always wins. Otherwise: 2000 for men and 1600
/// for everyone else, plus 5 kcal per pound of body weight, minus 500 for Fat
/// Loss and plus 500 for Muscle Gain (both apply when both goals are set),
/// rounded and floored at 1200.
pub fn calorie_goal(profile: &UserProfile) -> u32 {
    if let Some(custom) = profile.custom_calories.filter(|c| *c > 0) {
        return custom;
    }

    let weight = if profile.weight.is_finite() && profile.weight > 0.0 {
        profile.weight
    } else {
        DEFAULT_WEIGHT
    };

    let mut goal = match profile.gender {
        Gender::Male => 2000.0,
        _ => 1600.0,
    };
    goal += weight * 5.0;

    if profile.has_goal(Goal::FatLoss) {
        goal -= 500.0;
    }
    if profile.has_goal(Goal::MuscleGain) {
        goal += 500.0;
    }

    let rounded = goal.round().max(f64::from(MIN_CALORIE_GOAL));
    rounded.min(f64::from(u32::MAX)) as u32
}

/// Gram targets from a 30/40/30 protein/carb/fat energy split
pub fn macro_targets(calorie_goal: u32) -> Macros {
    let goal = f64::from(calorie_goal);
    Macros {
        protein: (goal * 0.3 / 4.0).round() as u32,
        carbs: (goal * 0.4 / 4.0).round() as u32,
        fats: (goal * 0.3 / 9.0).round() as u32,
    }
}

/// Food logged under one meal slot
#[derive(Clone, Debug, PartialEq)]
pub struct MealSection<'a> {
    pub meal_type: MealType,
    pub items: Vec<&'a FoodItem>,
    pub calories: u32,
}

/// Split a food log into the four meal slots, preserving log order
pub fn meal_sections(food_log: &[FoodItem]) -> Vec<MealSection<'_>> {
    MealType::ALL
        .iter()
        .map(|&meal_type| {
            let items: Vec<&FoodItem> = food_log
                .iter()
                .filter(|item| item.meal_type == meal_type)
                .collect();
            let calories = items
                .iter()
                .fold(0u32, |total, item| total.saturating_add(item.calories));
            MealSection {
                meal_type,
                items,
                calories,
            }
        })
        .collect()
}

/// Share of an item's macro grams taken by protein, carbs and fats, in percent
pub fn macro_split(macros: &Macros) -> Option<(u32, u32, u32)> {
    let total = u64::from(macros.protein) + u64::from(macros.carbs) + u64::from(macros.fats);
    if total == 0 {
        return None;
    }
    let pct = |grams: u32| (f64::from(grams) / total as f64 * 100.0).round() as u32;
    Some((pct(macros.protein), pct(macros.carbs), pct(macros.fats)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn profile(gender: Gender, weight: f64, goals: Vec<Goal>) -> UserProfile {
        UserProfile {
            name: "Test".into(),
            goals,
            level: Level::Beginner,
            weight,
            height: "5'10\"".into(),
            age: 30,
            gender,
            is_trainer: None,
            custom_calories: None,
            earnings_mtd: None,
            uid: None,
        }
    }

    #[test]
    fn test_female_fat_loss_goal() {
        let p = profile(Gender::Female, 180.0, vec![Goal::FatLoss]);
        assert_eq!(calorie_goal(&p), 2000);
    }

    #[test]
    fn test_male_muscle_gain_goal() {
        let p = profile(Gender::Male, 160.0, vec![Goal::MuscleGain]);
        assert_eq!(calorie_goal(&p), 3300);
    }

    #[test]
    fn test_adjustments_stack() {
        let p = profile(Gender::Other, 150.0, vec![Goal::FatLoss, Goal::MuscleGain]);
        assert_eq!(calorie_goal(&p), 1600 + 750);
    }

    #[test]
    fn test_custom_override_wins() {
        let mut p = profile(Gender::Male, 300.0, vec![Goal::MuscleGain]);
        p.custom_calories = Some(1500);
        assert_eq!(calorie_goal(&p), 1500);

        // Zero is not an override
        p.custom_calories = Some(0);
        assert_eq!(calorie_goal(&p), 2000 + 1500 + 500);
    }

    #[test]
    fn test_missing_weight_uses_default() {
        let p = profile(Gender::Female, 0.0, vec![Goal::Maintenance]);
        assert_eq!(calorie_goal(&p), 1600 + 900);
    }

    #[test]
    fn test_goal_floor() {
        let p = profile(Gender::Female, 1.0, vec![Goal::FatLoss]);
        assert_eq!(calorie_goal(&p), MIN_CALORIE_GOAL);
    }

    #[test]
    fn test_fractional_weight_rounds() {
        let p = profile(Gender::Male, 150.5, vec![Goal::Maintenance]);
        // 2000 + 752.5 rounds half away from zero
        assert_eq!(calorie_goal(&p), 2753);
    }

    #[test]
    fn test_macro_targets() {
        let targets = macro_targets(2000);
        assert_eq!(targets.protein, 150);
        assert_eq!(targets.carbs, 200);
        assert_eq!(targets.fats, 67);
    }

    #[test]
    fn test_meal_sections() {
        let item = |id: &str, meal_type, calories| FoodItem {
            id: id.into(),
            name: id.into(),
            calories,
            time: "09:00".into(),
            meal_type,
            macros: Macros::default(),
        };
        let log = vec![
            item("a", MealType::Snack, 150),
            item("b", MealType::Breakfast, 400),
            item("c", MealType::Snack, 100),
        ];

        let sections = meal_sections(&log);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].meal_type, MealType::Breakfast);
        assert_eq!(sections[0].calories, 400);
        assert!(sections[1].items.is_empty());
        assert_eq!(sections[3].calories, 250);
        assert_eq!(sections[3].items[0].id, "a");
    }

    #[test]
    fn test_macro_split() {
        let macros = Macros {
            protein: 25,
            carbs: 50,
            fats: 25,
        };
        assert_eq!(macro_split(&macros), Some((25, 50, 25)));
        assert_eq!(macro_split(&Macros::default()), None);

        let huge = Macros {
            protein: u32::MAX,
            carbs: u32::MAX,
            fats: 0,
        };
        assert_eq!(macro_split(&huge), Some((50, 50, 0)));
    }

    #[test]
    fn test_meal_sections_saturate() {
        let item = |id: &str| FoodItem {
            id: id.into(),
            name: id.into(),
            calories: 3_000_000_000,
            time: "09:00".into(),
            meal_type: MealType::Snack,
            macros: Macros::default(),
        };
        let log = vec![item("a"), item("b")];
        let snack = meal_sections(&log)
            .into_iter()
            .find(|section| section.meal_type == MealType::Snack)
            .unwrap();
        assert_eq!(snack.calories, u32::MAX);
        assert_eq!(snack.items.len(), 2);
    }
}
