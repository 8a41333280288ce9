//! Meal rule engine.
//!
//! Turns the static catalog plus declared health conditions into a meal plan:
//! 1. Copy each slot's suggestions from the catalog
//! 2. Apply condition rules in a fixed order (lactose, gluten, diabetes)
//! 3. Apportion the calorie target across slots
//! 4. Join each slot's suggestions into display text

use crate::{ConditionSet, HealthCondition, MealCatalog, MealPlan, MealPlanRow, MealSlot};
use std::collections::BTreeMap;

/// Snack list that replaces the catalog's snacks when diabetes is declared
pub const DIABETIC_SNACKS: [&str; 3] = [
    "Boiled egg",
    "Apple slices with peanut butter",
    "Vegetable sticks with hummus",
];

const LACTOSE_MARKERS: [&str; 1] = ["yogurt"];
const GLUTEN_MARKERS: [&str; 2] = ["bread", "roti"];

/// Build the meal plan for a calorie target and a set of conditions
///
/// Rule order matters: the diabetes rule replaces Snacks outright, discarding
/// whatever the intolerance filters left there. Conditions with no rule are
/// ignored. Never fails.
pub fn build_meal_plan(
    catalog: &MealCatalog,
    calorie_target: f64,
    conditions: &ConditionSet,
) -> MealPlan {
    let mut working: BTreeMap<MealSlot, Vec<String>> = MealSlot::ALL
        .iter()
        .map(|slot| (*slot, catalog.suggestions(*slot).to_vec()))
        .collect();

    if conditions.contains(&HealthCondition::LactoseIntolerance) {
        if let Some(items) = working.get_mut(&MealSlot::Breakfast) {
            drop_matching(items, &LACTOSE_MARKERS);
        }
        tracing::debug!("Applied lactose rule to Breakfast");
    }

    if conditions.contains(&HealthCondition::GlutenIntolerance) {
        for items in working.values_mut() {
            drop_matching(items, &GLUTEN_MARKERS);
        }
        tracing::debug!("Applied gluten rule to all slots");
    }

    if conditions.contains(&HealthCondition::Diabetes) {
        working.insert(
            MealSlot::Snacks,
            DIABETIC_SNACKS.iter().map(|s| s.to_string()).collect(),
        );
        tracing::debug!("Replaced Snacks with diabetic-friendly list");
    }

    let rows = MealSlot::ALL
        .iter()
        .map(|slot| MealPlanRow {
            slot: *slot,
            calories: allocate_calories(calorie_target, *slot),
            suggestions: working
                .get(slot)
                .map(|items| items.join(", "))
                .unwrap_or_default(),
        })
        .collect();

    MealPlan {
        calorie_target,
        rows,
    }
}

/// Calories for one slot, rounded to the nearest kcal (ties to even)
pub fn allocate_calories(calorie_target: f64, slot: MealSlot) -> i64 {
    (calorie_target * slot.calorie_share()).round_ties_even() as i64
}

/// Remove items whose text contains any of the markers (case-sensitive)
fn drop_matching(items: &mut Vec<String>, markers: &[&str]) {
    items.retain(|item| !markers.iter().any(|m| item.contains(m)));
}
