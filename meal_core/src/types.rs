//! Core domain types for the meal planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Biometric inputs (gender, goal, health conditions)
//! - Derived metrics and BMI categories
//! - Meal slots, catalog, and generated plans
//! - Progress entries and their time-series view

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Lowercases and folds separators so "Lose Weight", "lose-weight" and
/// "lose_weight" all parse the same way.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' || c == '/' { '_' } else { c })
        .collect()
}

// ============================================================================
// Biometric Input
// ============================================================================

/// Biological sex used by the Mifflin–St Jeor formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
        }
    }
}

impl FromStr for Gender {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match normalize(s).as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            other => Err(crate::Error::invalid(format!("unknown gender '{}'", other))),
        }
    }
}

/// What the user wants to do with their weight
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainWeight,
    #[default]
    Maintain,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::LoseWeight => write!(f, "Lose Weight"),
            Goal::GainWeight => write!(f, "Gain Weight"),
            Goal::Maintain => write!(f, "Maintain Healthy Lifestyle"),
        }
    }
}

impl FromStr for Goal {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match normalize(s).as_str() {
            "lose" | "lose_weight" => Ok(Goal::LoseWeight),
            "gain" | "gain_weight" => Ok(Goal::GainWeight),
            "maintain" | "maintain_healthy_lifestyle" => Ok(Goal::Maintain),
            other => Err(crate::Error::invalid(format!("unknown goal '{}'", other))),
        }
    }
}

/// A declared health condition or intolerance
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    Diabetes,
    Hypertension,
    LactoseIntolerance,
    GlutenIntolerance,
    Pcos,
    HighCholesterol,
    None,
}

impl HealthCondition {
    /// Every selectable condition, in form order
    pub const ALL: [HealthCondition; 7] = [
        HealthCondition::Diabetes,
        HealthCondition::Hypertension,
        HealthCondition::LactoseIntolerance,
        HealthCondition::GlutenIntolerance,
        HealthCondition::Pcos,
        HealthCondition::HighCholesterol,
        HealthCondition::None,
    ];
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthCondition::Diabetes => "Diabetes",
            HealthCondition::Hypertension => "Hypertension",
            HealthCondition::LactoseIntolerance => "Lactose Intolerance",
            HealthCondition::GlutenIntolerance => "Gluten Intolerance",
            HealthCondition::Pcos => "PCOS/PCOD",
            HealthCondition::HighCholesterol => "High Cholesterol",
            HealthCondition::None => "None",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for HealthCondition {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match normalize(s).as_str() {
            "diabetes" => Ok(HealthCondition::Diabetes),
            "hypertension" => Ok(HealthCondition::Hypertension),
            "lactose" | "lactose_intolerance" => Ok(HealthCondition::LactoseIntolerance),
            "gluten" | "gluten_intolerance" => Ok(HealthCondition::GlutenIntolerance),
            "pcos" | "pcod" | "pcos_pcod" => Ok(HealthCondition::Pcos),
            "high_cholesterol" | "cholesterol" => Ok(HealthCondition::HighCholesterol),
            "none" => Ok(HealthCondition::None),
            other => Err(crate::Error::invalid(format!(
                "unknown health condition '{}'",
                other
            ))),
        }
    }
}

/// Set of declared conditions; ordered so rendering is deterministic
pub type ConditionSet = BTreeSet<HealthCondition>;

/// Biometric inputs supplied per calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BiometricInput {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimetres
    pub height_cm: f64,
    /// Age in whole years
    pub age_years: u32,
    pub gender: Gender,
    pub goal: Goal,
    #[serde(default)]
    pub conditions: ConditionSet,
}

// ============================================================================
// Derived Metrics
// ============================================================================

/// BMI band
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal weight"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Values derived from a [`BiometricInput`]; recomputed on every request
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DerivedMetrics {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmr: f64,
    /// Daily calorie target in kcal, after the goal adjustment
    pub calorie_target: f64,
}

// ============================================================================
// Meals
// ============================================================================

/// One of the four daily meal categories
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    /// All slots in display order
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    /// Fraction of the daily calorie target allotted to this slot
    pub fn calorie_share(self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.25,
            MealSlot::Lunch => 0.35,
            MealSlot::Dinner => 0.30,
            MealSlot::Snacks => 0.10,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Breakfast => write!(f, "Breakfast"),
            MealSlot::Lunch => write!(f, "Lunch"),
            MealSlot::Dinner => write!(f, "Dinner"),
            MealSlot::Snacks => write!(f, "Snacks"),
        }
    }
}

impl FromStr for MealSlot {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match normalize(s).as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snacks" | "snack" => Ok(MealSlot::Snacks),
            other => Err(crate::Error::invalid(format!("unknown meal slot '{}'", other))),
        }
    }
}

/// Immutable mapping of meal slot to ordered suggestions
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealCatalog {
    pub slots: BTreeMap<MealSlot, Vec<String>>,
}

/// One row of a generated meal plan
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MealPlanRow {
    pub slot: MealSlot,
    /// Calorie allocation, rounded to whole kcal
    pub calories: i64,
    /// Suggestions joined with ", "; empty when every item was filtered out
    pub suggestions: String,
}

/// Per-request meal plan: one row per slot in display order
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MealPlan {
    pub calorie_target: f64,
    pub rows: Vec<MealPlanRow>,
}

impl MealPlan {
    /// Look up the row for a given slot
    pub fn row(&self, slot: MealSlot) -> Option<&MealPlanRow> {
        self.rows.iter().find(|r| r.slot == slot)
    }

    /// Sum of the per-slot allocations
    pub fn total_calories(&self) -> i64 {
        self.rows.iter().map(|r| r.calories).sum()
    }
}

// ============================================================================
// Progress Tracking
// ============================================================================

/// A single logged weigh-in
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub weight_kg: f64,
    /// BMI rounded to one decimal place
    pub bmi: f64,
}

/// Two date-aligned series for charting weight and BMI together
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct TimeSeries {
    pub weight: Vec<(NaiveDate, f64)>,
    pub bmi: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.weight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }
}
