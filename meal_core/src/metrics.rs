//! Metrics calculator: BMI, BMI category, BMR and daily calorie target.
//!
//! All functions here are pure. Formulas:
//! - BMI: weight(kg) / height(m)^2
//! - BMR: Mifflin–St Jeor
//! - Calorie target: BMR x light-activity multiplier, then a fixed goal offset

use crate::{BiometricInput, BmiCategory, DerivedMetrics, Error, Gender, Goal, Result};
use std::ops::RangeInclusive;

/// Accepted weight range in kg
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=200.0;

/// Accepted height range in cm
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 120.0..=220.0;

/// Accepted age range in years
pub const AGE_RANGE_YEARS: RangeInclusive<u32> = 10..=100;

/// Light activity multiplier applied to BMR
pub const ACTIVITY_MULTIPLIER: f64 = 1.2;

/// kcal added or removed for gain/lose goals
pub const GOAL_ADJUSTMENT_KCAL: f64 = 400.0;

/// Compute body-mass index from weight (kg) and height (cm)
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(Error::invalid(format!(
            "height must be greater than 0 cm, got {}",
            height_cm
        )));
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Classify a BMI value
///
/// Bands are checked in order, so values in `[24.9, 25)` and `>= 29.9` fall
/// through to [`BmiCategory::Obese`].
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if (18.5..24.9).contains(&bmi) {
        BmiCategory::Normal
    } else if (25.0..29.9).contains(&bmi) {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Basal metabolic rate (kcal/day), Mifflin–St Jeor
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Daily calorie target (kcal) for the given goal
///
/// No minimum floor is applied.
pub fn compute_calorie_target(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: Gender,
    goal: Goal,
) -> f64 {
    let maintenance = compute_bmr(weight_kg, height_cm, age_years, gender) * ACTIVITY_MULTIPLIER;
    match goal {
        Goal::LoseWeight => maintenance - GOAL_ADJUSTMENT_KCAL,
        Goal::GainWeight => maintenance + GOAL_ADJUSTMENT_KCAL,
        Goal::Maintain => maintenance,
    }
}

impl BiometricInput {
    /// Check every scalar against its declared domain
    pub fn validate(&self) -> Result<()> {
        if !WEIGHT_RANGE_KG.contains(&self.weight_kg) {
            return Err(Error::invalid(format!(
                "weight {} kg is outside {}..={} kg",
                self.weight_kg,
                WEIGHT_RANGE_KG.start(),
                WEIGHT_RANGE_KG.end()
            )));
        }
        if !HEIGHT_RANGE_CM.contains(&self.height_cm) {
            return Err(Error::invalid(format!(
                "height {} cm is outside {}..={} cm",
                self.height_cm,
                HEIGHT_RANGE_CM.start(),
                HEIGHT_RANGE_CM.end()
            )));
        }
        if !AGE_RANGE_YEARS.contains(&self.age_years) {
            return Err(Error::invalid(format!(
                "age {} is outside {}..={} years",
                self.age_years,
                AGE_RANGE_YEARS.start(),
                AGE_RANGE_YEARS.end()
            )));
        }
        Ok(())
    }
}

impl DerivedMetrics {
    /// Validate the input, then derive BMI, category, BMR and calorie target
    pub fn compute(input: &BiometricInput) -> Result<Self> {
        input.validate()?;

        let bmi = compute_bmi(input.weight_kg, input.height_cm)?;
        let bmr = compute_bmr(input.weight_kg, input.height_cm, input.age_years, input.gender);
        let calorie_target = compute_calorie_target(
            input.weight_kg,
            input.height_cm,
            input.age_years,
            input.gender,
            input.goal,
        );

        tracing::debug!(
            "Derived metrics: bmi={:.2} bmr={:.2} target={:.1}",
            bmi,
            bmr,
            calorie_target
        );

        Ok(Self {
            bmi,
            bmi_category: classify_bmi(bmi),
            bmr,
            calorie_target,
        })
    }
}
