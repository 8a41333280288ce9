//! Default meal catalog.
//!
//! The catalog is static configuration: built once and shared by reference.
//! The rule engine never edits it in place.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Cached default catalog - built once and reused across all plans
static DEFAULT_CATALOG: Lazy<MealCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static MealCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog: four slots, three suggestions each
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> MealCatalog {
    let mut slots = BTreeMap::new();

    slots.insert(
        MealSlot::Breakfast,
        vec![
            "Oatmeal with fruits".into(),
            "Boiled eggs with brown bread".into(),
            "Greek yogurt with nuts and honey".into(),
        ],
    );

    slots.insert(
        MealSlot::Lunch,
        vec![
            "Grilled chicken with brown rice".into(),
            "Vegetable salad with olive oil dressing".into(),
            "Lentil soup with whole wheat bread".into(),
        ],
    );

    slots.insert(
        MealSlot::Dinner,
        vec![
            "Baked fish with vegetables".into(),
            "Stir-fried tofu with rice".into(),
            "Vegetable curry with roti".into(),
        ],
    );

    slots.insert(
        MealSlot::Snacks,
        vec![
            "Mixed nuts".into(),
            "Fruit smoothie".into(),
            "Roasted chickpeas".into(),
        ],
    );

    MealCatalog { slots }
}

impl MealCatalog {
    /// Build a catalog from the defaults with per-slot replacements
    ///
    /// Slots absent from `overrides` keep their default suggestions.
    pub fn with_overrides(overrides: &BTreeMap<MealSlot, Vec<String>>) -> Self {
        let mut catalog = build_default_catalog();
        for (slot, items) in overrides {
            tracing::info!("Overriding {} suggestions from config ({} items)", slot, items.len());
            catalog.slots.insert(*slot, items.clone());
        }
        catalog
    }

    /// Suggestions for a slot, or an empty slice if the slot is missing
    pub fn suggestions(&self, slot: MealSlot) -> &[String] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for slot in MealSlot::ALL {
            match self.slots.get(&slot) {
                None => errors.push(format!("Catalog has no {} slot", slot)),
                Some(items) => {
                    if items.is_empty() {
                        errors.push(format!("{} has no suggestions", slot));
                    }
                    for (idx, item) in items.iter().enumerate() {
                        if item.trim().is_empty() {
                            errors.push(format!("{} suggestion #{} is empty", slot, idx + 1));
                        }
                    }
                }
            }
        }

        errors
    }
}
