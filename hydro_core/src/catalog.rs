//! Built-in food and workout tables.
//!
//! The food table answers common products without touching the network and
//! feeds the "did you mean" suggestions. The workout table maps activity
//! names to calories burned per minute.

use crate::FoodItem;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maximum number of suggestions offered for an unknown food
pub const MAX_SUGGESTIONS: usize = 5;

/// Burn rate used for workout types missing from the table
pub const DEFAULT_KCAL_PER_MINUTE: f64 = 6.0;

/// A built-in food: lookup key, display name, kcal per 100 g
#[derive(Clone, Copy, Debug)]
pub struct FoodEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub calories_per_100g: f64,
}

impl FoodEntry {
    pub fn to_item(self) -> FoodItem {
        FoodItem {
            name: self.name.to_string(),
            calories_per_100g: self.calories_per_100g,
        }
    }
}

const fn food(key: &'static str, name: &'static str, calories_per_100g: f64) -> FoodEntry {
    FoodEntry {
        key,
        name,
        calories_per_100g,
    }
}

/// Built-in foods, in suggestion order
pub static FOODS: &[FoodEntry] = &[
    // Fruit
    food("банан", "Банан", 89.0),
    food("яблоко", "Яблоко", 52.0),
    food("апельсин", "Апельсин", 47.0),
    food("груша", "Груша", 57.0),
    food("виноград", "Виноград", 69.0),
    food("киви", "Киви", 61.0),
    food("манго", "Манго", 60.0),
    food("ананас", "Ананас", 50.0),
    food("арбуз", "Арбуз", 30.0),
    // English aliases
    food("banana", "Banana", 89.0),
    food("bananas", "Banana", 89.0),
    food("apple", "Apple", 52.0),
    food("orange", "Orange", 47.0),
    // Vegetables
    food("помидор", "Помидор", 18.0),
    food("огурец", "Огурец", 15.0),
    food("морковь", "Морковь", 41.0),
    food("картофель", "Картофель", 77.0),
    food("капуста", "Капуста", 25.0),
    // Meat
    food("курица", "Курица", 165.0),
    food("говядина", "Говядина", 250.0),
    food("свинина", "Свинина", 242.0),
    // Dairy
    food("молоко", "Молоко", 60.0),
    food("кефир", "Кефир", 56.0),
    food("йогурт", "Йогурт", 59.0),
    food("творог", "Творог", 169.0),
    food("сыр", "Сыр", 356.0),
    // Grains
    food("рис", "Рис варёный", 130.0),
    food("гречка", "Гречка варёная", 123.0),
    food("овсянка", "Овсянка", 68.0),
    food("макароны", "Макароны", 158.0),
    // Other
    food("яйцо", "Яйцо", 155.0),
    food("хлеб", "Хлеб", 265.0),
    food("шоколад", "Шоколад", 546.0),
];

/// Workout types and their burn rate in kcal per minute, in display order
pub static WORKOUTS: &[(&str, f64)] = &[
    ("бег", 10.0),
    ("ходьба", 4.0),
    ("плавание", 8.0),
    ("велосипед", 7.0),
    ("йога", 3.0),
    ("силовая", 6.0),
    ("танцы", 5.0),
    ("футбол", 9.0),
    ("баскетбол", 8.0),
    ("теннис", 7.0),
];

static FOOD_INDEX: Lazy<HashMap<&'static str, FoodEntry>> =
    Lazy::new(|| FOODS.iter().map(|entry| (entry.key, *entry)).collect());

/// Case-fold and trim a user query the way catalog keys are stored
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Exact (case-insensitive) match against the built-in foods
pub fn find_food(query: &str) -> Option<FoodEntry> {
    FOOD_INDEX.get(normalize(query).as_str()).copied()
}

/// Keys that contain the query or are contained in it, at most five
pub fn similar_foods(query: &str) -> Vec<String> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    FOODS
        .iter()
        .filter(|entry| needle.contains(entry.key) || entry.key.contains(needle.as_str()))
        .take(MAX_SUGGESTIONS)
        .map(|entry| entry.key.to_string())
        .collect()
}

/// Burn rate for a workout type, falling back to the default rate
pub fn workout_rate(kind: &str) -> f64 {
    let kind = normalize(kind);
    WORKOUTS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_KCAL_PER_MINUTE)
}

/// Comma-separated workout names for prompts
pub fn workout_names() -> String {
    WORKOUTS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate the built-in tables for consistency
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate() -> Vec<String> {
    let mut errors = Vec::new();

    if FOOD_INDEX.len() != FOODS.len() {
        errors.push("Food table has duplicate keys".to_string());
    }

    for entry in FOODS {
        if entry.key.is_empty() || entry.name.is_empty() {
            errors.push("Food entry has empty key or name".to_string());
        }
        if normalize(entry.key) != entry.key {
            errors.push(format!("Food key '{}' is not normalized", entry.key));
        }
        if entry.calories_per_100g <= 0.0 {
            errors.push(format!("Food '{}' has non-positive calories", entry.key));
        }
    }

    for (name, rate) in WORKOUTS {
        if *rate <= 0.0 {
            errors.push(format!("Workout '{}' has non-positive rate", name));
        }
    }

    errors
}
