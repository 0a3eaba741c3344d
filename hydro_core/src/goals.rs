//! Daily goal formulas.
//!
//! Pure functions only; callers validate inputs before calling them:
//! - Water: body weight, activity and heat bonuses
//! - Calories: Mifflin-St Jeor BMR plus an activity allowance
//! - Workouts: burned calories and the extra water they require

use crate::Gender;

/// Temperature above which the heat bonus applies
pub const HEAT_THRESHOLD_C: f64 = 25.0;

/// Daily water target in millilitres
///
/// base = weight × 30, activity = (minutes / 30) × 500, heat bonus =
/// min(500 + (t − 25) × 50, 1000) when t > 25, else 0.
pub fn water_goal(weight_kg: f64, activity_minutes: u32, temperature_c: f64) -> u32 {
    let base = weight_kg * 30.0;
    let activity = (f64::from(activity_minutes) / 30.0) * 500.0;
    let heat = if temperature_c > HEAT_THRESHOLD_C {
        (500.0 + (temperature_c - HEAT_THRESHOLD_C) * 50.0).min(1000.0)
    } else {
        0.0
    };
    (base + activity + heat).floor() as u32
}

/// Daily calorie target in kcal
///
/// Very small bodies can push the formula below zero; the goal is clamped
/// at 0 in that case.
pub fn calorie_goal(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity_minutes: u32,
) -> u32 {
    let mut bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    bmr += match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    let total = bmr + (f64::from(activity_minutes) / 30.0) * 150.0;
    total.floor().max(0.0) as u32
}

/// Calories burned by a workout, scaled to body weight (70 kg reference)
pub fn workout_burn(kcal_per_minute: f64, duration_min: u32, weight_kg: f64) -> f64 {
    kcal_per_minute * f64::from(duration_min) * (weight_kg / 70.0)
}

/// Extra water a workout adds to the daily goal: 200 ml per 30 minutes
pub fn workout_extra_water(duration_min: u32) -> u32 {
    ((f64::from(duration_min) / 30.0) * 200.0).floor() as u32
}
