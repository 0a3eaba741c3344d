//! Read-only daily progress snapshot.

use crate::UserSession;

/// Segments in a progress bar
pub const BAR_SEGMENTS: usize = 10;

/// Water and calorie progress computed from a configured session
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressReport {
    pub water_logged_ml: u32,
    pub water_goal_ml: u32,
    pub water_percent: i64,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub calorie_balance: f64,
    pub calorie_goal_kcal: u32,
    pub calorie_percent: i64,
}

impl ProgressReport {
    /// Snapshot of the session's totals against its goals
    ///
    /// Percentages are floored and may exceed 100 or, for a negative
    /// calorie balance, drop below 0. A zero goal yields 0 %.
    pub fn from_session(session: &UserSession) -> Self {
        let balance = session.calorie_balance();
        Self {
            water_logged_ml: session.logged_water_ml,
            water_goal_ml: session.water_goal_ml,
            water_percent: percent(f64::from(session.logged_water_ml), session.water_goal_ml),
            calories_consumed: session.logged_calories_kcal,
            calories_burned: session.burned_calories_kcal,
            calorie_balance: balance,
            calorie_goal_kcal: session.calorie_goal_kcal,
            calorie_percent: percent(balance, session.calorie_goal_kcal),
        }
    }
}

fn percent(value: f64, goal: u32) -> i64 {
    if goal == 0 {
        return 0;
    }
    (value / f64::from(goal) * 100.0).floor() as i64
}

/// Number of filled segments: floor(percent / 10), clamped to 0..=10
pub fn filled_segments(percent: i64) -> usize {
    percent.div_euclid(10).clamp(0, BAR_SEGMENTS as i64) as usize
}

/// Render a 10-segment bar with the given fill glyph
pub fn bar(percent: i64, filled: &str) -> String {
    let count = filled_segments(percent);
    format!("{}{}", filled.repeat(count), "⬜".repeat(BAR_SEGMENTS - count))
}
