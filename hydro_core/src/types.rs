//! Core domain types for the Hydro tracking assistant.
//!
//! This module defines the fundamental types used throughout the system:
//! - User identity, profile and the per-user session record
//! - The dialog step a user's next free-text message is routed to
//! - Lookup results (food, weather)
//! - The reply handed back to the chat transport

use std::fmt;

// ============================================================================
// Identity and Profile
// ============================================================================

/// Stable user identifier supplied by the chat transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Normalize free-text gender tokens (Russian or English, any case)
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "м" | "муж" | "мужской" | "male" | "m" => Some(Gender::Male),
            "ж" | "жен" | "женский" | "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Short label used in replies
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "М",
            Gender::Female => "Ж",
        }
    }
}

/// Completed user profile
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity_minutes: u32,
    pub city: String,
}

// ============================================================================
// Dialog State
// ============================================================================

/// Fields collected so far during profile setup
///
/// Each field is filled by its own step, in order; nothing here is visible
/// outside the dialog until the city step commits a whole `Profile`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub activity_minutes: Option<u32>,
}

/// Position within the profile setup dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileStep {
    Weight,
    Height,
    Age,
    Gender,
    Activity,
    City,
}

impl ProfileStep {
    /// 1-based position shown as "Шаг n/6"
    pub fn number(self) -> u8 {
        match self {
            ProfileStep::Weight => 1,
            ProfileStep::Height => 2,
            ProfileStep::Age => 3,
            ProfileStep::Gender => 4,
            ProfileStep::Activity => 5,
            ProfileStep::City => 6,
        }
    }
}

impl ProfileDraft {
    /// The first step whose field has not been collected yet
    pub fn current_step(&self) -> ProfileStep {
        if self.weight_kg.is_none() {
            ProfileStep::Weight
        } else if self.height_cm.is_none() {
            ProfileStep::Height
        } else if self.age.is_none() {
            ProfileStep::Age
        } else if self.gender.is_none() {
            ProfileStep::Gender
        } else if self.activity_minutes.is_none() {
            ProfileStep::Activity
        } else {
            ProfileStep::City
        }
    }

    /// Combine the draft with a city into a full profile
    ///
    /// Returns `None` while any earlier step is still missing.
    pub fn complete(&self, city: String) -> Option<Profile> {
        Some(Profile {
            weight_kg: self.weight_kg?,
            height_cm: self.height_cm?,
            age: self.age?,
            gender: self.gender?,
            activity_minutes: self.activity_minutes?,
            city,
        })
    }
}

/// Food resolved by the name step, waiting for the amount step
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFood {
    pub name: String,
    pub calories_per_100g: f64,
}

/// What the user's next free-text message answers
///
/// Exactly one step is active per user. Step payloads (the profile draft,
/// the pending food) live inside the variant, so resetting to `Idle` drops
/// them together with the marker.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DialogStep {
    #[default]
    Idle,
    Profile(ProfileDraft),
    Water,
    FoodName,
    FoodAmount(PendingFood),
    Workout,
}

impl DialogStep {
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogStep::Idle)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Per-user record of profile, goals, running totals and dialog position
#[derive(Clone, Debug, Default)]
pub struct UserSession {
    pub profile: Option<Profile>,
    pub temperature_c: f64,
    pub weather_live: bool,
    pub water_goal_ml: u32,
    pub calorie_goal_kcal: u32,
    pub logged_water_ml: u32,
    pub logged_calories_kcal: f64,
    pub burned_calories_kcal: f64,
    pub step: DialogStep,
}

impl UserSession {
    /// Goals and totals are meaningful only once a profile is committed
    pub fn is_configured(&self) -> bool {
        self.profile.is_some()
    }

    /// Consumed minus burned calories
    pub fn calorie_balance(&self) -> f64 {
        self.logged_calories_kcal - self.burned_calories_kcal
    }
}

// ============================================================================
// Lookup Results
// ============================================================================

/// A food with its energy density
#[derive(Clone, Debug, PartialEq)]
pub struct FoodItem {
    pub name: String,
    pub calories_per_100g: f64,
}

/// Outcome of resolving a free-text food name
#[derive(Clone, Debug, PartialEq)]
pub enum FoodResolution {
    Found(FoodItem),
    /// Up to five catalog keys that look similar to the query
    NotFound { similar: Vec<String> },
}

/// Outcome of a temperature lookup
///
/// `success` is false when `temperature_c` is the configured fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherReading {
    pub success: bool,
    pub temperature_c: f64,
}

// ============================================================================
// Transport Contract
// ============================================================================

/// Response to one inbound message
///
/// `messages` are delivered in order; `menu` asks the transport to show the
/// main quick-reply keyboard with the last message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reply {
    pub messages: Vec<String>,
    pub menu: bool,
}

impl Reply {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
            menu: false,
        }
    }

    pub fn with_menu(mut self) -> Self {
        self.menu = true;
        self
    }

    /// Prepend a progress notice such as "searching..."
    pub fn preceded_by(mut self, notice: impl Into<String>) -> Self {
        self.messages.insert(0, notice.into());
        self
    }

    /// All messages joined, convenient for assertions and plain transports
    pub fn joined(&self) -> String {
        self.messages.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_tokens() {
        for token in ["м", "М", "муж", "мужской", "male", "Male", "m", " M "] {
            assert_eq!(Gender::parse(token), Some(Gender::Male), "{token}");
        }
        for token in ["ж", "Ж", "жен", "женский", "female", "F"] {
            assert_eq!(Gender::parse(token), Some(Gender::Female), "{token}");
        }
        assert_eq!(Gender::parse("x"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_draft_steps_in_order() {
        let mut draft = ProfileDraft::default();
        assert_eq!(draft.current_step(), ProfileStep::Weight);
        draft.weight_kg = Some(70.0);
        assert_eq!(draft.current_step(), ProfileStep::Height);
        draft.height_cm = Some(175.0);
        draft.age = Some(25);
        assert_eq!(draft.current_step(), ProfileStep::Gender);
        draft.gender = Some(Gender::Female);
        draft.activity_minutes = Some(0);
        assert_eq!(draft.current_step(), ProfileStep::City);

        let profile = draft.complete("Kazan".into()).unwrap();
        assert_eq!(profile.activity_minutes, 0);
        assert_eq!(profile.city, "Kazan");
    }

    #[test]
    fn test_incomplete_draft_does_not_complete() {
        let draft = ProfileDraft {
            weight_kg: Some(70.0),
            ..Default::default()
        };
        assert!(draft.complete("Moscow".into()).is_none());
    }

    #[test]
    fn test_new_session_is_unconfigured_and_idle() {
        let session = UserSession::default();
        assert!(!session.is_configured());
        assert!(session.step.is_idle());
        assert_eq!(session.calorie_balance(), 0.0);
    }
}
