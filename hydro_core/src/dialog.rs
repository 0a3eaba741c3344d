//! Validation of free-text answers for every dialog step.
//!
//! Each parser either yields a value within the accepted range or an
//! `InputError` that the engine turns into a re-prompt of the same step.

use crate::{Gender, InputError};

pub const MAX_WEIGHT_KG: f64 = 300.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;
pub const MAX_AGE: u32 = 120;
pub const MAX_ACTIVITY_MINUTES: u32 = 1440;
pub const MAX_WATER_ML: u32 = 5000;
pub const MAX_FOOD_GRAMS: f64 = 10000.0;
pub const MAX_WORKOUT_MINUTES: u32 = 600;

fn parse_float(text: &str) -> Result<f64, InputError> {
    let value: f64 = text.trim().parse().map_err(|_| InputError::NotANumber)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotANumber)
    }
}

fn parse_int(text: &str) -> Result<i64, InputError> {
    text.trim().parse().map_err(|_| InputError::NotANumber)
}

/// Float in the half-open range (0, max]
fn positive_float_up_to(text: &str, max: f64) -> Result<f64, InputError> {
    let value = parse_float(text)?;
    if value > 0.0 && value <= max {
        Ok(value)
    } else {
        Err(InputError::OutOfRange)
    }
}

/// Integer in the inclusive range [min, max]
fn int_between(text: &str, min: u32, max: u32) -> Result<u32, InputError> {
    let value = parse_int(text)?;
    if value >= i64::from(min) && value <= i64::from(max) {
        Ok(value as u32)
    } else {
        Err(InputError::OutOfRange)
    }
}

pub fn parse_weight(text: &str) -> Result<f64, InputError> {
    positive_float_up_to(text, MAX_WEIGHT_KG)
}

pub fn parse_height(text: &str) -> Result<f64, InputError> {
    positive_float_up_to(text, MAX_HEIGHT_CM)
}

pub fn parse_age(text: &str) -> Result<u32, InputError> {
    int_between(text, 1, MAX_AGE)
}

pub fn parse_gender(text: &str) -> Result<Gender, InputError> {
    Gender::parse(text).ok_or(InputError::UnknownGender)
}

pub fn parse_activity(text: &str) -> Result<u32, InputError> {
    int_between(text, 0, MAX_ACTIVITY_MINUTES)
}

pub fn parse_city(text: &str) -> Result<String, InputError> {
    let city = text.trim();
    if city.is_empty() {
        Err(InputError::Empty)
    } else {
        Ok(city.to_string())
    }
}

pub fn parse_water(text: &str) -> Result<u32, InputError> {
    int_between(text, 1, MAX_WATER_ML)
}

pub fn parse_food_name(text: &str) -> Result<String, InputError> {
    parse_city(text)
}

pub fn parse_food_grams(text: &str) -> Result<f64, InputError> {
    positive_float_up_to(text, MAX_FOOD_GRAMS)
}

/// `"<type> <minutes>"`; the type is case-folded, extra tokens are ignored
pub fn parse_workout(text: &str) -> Result<(String, u32), InputError> {
    let mut parts = text.split_whitespace();
    let (Some(kind), Some(minutes)) = (parts.next(), parts.next()) else {
        return Err(InputError::WorkoutFormat);
    };
    let minutes = match int_between(minutes, 1, MAX_WORKOUT_MINUTES) {
        Err(InputError::NotANumber) => return Err(InputError::WorkoutFormat),
        other => other?,
    };
    Ok((kind.to_lowercase(), minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_bounds() {
        assert_eq!(parse_weight("70"), Ok(70.0));
        assert_eq!(parse_weight(" 72.5 "), Ok(72.5));
        assert_eq!(parse_weight("300"), Ok(300.0));
        assert_eq!(parse_weight("0"), Err(InputError::OutOfRange));
        assert_eq!(parse_weight("300.1"), Err(InputError::OutOfRange));
        assert_eq!(parse_weight("-5"), Err(InputError::OutOfRange));
        assert_eq!(parse_weight("семьдесят"), Err(InputError::NotANumber));
        assert_eq!(parse_weight("NaN"), Err(InputError::NotANumber));
        assert_eq!(parse_weight("inf"), Err(InputError::NotANumber));
    }

    #[test]
    fn test_height_bounds() {
        assert_eq!(parse_height("250"), Ok(250.0));
        assert_eq!(parse_height("251"), Err(InputError::OutOfRange));
    }

    #[test]
    fn test_age_is_integer() {
        assert_eq!(parse_age("25"), Ok(25));
        assert_eq!(parse_age("120"), Ok(120));
        assert_eq!(parse_age("0"), Err(InputError::OutOfRange));
        assert_eq!(parse_age("121"), Err(InputError::OutOfRange));
        assert_eq!(parse_age("25.5"), Err(InputError::NotANumber));
    }

    #[test]
    fn test_activity_allows_zero() {
        assert_eq!(parse_activity("0"), Ok(0));
        assert_eq!(parse_activity("1440"), Ok(1440));
        assert_eq!(parse_activity("1441"), Err(InputError::OutOfRange));
        assert_eq!(parse_activity("-1"), Err(InputError::OutOfRange));
    }

    #[test]
    fn test_city_trimmed_non_empty() {
        assert_eq!(parse_city("  Moscow "), Ok("Moscow".to_string()));
        assert_eq!(parse_city("   "), Err(InputError::Empty));
    }

    #[test]
    fn test_water_bounds() {
        assert_eq!(parse_water("500"), Ok(500));
        assert_eq!(parse_water("5000"), Ok(5000));
        assert_eq!(parse_water("0"), Err(InputError::OutOfRange));
        assert_eq!(parse_water("5001"), Err(InputError::OutOfRange));
        assert_eq!(parse_water("99999999999999999999"), Err(InputError::NotANumber));
        assert_eq!(parse_water("полстакана"), Err(InputError::NotANumber));
    }

    #[test]
    fn test_food_grams_bounds() {
        assert_eq!(parse_food_grams("150.5"), Ok(150.5));
        assert_eq!(parse_food_grams("10000"), Ok(10000.0));
        assert_eq!(parse_food_grams("10001"), Err(InputError::OutOfRange));
    }

    #[test]
    fn test_workout_parsing() {
        assert_eq!(parse_workout("Бег 30"), Ok(("бег".to_string(), 30)));
        assert_eq!(parse_workout("кроссфит 45 интенсивно"), Ok(("кроссфит".to_string(), 45)));
        assert_eq!(parse_workout("бег"), Err(InputError::WorkoutFormat));
        assert_eq!(parse_workout("бег долго"), Err(InputError::WorkoutFormat));
        assert_eq!(parse_workout("бег 0"), Err(InputError::OutOfRange));
        assert_eq!(parse_workout("бег 601"), Err(InputError::OutOfRange));
    }
}
