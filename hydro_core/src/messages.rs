//! Reply texts.
//!
//! All user-facing strings live here so the engine only decides *which*
//! message to send.

use crate::catalog;
use crate::command::Command;
use crate::goals::HEAT_THRESHOLD_C;
use crate::progress::{bar, ProgressReport};
use crate::{FoodItem, InputError, ProfileStep, UserSession};

/// Suggestions shown when an unknown food has no similar catalog entries
const FOOD_HINT: &str = "банан, яблоко, курица, рис";

pub fn start() -> String {
    "👋 Привет!\n\n\
     Я помогу тебе следить за водой, едой и тренировками.\n\
     Используй кнопки ниже! ⬇️"
        .to_string()
}

pub fn help() -> String {
    let commands = Command::DESCRIPTIONS
        .iter()
        .map(|(name, description)| format!("/{} – {}", name, description))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "📖 Как пользоваться:\n\n\
         1️⃣ Настрой профиль (⚙️)\n\
         2️⃣ Записывай воду, еду, тренировки\n\
         3️⃣ Смотри прогресс (📊)\n\n\
         Команды:\n{}",
        commands
    )
}

pub fn unknown_command(name: &str) -> String {
    format!("🤔 Не знаю команду /{}\n\n{}", name, help())
}

pub fn use_buttons() -> String {
    "Используй кнопки".to_string()
}

pub fn profile_required() -> String {
    "❌ Сначала настрой профиль: /set_profile".to_string()
}

pub fn cancelled() -> String {
    "❌ Отменено".to_string()
}

pub fn profile_cancelled() -> String {
    "❌ Настройка профиля отменена\n\n\
     Используй /set_profile когда будешь готов"
        .to_string()
}

// ============================================================================
// Profile Setup
// ============================================================================

pub fn profile_prompt(step: ProfileStep) -> String {
    let question = match step {
        ProfileStep::Weight => "Введи вес (кг):",
        ProfileStep::Height => "Введи рост (см):",
        ProfileStep::Age => "Введи возраст:",
        ProfileStep::Gender => "Пол (М/Ж):",
        ProfileStep::Activity => "Минут активности в день?",
        ProfileStep::City => "Город?\n(Например: Moscow)",
    };
    format!("Шаг {}/6: {}", step.number(), question)
}

pub fn profile_start() -> String {
    format!(
        "🏃‍♂️ Настроим профиль!\n\n{}",
        profile_prompt(ProfileStep::Weight)
    )
}

/// Confirmation of an accepted answer followed by the next question
pub fn profile_accepted(confirmation: String, next: ProfileStep) -> String {
    format!("✅ {}\n\n{}", confirmation, profile_prompt(next))
}

pub fn profile_invalid(step: ProfileStep, error: &InputError) -> String {
    match (step, error) {
        (_, InputError::NotANumber) => "❌ Введи число:".to_string(),
        (ProfileStep::Weight, _) => "❌ Вес от 1 до 300 кг:".to_string(),
        (ProfileStep::Height, _) => "❌ Рост от 1 до 250 см:".to_string(),
        (ProfileStep::Age, _) => "❌ Возраст от 1 до 120:".to_string(),
        (ProfileStep::Gender, _) => "❌ Введи М или Ж:".to_string(),
        (ProfileStep::Activity, _) => "❌ От 0 до 1440:".to_string(),
        (ProfileStep::City, _) => "❌ Введи название города:".to_string(),
    }
}

pub fn weather_check(city: &str) -> String {
    format!("🔍 Проверяю актуальную погоду в {}...", city)
}

/// Summary sent once setup completes
pub fn profile_summary(session: &UserSession) -> String {
    let Some(profile) = &session.profile else {
        return profile_required();
    };

    let status = if session.weather_live {
        "✅"
    } else {
        "⚠️ (по умолчанию)"
    };
    let tip = if session.temperature_c > HEAT_THRESHOLD_C {
        "\n🔥 Жарко! Норма воды увеличена из-за температуры"
    } else if session.temperature_c < 0.0 {
        "\n❄️ Холодно! Не забывай про тёплые напитки"
    } else {
        ""
    };

    format!(
        "🎉 Профиль настроен!\n\n\
         📊 Твои данные:\n\
         • Вес: {} кг\n\
         • Рост: {} см\n\
         • Возраст: {} лет\n\
         • Пол: {}\n\
         • Активность: {} мин/день\n\
         • Город: {}\n\n\
         🌡️ Актуальная температура: {:.1}°C {}{}\n\n\
         🎯 Дневные нормы:\n\
         💧 Вода: {} мл\n\
         🔥 Калории: {} ккал\n\n\
         Используй кнопки ниже! 👇",
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender.label(),
        profile.activity_minutes,
        profile.city,
        session.temperature_c,
        status,
        tip,
        session.water_goal_ml,
        session.calorie_goal_kcal,
    )
}

// ============================================================================
// Water
// ============================================================================

pub fn water_prompt() -> String {
    "💧 Введи мл:\nНапример: 500".to_string()
}

pub fn water_invalid(error: &InputError) -> String {
    match error {
        InputError::OutOfRange => "❌ От 1 до 5000 мл".to_string(),
        _ => "❌ Введи число".to_string(),
    }
}

pub fn water_logged(amount: u32, total: u32, goal: u32) -> String {
    let remaining = i64::from(goal) - i64::from(total);
    if remaining > 0 {
        format!(
            "💧 Записано: {} мл\n\n📊 Выпито: {}/{} мл\nОсталось: {} мл",
            amount, total, goal, remaining
        )
    } else {
        format!(
            "💧 Записано: {} мл\n\n🎉 Норма выполнена! ({}/{} мл)",
            amount, total, goal
        )
    }
}

// ============================================================================
// Food
// ============================================================================

pub fn food_prompt() -> String {
    "🍴 Введи продукт:\nНапример: банан".to_string()
}

pub fn food_searching(query: &str) -> String {
    format!("🔍 Ищу: {}...", query)
}

pub fn food_not_found(query: &str, similar: &[String]) -> String {
    if similar.is_empty() {
        format!("❌ Не нашёл '{}'\n\nПопробуй:\n• {}", query, FOOD_HINT)
    } else {
        let options = similar
            .iter()
            .map(|s| format!("• {}", s))
            .collect::<Vec<_>>()
            .join("\n");
        format!("❌ Не нашёл '{}'\n\nМожет быть:\n{}", query, options)
    }
}

pub fn food_found(item: &FoodItem) -> String {
    format!(
        "✅ {}\n📊 {} ккал на 100 г\n\nСколько грамм?",
        item.name, item.calories_per_100g
    )
}

pub fn food_amount_invalid(error: &InputError) -> String {
    match error {
        InputError::OutOfRange => "❌ От 1 до 10000 г:".to_string(),
        _ => "❌ Введи число:".to_string(),
    }
}

pub fn food_logged(name: &str, grams: f64, calories: f64, session: &UserSession) -> String {
    format!(
        "✅ {} — {} г\n\
         🔥 +{:.0} ккал\n\n\
         📊 Баланс:\n\
         • Потреблено: {:.0} ккал\n\
         • Сожжено: {:.0} ккал\n\
         • Баланс: {:.0} ккал\n\
         • Цель: {} ккал",
        name,
        grams,
        calories,
        session.logged_calories_kcal,
        session.burned_calories_kcal,
        session.calorie_balance(),
        session.calorie_goal_kcal,
    )
}

// ============================================================================
// Workout
// ============================================================================

pub fn workout_prompt() -> String {
    format!(
        "🏃 Введи тип и минуты:\nНапример: бег 30\n\nТипы: {}",
        catalog::workout_names()
    )
}

pub fn workout_invalid(error: &InputError) -> String {
    match error {
        InputError::OutOfRange => "❌ От 1 до 600 минут".to_string(),
        _ => format!(
            "❌ Формат: тип минуты\nПример: бег 30\n\nТипы: {}",
            catalog::workout_names()
        ),
    }
}

pub fn workout_logged(kind: &str, minutes: u32, burned: f64, extra_water: u32, total_burned: f64) -> String {
    format!(
        "🏃‍♂️ {} — {} мин\n\
         🔥 Сожжено: {:.0} ккал\n\
         💧 Выпей ещё: {} мл\n\n\
         📊 Всего сожжено: {:.0} ккал",
        capitalize(kind),
        minutes,
        burned,
        extra_water,
        total_burned
    )
}

// ============================================================================
// Progress
// ============================================================================

pub fn progress(report: &ProgressReport) -> String {
    format!(
        "📊 Прогресс\n\n\
         💧 Вода:\n\
         {} {}%\n\
         Выпито: {}/{} мл\n\n\
         🔥 Калории:\n\
         {} {}%\n\
         Потреблено: {:.0} ккал\n\
         Сожжено: {:.0} ккал\n\
         Баланс: {:.0}/{} ккал\n\n\
         💪 Продолжай!",
        bar(report.water_percent, "🟦"),
        report.water_percent,
        report.water_logged_ml,
        report.water_goal_ml,
        bar(report.calorie_percent, "🟧"),
        report.calorie_percent,
        report.calories_consumed,
        report.calories_burned,
        report.calorie_balance,
        report.calorie_goal_kcal,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
