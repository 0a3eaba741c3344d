//! Inbound message classification: slash commands, menu buttons, free text.

/// Main menu buttons, as rows of two
pub const MENU: [[&str; 2]; 3] = [
    [BUTTON_WATER, BUTTON_FOOD],
    [BUTTON_WORKOUT, BUTTON_PROGRESS],
    [BUTTON_PROFILE, BUTTON_HELP],
];

pub const BUTTON_WATER: &str = "💧 Записать воду";
pub const BUTTON_FOOD: &str = "🍴 Записать еду";
pub const BUTTON_WORKOUT: &str = "🏃 Записать тренировку";
pub const BUTTON_PROGRESS: &str = "📊 Мой прогресс";
pub const BUTTON_PROFILE: &str = "⚙️ Настроить профиль";
pub const BUTTON_HELP: &str = "❓ Помощь";

/// Entry points exposed to the chat transport
///
/// Logging commands carry their inline arguments, if any. Without arguments
/// they open the prompt-and-answer variant of the same flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    SetProfile,
    Cancel,
    LogWater(Option<String>),
    LogFood(Option<String>),
    LogWorkout(Option<String>),
    CheckProgress,
}

/// A classified inbound message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    Command(Command),
    UnknownCommand(String),
    Text(String),
}

impl Command {
    /// Command names and descriptions, for help texts and transport registration
    pub const DESCRIPTIONS: [(&'static str, &'static str); 8] = [
        ("start", "начать работу с ботом"),
        ("help", "показать помощь"),
        ("set_profile", "настроить профиль"),
        ("cancel", "отменить текущий ввод"),
        ("log_water", "записать воду: /log_water 500"),
        ("log_food", "записать еду: /log_food банан"),
        ("log_workout", "записать тренировку: /log_workout бег 30"),
        ("check_progress", "показать прогресс"),
    ];

    fn from_name(name: &str, args: Option<String>) -> Option<Self> {
        let command = match name {
            "start" => Command::Start,
            "help" => Command::Help,
            "set_profile" => Command::SetProfile,
            "cancel" => Command::Cancel,
            "log_water" => Command::LogWater(args),
            "log_food" => Command::LogFood(args),
            "log_workout" => Command::LogWorkout(args),
            "check_progress" => Command::CheckProgress,
            _ => return None,
        };
        Some(command)
    }

    fn from_button(text: &str) -> Option<Self> {
        let command = match text {
            BUTTON_WATER => Command::LogWater(None),
            BUTTON_FOOD => Command::LogFood(None),
            BUTTON_WORKOUT => Command::LogWorkout(None),
            BUTTON_PROGRESS => Command::CheckProgress,
            BUTTON_PROFILE => Command::SetProfile,
            BUTTON_HELP => Command::Help,
            _ => return None,
        };
        Some(command)
    }
}

impl Inbound {
    /// Classify a raw message
    ///
    /// `/name@bot args` is a command; an exact menu label is the matching
    /// command; anything else is free text for the pending dialog step.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        if let Some(rest) = text.strip_prefix('/') {
            let (head, args) = match rest.split_once(char::is_whitespace) {
                Some((head, args)) => (head, args.trim()),
                None => (rest, ""),
            };
            let name = head.split('@').next().unwrap_or(head).to_lowercase();
            let args = (!args.is_empty()).then(|| args.to_string());

            return match Command::from_name(&name, args) {
                Some(command) => Inbound::Command(command),
                None => Inbound::UnknownCommand(name),
            };
        }

        match Command::from_button(text) {
            Some(command) => Inbound::Command(command),
            None => Inbound::Text(text.to_string()),
        }
    }
}
