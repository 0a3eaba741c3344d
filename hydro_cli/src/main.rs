use clap::{Parser, Subcommand};
use hydro_core::*;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "hydro")]
#[command(about = "Water, calorie and workout tracking assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable weather and food network lookups
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant over stdin/stdout (default)
    Chat {
        /// User id for lines without an "@<id>" prefix
        #[arg(long, default_value_t = 1)]
        user: i64,
    },

    /// List the built-in foods and workouts
    Catalog,

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    hydro_core::logging::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Catalog) => cmd_catalog(),
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_deref(), force),
        Some(Commands::Chat { user }) => {
            let config = load_config(cli.config.as_deref())?;
            cmd_chat(&config, cli.offline, UserId(user)).await
        }
        None => {
            // Default to "chat" command
            let config = load_config(cli.config.as_deref())?;
            cmd_chat(&config, cli.offline, UserId(1)).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    Ok(config)
}

fn build_assistant(config: &Config, offline: bool) -> Result<Assistant> {
    let errors = catalog::validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid built-in tables".into()));
    }

    let (weather, food): (Arc<dyn WeatherProvider>, Arc<dyn FoodProvider>) = if offline {
        tracing::info!("Offline mode: network lookups disabled");
        (Arc::new(DisabledWeather), Arc::new(DisabledFood))
    } else {
        if config.weather.api_key.is_none() {
            tracing::warn!(
                "No weather API key set ({}), fallback temperature will be used",
                config::WEATHER_API_KEY_ENV
            );
        }
        (
            Arc::new(OpenWeatherClient::new(&config.weather)?),
            Arc::new(OpenFoodFactsClient::new(&config.food)?),
        )
    };

    Ok(Assistant::new(
        SessionStore::new(),
        WeatherLookup::from_config(weather, &config.weather),
        FoodLookup::from_config(food, &config.food),
    ))
}

async fn cmd_chat(config: &Config, offline: bool, default_user: UserId) -> Result<()> {
    let assistant = build_assistant(config, offline)?;
    let interactive = io::stdin().is_terminal();

    if interactive {
        println!("Hydro chat. Type /start, Ctrl-D to quit.");
        println!("Prefix a line with @<id> to speak as another user.\n");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (user, text) = split_user(&line, default_user);
        if text.is_empty() {
            continue;
        }

        let reply = assistant.handle_message(user, text).await;
        display_reply(&reply);
    }

    tracing::info!(users = assistant.store().len().await, "Chat finished");
    Ok(())
}

/// Split an optional "@<id>" prefix off a transcript line
fn split_user(line: &str, default_user: UserId) -> (UserId, &str) {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('@') {
        let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if let Ok(id) = id.parse() {
            return (UserId(id), text.trim());
        }
    }
    (default_user, line)
}

fn display_reply(reply: &Reply) {
    for message in &reply.messages {
        println!("{}", message);
        println!();
    }

    if reply.menu {
        for row in MENU {
            let buttons = row
                .iter()
                .map(|label| format!("[ {} ]", label))
                .collect::<Vec<_>>()
                .join(" ");
            println!("  {}", buttons);
        }
        println!();
    }
}

fn cmd_catalog() -> Result<()> {
    println!("Foods (kcal per 100 g):");
    for entry in catalog::FOODS {
        println!("  {:<20} {:>6}", entry.key, entry.calories_per_100g);
    }

    println!();
    println!("Workouts (kcal per minute at 70 kg):");
    for (name, rate) in catalog::WORKOUTS {
        println!("  {:<20} {:>6}", name, rate);
    }
    println!(
        "  {:<20} {:>6}",
        "(other)",
        catalog::DEFAULT_KCAL_PER_MINUTE
    );

    Ok(())
}

fn cmd_init_config(custom_path: Option<&Path>, force: bool) -> Result<()> {
    let path = match custom_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        println!("Config already exists: {}", path.display());
        println!("  Use --force to overwrite.");
        return Ok(());
    }

    let config = Config::default();
    match custom_path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
