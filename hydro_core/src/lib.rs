#![forbid(unsafe_code)]

//! Core domain model and conversation logic for the Hydro tracking assistant.
//!
//! This crate provides:
//! - Domain types (profile, session, dialog steps, replies)
//! - Goal formulas and the built-in food and workout tables
//! - Weather and food lookups with graceful fallback
//! - The per-user session store
//! - The conversation engine driving every flow

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod goals;
pub mod catalog;
pub mod weather;
pub mod food;
pub mod testing;
pub mod store;
pub mod command;
pub mod dialog;
pub mod progress;
pub mod messages;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, InputError, LookupError, Result};
pub use types::*;
pub use config::Config;
pub use store::SessionStore;
pub use weather::{DisabledWeather, OpenWeatherClient, WeatherLookup, WeatherProvider};
pub use food::{DisabledFood, FoodLookup, FoodProvider, OpenFoodFactsClient};
pub use command::{Command, Inbound, MENU};
pub use progress::ProgressReport;
pub use engine::Assistant;
