//! Ambient temperature lookup with fallback.
//!
//! `WeatherProvider` is the seam to the remote service; `WeatherLookup`
//! wraps a provider with a hard timeout and turns every failure into the
//! configured fallback temperature.

use crate::config::WeatherConfig;
use crate::{LookupError, Result, WeatherReading};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Source of current temperatures
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current temperature in °C for a city
    async fn current_temperature(&self, city: &str) -> std::result::Result<f64, LookupError>;
}

/// OpenWeatherMap "current weather" client
pub struct OpenWeatherClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> std::result::Result<f64, LookupError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LookupError::MissingCredential("weather API key"))?;

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", "ru"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_temperature(&body)
    }
}

/// Extract `main.temp` from an OpenWeatherMap payload
fn parse_temperature(body: &str) -> std::result::Result<f64, LookupError> {
    let weather: CurrentWeather =
        serde_json::from_str(body).map_err(|e| LookupError::Payload(e.to_string()))?;
    if !weather.main.temp.is_finite() {
        return Err(LookupError::Payload("temperature is not finite".into()));
    }
    Ok(weather.main.temp)
}

/// Weather provider that is never reachable (offline mode)
pub struct DisabledWeather;

#[async_trait]
impl WeatherProvider for DisabledWeather {
    async fn current_temperature(&self, _city: &str) -> std::result::Result<f64, LookupError> {
        Err(LookupError::Disabled)
    }
}

/// Temperature lookup that never fails
#[derive(Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
    timeout: Duration,
    fallback_c: f64,
}

impl WeatherLookup {
    pub fn new(provider: Arc<dyn WeatherProvider>, timeout: Duration, fallback_c: f64) -> Self {
        Self {
            provider,
            timeout,
            fallback_c,
        }
    }

    /// Build a lookup from configuration with the given provider
    pub fn from_config(provider: Arc<dyn WeatherProvider>, config: &WeatherConfig) -> Self {
        Self::new(provider, config.timeout(), config.fallback_temperature_c)
    }

    /// Query the provider once; any failure yields the fallback reading
    pub async fn lookup(&self, city: &str) -> WeatherReading {
        match self.query(city).await {
            Ok(temperature_c) => {
                tracing::debug!(city, temperature_c, "Weather lookup succeeded");
                WeatherReading {
                    success: true,
                    temperature_c,
                }
            }
            Err(e) => {
                tracing::warn!(
                    city,
                    error = %e,
                    fallback = self.fallback_c,
                    "Weather lookup failed, using fallback temperature"
                );
                WeatherReading {
                    success: false,
                    temperature_c: self.fallback_c,
                }
            }
        }
    }

    async fn query(&self, city: &str) -> std::result::Result<f64, LookupError> {
        tokio::time::timeout(self.timeout, self.provider.current_temperature(city))
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))?
    }
}
