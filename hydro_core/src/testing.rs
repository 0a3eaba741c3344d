//! Mock providers for testing
//!
//! These mocks let the lookups and the dialog engine run without network
//! access. Each mock records the queries it received.

use crate::food::{FoodProvider, RemoteProduct};
use crate::weather::WeatherProvider;
use crate::LookupError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

type Queries = Arc<Mutex<Vec<String>>>;

enum WeatherBehavior {
    Temperature(f64),
    Fail(Mutex<Option<LookupError>>),
    Slow(f64, Duration),
}

/// Weather provider returning a canned temperature, an error, or a delay
pub struct MockWeather {
    behavior: WeatherBehavior,
    queries: Queries,
}

impl MockWeather {
    fn with(behavior: WeatherBehavior) -> Self {
        Self {
            behavior,
            queries: Arc::default(),
        }
    }

    pub fn temperature(temperature_c: f64) -> Self {
        Self::with(WeatherBehavior::Temperature(temperature_c))
    }

    /// Fails with `error` on the first call and with `Disabled` afterwards
    pub fn failing(error: LookupError) -> Self {
        Self::with(WeatherBehavior::Fail(Mutex::new(Some(error))))
    }

    /// Answers only after `delay`, long enough to trip a lookup timeout
    pub fn slow(temperature_c: f64, delay: Duration) -> Self {
        Self::with(WeatherBehavior::Slow(temperature_c, delay))
    }

    /// Shared handle to the cities queried so far
    pub fn queries(&self) -> Queries {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current_temperature(&self, city: &str) -> Result<f64, LookupError> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner).push(city.to_string());
        match &self.behavior {
            WeatherBehavior::Temperature(t) => Ok(*t),
            WeatherBehavior::Fail(error) => {
                let error = error.lock().unwrap_or_else(PoisonError::into_inner).take();
                Err(error.unwrap_or(LookupError::Disabled))
            }
            WeatherBehavior::Slow(t, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(*t)
            }
        }
    }
}

enum FoodBehavior {
    Product(RemoteProduct),
    Empty,
    Fail(Mutex<Option<LookupError>>),
    Slow(Duration),
}

/// Food provider returning a canned product, nothing, an error, or a delay
pub struct MockFood {
    behavior: FoodBehavior,
    queries: Queries,
}

impl MockFood {
    fn with(behavior: FoodBehavior) -> Self {
        Self {
            behavior,
            queries: Arc::default(),
        }
    }

    pub fn product(name: Option<&str>, calories_per_100g: Option<f64>) -> Self {
        Self::with(FoodBehavior::Product(RemoteProduct {
            name: name.map(str::to_string),
            calories_per_100g,
        }))
    }

    /// Search that never matches anything
    pub fn empty() -> Self {
        Self::with(FoodBehavior::Empty)
    }

    /// Fails with `error` on the first call and with `Disabled` afterwards
    pub fn failing(error: LookupError) -> Self {
        Self::with(FoodBehavior::Fail(Mutex::new(Some(error))))
    }

    pub fn slow(delay: Duration) -> Self {
        Self::with(FoodBehavior::Slow(delay))
    }

    /// Shared handle to the search terms seen so far
    pub fn queries(&self) -> Queries {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl FoodProvider for MockFood {
    async fn search(&self, term: &str) -> Result<Option<RemoteProduct>, LookupError> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner).push(term.to_string());
        match &self.behavior {
            FoodBehavior::Product(product) => Ok(Some(product.clone())),
            FoodBehavior::Empty => Ok(None),
            FoodBehavior::Fail(error) => {
                let error = error.lock().unwrap_or_else(PoisonError::into_inner).take();
                Err(error.unwrap_or(LookupError::Disabled))
            }
            FoodBehavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(None)
            }
        }
    }
}
