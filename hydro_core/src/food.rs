//! Food name resolution: built-in table, remote search, then suggestions.

use crate::catalog;
use crate::config::FoodConfig;
use crate::{FoodItem, FoodResolution, LookupError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// First product returned by a remote food search
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteProduct {
    pub name: Option<String>,
    pub calories_per_100g: Option<f64>,
}

/// Remote food facts search
#[async_trait]
pub trait FoodProvider: Send + Sync {
    /// Search for a term; `Ok(None)` when nothing matched
    async fn search(&self, term: &str) -> std::result::Result<Option<RemoteProduct>, LookupError>;
}

/// OpenFoodFacts search client
pub struct OpenFoodFactsClient {
    client: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
}

impl OpenFoodFactsClient {
    pub fn new(config: &FoodConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl FoodProvider for OpenFoodFactsClient {
    async fn search(&self, term: &str) -> std::result::Result<Option<RemoteProduct>, LookupError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("search_terms", term), ("json", "1"), ("page_size", "1")])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_first_product(&body)
    }
}

fn parse_first_product(body: &str) -> std::result::Result<Option<RemoteProduct>, LookupError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Payload(e.to_string()))?;

    Ok(response.products.into_iter().next().map(|p| RemoteProduct {
        name: p.product_name.filter(|name| !name.trim().is_empty()),
        calories_per_100g: p.nutriments.energy_kcal_100g,
    }))
}

/// Food provider that is never reachable (offline mode)
pub struct DisabledFood;

#[async_trait]
impl FoodProvider for DisabledFood {
    async fn search(&self, _term: &str) -> std::result::Result<Option<RemoteProduct>, LookupError> {
        Err(LookupError::Disabled)
    }
}

/// Food lookup that never fails
#[derive(Clone)]
pub struct FoodLookup {
    provider: Arc<dyn FoodProvider>,
    timeout: Duration,
}

impl FoodLookup {
    pub fn new(provider: Arc<dyn FoodProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(provider: Arc<dyn FoodProvider>, config: &FoodConfig) -> Self {
        Self::new(provider, config.timeout())
    }

    /// Resolve a free-text food name
    ///
    /// Resolution order: exact built-in match, first remote result with a
    /// positive kcal figure, then up to five similar built-in keys.
    pub async fn lookup(&self, query: &str) -> FoodResolution {
        if let Some(entry) = catalog::find_food(query) {
            tracing::debug!(query, "Food resolved from built-in table");
            return FoodResolution::Found(entry.to_item());
        }

        let term = query.trim();
        match self.search(term).await {
            Ok(Some(RemoteProduct {
                name,
                calories_per_100g: Some(calories),
            })) if calories > 0.0 => {
                tracing::debug!(query, calories, "Food resolved remotely");
                return FoodResolution::Found(FoodItem {
                    name: name.unwrap_or_else(|| term.to_string()),
                    calories_per_100g: calories,
                });
            }
            Ok(_) => tracing::debug!(query, "Remote search had no usable product"),
            Err(e) => tracing::warn!(query, error = %e, "Remote food search failed"),
        }

        FoodResolution::NotFound {
            similar: catalog::similar_foods(query),
        }
    }

    async fn search(&self, term: &str) -> std::result::Result<Option<RemoteProduct>, LookupError> {
        tokio::time::timeout(self.timeout, self.provider.search(term))
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFood;

    fn lookup_with(provider: MockFood) -> FoodLookup {
        FoodLookup::new(Arc::new(provider), Duration::from_millis(50))
    }

    #[test]
    fn test_parse_first_product() {
        let body = r#"{"count": 2, "products": [
            {"product_name": "Greek yogurt", "nutriments": {"energy-kcal_100g": 97}},
            {"product_name": "Other", "nutriments": {"energy-kcal_100g": 10}}
        ]}"#;
        let product = parse_first_product(body).unwrap().unwrap();
        assert_eq!(product.name.as_deref(), Some("Greek yogurt"));
        assert_eq!(product.calories_per_100g, Some(97.0));
    }

    #[test]
    fn test_parse_product_without_nutriments() {
        let body = r#"{"products": [{"product_name": ""}]}"#;
        let product = parse_first_product(body).unwrap().unwrap();
        assert_eq!(product.name, None);
        assert_eq!(product.calories_per_100g, None);

        assert_eq!(parse_first_product(r#"{"products": []}"#).unwrap(), None);
        assert!(parse_first_product("<html>").is_err());
    }

    #[tokio::test]
    async fn test_builtin_match_skips_network() {
        let provider = MockFood::failing(LookupError::Status(500));
        let queries = provider.queries();
        let lookup = lookup_with(provider);

        let result = lookup.lookup("банан").await;
        assert_eq!(
            result,
            FoodResolution::Found(FoodItem {
                name: "Банан".into(),
                calories_per_100g: 89.0
            })
        );
        assert!(queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_match() {
        let lookup = lookup_with(MockFood::product(Some("Пельмени"), Some(275.0)));
        let result = lookup.lookup("  пельмени ").await;
        assert_eq!(
            result,
            FoodResolution::Found(FoodItem {
                name: "Пельмени".into(),
                calories_per_100g: 275.0
            })
        );
    }

    #[tokio::test]
    async fn test_remote_match_without_name_uses_query() {
        let lookup = lookup_with(MockFood::product(None, Some(120.0)));
        match lookup.lookup("борщ").await {
            FoodResolution::Found(item) => assert_eq!(item.name, "борщ"),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remote_zero_calories_falls_through() {
        let lookup = lookup_with(MockFood::product(Some("Вода"), Some(0.0)));
        assert_eq!(
            lookup.lookup("вода").await,
            FoodResolution::NotFound { similar: vec![] }
        );
    }

    #[tokio::test]
    async fn test_failure_gives_suggestions() {
        let lookup = lookup_with(MockFood::failing(LookupError::Status(503)));
        assert_eq!(
            lookup.lookup("сыр плавленый").await,
            FoodResolution::NotFound {
                similar: vec!["сыр".into()]
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_without_suggestions() {
        let lookup = lookup_with(MockFood::empty());
        assert_eq!(
            lookup.lookup("xyĸqq").await,
            FoodResolution::NotFound { similar: vec![] }
        );
    }

    #[tokio::test]
    async fn test_timeout_treated_as_no_result() {
        let lookup = lookup_with(MockFood::slow(Duration::from_secs(5)));
        assert_eq!(
            lookup.lookup("бананчик").await,
            FoodResolution::NotFound {
                similar: vec!["банан".into()]
            }
        );
    }
}
