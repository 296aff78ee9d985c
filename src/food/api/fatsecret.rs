use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::food::config::FoodConfig;

/// Failure modes of the nutrition lookup. Every one of them routes the
/// caller to synthesis rather than aborting the request.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("nutrition API authentication failed: {0}")]
    Auth(String),
    #[error("nutrition API request failed: {0}")]
    Request(String),
    #[error("no matching food found")]
    NotFound,
    #[error("nutrition API returned a malformed response: {0}")]
    Malformed(String),
}

/// A candidate food from a text search, to be fetched in detail.
#[derive(Debug, Clone)]
pub struct FoodMatch {
    pub id: String,
    pub name: String,
}

/// External nutrition database: credential exchange, search by text,
/// detail fetch by id.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    async fn authenticate(&self) -> Result<String, LookupError>;

    async fn search_foods(&self, token: &str, query: &str)
        -> Result<Vec<FoodMatch>, LookupError>;

    async fn food_detail(&self, token: &str, food_id: &str) -> Result<Value, LookupError>;
}

#[derive(Debug)]
pub struct FatSecretClient {
    client_id: String,
    client_secret: String,
    token_url: String,
    api_url: String,
    client: Client,
}

impl FatSecretClient {
    pub fn new(config: FoodConfig) -> Self {
        Self {
            client_id: config.fatsecret_client_id,
            client_secret: config.fatsecret_client_secret,
            token_url: "https://oauth.fatsecret.com/connect/token".to_string(),
            api_url: "https://platform.fatsecret.com/rest/server.api".to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl NutritionSource for FatSecretClient {
    async fn authenticate(&self) -> Result<String, LookupError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "basic")])
            .send()
            .await
            .map_err(|e| LookupError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Auth(format!("status {}: {}", status, body)));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        data.get("access_token")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| LookupError::Malformed("token response missing access_token".to_string()))
    }

    async fn search_foods(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<FoodMatch>, LookupError> {
        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(token)
            .query(&[
                ("method", "foods.search"),
                ("search_expression", query),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Request(format!(
                "search failed with status {}",
                response.status()
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        // FatSecret returns a bare object instead of an array when the
        // search has a single hit.
        let matches = match data.get("foods").and_then(|f| f.get("food")) {
            Some(Value::Array(foods)) => foods.iter().filter_map(food_match).collect(),
            Some(food) => food_match(food).into_iter().collect(),
            None => Vec::new(),
        };

        debug!("Found {} candidate foods for '{}'", matches.len(), query);
        Ok(matches)
    }

    async fn food_detail(&self, token: &str, food_id: &str) -> Result<Value, LookupError> {
        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(token)
            .query(&[
                ("method", "food.get.v2"),
                ("food_id", food_id),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Request(format!(
                "detail fetch failed with status {}",
                response.status()
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        data.get("food")
            .cloned()
            .ok_or_else(|| LookupError::Malformed("detail response missing food".to_string()))
    }
}

fn food_match(food: &Value) -> Option<FoodMatch> {
    let id = match food.get("food_id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    Some(FoodMatch {
        id,
        name: food
            .get("food_name")
            .and_then(|n| n.as_str())
            .unwrap_or_default()
            .to_string(),
    })
}
