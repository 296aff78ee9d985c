use log::{info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::food::analysis::nutrition::normalize;
use crate::food::analysis::synthesis::synthesize;
use crate::food::api::fatsecret::{LookupError, NutritionSource};
use crate::food::types::NutritionData;
use crate::providers::traits::CompletionProvider;

const FOOD_IDENTIFICATION_PROMPT: &str =
    "Identify the food in this image. Be specific and concise. Just name the food item(s).";

/// The only failures that escape [`FoodAnalyzer::analyze`]. Everything
/// downstream of identification degrades internally instead.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("no image provided")]
    EmptyImage,
    #[error("food identification failed: {0}")]
    Identification(String),
}

/// Sequences the analysis pipeline: identify the food from the image,
/// look it up in the nutrition database, and normalize the record, or
/// synthesize an estimate when the lookup yields nothing usable.
pub struct FoodAnalyzer {
    provider: Box<dyn CompletionProvider + Send + Sync>,
    source: Box<dyn NutritionSource + Send + Sync>,
}

impl FoodAnalyzer {
    pub fn new(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        source: Box<dyn NutritionSource + Send + Sync>,
    ) -> Self {
        Self { provider, source }
    }

    /// Run the full pipeline for one image. Auth failures, empty search
    /// results and detail-fetch failures all route to synthesis with the
    /// originally identified description; the caller only ever sees a
    /// complete record, a missing-image error, or an identification
    /// error.
    pub async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<NutritionData, AnalyzeError> {
        if image.is_empty() {
            return Err(AnalyzeError::EmptyImage);
        }

        let description = self
            .provider
            .describe_image(FOOD_IDENTIFICATION_PROMPT, image, mime_type)
            .await
            .map_err(|e| AnalyzeError::Identification(e.to_string()))?;
        let description = description.trim().to_string();
        info!("Identified food: {}", description);

        match self.lookup(&description).await {
            Ok(record) => Ok(normalize(&record)),
            Err(e) => {
                warn!(
                    "Nutrition lookup failed ({}), generating estimate for '{}'",
                    e, description
                );
                Ok(synthesize(self.provider.as_ref(), &description).await)
            }
        }
    }

    // Three sequential round trips; any failure surfaces as a
    // LookupError and sends the caller down the synthesis path.
    async fn lookup(&self, description: &str) -> Result<Value, LookupError> {
        let token = self.source.authenticate().await?;
        let matches = self.source.search_foods(&token, description).await?;
        let first = matches.first().ok_or(LookupError::NotFound)?;
        self.source.food_detail(&token, &first.id).await
    }
}
