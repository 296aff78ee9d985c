pub mod fatsecret;

// Re-export common types
pub use fatsecret::{FatSecretClient, FoodMatch, LookupError, NutritionSource};
