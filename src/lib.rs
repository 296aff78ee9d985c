pub mod api;
pub mod commands;
pub mod config;
pub mod food;
pub mod providers;

// Re-export commonly used items
pub use food::analyzer::FoodAnalyzer;
pub use food::types::NutritionData;
