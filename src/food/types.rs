use serde::{Deserialize, Serialize};

/// One of the three energy-yielding nutrient classes, with its share of
/// the food's reported calories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroNutrient {
    pub grams: f64,
    pub calories: f64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbMacro {
    pub grams: f64,
    pub calories: f64,
    pub percentage: u32,
    pub fiber: f64,
    pub sugar: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatMacro {
    pub grams: f64,
    pub calories: f64,
    pub percentage: u32,
    pub saturated: f64,
    pub unsaturated: f64,
    pub trans: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: MacroNutrient,
    pub carbs: CarbMacro,
    pub fat: FatMacro,
}

/// A micronutrient measurement with its percent of the recommended
/// daily intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub daily_value: u32,
}

/// Complete nutrition facts for one analyzed food. Always fully
/// populated; built once per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionData {
    pub food_name: String,
    pub serving_size: String,
    pub calories: f64,
    pub macros: Macros,
    pub nutrients: Vec<Nutrient>,
    pub dietary_info: Vec<String>,
}
