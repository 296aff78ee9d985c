use lazy_static::lazy_static;

use crate::food::types::{CarbMacro, FatMacro, MacroNutrient, Macros, Nutrient, NutritionData};

/// Calories per gram of protein (Atwater factor).
pub const PROTEIN_CALORIES_PER_GRAM: f64 = 4.0;

/// Calories per gram of carbohydrate (Atwater factor).
pub const CARB_CALORIES_PER_GRAM: f64 = 4.0;

/// Calories per gram of fat (Atwater factor).
pub const FAT_CALORIES_PER_GRAM: f64 = 9.0;

// Adult daily reference intakes, in mg.
pub const SODIUM_DAILY_REFERENCE_MG: f64 = 2300.0;
pub const POTASSIUM_DAILY_REFERENCE_MG: f64 = 4700.0;
pub const CHOLESTEROL_DAILY_REFERENCE_MG: f64 = 300.0;

// ─────────────────────────────────────────────────────────────────────────────
// Dietary label thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Protein grams above which a food is labeled "High Protein".
pub const HIGH_PROTEIN_GRAMS: f64 = 20.0;

/// Fiber grams above which a food is labeled "High Fiber".
pub const HIGH_FIBER_GRAMS: f64 = 5.0;

/// Saturated fat grams below which a food is labeled "Low Saturated Fat".
pub const LOW_SATURATED_FAT_GRAMS: f64 = 2.0;

/// Sodium mg below which a food is labeled "Low Sodium".
pub const LOW_SODIUM_MG: f64 = 140.0;

/// Sugar grams below which a food is labeled "Low Sugar".
pub const LOW_SUGAR_GRAMS: f64 = 5.0;

/// Cholesterol mg below which a food is labeled "Low Cholesterol".
pub const LOW_CHOLESTEROL_MG: f64 = 20.0;

/// Serving description used when a generated record leaves it out.
pub const DEFAULT_SERVING_SIZE: &str = "1 serving";

lazy_static! {
    /// Last-resort nutrition record returned when generation fails or its
    /// output cannot be parsed at all. `food_name` is filled in by the
    /// caller with the identified description.
    pub static ref FALLBACK_NUTRITION: NutritionData = NutritionData {
        food_name: String::new(),
        serving_size: DEFAULT_SERVING_SIZE.to_string(),
        calories: 200.0,
        macros: Macros {
            protein: MacroNutrient {
                grams: 10.0,
                calories: 40.0,
                percentage: 20,
            },
            carbs: CarbMacro {
                grams: 25.0,
                calories: 100.0,
                percentage: 50,
                fiber: 2.0,
                sugar: 5.0,
            },
            fat: FatMacro {
                grams: 7.0,
                calories: 60.0,
                percentage: 30,
                saturated: 2.0,
                unsaturated: 4.0,
                trans: 0.0,
            },
        },
        nutrients: vec![
            Nutrient {
                name: "Vitamin C".to_string(),
                amount: 10.0,
                unit: "mg".to_string(),
                daily_value: 15,
            },
            Nutrient {
                name: "Calcium".to_string(),
                amount: 50.0,
                unit: "mg".to_string(),
                daily_value: 5,
            },
            Nutrient {
                name: "Iron".to_string(),
                amount: 1.0,
                unit: "mg".to_string(),
                daily_value: 8,
            },
        ],
        dietary_info: vec![
            "Moderate Calories".to_string(),
            "Balanced Macronutrients".to_string(),
        ],
    };
}
