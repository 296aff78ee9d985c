use serde_json::Value;

use crate::food::analysis::constants::{
    CARB_CALORIES_PER_GRAM, CHOLESTEROL_DAILY_REFERENCE_MG, FAT_CALORIES_PER_GRAM,
    HIGH_FIBER_GRAMS, HIGH_PROTEIN_GRAMS, LOW_CHOLESTEROL_MG, LOW_SATURATED_FAT_GRAMS,
    LOW_SODIUM_MG, LOW_SUGAR_GRAMS, POTASSIUM_DAILY_REFERENCE_MG, PROTEIN_CALORIES_PER_GRAM,
    SODIUM_DAILY_REFERENCE_MG,
};
use crate::food::types::{CarbMacro, FatMacro, MacroNutrient, Macros, Nutrient, NutritionData};

/// Convert a raw FatSecret food record into a complete [`NutritionData`].
///
/// Total for any syntactically well-formed record: every numeric field
/// defaults to 0 when absent or unparseable. When a food reports several
/// servings only the first is used; servings are never aggregated.
pub fn normalize(food: &Value) -> NutritionData {
    let null = Value::Null;
    let serving = first_serving(food).unwrap_or(&null);

    let total_calories = parse_number(serving.get("calories"));

    let protein_grams = parse_number(serving.get("protein"));
    let protein_calories = protein_grams * PROTEIN_CALORIES_PER_GRAM;
    let protein = MacroNutrient {
        grams: protein_grams,
        calories: protein_calories,
        percentage: calorie_share(protein_calories, total_calories),
    };

    let carb_grams = parse_number(serving.get("carbohydrate"));
    let carb_calories = carb_grams * CARB_CALORIES_PER_GRAM;
    let carbs = CarbMacro {
        grams: carb_grams,
        calories: carb_calories,
        percentage: calorie_share(carb_calories, total_calories),
        fiber: parse_number(serving.get("fiber")),
        sugar: parse_number(serving.get("sugar")),
    };

    let fat_grams = parse_number(serving.get("fat"));
    let fat_calories = fat_grams * FAT_CALORIES_PER_GRAM;
    let fat = FatMacro {
        grams: fat_grams,
        calories: fat_calories,
        percentage: calorie_share(fat_calories, total_calories),
        saturated: parse_number(serving.get("saturated_fat")),
        unsaturated: parse_number(serving.get("polyunsaturated_fat"))
            + parse_number(serving.get("monounsaturated_fat")),
        trans: parse_number(serving.get("trans_fat")),
    };

    let nutrients = extract_nutrients(serving);
    let dietary_info = dietary_labels(&protein, &carbs, &fat, serving);

    NutritionData {
        food_name: string_field(food.get("food_name")),
        serving_size: string_field(serving.get("serving_description")),
        calories: total_calories,
        macros: Macros { protein, carbs, fat },
        nutrients,
        dietary_info,
    }
}

// FatSecret wraps a single serving in an object and multiple servings in
// an array; the first entry wins either way.
fn first_serving(food: &Value) -> Option<&Value> {
    let serving = food.get("servings")?.get("serving")?;
    match serving {
        Value::Array(list) => list.first(),
        other => Some(other),
    }
}

/// Parse a numeric field that may arrive as a string ("12.5") or a JSON
/// number, defaulting to 0 when absent or unparseable.
pub(crate) fn parse_number(field: Option<&Value>) -> f64 {
    match field {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

// Share of the food's reported total calories, as a whole percent.
// Zero-calorie records yield 0 rather than dividing by zero.
fn calorie_share(macro_calories: f64, total_calories: f64) -> u32 {
    if total_calories <= 0.0 {
        return 0;
    }
    (macro_calories / total_calories * 100.0).round() as u32
}

fn reference_share(amount: f64, reference_mg: f64) -> u32 {
    (amount / reference_mg * 100.0).round() as u32
}

// A micronutrient field counts as present when it is a non-empty string
// or a non-zero number. FatSecret serves numbers as strings, so "0" still
// counts, matching the upstream reporting convention.
fn truthy_number(field: Option<&Value>) -> Option<f64> {
    match field {
        Some(Value::String(s)) if !s.is_empty() => Some(s.trim().parse().unwrap_or(0.0)),
        Some(Value::Number(n)) => {
            let amount = n.as_f64().unwrap_or(0.0);
            if amount != 0.0 {
                Some(amount)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn extract_nutrients(serving: &Value) -> Vec<Nutrient> {
    let mut nutrients = Vec::new();

    if let Some(amount) = truthy_number(serving.get("vitamin_a")) {
        nutrients.push(Nutrient {
            name: "Vitamin A".to_string(),
            amount,
            unit: "IU".to_string(),
            daily_value: parse_number(serving.get("vitamin_a_daily_percent")).round() as u32,
        });
    }

    if let Some(amount) = truthy_number(serving.get("vitamin_c")) {
        nutrients.push(Nutrient {
            name: "Vitamin C".to_string(),
            amount,
            unit: "mg".to_string(),
            daily_value: parse_number(serving.get("vitamin_c_daily_percent")).round() as u32,
        });
    }

    if let Some(amount) = truthy_number(serving.get("calcium")) {
        nutrients.push(Nutrient {
            name: "Calcium".to_string(),
            amount,
            unit: "mg".to_string(),
            daily_value: parse_number(serving.get("calcium_daily_percent")).round() as u32,
        });
    }

    if let Some(amount) = truthy_number(serving.get("iron")) {
        nutrients.push(Nutrient {
            name: "Iron".to_string(),
            amount,
            unit: "mg".to_string(),
            daily_value: parse_number(serving.get("iron_daily_percent")).round() as u32,
        });
    }

    if let Some(amount) = truthy_number(serving.get("sodium")) {
        nutrients.push(Nutrient {
            name: "Sodium".to_string(),
            amount,
            unit: "mg".to_string(),
            daily_value: reference_share(amount, SODIUM_DAILY_REFERENCE_MG),
        });
    }

    if let Some(amount) = truthy_number(serving.get("potassium")) {
        nutrients.push(Nutrient {
            name: "Potassium".to_string(),
            amount,
            unit: "mg".to_string(),
            daily_value: reference_share(amount, POTASSIUM_DAILY_REFERENCE_MG),
        });
    }

    if let Some(amount) = truthy_number(serving.get("cholesterol")) {
        nutrients.push(Nutrient {
            name: "Cholesterol".to_string(),
            amount,
            unit: "mg".to_string(),
            daily_value: reference_share(amount, CHOLESTEROL_DAILY_REFERENCE_MG),
        });
    }

    nutrients
}

fn dietary_labels(
    protein: &MacroNutrient,
    carbs: &CarbMacro,
    fat: &FatMacro,
    serving: &Value,
) -> Vec<String> {
    let mut labels = Vec::new();

    if protein.grams > HIGH_PROTEIN_GRAMS {
        labels.push("High Protein".to_string());
    }

    if carbs.fiber > HIGH_FIBER_GRAMS {
        labels.push("High Fiber".to_string());
    }

    if fat.saturated < LOW_SATURATED_FAT_GRAMS {
        labels.push("Low Saturated Fat".to_string());
    }

    if parse_number(serving.get("sodium")) < LOW_SODIUM_MG {
        labels.push("Low Sodium".to_string());
    }

    if carbs.sugar < LOW_SUGAR_GRAMS {
        labels.push("Low Sugar".to_string());
    }

    if parse_number(serving.get("cholesterol")) < LOW_CHOLESTEROL_MG {
        labels.push("Low Cholesterol".to_string());
    }

    labels
}

fn string_field(field: Option<&Value>) -> String {
    field
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use serde_json::json;

    fn record_with_serving(serving: Value) -> Value {
        json!({
            "food_name": "Grilled Chicken Breast",
            "servings": { "serving": serving }
        })
    }

    #[test]
    fn test_macro_calories_from_grams() {
        let food = record_with_serving(json!({
            "serving_description": "100 g",
            "calories": "400",
            "protein": "25",
            "carbohydrate": "30",
            "fat": "10"
        }));

        let data = normalize(&food);

        assert_float_absolute_eq!(data.macros.protein.calories, 100.0, 1e-9);
        assert_float_absolute_eq!(data.macros.carbs.calories, 120.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.calories, 90.0, 1e-9);
    }

    #[test]
    fn test_percentages_against_reported_total() {
        let food = record_with_serving(json!({
            "calories": "400",
            "protein": "25",
            "carbohydrate": "30",
            "fat": "10"
        }));

        let data = normalize(&food);

        // Shares of the reported 400 kcal, not of the derived macro sum.
        assert_eq!(data.macros.protein.percentage, 25);
        assert_eq!(data.macros.carbs.percentage, 30);
        assert_eq!(data.macros.fat.percentage, 23);
        assert_float_absolute_eq!(data.calories, 400.0, 1e-9);
    }

    #[test]
    fn test_zero_total_calories_yields_zero_percentages() {
        let food = record_with_serving(json!({
            "calories": "0",
            "protein": "10",
            "carbohydrate": "5",
            "fat": "2"
        }));

        let data = normalize(&food);

        assert_eq!(data.macros.protein.percentage, 0);
        assert_eq!(data.macros.carbs.percentage, 0);
        assert_eq!(data.macros.fat.percentage, 0);
    }

    #[test]
    fn test_first_serving_wins() {
        let food = json!({
            "food_name": "Oatmeal",
            "servings": {
                "serving": [
                    { "serving_description": "1 cup", "calories": "150", "protein": "5" },
                    { "serving_description": "100 g", "calories": "380", "protein": "13" }
                ]
            }
        });

        let data = normalize(&food);

        assert_eq!(data.serving_size, "1 cup");
        assert_float_absolute_eq!(data.calories, 150.0, 1e-9);
        assert_float_absolute_eq!(data.macros.protein.grams, 5.0, 1e-9);
    }

    #[test]
    fn test_single_serving_object() {
        let food = record_with_serving(json!({
            "serving_description": "1 slice",
            "calories": "80"
        }));

        let data = normalize(&food);

        assert_eq!(data.serving_size, "1 slice");
        assert_eq!(data.food_name, "Grilled Chicken Breast");
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let food = record_with_serving(json!({ "calories": "abc" }));

        let data = normalize(&food);

        assert_float_absolute_eq!(data.calories, 0.0, 1e-9);
        assert_float_absolute_eq!(data.macros.protein.grams, 0.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.unsaturated, 0.0, 1e-9);
    }

    #[test]
    fn test_unsaturated_sums_poly_and_mono() {
        let food = record_with_serving(json!({
            "calories": "200",
            "fat": "10",
            "polyunsaturated_fat": "2.5",
            "monounsaturated_fat": "4.5"
        }));

        let data = normalize(&food);

        assert_float_absolute_eq!(data.macros.fat.unsaturated, 7.0, 1e-9);
    }

    #[test]
    fn test_missing_sodium_omits_nutrient_entry() {
        let food = record_with_serving(json!({ "calories": "100" }));

        let data = normalize(&food);

        assert!(data.nutrients.iter().all(|n| n.name != "Sodium"));
    }

    #[test]
    fn test_sodium_daily_value_from_reference() {
        let food = record_with_serving(json!({
            "calories": "100",
            "sodium": "2300"
        }));

        let data = normalize(&food);

        let sodium = data
            .nutrients
            .iter()
            .find(|n| n.name == "Sodium")
            .expect("sodium entry");
        assert_float_absolute_eq!(sodium.amount, 2300.0, 1e-9);
        assert_eq!(sodium.unit, "mg");
        assert_eq!(sodium.daily_value, 100);
    }

    #[test]
    fn test_vitamins_use_source_daily_percent() {
        let food = record_with_serving(json!({
            "calories": "100",
            "vitamin_a": "500",
            "vitamin_a_daily_percent": "10",
            "vitamin_c": "60"
        }));

        let data = normalize(&food);

        let vitamin_a = data
            .nutrients
            .iter()
            .find(|n| n.name == "Vitamin A")
            .expect("vitamin A entry");
        assert_eq!(vitamin_a.unit, "IU");
        assert_eq!(vitamin_a.daily_value, 10);

        // Missing daily-percent field defaults to 0.
        let vitamin_c = data
            .nutrients
            .iter()
            .find(|n| n.name == "Vitamin C")
            .expect("vitamin C entry");
        assert_eq!(vitamin_c.daily_value, 0);
    }

    #[test]
    fn test_high_protein_label_independent_of_fiber() {
        let food = record_with_serving(json!({
            "calories": "300",
            "protein": "25",
            "fiber": "0",
            "saturated_fat": "5",
            "sugar": "10",
            "sodium": "500",
            "cholesterol": "80"
        }));

        let data = normalize(&food);

        assert!(data.dietary_info.contains(&"High Protein".to_string()));
        assert!(!data.dietary_info.contains(&"High Fiber".to_string()));
        assert!(!data.dietary_info.contains(&"Low Sodium".to_string()));
        assert!(!data.dietary_info.contains(&"Low Sugar".to_string()));
        assert!(!data.dietary_info.contains(&"Low Cholesterol".to_string()));
        assert!(!data.dietary_info.contains(&"Low Saturated Fat".to_string()));
    }

    #[test]
    fn test_absent_sodium_and_cholesterol_count_as_low() {
        // Defaulted 0 is below both "low" thresholds, same as upstream.
        let food = record_with_serving(json!({
            "calories": "100",
            "saturated_fat": "1"
        }));

        let data = normalize(&food);

        assert!(data.dietary_info.contains(&"Low Sodium".to_string()));
        assert!(data.dietary_info.contains(&"Low Cholesterol".to_string()));
        assert!(data.dietary_info.contains(&"Low Saturated Fat".to_string()));
        assert!(data.dietary_info.contains(&"Low Sugar".to_string()));
    }

    #[test]
    fn test_empty_record_is_still_complete() {
        let data = normalize(&json!({}));

        assert_eq!(data.food_name, "");
        assert_eq!(data.serving_size, "");
        assert_float_absolute_eq!(data.calories, 0.0, 1e-9);
        assert!(data.nutrients.is_empty());
    }
}
