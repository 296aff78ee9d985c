use log::warn;
use serde_json::Value;

use crate::food::analysis::constants::{DEFAULT_SERVING_SIZE, FALLBACK_NUTRITION};
use crate::food::analysis::nutrition::parse_number;
use crate::food::types::{CarbMacro, FatMacro, MacroNutrient, Macros, Nutrient, NutritionData};
use crate::providers::traits::CompletionProvider;

/// Produce a plausible nutrition estimate for a food with no database
/// record. Never fails: a generation error or unparseable output degrades
/// to the deterministic fallback record.
pub async fn synthesize(
    provider: &(dyn CompletionProvider + Send + Sync),
    description: &str,
) -> NutritionData {
    let prompt = format!(
        "Generate realistic nutrition data for \"{}\" in JSON format. Include calories, \
         protein, carbs (with fiber and sugar), fat (with saturated, unsaturated, and trans), \
         vitamins, minerals, and dietary information. Use the fields food_name, serving_size, \
         calories, macros.protein, macros.carbs, macros.fat, nutrients (name, amount, unit, \
         daily_value) and dietary_info. Make it as accurate as possible based on typical \
         values for this food. Respond with JSON only.",
        description
    );

    match provider.complete(&prompt).await {
        Ok(response) => match parse_generated(&response) {
            Some(value) => repair(&value, description),
            None => {
                warn!(
                    "Generated nutrition for '{}' was not parseable, using fallback",
                    description
                );
                fallback(description)
            }
        },
        Err(e) => {
            warn!("Nutrition generation failed for '{}': {}", description, e);
            fallback(description)
        }
    }
}

// Models tend to wrap JSON answers in markdown fences; strip them before
// parsing.
fn parse_generated(response: &str) -> Option<Value> {
    let cleaned = response
        .trim()
        .trim_matches('`')
        .trim_start_matches("json")
        .trim_start_matches("JSON")
        .trim();
    serde_json::from_str(cleaned).ok()
}

/// Complete a generated record field-by-field against the full
/// [`NutritionData`] shape. Missing or wrongly-shaped scalars become 0,
/// list fields become empty, the food name falls back to the request
/// description and the serving size to [`DEFAULT_SERVING_SIZE`].
pub fn repair(value: &Value, description: &str) -> NutritionData {
    let macros = value.get("macros");
    let protein = macros.and_then(|m| m.get("protein"));
    let carbs = macros.and_then(|m| m.get("carbs"));
    let fat = macros.and_then(|m| m.get("fat"));

    NutritionData {
        food_name: value
            .get("food_name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(description)
            .to_string(),
        serving_size: value
            .get("serving_size")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVING_SIZE)
            .to_string(),
        calories: parse_number(value.get("calories")),
        macros: Macros {
            protein: MacroNutrient {
                grams: parse_number(protein.and_then(|p| p.get("grams"))),
                calories: parse_number(protein.and_then(|p| p.get("calories"))),
                percentage: parse_number(protein.and_then(|p| p.get("percentage"))).round() as u32,
            },
            carbs: CarbMacro {
                grams: parse_number(carbs.and_then(|c| c.get("grams"))),
                calories: parse_number(carbs.and_then(|c| c.get("calories"))),
                percentage: parse_number(carbs.and_then(|c| c.get("percentage"))).round() as u32,
                fiber: parse_number(carbs.and_then(|c| c.get("fiber"))),
                sugar: parse_number(carbs.and_then(|c| c.get("sugar"))),
            },
            fat: FatMacro {
                grams: parse_number(fat.and_then(|f| f.get("grams"))),
                calories: parse_number(fat.and_then(|f| f.get("calories"))),
                percentage: parse_number(fat.and_then(|f| f.get("percentage"))).round() as u32,
                saturated: parse_number(fat.and_then(|f| f.get("saturated"))),
                unsaturated: parse_number(fat.and_then(|f| f.get("unsaturated"))),
                trans: parse_number(fat.and_then(|f| f.get("trans"))),
            },
        },
        nutrients: repair_nutrients(value.get("nutrients")),
        dietary_info: repair_labels(value.get("dietary_info")),
    }
}

// Generated nutrient entries are kept only when they are objects; each
// field gets its own default so one bad entry cannot poison the record.
fn repair_nutrients(field: Option<&Value>) -> Vec<Nutrient> {
    match field {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                entry.as_object().map(|obj| Nutrient {
                    name: obj
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    amount: parse_number(obj.get("amount")),
                    unit: obj
                        .get("unit")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    daily_value: parse_number(obj.get("daily_value")).round() as u32,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn repair_labels(field: Option<&Value>) -> Vec<String> {
    match field {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// The deterministic last line of defense: the literal fallback record
/// with the identified description as the food name.
pub fn fallback(description: &str) -> NutritionData {
    let mut data = FALLBACK_NUTRITION.clone();
    data.food_name = description.to_string();
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use serde_json::json;

    #[test]
    fn test_repair_is_total_over_missing_fat_subtree() {
        let generated = json!({
            "food_name": "Apple",
            "calories": 95,
            "macros": {
                "protein": { "grams": 0.5, "calories": 2, "percentage": 2 },
                "carbs": { "grams": 25, "calories": 100, "percentage": 95, "fiber": 4.4, "sugar": 19 }
            }
        });

        let data = repair(&generated, "apple");

        assert_float_absolute_eq!(data.macros.fat.grams, 0.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.calories, 0.0, 1e-9);
        assert_eq!(data.macros.fat.percentage, 0);
        assert_float_absolute_eq!(data.macros.fat.saturated, 0.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.unsaturated, 0.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.trans, 0.0, 1e-9);
    }

    #[test]
    fn test_repair_defaults_name_and_serving() {
        let data = repair(&json!({}), "mystery stew");

        assert_eq!(data.food_name, "mystery stew");
        assert_eq!(data.serving_size, "1 serving");
        assert_float_absolute_eq!(data.calories, 0.0, 1e-9);
        assert!(data.nutrients.is_empty());
        assert!(data.dietary_info.is_empty());
    }

    #[test]
    fn test_repair_keeps_generated_name_when_present() {
        let generated = json!({
            "food_name": "Margherita Pizza",
            "serving_size": "1 slice",
            "calories": 285
        });

        let data = repair(&generated, "pizza");

        assert_eq!(data.food_name, "Margherita Pizza");
        assert_eq!(data.serving_size, "1 slice");
        assert_float_absolute_eq!(data.calories, 285.0, 1e-9);
    }

    #[test]
    fn test_repair_drops_non_object_nutrient_entries() {
        let generated = json!({
            "nutrients": [
                { "name": "Vitamin C", "amount": 8.4, "unit": "mg", "daily_value": 9 },
                "not an object",
                { "amount": "3" }
            ],
            "dietary_info": ["Low Sodium", 42]
        });

        let data = repair(&generated, "apple");

        assert_eq!(data.nutrients.len(), 2);
        assert_eq!(data.nutrients[0].name, "Vitamin C");
        assert_eq!(data.nutrients[0].daily_value, 9);
        assert_eq!(data.nutrients[1].name, "");
        assert_float_absolute_eq!(data.nutrients[1].amount, 3.0, 1e-9);
        assert_eq!(data.dietary_info, vec!["Low Sodium".to_string()]);
    }

    #[test]
    fn test_parse_generated_strips_markdown_fences() {
        let response = "```json\n{\"calories\": 120}\n```";

        let value = parse_generated(response).expect("fenced JSON should parse");
        assert_eq!(value.get("calories").and_then(Value::as_f64), Some(120.0));
    }

    #[test]
    fn test_parse_generated_rejects_prose() {
        assert!(parse_generated("I cannot provide nutrition data.").is_none());
    }

    #[test]
    fn test_fallback_matches_literal_record() {
        let data = fallback("mystery food");

        assert_eq!(data.food_name, "mystery food");
        assert_eq!(data.serving_size, "1 serving");
        assert_float_absolute_eq!(data.calories, 200.0, 1e-9);

        assert_float_absolute_eq!(data.macros.protein.grams, 10.0, 1e-9);
        assert_float_absolute_eq!(data.macros.protein.calories, 40.0, 1e-9);
        assert_eq!(data.macros.protein.percentage, 20);

        assert_float_absolute_eq!(data.macros.carbs.grams, 25.0, 1e-9);
        assert_float_absolute_eq!(data.macros.carbs.calories, 100.0, 1e-9);
        assert_eq!(data.macros.carbs.percentage, 50);
        assert_float_absolute_eq!(data.macros.carbs.fiber, 2.0, 1e-9);
        assert_float_absolute_eq!(data.macros.carbs.sugar, 5.0, 1e-9);

        assert_float_absolute_eq!(data.macros.fat.grams, 7.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.calories, 60.0, 1e-9);
        assert_eq!(data.macros.fat.percentage, 30);
        assert_float_absolute_eq!(data.macros.fat.saturated, 2.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.unsaturated, 4.0, 1e-9);
        assert_float_absolute_eq!(data.macros.fat.trans, 0.0, 1e-9);

        let names: Vec<&str> = data.nutrients.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Vitamin C", "Calcium", "Iron"]);
        assert_eq!(
            data.dietary_info,
            vec![
                "Moderate Calories".to_string(),
                "Balanced Macronutrients".to_string()
            ]
        );
    }
}
