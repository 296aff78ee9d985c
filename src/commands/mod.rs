use anyhow::{Context, Result};
use colored::Colorize;

use crate::food::analyzer::FoodAnalyzer;
use crate::food::types::NutritionData;

/// One-shot CLI analysis: read an image file, run the pipeline, print
/// the nutrition facts.
pub async fn analyze_image_file(analyzer: &FoodAnalyzer, path: &str) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image file {}", path))?;
    let mime = mime_from_path(path);

    println!("{}", format!("Analyzing {}...", path).cyan());

    let data = analyzer.analyze(&bytes, mime).await?;
    print_nutrition(&data);
    Ok(())
}

fn mime_from_path(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

fn print_nutrition(data: &NutritionData) {
    println!("\n{}", data.food_name.bold().green());
    println!("Serving: {}", data.serving_size);
    println!("Calories: {}", format!("{:.0} kcal", data.calories).yellow());

    println!("\n{}", "Macronutrients:".bold());
    println!(
        "• Protein: {:.1} g ({}%)",
        data.macros.protein.grams, data.macros.protein.percentage
    );
    println!(
        "• Carbs:   {:.1} g ({}%), fiber {:.1} g, sugar {:.1} g",
        data.macros.carbs.grams,
        data.macros.carbs.percentage,
        data.macros.carbs.fiber,
        data.macros.carbs.sugar
    );
    println!(
        "• Fat:     {:.1} g ({}%), saturated {:.1} g, trans {:.1} g",
        data.macros.fat.grams,
        data.macros.fat.percentage,
        data.macros.fat.saturated,
        data.macros.fat.trans
    );

    if !data.nutrients.is_empty() {
        println!("\n{}", "Nutrients:".bold());
        for nutrient in &data.nutrients {
            println!(
                "• {}: {:.1} {} ({}% DV)",
                nutrient.name, nutrient.amount, nutrient.unit, nutrient.daily_value
            );
        }
    }

    if !data.dietary_info.is_empty() {
        println!("\n{}", data.dietary_info.join(" | ").green());
    }
}
