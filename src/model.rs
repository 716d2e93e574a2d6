use serde::{Deserialize, Serialize};

/// The declared type every canonical record carries.
pub const RECIPE_TYPE: &str = "Recipe";

/// Canonical recipe record, mirroring schema.org `Recipe`.
///
/// Every field defaults to its zero value; a field that could not be found on
/// the page is indistinguishable from one that is genuinely empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub image: String,
    #[serde(rename = "recipeYield")]
    pub recipe_yield: u16,
    /// ISO-8601 durations in `PT#H#M` form
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
    /// Dates keep the site's own format
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "dateCreated")]
    pub date_created: String,
    #[serde(rename = "dateModified")]
    pub date_modified: String,
    #[serde(rename = "recipeCategory")]
    pub category: String,
    #[serde(rename = "recipeCuisine")]
    pub cuisine: String,
    #[serde(rename = "cookingMethod")]
    pub cooking_method: String,
    /// Comma-joined, as schema.org encodes it
    pub keywords: String,
    #[serde(rename = "recipeIngredient")]
    pub ingredients: Vec<String>,
    #[serde(rename = "recipeInstructions")]
    pub instructions: Vec<HowToItem>,
    pub nutrition: Nutrition,
    #[serde(rename = "tool", skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<HowToItem>,
    pub video: Vec<Video>,
}

impl Recipe {
    /// An empty record declared as a recipe.
    pub fn new() -> Self {
        Self {
            kind: RECIPE_TYPE.to_string(),
            ..Default::default()
        }
    }

    /// True for the zero record.
    pub fn is_empty(&self) -> bool {
        *self == Recipe::default()
    }
}

/// A step-like entry: an instruction (`HowToStep`) or a tool (`HowToTool`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HowToItem {
    #[serde(rename = "@type")]
    pub kind: String,
    pub text: String,
}

impl HowToItem {
    pub fn step(text: impl Into<String>) -> Self {
        Self {
            kind: "HowToStep".to_string(),
            text: text.into(),
        }
    }

    pub fn tool(text: impl Into<String>) -> Self {
        Self {
            kind: "HowToTool".to_string(),
            text: text.into(),
        }
    }
}

/// Per-nutrient values as the page states them, units inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Nutrition {
    pub calories: String,
    pub carbohydrate_content: String,
    pub cholesterol_content: String,
    pub fat_content: String,
    pub fiber_content: String,
    pub protein_content: String,
    pub saturated_fat_content: String,
    pub serving_size: String,
    pub sodium_content: String,
    pub sugar_content: String,
    pub trans_fat_content: String,
    pub unsaturated_fat_content: String,
}

impl Nutrition {
    pub fn is_empty(&self) -> bool {
        *self == Nutrition::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    pub name: String,
    pub description: String,
    pub content_url: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub upload_date: String,
}
