use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::model::{HowToItem, Nutrition, Recipe, Video, RECIPE_TYPE};
use crate::normalize::{canonical_duration, clean_list, clean_text, join_keywords};
use crate::query::first_integer;

/// Decodes one JSON-LD object that must declare the `Recipe` type.
pub fn from_single(payload: &str) -> Result<Recipe> {
    let value: Value = serde_json::from_str(payload)?;
    from_value(&value)
}

/// Converts an already decoded JSON-LD entity.
pub fn from_value(value: &Value) -> Result<Recipe> {
    if !is_recipe_type(value) {
        return Err(ScrapeError::NotARecipe(declared_type(value)));
    }
    let raw: JsonLdRecipe = serde_json::from_value(value.clone())?;
    Ok(raw.into_recipe())
}

/// Scans a JSON array of entities for the first `Recipe`. Finding none is not
/// an error: the zero record comes back.
pub fn from_array(payload: &str) -> Result<Recipe> {
    let items: Vec<Value> = serde_json::from_str(payload)?;
    match items.iter().find(|item| is_recipe_type(item)) {
        Some(recipe) => from_value(recipe),
        None => {
            debug!("JSON-LD array of {} entities holds no Recipe", items.len());
            Ok(Recipe::default())
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphEnvelope {
    #[serde(rename = "@context", default)]
    _context: Value,
    #[serde(rename = "@graph")]
    graph: Vec<Value>,
}

/// Scans a `{"@context", "@graph": [...]}` envelope for the first `Recipe`.
pub fn from_graph(payload: &str) -> Result<Recipe> {
    let envelope: GraphEnvelope = serde_json::from_str(payload)?;
    let recipe = envelope
        .graph
        .iter()
        .find(|item| is_recipe_type(item))
        .ok_or(ScrapeError::NoRecipe)?;
    from_value(recipe)
}

/// Tries every JSON-LD block on the page as a single object and keeps the
/// first one that decodes and declares `Recipe`. Blocks that fail are
/// skipped; they are usually unrelated structured data.
pub fn from_scattered(doc: &Document) -> Result<Recipe> {
    for (index, block) in doc.json_ld_blocks().iter().enumerate() {
        let flattened = strip_newlines(block);
        match from_single(&flattened) {
            Ok(recipe) => {
                debug!("JSON-LD block {index} holds the recipe");
                return Ok(recipe);
            }
            Err(e) => debug!("Skipping JSON-LD block {index}: {e}"),
        }
    }
    Err(ScrapeError::NoRecipe)
}

/// Raw newlines inside string literals are the usual reason templated pages
/// emit undecodable JSON-LD.
fn strip_newlines(block: &str) -> String {
    block.replace(['\n', '\r'], " ")
}

/// `@type` is exactly `Recipe`, or a list naming it. Near misses such as
/// `recipe` are rejected rather than coerced.
pub(crate) fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == RECIPE_TYPE,
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind == RECIPE_TYPE),
        _ => false,
    }
}

fn declared_type(value: &Value) -> String {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Decodes a field's value, falling back to the default when the page uses a
/// shape we don't understand. One odd field never fails the whole record.
#[derive(Debug, Default)]
struct Lenient<T>(T);

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: DeserializeOwned + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match T::deserialize(value) {
            Ok(v) => Ok(Lenient(v)),
            Err(e) => {
                debug!("Ignoring JSON-LD value of unexpected shape: {e}");
                Ok(Lenient(T::default()))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonLdRecipe {
    name: Lenient<Text>,
    description: Lenient<Text>,
    url: Lenient<Text>,
    image: Lenient<ImageType>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Lenient<RecipeYield>,
    #[serde(rename = "prepTime")]
    prep_time: Lenient<Text>,
    #[serde(rename = "cookTime")]
    cook_time: Lenient<Text>,
    #[serde(rename = "totalTime")]
    total_time: Lenient<Text>,
    #[serde(rename = "datePublished")]
    date_published: Lenient<Text>,
    #[serde(rename = "dateCreated")]
    date_created: Lenient<Text>,
    #[serde(rename = "dateModified")]
    date_modified: Lenient<Text>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Lenient<OneOrMany>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Lenient<OneOrMany>,
    #[serde(rename = "cookingMethod")]
    cooking_method: Lenient<OneOrMany>,
    keywords: Lenient<OneOrMany>,
    #[serde(rename = "recipeIngredient", alias = "ingredients")]
    recipe_ingredient: Lenient<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Lenient<RecipeInstructions>,
    nutrition: Lenient<NutritionObject>,
    tool: Lenient<RecipeInstructions>,
    video: Lenient<Videos>,
}

impl JsonLdRecipe {
    fn into_recipe(self) -> Recipe {
        Recipe {
            name: self.name.0.into_string(),
            description: self.description.0.into_string(),
            url: self.url.0.into_string(),
            image: self.image.0.first_url(),
            recipe_yield: self.recipe_yield.0.servings(),
            prep_time: canonical_duration(&self.prep_time.0.into_string()),
            cook_time: canonical_duration(&self.cook_time.0.into_string()),
            total_time: canonical_duration(&self.total_time.0.into_string()),
            date_published: self.date_published.0.into_string(),
            date_created: self.date_created.0.into_string(),
            date_modified: self.date_modified.0.into_string(),
            category: self.recipe_category.0.first(),
            cuisine: self.recipe_cuisine.0.first(),
            cooking_method: self.cooking_method.0.first(),
            keywords: join_keywords(self.keywords.0.into_vec()),
            ingredients: self.recipe_ingredient.0.into_list(),
            instructions: self
                .recipe_instructions
                .0
                .into_texts()
                .into_iter()
                .map(HowToItem::step)
                .collect(),
            nutrition: self.nutrition.0.into_nutrition(),
            tools: self
                .tool
                .0
                .into_texts()
                .into_iter()
                .map(HowToItem::tool)
                .collect(),
            video: self.video.0.into_videos(),
            ..Recipe::new()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum Text {
    #[default]
    Missing,
    String(String),
    Number(serde_json::Number),
    Object(TextObject),
    Multiple(Vec<Text>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextObject {
    text: Option<String>,
    name: Option<String>,
    #[serde(rename = "@value")]
    value: Option<String>,
}

impl Text {
    fn into_string(self) -> String {
        match self {
            Text::Missing => String::new(),
            Text::String(s) => clean_text(&s),
            Text::Number(n) => n.to_string(),
            Text::Object(o) => clean_text(&o.text.or(o.name).or(o.value).unwrap_or_default()),
            Text::Multiple(items) => items
                .into_iter()
                .map(Text::into_string)
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::None => Vec::new(),
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }

    fn first(self) -> String {
        clean_list(self.into_vec()).into_iter().next().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    #[serde(alias = "contentUrl")]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ImageType {
    #[default]
    None,
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

impl ImageType {
    fn first_url(self) -> String {
        let url = match self {
            ImageType::None => None,
            ImageType::String(s) => Some(s),
            ImageType::Object(o) => Some(o.url),
            ImageType::MultipleStrings(v) => v.into_iter().next(),
            ImageType::MultipleObjects(v) => v.into_iter().next().map(|o| o.url),
        };
        url.map(|u| clean_text(&u)).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    #[default]
    None,
    Number(f64),
    String(String),
    Array(Vec<RecipeYield>),
}

impl RecipeYield {
    fn servings(self) -> u16 {
        self.count()
            .and_then(|n| u16::try_from(n).ok())
            .unwrap_or_default()
    }

    fn count(self) -> Option<i64> {
        match self {
            RecipeYield::None => None,
            RecipeYield::Number(n) if n >= 0.0 => Some(n.round() as i64),
            RecipeYield::Number(_) => None,
            RecipeYield::String(s) => first_integer(&s),
            RecipeYield::Array(items) => items.into_iter().find_map(RecipeYield::count),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    #[default]
    None,
    String(String),
    Strings(Vec<String>),
    Objects(Vec<IngredientObject>),
}

impl RecipeIngredients {
    fn into_list(self) -> Vec<String> {
        match self {
            RecipeIngredients::None => Vec::new(),
            RecipeIngredients::String(s) => clean_list([s]),
            RecipeIngredients::Strings(v) => clean_list(v),
            RecipeIngredients::Objects(v) => clean_list(v.into_iter().map(|ing| {
                match ing.amount.as_deref().map(str::trim) {
                    Some(amount) if !amount.is_empty() => format!("{amount} {}", ing.name),
                    _ => ing.name,
                }
            })),
        }
    }
}

/// A step, a tool, or a `HowToSection` holding more of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HowToEntry {
    Text(String),
    Object(HowToObject),
    Nested(Vec<HowToEntry>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HowToObject {
    text: Option<String>,
    name: Option<String>,
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToEntry>,
}

impl HowToEntry {
    fn collect_texts(self, out: &mut Vec<String>) {
        match self {
            HowToEntry::Text(s) => out.push(s),
            HowToEntry::Object(o) if !o.item_list_element.is_empty() => {
                for entry in o.item_list_element {
                    entry.collect_texts(out);
                }
            }
            // Prefer text over name
            HowToEntry::Object(o) => {
                if let Some(text) = o.text.or(o.name) {
                    out.push(text);
                }
            }
            HowToEntry::Nested(entries) => {
                for entry in entries {
                    entry.collect_texts(out);
                }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    #[default]
    None,
    One(HowToEntry),
    Many(Vec<HowToEntry>),
}

impl RecipeInstructions {
    fn into_texts(self) -> Vec<String> {
        let mut texts = Vec::new();
        match self {
            RecipeInstructions::None => {}
            RecipeInstructions::One(entry) => entry.collect_texts(&mut texts),
            RecipeInstructions::Many(entries) => {
                for entry in entries {
                    entry.collect_texts(&mut texts);
                }
            }
        }
        clean_list(texts)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NutritionObject {
    calories: Lenient<Text>,
    carbohydrate_content: Lenient<Text>,
    cholesterol_content: Lenient<Text>,
    fat_content: Lenient<Text>,
    fiber_content: Lenient<Text>,
    protein_content: Lenient<Text>,
    saturated_fat_content: Lenient<Text>,
    serving_size: Lenient<Text>,
    sodium_content: Lenient<Text>,
    sugar_content: Lenient<Text>,
    trans_fat_content: Lenient<Text>,
    unsaturated_fat_content: Lenient<Text>,
}

impl NutritionObject {
    fn into_nutrition(self) -> Nutrition {
        Nutrition {
            calories: self.calories.0.into_string(),
            carbohydrate_content: self.carbohydrate_content.0.into_string(),
            cholesterol_content: self.cholesterol_content.0.into_string(),
            fat_content: self.fat_content.0.into_string(),
            fiber_content: self.fiber_content.0.into_string(),
            protein_content: self.protein_content.0.into_string(),
            saturated_fat_content: self.saturated_fat_content.0.into_string(),
            serving_size: self.serving_size.0.into_string(),
            sodium_content: self.sodium_content.0.into_string(),
            sugar_content: self.sugar_content.0.into_string(),
            trans_fat_content: self.trans_fat_content.0.into_string(),
            unsaturated_fat_content: self.unsaturated_fat_content.0.into_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VideoObject {
    name: Lenient<Text>,
    description: Lenient<Text>,
    content_url: Lenient<Text>,
    embed_url: Lenient<Text>,
    thumbnail_url: Lenient<ImageType>,
    duration: Lenient<Text>,
    upload_date: Lenient<Text>,
}

impl VideoObject {
    fn into_video(self) -> Video {
        Video {
            name: self.name.0.into_string(),
            description: self.description.0.into_string(),
            content_url: self.content_url.0.into_string(),
            embed_url: self.embed_url.0.into_string(),
            thumbnail_url: self.thumbnail_url.0.first_url(),
            duration: canonical_duration(&self.duration.0.into_string()),
            upload_date: self.upload_date.0.into_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum Videos {
    #[default]
    None,
    One(VideoObject),
    Many(Vec<VideoObject>),
}

impl Videos {
    fn into_videos(self) -> Vec<Video> {
        let objects = match self {
            Videos::None => Vec::new(),
            Videos::One(v) => vec![v],
            Videos::Many(v) => v,
        };
        objects
            .into_iter()
            .map(VideoObject::into_video)
            .filter(|v| *v != Video::default())
            .collect()
    }
}
