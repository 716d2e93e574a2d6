use log::debug;
use scraper::ElementRef;

use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::fields::{field, value};
use crate::model::{HowToItem, Nutrition, Recipe, Video};
use crate::normalize::{clean_list, duration_from_text, join_keywords};
use crate::query::{
    attr, find_all, first_integer, item_prop, item_prop_all, item_prop_node, item_prop_nodes, text,
};

/// First `itemscope` element typed as a schema.org (or data-vocabulary)
/// Recipe.
pub fn find_recipe_container(doc: &Document) -> Option<ElementRef<'_>> {
    find_all(doc.root(), |el| el.value().attr("itemscope").is_some())
        .into_iter()
        .find(|el| {
            el.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe") || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
}

/// Extracts a recipe annotated with microdata `itemprop` attributes.
///
/// Lookups are scoped to the Recipe container: page-wide `itemprop="name"`
/// matches tend to be the site title, and nested items such as the author
/// carry their own `name`.
pub async fn from_microdata(doc: &Document) -> Result<Recipe> {
    let container = find_recipe_container(doc).ok_or(ScrapeError::NoRecipe)?;
    debug!("Found microdata Recipe container <{}>", container.value().name());

    let (
        name,
        description,
        url,
        image,
        recipe_yield,
        prep_time,
        cook_time,
        total_time,
        date_published,
        date_created,
        date_modified,
        category,
        cuisine,
        cooking_method,
        keywords,
        ingredients,
        instructions,
        nutrition,
        tools,
        video,
    ) = tokio::join!(
        value("name", || item_prop(container, "name")),
        value("description", || item_prop(container, "description")),
        value("url", || link_prop(container, "url")),
        value("image", || link_prop(container, "image")),
        field("yield", || {
            u16::try_from(first_integer(&item_prop(container, "recipeYield"))?).ok()
        }),
        value("prepTime", || time_prop(container, "prepTime")),
        value("cookTime", || time_prop(container, "cookTime")),
        value("totalTime", || time_prop(container, "totalTime")),
        value("datePublished", || date_prop(container, "datePublished")),
        value("dateCreated", || date_prop(container, "dateCreated")),
        value("dateModified", || date_prop(container, "dateModified")),
        value("recipeCategory", || item_prop(container, "recipeCategory")),
        value("recipeCuisine", || item_prop(container, "recipeCuisine")),
        value("cookingMethod", || item_prop(container, "cookingMethod")),
        value("keywords", || join_keywords(item_prop_all(container, "keywords"))),
        value("ingredients", || {
            let ingredients = item_prop_all(container, "recipeIngredient");
            if ingredients.is_empty() {
                item_prop_all(container, "ingredients")
            } else {
                ingredients
            }
        }),
        value("instructions", || instruction_steps(container)),
        field("nutrition", || nutrition(container)),
        value("tools", || {
            item_prop_all(container, "tool")
                .into_iter()
                .map(HowToItem::tool)
                .collect::<Vec<_>>()
        }),
        field("video", || video(container)),
    );

    Ok(Recipe {
        name,
        description,
        url,
        image,
        recipe_yield,
        prep_time,
        cook_time,
        total_time,
        date_published,
        date_created,
        date_modified,
        category,
        cuisine,
        cooking_method,
        keywords,
        ingredients,
        instructions,
        nutrition,
        tools,
        video,
        ..Recipe::new()
    })
}

/// `src`/`href`/`content` of a link-like property, or its text.
fn link_prop(root: ElementRef<'_>, prop: &str) -> String {
    let node = item_prop_node(root, prop);
    ["src", "href", "content"]
        .iter()
        .map(|name| attr(node, name))
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| text(node))
}

fn time_prop(root: ElementRef<'_>, prop: &str) -> String {
    let datetime = attr(item_prop_node(root, prop), "datetime");
    if datetime.is_empty() {
        duration_from_text(&item_prop(root, prop))
    } else {
        duration_from_text(&datetime)
    }
}

fn date_prop(root: ElementRef<'_>, prop: &str) -> String {
    let datetime = attr(item_prop_node(root, prop), "datetime");
    if datetime.is_empty() {
        item_prop(root, prop)
    } else {
        datetime
    }
}

/// One step per `recipeInstructions` node, or per list item when a single
/// node wraps the whole list.
fn instruction_steps(root: ElementRef<'_>) -> Vec<HowToItem> {
    let mut nodes = item_prop_nodes(root, "recipeInstructions");
    if nodes.is_empty() {
        nodes = item_prop_nodes(root, "instructions");
    }
    let texts = nodes.into_iter().flat_map(|node| {
        let items = find_all(node, |el| el.value().name() == "li");
        if items.is_empty() {
            vec![text(Some(node))]
        } else {
            items.into_iter().map(|li| text(Some(li))).collect()
        }
    });
    clean_list(texts).into_iter().map(HowToItem::step).collect()
}

fn nutrition(root: ElementRef<'_>) -> Option<Nutrition> {
    let scope = item_prop_node(root, "nutrition")?;
    Some(Nutrition {
        calories: item_prop(scope, "calories"),
        carbohydrate_content: item_prop(scope, "carbohydrateContent"),
        cholesterol_content: item_prop(scope, "cholesterolContent"),
        fat_content: item_prop(scope, "fatContent"),
        fiber_content: item_prop(scope, "fiberContent"),
        protein_content: item_prop(scope, "proteinContent"),
        saturated_fat_content: item_prop(scope, "saturatedFatContent"),
        serving_size: item_prop(scope, "servingSize"),
        sodium_content: item_prop(scope, "sodiumContent"),
        sugar_content: item_prop(scope, "sugarContent"),
        trans_fat_content: item_prop(scope, "transFatContent"),
        unsaturated_fat_content: item_prop(scope, "unsaturatedFatContent"),
    })
}

fn video(root: ElementRef<'_>) -> Option<Video> {
    let scope = item_prop_node(root, "video")?;
    Some(Video {
        name: item_prop(scope, "name"),
        description: item_prop(scope, "description"),
        content_url: link_prop(scope, "contentUrl"),
        embed_url: link_prop(scope, "embedUrl"),
        thumbnail_url: link_prop(scope, "thumbnailUrl"),
        duration: time_prop(scope, "duration"),
        upload_date: date_prop(scope, "uploadDate"),
    })
}
