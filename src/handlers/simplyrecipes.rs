use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;
use crate::fields::{field, value};
use crate::model::{HowToItem, Recipe};
use crate::normalize::{clean_list, duration_from_text};
use crate::query::{attr, find_all, find_first, first_integer, has_class, text};
use crate::registry::Handler;

/// simplyrecipes.com: no usable structured data, so every field comes from
/// the page's own class names.
pub struct SimplyRecipes;

#[async_trait(?Send)]
impl Handler for SimplyRecipes {
    async fn scrape(&self, doc: &Document) -> Result<Recipe> {
        let root = doc.root();

        let (
            name,
            description,
            image,
            recipe_yield,
            prep_time,
            cook_time,
            total_time,
            date_modified,
            category,
            ingredients,
            instructions,
        ) = tokio::join!(
            value("name", || text(find_first(root, "class", "heading__title"))),
            value("description", || text(find_first(root, "class", "heading__subtitle"))),
            value("image", || {
                let hero = attr(find_first(root, "class", "primary-image__image"), "src");
                if hero.is_empty() {
                    doc.meta("og:image")
                } else {
                    hero
                }
            }),
            field("yield", || {
                let block = find_first(root, "class", "recipe-serving project-meta__recipe-serving")?;
                let servings = text(find_first(block, "class", "meta-text__data"));
                u16::try_from(first_integer(&servings)?).ok()
            }),
            value("prepTime", || meta_time(doc, "prep-time project-meta__prep-time")),
            value("cookTime", || meta_time(doc, "cook-time project-meta__cook-time")),
            value("totalTime", || meta_time(doc, "total-time project-meta__total-time")),
            value("dateModified", || {
                let stamp = text(find_first(root, "class", "mntl-attribution__item-date"));
                stamp
                    .trim_start_matches("Updated ")
                    .trim_start_matches("Published ")
                    .to_string()
            }),
            field("category", || {
                find_all(root, |el| has_class(el, "mntl-breadcrumbs__item"))
                    .last()
                    .map(|el| text(Some(*el)))
            }),
            value("ingredients", || {
                clean_list(
                    find_all(root, |el| has_class(el, "structured-ingredients__list-item"))
                        .into_iter()
                        .map(|el| text(Some(el))),
                )
            }),
            value("instructions", || {
                let steps = find_all(root, |el| {
                    el.value().name() == "li" && has_class(el, "mntl-sc-block-group--LI")
                })
                .into_iter()
                .map(|li| {
                    let paragraphs: Vec<String> = find_all(li, |el| el.value().name() == "p")
                        .into_iter()
                        .map(|p| text(Some(p)))
                        .collect();
                    paragraphs.join(" ")
                });
                clean_list(steps)
                    .into_iter()
                    .map(HowToItem::step)
                    .collect::<Vec<_>>()
            }),
        );

        Ok(Recipe {
            name,
            description,
            image,
            recipe_yield,
            prep_time,
            cook_time,
            total_time,
            date_modified,
            category,
            ingredients,
            instructions,
            ..Recipe::new()
        })
    }
}

fn meta_time(doc: &Document, block_class: &str) -> String {
    let block = find_first(doc.root(), "class", block_class);
    let data = block.and_then(|b| find_first(b, "class", "meta-text__data"));
    duration_from_text(&text(data))
}
