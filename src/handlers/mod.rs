//! Bundled site handlers.
//!
//! Each handler is short, site-specific glue over the query primitives and
//! strategies. Handlers track their site's current markup and are expected to
//! need updates when a site is redesigned.

mod allrecipes;
mod bbcgoodfood;
mod giallozafferano;
mod nytimes;
mod seriouseats;
mod simplyrecipes;

pub use allrecipes::AllRecipes;
pub use bbcgoodfood::BbcGoodFood;
pub use giallozafferano::GialloZafferano;
pub use nytimes::NyTimesCooking;
pub use seriouseats::SeriousEats;
pub use simplyrecipes::SimplyRecipes;

use crate::registry::Registry;

/// Registers every bundled handler under its host key.
pub fn register_all(registry: &mut Registry) {
    registry.register("allrecipes", AllRecipes);
    registry.register("bbcgoodfood", BbcGoodFood);
    registry.register("giallozafferano", GialloZafferano);
    registry.register("nytimes", NyTimesCooking);
    registry.register("seriouseats", SeriousEats);
    registry.register("simplyrecipes", SimplyRecipes);
}

/// A registry holding the bundled handlers. Call once at startup.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    register_all(&mut registry);
    registry
}
