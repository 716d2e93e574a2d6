//! Fault-isolated field extraction units.
//!
//! A page yields dozens of independent values, and any single lookup may hit
//! a node this layout variant does not have. Each value is computed by its own
//! unit; a unit that finds nothing, or faults outright, publishes the field's
//! zero value instead of failing the scrape. Handlers launch all their units
//! together and collect them in declaration order:
//!
//! ```
//! use cooklang_scrape::fields::field;
//! use cooklang_scrape::query::{item_prop, first_integer};
//! use cooklang_scrape::Document;
//!
//! # futures::executor::block_on(async {
//! let doc = Document::parse("<span itemprop='name'>Soup</span><span itemprop='recipeYield'>Serves 4</span>");
//! let root = doc.root();
//! let (name, servings): (String, u16) = tokio::join!(
//!     field("name", || Some(item_prop(root, "name"))),
//!     field("yield", || u16::try_from(first_integer(&item_prop(root, "recipeYield"))?).ok()),
//! );
//! assert_eq!(name, "Soup");
//! assert_eq!(servings, 4);
//! # });
//! ```
//!
//! The parsed tree is shared read-only by every unit; units must not depend on
//! each other's output. Two values that do depend on each other belong in one
//! unit.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};

/// Runs one extraction unit.
///
/// `None` from the closure means "not on this page"; a panic inside the
/// closure is contained here and never reaches sibling units or the caller.
/// Both publish `T::default()`.
pub fn field<'a, T, F>(name: &'static str, extract: F) -> impl Future<Output = T> + 'a
where
    T: Default + 'a,
    F: FnOnce() -> Option<T> + 'a,
{
    async move { run_unit(name, extract) }
}

/// Like [`field`], for values that are always present but may be empty.
pub fn value<'a, T, F>(name: &'static str, extract: F) -> impl Future<Output = T> + 'a
where
    T: Default + 'a,
    F: FnOnce() -> T + 'a,
{
    field(name, move || Some(extract()))
}

fn run_unit<T, F>(name: &'static str, extract: F) -> T
where
    T: Default,
    F: FnOnce() -> Option<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Some(v)) => v,
        Ok(None) => {
            debug!("Field {name}: not present on this page");
            T::default()
        }
        Err(panic_info) => {
            warn!(
                "Field {name}: extraction fault, leaving it empty: {}",
                panic_message(&panic_info)
            );
            T::default()
        }
    }
}

fn panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
