//! Site-agnostic lookups over a parsed page.
//!
//! Every lookup treats a missing node as a normal outcome: searches return
//! `Option`/`Vec`, and the string accessors return an empty string, so a
//! chain of lookups never needs a null check at each step.

use scraper::ElementRef;

use crate::normalize::clean_text;

/// Depth-first search for the first element (in source order) whose
/// attribute equals `value` exactly, e.g. a full `class` string.
pub fn find_first<'a>(root: ElementRef<'a>, attr_name: &str, value: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr(attr_name) == Some(value))
}

/// Every element under `root` (root included) matching `predicate`, in
/// source order.
pub fn find_all<'a, P>(root: ElementRef<'a>, predicate: P) -> Vec<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| predicate(el))
        .collect()
}

/// Attribute value, or an empty string when the node or attribute is absent.
pub fn attr(node: Option<ElementRef<'_>>, name: &str) -> String {
    node.and_then(|el| el.value().attr(name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Normalized text content, or an empty string when the node is absent.
///
/// Text nodes are concatenated as written so inline markup never splits a
/// word or detaches punctuation.
pub fn text(node: Option<ElementRef<'_>>) -> String {
    node.map(|el| clean_text(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// True when the element's class list contains `class`.
pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// True when `el` is a property of the item `root` describes.
///
/// When `root` is itself an `itemscope`, properties of items nested below it
/// (an author `Person`, a `NutritionInformation`) belong to those items and
/// not to `root`. A plain element as `root` scopes nothing.
fn in_item_scope(root: &ElementRef<'_>, el: &ElementRef<'_>) -> bool {
    if root.value().attr("itemscope").is_none() || el.id() == root.id() {
        return true;
    }
    el.ancestors()
        .take_while(|node| node.id() != root.id())
        .filter_map(ElementRef::wrap)
        .all(|ancestor| ancestor.value().attr("itemscope").is_none())
}

/// Every node carrying `prop` that belongs to `root`'s item, in source order.
pub(crate) fn item_prop_nodes<'a>(root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
    find_all(root, |el| has_item_prop(el, prop) && in_item_scope(&root, el))
}

pub(crate) fn item_prop_node<'a>(root: ElementRef<'a>, prop: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| has_item_prop(el, prop) && in_item_scope(&root, el))
}

fn has_item_prop(el: &ElementRef<'_>, prop: &str) -> bool {
    el.value()
        .attr("itemprop")
        .is_some_and(|props| props.split_whitespace().any(|p| p == prop))
}

/// Value of the first `itemprop` node: its `content` attribute when it has
/// one (`<meta>`, `<time>`), otherwise its text.
pub fn item_prop(root: ElementRef<'_>, prop: &str) -> String {
    match item_prop_node(root, prop) {
        Some(el) => match el.value().attr("content") {
            Some(content) => clean_text(content),
            None => text(Some(el)),
        },
        None => String::new(),
    }
}

/// Attribute of the first `itemprop` node, e.g. `src` or `datetime`.
pub fn item_prop_attr(root: ElementRef<'_>, prop: &str, attr_name: &str) -> String {
    attr(item_prop_node(root, prop), attr_name)
}

/// Values of every `itemprop` node, in source order, blanks dropped.
pub fn item_prop_all(root: ElementRef<'_>, prop: &str) -> Vec<String> {
    item_prop_nodes(root, prop)
        .into_iter()
        .map(|el| match el.value().attr("content") {
            Some(content) => clean_text(content),
            None => text(Some(el)),
        })
        .filter(|value| !value.is_empty())
        .collect()
}

/// First whitespace-separated token that reads as an integer.
///
/// Serving counts are written inconsistently ("Serves 4", "4-6 servings",
/// "(4)"), so surrounding punctuation is ignored and a range keeps its lower
/// bound.
pub fn first_integer(text: &str) -> Option<i64> {
    text.split_whitespace().find_map(|token| {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '-');
        let head = token
            .split(['-', '–', '—', '/'])
            .next()
            .unwrap_or(token);
        head.parse::<i64>().ok()
    })
}
