//! The ways a page embeds recipe data, one strategy each.
//!
//! A handler picks the strategy matching its site (occasionally layering
//! two). When several nodes or entities qualify, the first in source order
//! wins.

pub mod json_ld;
pub mod microdata;

pub use json_ld::{from_array, from_graph, from_scattered, from_single, from_value};
pub use microdata::from_microdata;
