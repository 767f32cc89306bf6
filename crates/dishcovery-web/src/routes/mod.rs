//! Route handlers, grouped by surface

pub mod api;
pub mod pantry;
pub mod recipes;
pub mod search;
