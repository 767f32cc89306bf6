//! Canonical region per recipe slug.
//!
//! The seed data is loosely curated; this table wins over whatever cuisine
//! the JSON carries for the listed slugs.

use std::collections::HashMap;
use std::sync::OnceLock;

const REGION_BY_SLUG: &[(&str, &str)] = &[
    // North
    ("butter-chicken", "North Indian"),
    ("chole-bhature", "North Indian"),
    ("rogan-josh", "North Indian"),
    ("rajma-chawal", "North Indian"),
    ("nihari", "North Indian"),
    ("aloo-paratha", "North Indian"),
    ("laal-maas", "North Indian"),
    ("dal-baati-churma", "North Indian"),
    ("chicken-biryani", "North Indian"),
    // South
    ("masala-dosa", "South Indian"),
    ("idli-sambar", "South Indian"),
    ("hyderabadi-biryani", "South Indian"),
    ("kerala-fish-curry", "South Indian"),
    ("appam-stew", "South Indian"),
    ("chettinad-chicken", "South Indian"),
    ("pongal", "South Indian"),
    ("prawns-ghee-roast", "South Indian"),
    ("ragi-ball", "South Indian"),
    // West
    ("pav-bhaji", "West Indian"),
    ("vada-pav", "West Indian"),
    ("misal-pav", "West Indian"),
    ("dhokla", "West Indian"),
    ("thepla", "West Indian"),
    ("goan-fish-curry", "West Indian"),
    ("poha", "West Indian"),
    // East
    ("macher-jhol", "East Indian"),
    ("pakhala-bhata", "East Indian"),
    ("litti-chokha", "East Indian"),
    // Northeast
    ("assamese-fish-curry", "Northeast Indian"),
    ("bamboo-shoot-curry", "Northeast Indian"),
    ("smoked-pork-bamboo-shoot", "Northeast Indian"),
    // Central / Pan
    ("bhutte-ka-kees", "Central Indian"),
    ("indian-thali", "Pan-Indian"),
];

static REGIONS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn regions() -> &'static HashMap<&'static str, &'static str> {
    REGIONS.get_or_init(|| REGION_BY_SLUG.iter().copied().collect())
}

/// Region override for a slug, if the table lists one
pub fn region_for(slug: &str) -> Option<&'static str> {
    regions().get(slug).copied()
}
