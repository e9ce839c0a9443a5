//! Fixed word lists shared by every check.
//!
//! These are process-wide and read-only. Adding a proper noun or a category
//! is a code change, reviewed like any other.

/// Words and phrases exempt from letter-case checks in titles and tags.
pub const EXCEPTION_PROPER_NOUNS: &[&str] = &[
    "Arcade",
    "ArcGIS Online",
    "ArcGIS Pro",
    "GeoPackage",
    "OAuth",
    "OpenStreetMap",
    "SwiftUI",
    "Web Mercator",
];

/// Valid values for the `category` field of a metadata record.
pub const CATEGORIES: &[&str] = &[
    "Analysis",
    "Augmented Reality",
    "Cloud and Portal",
    "Edit and Manage Data",
    "Layers",
    "Maps",
    "Scenes",
    "Routing and Logistics",
    "Search and Query",
    "Utility Networks",
    "Visualization",
];

pub const HEADER_USE_CASE: &str = "Use case";
pub const HEADER_HOW_TO_USE: &str = "How to use the sample";
pub const HEADER_HOW_IT_WORKS: &str = "How it works";
pub const HEADER_RELEVANT_API: &str = "Relevant API";
pub const HEADER_OFFLINE_DATA: &str = "Offline data";
pub const HEADER_ABOUT_THE_DATA: &str = "About the data";
pub const HEADER_ADDITIONAL_INFORMATION: &str = "Additional information";
pub const HEADER_TAGS: &str = "Tags";

/// Every recognized section header, in canonical order.
pub const AVAILABLE_HEADERS: &[&str] = &[
    HEADER_USE_CASE,
    HEADER_HOW_TO_USE,
    HEADER_HOW_IT_WORKS,
    HEADER_RELEVANT_API,
    HEADER_OFFLINE_DATA,
    HEADER_ABOUT_THE_DATA,
    HEADER_ADDITIONAL_INFORMATION,
    HEADER_TAGS,
];

/// Headers every README must contain.
pub const ESSENTIAL_HEADERS: &[&str] = &[
    HEADER_USE_CASE,
    HEADER_HOW_TO_USE,
    HEADER_HOW_IT_WORKS,
    HEADER_RELEVANT_API,
    HEADER_TAGS,
];

pub fn is_proper_noun(word: &str) -> bool {
    EXCEPTION_PROPER_NOUNS.contains(&word)
}

pub fn is_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}
