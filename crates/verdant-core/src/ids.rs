//! Slug normalization utilities.
//!
//! Entities created through the admin (projects, sectors, jobs, eco-matrix
//! dimensions) are addressed by a URL slug. When the editor does not supply
//! one explicitly, it is derived from the entity's title.

/// Normalize free text to a lowercase kebab-case slug.
///
/// Performs the following transformations:
/// 1. Converts to lowercase
/// 2. Treats every character that is not alphanumeric as a separator
/// 3. Collapses runs of separators into single hyphens
/// 4. Drops leading and trailing separators
///
/// # Examples
///
/// ```
/// use verdant_core::ids::normalize_slug;
///
/// assert_eq!(normalize_slug("Riverside Park"), "riverside-park");
/// assert_eq!(normalize_slug("green_roof_retrofit"), "green-roof-retrofit");
/// assert_eq!(normalize_slug("  Eco-Matrix: Soil & Water!  "), "eco-matrix-soil-water");
/// assert_eq!(normalize_slug("UPPERCASE"), "uppercase");
/// ```
pub fn normalize_slug(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

/// Returns `true` if `slug` is already in normalized form.
pub fn is_normalized_slug(slug: &str) -> bool {
    !slug.is_empty() && normalize_slug(slug) == slug
}
