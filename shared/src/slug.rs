//! Crop name normalization

/// Turn a free-form crop name into the identifier Growstuff uses in URLs.
///
/// Lowercases, trims surrounding whitespace, then replaces each remaining
/// space with a hyphen. Nothing else is escaped; callers that put the slug
/// in a URL must encode it themselves.
pub fn slugify(crop: &str) -> String {
    crop.to_lowercase().trim().replace(' ', "-")
}
