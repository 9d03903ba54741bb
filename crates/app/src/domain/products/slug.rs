//! Product slugs

use rand::{Rng, distributions::Alphanumeric, thread_rng};

const SUFFIX_LENGTH: usize = 6;

/// Lowercase, hyphen-separated form of `title` using ASCII letters and digits.
pub(crate) fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("product");
    }

    slug
}

/// A slug for `title` with a random suffix so equal titles do not collide.
pub(crate) fn unique_slug(title: &str) -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();

    format!("{}-{suffix}", slugify(title))
}
