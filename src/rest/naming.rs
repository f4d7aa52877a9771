//! Deterministic singular/plural naming convention.
//!
//! These transforms map resource names to collection names and back:
//!
//! - a name ending in `s`, `x`, `z`, `ch`, or `sh` pluralizes with `es`
//!   (`box` → `boxes`);
//! - a name ending in a consonant followed by `y` pluralizes with `ies`
//!   (`reply` → `replies`);
//! - everything else takes a plain `s` (`message` → `messages`).
//!
//! The rules are intentionally small and fully invertible for the names they
//! cover. Irregular English plurals (`person`/`people`) do not round-trip;
//! the registry rejects them at registration time so a mismatch can never
//! surface mid-request.

/// Pluralizes a singular resource name.
///
/// # Example
///
/// ```rust
/// use comm_api::rest::naming::pluralize;
///
/// assert_eq!(pluralize("message"), "messages");
/// assert_eq!(pluralize("reply"), "replies");
/// assert_eq!(pluralize("box"), "boxes");
/// ```
#[must_use]
pub fn pluralize(name: &str) -> String {
    if ends_with_sibilant(name) {
        return format!("{name}es");
    }

    if let Some(stem) = name.strip_suffix('y') {
        if stem.chars().next_back().is_some_and(is_consonant) {
            return format!("{stem}ies");
        }
    }

    format!("{name}s")
}

/// Singularizes a collection name.
///
/// Inverse of [`pluralize`] for every name that pluralize can produce.
/// Names that are not recognizably plural are returned unchanged.
///
/// # Example
///
/// ```rust
/// use comm_api::rest::naming::singularize;
///
/// assert_eq!(singularize("messages"), "message");
/// assert_eq!(singularize("replies"), "reply");
/// assert_eq!(singularize("boxes"), "box");
/// assert_eq!(singularize("message"), "message");
/// ```
#[must_use]
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if stem.chars().next_back().is_some_and(is_consonant) {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = name.strip_suffix("es") {
        if ends_with_sibilant(stem) {
            return stem.to_string();
        }
    }

    name.strip_suffix('s').unwrap_or(name).to_string()
}

/// Derives the conventional type name for a singular resource name.
///
/// Capitalizes the first letter and each letter following `_`, dropping the
/// underscores (`draft_order` → `DraftOrder`).
#[must_use]
pub fn classify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Returns `true` for names ending in `s`, `x`, `z`, `ch`, or `sh`.
fn ends_with_sibilant(name: &str) -> bool {
    name.ends_with('s')
        || name.ends_with('x')
        || name.ends_with('z')
        || name.ends_with("ch")
        || name.ends_with("sh")
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
