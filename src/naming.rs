//! Output filename derivation.
//!
//! Every rendered image is offered under a name derived from its title:
//!
//! 1. lower-case the title
//! 2. replace each whitespace run with a single `-`
//! 3. drop every character outside `[a-z0-9-]`
//!
//! An empty result falls back to [`FALLBACK_STEM`]. The stem gets a `.png`
//! extension in [`file_name_for`].
//!
//! - `"My Post: A Guide!"` → `my-post-a-guide`
//! - `"Café au lait"` → `caf-au-lait`
//! - `""` → `og-image`

use std::collections::HashMap;

/// Stem used when the title yields no usable characters.
pub const FALLBACK_STEM: &str = "og-image";

/// Derive the filename stem for a title.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut stem = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            stem.push(c);
        }
    }
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Full file name (`<stem>.png`) for a title.
pub fn file_name_for(title: &str) -> String {
    format!("{}.png", slugify(title))
}

/// Make file names unique within a batch by suffixing repeats.
///
/// The first occurrence keeps its name; later ones become `stem-2.png`,
/// `stem-3.png`, and so on, skipping any name already taken.
pub fn dedupe_file_names(names: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let stem = name.strip_suffix(".png").unwrap_or(name);
        let mut candidate = name.clone();
        if taken.contains(&candidate) {
            let counter = seen.entry(stem.to_string()).or_insert(1);
            loop {
                *counter += 1;
                candidate = format!("{stem}-{counter}.png");
                if !taken.contains(&candidate) {
                    break;
                }
            }
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
