use std::collections::BTreeSet;

/// Normalized form used for every name comparison
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Check that a name is usable (non-empty after trimming)
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Index of the first name that is empty after trimming
pub fn first_empty_name<S: AsRef<str>>(names: &[S]) -> Option<usize> {
    names.iter().position(|name| !is_valid_name(name.as_ref()))
}

/// True if no two names are equal ignoring case and surrounding whitespace
pub fn names_are_unique<S: AsRef<str>>(names: &[S]) -> bool {
    let mut seen = BTreeSet::new();
    names.iter().all(|name| seen.insert(normalize(name.as_ref())))
}

/// Indices of every name that collides with another one.
/// Empty names never count as similar. Advisory only.
pub fn find_similar_name_indices<S: AsRef<str>>(names: &[S]) -> BTreeSet<usize> {
    let normalized: Vec<String> = names.iter().map(|n| normalize(n.as_ref())).collect();
    let mut similar = BTreeSet::new();

    for i in 0..normalized.len() {
        if normalized[i].is_empty() {
            continue;
        }
        for j in (i + 1)..normalized.len() {
            if normalized[i] == normalized[j] {
                similar.insert(i);
                similar.insert(j);
            }
        }
    }

    similar
}
