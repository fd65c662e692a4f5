use std::collections::HashSet;

/// Case-insensitive comparison key for skill names.
pub fn skill_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Drop case-insensitive duplicates while keeping first-seen order.
pub fn dedup_by_skill_key<T, F>(items: Vec<T>, name_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(skill_key(name_of(item))))
        .collect()
}

/// Clip raw collaborator output for log lines.
pub fn preview(raw: &str, max_chars: usize) -> String {
    if raw.chars().count() <= max_chars {
        return raw.to_string();
    }
    let clipped: String = raw.chars().take(max_chars).collect();
    format!("{clipped}...")
}
