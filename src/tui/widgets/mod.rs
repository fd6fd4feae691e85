pub mod gallery;
pub mod help;
pub mod prompt;
pub mod root;
pub mod status;
pub mod swatches;

/// Truncates to `max_len` characters, ending in "..." when cut.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_str("canción", 10), "canción");
        assert_eq!(truncate_str("melancolía", 7), "mela...");
        assert_eq!(truncate_str("abc", 2), "ab");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
