/// Label shown next to a node.
///
/// With `split_hyphen` set, only the part before the first underscore is kept, which
/// hides part-of-speech suffixes such as `cat_NOUN`.
pub fn display_name(name: &str, split_hyphen: bool) -> &str {
    if split_hyphen {
        name.split('_').next().unwrap_or(name)
    } else {
        name
    }
}

/// File stem for a node's page.
///
/// Path separators and `%` are percent-encoded, and names made only of dots are fully
/// encoded, so the stem always stays a single file inside the export directory.
pub fn page_stem(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c == '.') {
        return "%2E".repeat(name.len());
    }
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => stem.push_str("%25"),
            '/' => stem.push_str("%2F"),
            '\\' => stem.push_str("%5C"),
            _ => stem.push(c),
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_first_underscore() {
        assert_eq!(display_name("cat_NOUN", true), "cat");
        assert_eq!(display_name("new_york_PROPN", true), "new");
    }

    #[test]
    fn test_no_split() {
        assert_eq!(display_name("cat_NOUN", false), "cat_NOUN");
        assert_eq!(display_name("cat", true), "cat");
    }

    #[test]
    fn test_leading_underscore() {
        assert_eq!(display_name("_x", true), "");
    }

    #[test]
    fn test_page_stem_plain_word() {
        assert_eq!(page_stem("cat_NOUN"), "cat_NOUN");
        assert_eq!(page_stem("e.g."), "e.g.");
    }

    #[test]
    fn test_page_stem_escapes_separators() {
        assert_eq!(page_stem("and/or"), "and%2For");
        assert_eq!(page_stem("../etc/passwd"), "..%2Fetc%2Fpasswd");
        assert_eq!(page_stem("a\\b"), "a%5Cb");
        assert_eq!(page_stem("100%"), "100%25");
    }

    #[test]
    fn test_page_stem_dot_names() {
        assert_eq!(page_stem("."), "%2E");
        assert_eq!(page_stem(".."), "%2E%2E");
    }
}
