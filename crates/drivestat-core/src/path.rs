//! Lexical helpers for slash-separated remote paths.

/// Separator used by remote paths.
pub const SEPARATOR: char = '/';

/// Clean a path lexically.
///
/// Repeated separators collapse, `.` segments vanish and `..` removes the
/// preceding segment. A rooted path stays rooted; `..` never climbs above the
/// root. An empty result becomes `"."`.
pub fn normalize(path: &str) -> String {
    let rooted = path.starts_with(SEPARATOR);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Display path of a child under `parent`.
pub fn join(parent: &str, name: &str) -> String {
    normalize(&format!("{parent}/{name}"))
}

/// Drop one leading separator.
pub fn strip_root(path: &str) -> &str {
    path.strip_prefix(SEPARATOR).unwrap_or(path)
}

/// Whether a requested path designates the store root.
pub fn is_root_like(path: &str) -> bool {
    path.is_empty() || normalize(path) == "/"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/a//b"), "/a/b");
        assert_eq!(normalize("a/./b/"), "a/b");
        assert_eq!(normalize("/a/../b"), "/b");
        assert_eq!(normalize("/.."), "/");
        assert_eq!(normalize("../x"), "../x");
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("//"), "/");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/a", "b"), "/a/b");
        assert_eq!(join("", "b"), "/b");
        assert_eq!(join("/", "b"), "/b");
        assert_eq!(join("docs/", "notes.txt"), "docs/notes.txt");
    }

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("/a/b"), "a/b");
        assert_eq!(strip_root("a/b"), "a/b");
        assert_eq!(strip_root("//a"), "/a");
    }

    #[test]
    fn test_is_root_like() {
        assert!(is_root_like(""));
        assert!(is_root_like("/"));
        assert!(is_root_like("//"));
        assert!(!is_root_like("/a"));
    }
}
