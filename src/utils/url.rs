const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Drops a leading `https://` or `http://` for display.
pub fn strip_scheme(url: &str) -> &str {
    SCHEMES
        .iter()
        .find_map(|scheme| url.strip_prefix(scheme))
        .unwrap_or(url)
}

pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_schemes_only() {
        assert_eq!(strip_scheme("https://x/d/123456"), "x/d/123456");
        assert_eq!(strip_scheme("http://localhost:8080/d/1"), "localhost:8080/d/1");
        assert_eq!(strip_scheme("ftp://host/file"), "ftp://host/file");
    }

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join("http://h:8080/", "/api/upload"), "http://h:8080/api/upload");
        assert_eq!(join("http://h", "d/"), "http://h/d/");
    }
}
