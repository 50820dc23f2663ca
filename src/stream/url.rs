//! Protocol-relative URL handling.

/// Turn a protocol-relative URL (`//host/path`) into `https://host/path`.
/// Anything else is returned unchanged.
pub fn absolutize(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// Like [`absolutize`], but treats `None` and `""` as absent.
pub fn absolutize_opt(url: Option<&str>) -> Option<String> {
    url.filter(|u| !u.is_empty()).map(absolutize)
}
