use url::Url;

/// Leaf name of the well-known manifest resource.
const MANIFEST_LEAF: &str = "llms.txt";

/// Derives the candidate manifest URL for a page URL.
///
/// The final path segment (the "file" part, if any) is dropped and the
/// manifest leaf name is appended to the remaining directory path. Query
/// string and fragment are not carried over. Returns `None` for anything
/// that is not an absolute HTTP(S) URL.
pub fn candidate_manifest_url(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let mut segments: Vec<&str> = parsed.path().split('/').collect();
    segments.pop();
    let dir_path = segments.join("/");
    // Normalize so exactly one separator precedes the leaf.
    let dir_path = dir_path.trim_end_matches('/');

    Some(format!(
        "{}{}/{}",
        parsed.origin().ascii_serialization(),
        dir_path,
        MANIFEST_LEAF
    ))
}

/// Extracts the host name of a URL, or `None` if the URL does not parse
/// or has no host.
pub fn domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_owned)
}
