/// Outcome of sniffing a manifest fetch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Success status, plain-text-looking body: the verbatim manifest content.
    Confirmed(String),
    /// Success status but the response is evidently an HTML/XML page.
    Rejected,
    /// No manifest at this location (non-success status or failed request).
    Absent,
}

/// Classifies an HTTP response for a candidate manifest URL.
///
/// Status alone is unreliable (soft-404 pages served with 200) and so is the
/// content type (plain text mislabeled by some servers), so both are checked:
/// the header first, then a body prefix sniff. A transport failure never
/// reaches this function; callers map it to [`Classification::Absent`].
pub fn classify(status: u16, content_type: Option<&str>, body: &str) -> Classification {
    if !(200..300).contains(&status) {
        return Classification::Absent;
    }

    if let Some(ct) = content_type {
        let ct = ct.to_ascii_lowercase();
        if ct.contains("text/html") || ct.contains("application/xhtml") {
            return Classification::Rejected;
        }
    }

    let head = body.trim_start();
    if head.starts_with("<!")
        || starts_with_ignore_case(head, "<html")
        || starts_with_ignore_case(head, "<?xml")
    {
        return Classification::Rejected;
    }

    Classification::Confirmed(body.to_owned())
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    // `get` rather than slicing: the cut may land inside a multi-byte char.
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
