const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether `text` contains anything starting with an `http://` or `https://`
/// scheme. The scheme is matched case-insensitively; the rest of the URL is
/// not validated.
pub fn contains_link(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    SCHEMES.iter().any(|scheme| lowered.contains(scheme))
}
