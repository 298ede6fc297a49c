//! Bearer token cleanup.
//!
//! Some code paths persist the token through `JSON.stringify`-style
//! encoding, which leaves it wrapped in literal double quotes. Anything
//! that puts a token on the wire goes through [`resolve_clean_token`].

/// Strip one pair of double quotes anchored at both ends of `raw`.
///
/// Internal quotes are left alone, and a token with a quote on only one
/// side is returned unchanged.
pub fn normalize_token(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Pick the token to authenticate with.
///
/// The in-memory value wins when it is non-empty; otherwise the persisted
/// value is looked up. Both are normalized, and a token that normalizes to
/// nothing resolves to `None`.
pub fn resolve_clean_token<F>(in_memory: Option<&str>, persisted: F) -> Option<String>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(token) = in_memory.filter(|t| !t.is_empty()) {
        return non_empty(normalize_token(token));
    }

    let stored = persisted()?;
    tracing::debug!("No in-memory token, falling back to persisted token");
    non_empty(normalize_token(&stored))
}

fn non_empty(token: &str) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
