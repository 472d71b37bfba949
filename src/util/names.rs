//! Snapshot name sanitization for the flat-file store

/// Maximum length of a stored snapshot name.
const MAX_NAME_LEN: usize = 255;

/// Sanitize a user-supplied snapshot name into a safe file name.
///
/// Allowed characters are ASCII letters, digits, underscore, dash and
/// spaces; anything else becomes an underscore. Whitespace runs collapse
/// to a single space and the result is capped at 255 characters, so a
/// name can never escape the store directory.
pub fn sanitize_snapshot_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_NAME_LEN));
    let mut prev_space = false;

    for c in name.chars() {
        if out.len() >= MAX_NAME_LEN {
            break;
        }
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
            continue;
        }
        prev_space = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    out
}
