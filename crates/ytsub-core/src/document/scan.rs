//! Character-level scanner for inline comment stripping.

/// Strips an inline `;` comment, honoring double-quoted, single-quoted, and
/// `/`-delimited regex regions so a `;` inside any of them survives.
///
/// Three mutually exclusive mode flags; a delimiter only toggles its own mode
/// when no other mode is active, and a backslash escapes the next character.
/// Known limitation kept for document compatibility: any unescaped `/`
/// outside quotes toggles regex mode, so plain text with an odd number of
/// slashes (say, a URL) can leave the scanner in regex mode and keep a
/// trailing comment.
pub(crate) fn strip_inline_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut in_regex = false;
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' if !in_single && !in_regex => in_double = !in_double,
            '\'' if !in_double && !in_regex => in_single = !in_single,
            '/' if !in_double && !in_single => in_regex = !in_regex,
            ';' if !in_double && !in_single && !in_regex => break,
            _ => {}
        }
        out.push(ch);
    }

    out
}
