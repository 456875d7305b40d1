// Emoji shortcode expansion for module descriptions
//
// Descriptions come straight from module authors, so they are full of
// `:rocket:` style shortcodes. We expand the ones we know and pass the
// rest through untouched - this function must never fail, whatever the
// input looks like.

/// Is `c` a character that can appear inside a shortcode?
fn is_shortcode_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
}

/// Expand `:shortcode:` sequences into emoji glyphs
///
/// Pure and total: text without shortcodes comes back unchanged, unknown
/// or half-finished shortcodes stay verbatim, and running the output
/// through again is a no-op.
pub fn emojify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find(':') {
            Some(end) => {
                let code = &after[..end];
                if !code.is_empty() && code.chars().all(is_shortcode_char) {
                    if let Some(emoji) = emojis::get_by_shortcode(code) {
                        out.push_str(emoji.as_str());
                        rest = &after[end + 1..];
                        continue;
                    }
                }
                // Not a shortcode we know. Emit the opening colon and
                // rescan from the closing one, which may itself open a
                // real shortcode (":-) :rocket:" style input).
                out.push(':');
                rest = after;
            }
            None => {
                // Dangling colon, nothing left to match
                out.push(':');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
