//! Text shaping before synthesis.
//!
//! Speech engines pause more naturally when punctuation is followed by a
//! space, so every `...`, `!`, `?`, `,` and `.` gets one. Best effort only.

/// Insert spacing after punctuation and collapse runs of whitespace.
pub fn naturalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if matches!(c, '!' | '?' | ',' | '.') {
            // keep "..." and "?!" together, pause after the run
            if matches!(chars.peek(), Some('.' | '!' | '?')) {
                continue;
            }
            out.push(' ');
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
