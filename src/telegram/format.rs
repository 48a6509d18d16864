use tracing::debug;

/// Maximum message length for Telegram (4096 characters)
pub const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Convert bot text to Telegram HTML.
///
/// Only inline code (`code` → <code>code</code>) is recognised; everything else is
/// escaped, so event names containing `_` or `*` come through untouched. An
/// unmatched backtick is kept as a literal character.
pub fn to_telegram_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '`' {
            if let Some(offset) = chars[i + 1..].iter().position(|&c| c == '`') {
                let code: String = chars[i + 1..i + 1 + offset].iter().collect();
                result.push_str("<code>");
                result.push_str(&escape_html(&code));
                result.push_str("</code>");
                i += offset + 2;
                continue;
            }
        }

        push_escaped(&mut result, chars[i]);
        i += 1;
    }

    result
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        c => out.push(c),
    }
}

/// Escape HTML entities
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Split plain text into chunks of at most `max_len` characters.
///
/// Splits on line boundaries so a list row is never cut in half; a single line
/// longer than `max_len` is cut by characters.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if current_len + needed > max_len && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_len {
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(max_len) {
                parts.push(chunk.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        parts.push(current);
    }

    debug!(
        input_len = text.len(),
        parts = parts.len(),
        "Message split for Telegram"
    );
    parts
}
