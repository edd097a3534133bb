use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` so it fits in `width` terminal columns, ending with an ellipsis
/// when anything was dropped.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::from("");
    }
    if s.width() <= width {
        return s.to_string();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    truncated.push('…');
    truncated
}
