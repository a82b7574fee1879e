//! Title sanitation for display names.
//!
//! Some game titles carry decorative symbols that players cannot type into an
//! options file. They are replaced before a title becomes part of an item
//! name so that include/exclude lists stay writable by hand.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Symbol replacements applied character by character.
static SYMBOL_FIXES: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ('\u{00d7}', "x"), // ×
        ('\u{3000}', " "), // ideographic space
        ('\u{ff5e}', "~"), // ～
        ('\u{221e}', " "), // ∞
        ('\u{25ce}', " "), // ◎
        ('\u{2605}', " "), // ★
        ('\u{2663}', " "), // ♣
        ('\u{ff0a}', " "), // ＊
        ('\u{2606}', " "), // ☆
        ('\u{266a}', ""),  // ♪
    ])
});

/// Replace decorative symbols, collapse whitespace runs and trim.
pub fn sanitize_title(title: &str) -> String {
    let mut replaced = String::with_capacity(title.len());
    for c in title.chars() {
        match SYMBOL_FIXES.get(&c) {
            Some(fix) => replaced.push_str(fix),
            None => replaced.push(c),
        }
    }
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_unchanged() {
        assert_eq!(sanitize_title("Love is War"), "Love is War");
    }

    #[test]
    fn test_symbols_replaced() {
        assert_eq!(sanitize_title("Colorful \u{00d7} Melody"), "Colorful x Melody");
        assert_eq!(sanitize_title("Clover\u{2663}Club"), "Clover Club");
        assert_eq!(
            sanitize_title("Gothic and Loneliness \u{ff5e}I'm the very DIVA\u{ff5e}"),
            "Gothic and Loneliness ~I'm the very DIVA~"
        );
        assert_eq!(sanitize_title("Monochrome\u{221e}Blue Sky"), "Monochrome Blue Sky");
    }

    #[test]
    fn test_note_removed_and_whitespace_collapsed() {
        assert_eq!(
            sanitize_title("Beware of the Miku Miku Germs\u{266a}"),
            "Beware of the Miku Miku Germs"
        );
        assert_eq!(
            sanitize_title("  Luka Luka \u{2605} Night Fever "),
            "Luka Luka Night Fever"
        );
        assert_eq!(sanitize_title("VOiCE -DIVA\u{3000}MIX-"), "VOiCE -DIVA MIX-");
    }

    #[test]
    fn test_symbol_only_title_becomes_empty() {
        assert_eq!(sanitize_title("\u{266a}\u{2605}"), "");
    }
}
