// Post text cleaning for topic extraction.
//
// Social posts are full of mentions, links, and punctuation that would
// pollute a term matrix. Cleaning strips all of it down to lowercase
// alphanumeric words. Mention/link tokens are dropped both before and
// after symbol removal — stripping "!http://x.co" down to "httpxco" must
// not let it sneak back in — which also makes the whole pipeline
// idempotent: clean(clean(x)) == clean(x).

use std::sync::OnceLock;

use regex_lite::Regex;

fn symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^a-zA-Z0-9 ]").expect("valid regex"))
}

fn spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(" {2,}").expect("valid regex"))
}

/// True for tokens that should never reach the term matrix: mentions and
/// anything that looks like a link.
fn is_noise_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.starts_with('@') || lower.starts_with("http")
}

/// Clean a single post's text: newlines to spaces, mention/link tokens
/// dropped, everything outside [A-Za-z0-9 ] removed, space runs collapsed,
/// lowercased and trimmed.
pub fn clean(text: &str) -> String {
    let text = text.replace('\n', " ");

    // First pass: drop mention/link tokens while their prefixes are intact
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|t| !is_noise_token(t))
        .collect();
    let joined = kept.join(" ");

    // Strip symbols, then collapse the gaps left by all-symbol tokens
    let stripped = symbol_re().replace_all(&joined, "");
    let collapsed = spaces_re().replace_all(&stripped, " ");

    // Second pass catches tokens that only became mention/link-shaped after
    // symbol removal
    let words: Vec<&str> = collapsed
        .split_whitespace()
        .filter(|t| !is_noise_token(t))
        .collect();

    words.join(" ").to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_example() {
        assert_eq!(
            clean("Check this out! @bob http://x.co  cool!!"),
            "check this out cool"
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "Check this out! @bob http://x.co  cool!!",
            "line one\nline two",
            "!http://hidden.link stays gone",
            "@everyone HTTPS://LOUD.LINK hello",
            "  plain   text  ",
            "",
            "!!!",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_clean_strips_newlines() {
        assert_eq!(clean("one\ntwo\nthree"), "one two three");
    }

    #[test]
    fn test_clean_drops_mentions_and_links() {
        assert_eq!(clean("hi @alice see https://example.com ok"), "hi see ok");
    }

    #[test]
    fn test_clean_drops_uppercase_links() {
        assert_eq!(clean("look HTTP://X.CO here"), "look here");
    }

    #[test]
    fn test_clean_removes_symbols_and_collapses() {
        assert_eq!(clean("a!!! ... b"), "a b");
    }

    #[test]
    fn test_clean_lowercases() {
        assert_eq!(clean("Rust IS Great"), "rust is great");
    }

    #[test]
    fn test_clean_empty_and_symbol_only() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("!!! ???"), "");
    }

    #[test]
    fn test_clean_keeps_digits() {
        assert_eq!(clean("version 2 of 10"), "version 2 of 10");
    }
}
