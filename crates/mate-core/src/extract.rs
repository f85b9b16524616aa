//! Move-token extraction from free-text model output.
//!
//! Model completions are noisy: reasoning preambles, markdown, mixed
//! notations, inconsistent promotion formatting. Extraction is a permissive
//! token scan, never a grammar parse of the whole response. Legality is
//! someone else's job.

use regex::Regex;

/// Scan text for UCI-shaped tokens and normalize them to canonical
/// lowercase 4/5-char form. Tolerates `-`/`:` between the squares and
/// promotions written `=Q` or as a trailing letter. De-duplicated,
/// first-seen order preserved.
pub fn uci_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let re = Regex::new(r"\b([a-h][1-8])[-:]?([a-h][1-8])(?:=([qrbn])|([qrbn]))?\b").unwrap();

    let mut tokens = Vec::new();
    for cap in re.captures_iter(&lowered) {
        let mut token = String::with_capacity(5);
        token.push_str(&cap[1]);
        token.push_str(&cap[2]);
        if let Some(promo) = cap.get(3).or_else(|| cap.get(4)) {
            token.push_str(promo.as_str());
        }
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Scan text for SAN-shaped tokens: piece moves, captures, promotions,
/// castling, check/mate suffixes. Tokens are raw matches ("0-0" normalized
/// to "O-O"); whether they mean anything is resolved downstream against a
/// position. De-duplicated, first-seen order preserved.
pub fn san_tokens(text: &str) -> Vec<String> {
    let re = Regex::new(
        r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O|0-0-0|0-0",
    )
    .unwrap();

    let mut tokens = Vec::new();
    for m in re.find_iter(text) {
        let token = if m.as_str().contains('0') {
            m.as_str().replace('0', "O")
        } else {
            m.as_str().to_string()
        };
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uci_from_noisy_text() {
        let tokens = uci_tokens("I think the best move is e2-e4 here.");
        assert_eq!(tokens, vec!["e2e4"]);
    }

    #[test]
    fn test_uci_promotion_formats() {
        assert_eq!(uci_tokens("promote with a7a8=Q"), vec!["a7a8q"]);
        assert_eq!(uci_tokens("promote with a7a8q"), vec!["a7a8q"]);
        assert_eq!(uci_tokens("A7A8=Q!"), vec!["a7a8q"]);
    }

    #[test]
    fn test_uci_separator_and_case() {
        assert_eq!(uci_tokens("Play E2E4 then e7:e5"), vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn test_uci_dedup_keeps_first_seen_order() {
        let tokens = uci_tokens("g5h4 or maybe g5g4, no, g5h4 it is");
        assert_eq!(tokens, vec!["g5h4", "g5g4"]);
    }

    #[test]
    fn test_empty_text_yields_empty_lists() {
        assert!(uci_tokens("").is_empty());
        assert!(uci_tokens("   \n\t").is_empty());
        assert!(san_tokens("").is_empty());
    }

    #[test]
    fn test_idempotent_extraction() {
        let text = "1. e2e4 e7e5 2. g1f3 (a fine opening)";
        assert_eq!(uci_tokens(text), uci_tokens(text));
        assert_eq!(san_tokens(text), san_tokens(text));
    }

    #[test]
    fn test_san_from_commentary() {
        let tokens = san_tokens("The killer blow is Qf8#, after which Kxf8 loses too.");
        assert!(tokens.contains(&"Qf8#".to_string()));
        assert!(tokens.contains(&"Kxf8".to_string()));
    }

    #[test]
    fn test_san_castling_variants() {
        assert_eq!(san_tokens("Castle long: O-O-O"), vec!["O-O-O"]);
        assert_eq!(san_tokens("0-0 wins"), vec!["O-O"]);
    }

    #[test]
    fn test_san_promotion_and_capture() {
        let tokens = san_tokens("exd8=Q+ ends it");
        assert_eq!(tokens, vec!["exd8=Q+"]);
    }

    #[test]
    fn test_no_chess_tokens_in_plain_prose() {
        assert!(uci_tokens("I resign, there is nothing to be done.").is_empty());
    }
}
