//! Property tests for the lexer's position and line-structure guarantees.

use muriel_syntax::lexer::{self, TokenKind};
use proptest::prelude::*;

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,5}",
        "[0-9]{1,4}",
        Just("->".to_string()),
        Just("==".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(",".to_string()),
        Just("\"s t\"".to_string()),
        Just("\n".to_string()),
        Just("# note\n".to_string()),
    ]
}

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..40).prop_map(|parts| parts.join(" "))
}

proptest! {
    /// Property: every token's text sits in its own line at its column.
    #[test]
    fn token_text_matches_line_at_column(src in source()) {
        let tokens = lexer::lex(&src, "prop").unwrap();
        for tok in &tokens {
            if matches!(tok.kind, TokenKind::Newline | TokenKind::Nl | TokenKind::EndMarker) {
                continue;
            }
            let at: String = tok
                .line
                .chars()
                .skip(tok.start.column - 1)
                .take(tok.text.chars().count())
                .collect();
            prop_assert_eq!(at, tok.text.clone());
        }
    }

    /// Property: positions never go backwards and the stream ends with exactly one end marker.
    #[test]
    fn positions_are_monotonic(src in source()) {
        let tokens = lexer::lex(&src, "prop").unwrap();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndMarker));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EndMarker).count(), 1);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start, "{} then {}", pair[0], pair[1]);
        }
    }

    /// Property: at most one logical newline per source line.
    #[test]
    fn one_newline_per_line(src in source()) {
        let tokens = lexer::lex(&src, "prop").unwrap();
        let mut lines: Vec<usize> = tokens
            .iter()
            .filter(|t| t.kind.is_line_break())
            .map(|t| t.start.line)
            .collect();
        let total = lines.len();
        lines.dedup();
        prop_assert_eq!(lines.len(), total);
    }
}
