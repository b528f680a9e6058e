/// Balanced-delimiter extraction.
///
/// Pure functions over a token slice; no parser state. The parser wraps [`extract_block`] with diagnostics in
/// `Parser::brace_block`.

/// An opening/closing punctuation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: PunctuationId,
    pub close: PunctuationId,
}

impl DelimiterPair {
    pub const BRACES: DelimiterPair = DelimiterPair {
        open: PunctuationId::LBrace,
        close: PunctuationId::RBrace,
    };
    pub const PARENS: DelimiterPair = DelimiterPair {
        open: PunctuationId::LParen,
        close: PunctuationId::RParen,
    };

    /// Pair for an opening delimiter, if it has a registered closer.
    pub fn for_opener(open: PunctuationId) -> Option<Self> {
        punctuation::closer_for(open).map(|close| Self { open, close })
    }
}

/// Why a block could not be extracted. `at` indexes the token to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    #[error("expected opening delimiter at token {at}")]
    ExpectedOpener { at: usize },
    #[error("block opened at token {at} is never closed")]
    Unclosed { at: usize },
}

/// Extract the block that opens at `tokens[start]`.
///
/// Depth goes up on every `pair.open` and down on every `pair.close` (only operator tokens count, so a string
/// containing `"{"` does not). Returns the index just past the matching closer and the tokens strictly between the
/// two delimiters.
///
/// ## Errors
/// - [`BlockError::ExpectedOpener`] if `tokens[start]` is missing or not `pair.open`.
/// - [`BlockError::Unclosed`] if the slice ends before depth returns to zero; `at` is the last token.
pub fn extract_block(tokens: &[Token], start: usize, pair: DelimiterPair) -> Result<(usize, &[Token]), BlockError> {
    if !punct_at(tokens, start, pair.open) {
        return Err(BlockError::ExpectedOpener { at: start });
    }

    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(start) {
        if tok.is_punct(pair.open) {
            depth += 1;
        } else if tok.is_punct(pair.close) {
            depth -= 1;
            if depth == 0 {
                return Ok((i + 1, &tokens[start + 1..i]));
            }
        }
    }

    Err(BlockError::Unclosed {
        at: tokens.len() - 1,
    })
}
