//! Parser configuration.

/// Default bound on nested statement blocks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of statement bodies (function body counts as depth 1)
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum block nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_depth() {
        assert_eq!(ParserConfig::default().max_depth, 256);
    }

    #[test]
    fn test_with_max_depth() {
        let config = ParserConfig::new().with_max_depth(4);
        assert_eq!(config.max_depth, 4);
    }
}
