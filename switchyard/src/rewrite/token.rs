//! Rewrite points reported by the parser.

use super::quote::normalize;

/// A span of the original statement that must be rewritten, with the
/// logical name it refers to. `start` and `stop` are inclusive byte
/// offsets, `stop >= start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteToken {
    start: usize,
    stop: usize,
    name: String,
}

impl RewriteToken {
    pub fn new(start: usize, stop: usize, name: impl Into<String>) -> Self {
        debug_assert!(stop >= start);

        Self {
            start,
            stop,
            name: name.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Logical name with any quoting stripped.
    pub fn name(&self) -> &str {
        normalize(&self.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_name_normalized() {
        assert_eq!(RewriteToken::new(0, 4, "users").name(), "users");
        assert_eq!(RewriteToken::new(0, 6, "`users`").name(), "users");
        assert_eq!(RewriteToken::new(0, 6, "\"users\"").name(), "users");
    }
}
