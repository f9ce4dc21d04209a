//! Identifier quoting styles.

use crate::util::{escape_backtick_identifier, escape_identifier};

/// Delimiter pair around an identifier in the original statement.
///
/// Rewritten identifiers keep the quoting the client used, so a
/// statement written with backticks comes back with backticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuoteStyle {
    #[default]
    None,
    Double,
    Backtick,
    Brackets,
}

impl QuoteStyle {
    /// Detect the quoting used on an identifier as written.
    pub fn detect(identifier: &str) -> Self {
        if identifier.len() < 2 {
            return Self::None;
        }

        if identifier.starts_with('"') && identifier.ends_with('"') {
            Self::Double
        } else if identifier.starts_with('`') && identifier.ends_with('`') {
            Self::Backtick
        } else if identifier.starts_with('[') && identifier.ends_with(']') {
            Self::Brackets
        } else {
            Self::None
        }
    }

    pub fn open(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Double => "\"",
            Self::Backtick => "`",
            Self::Brackets => "[",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Double => "\"",
            Self::Backtick => "`",
            Self::Brackets => "]",
        }
    }

    /// Wrap an unquoted identifier, escaping embedded delimiters.
    pub fn wrap(&self, identifier: &str) -> String {
        match self {
            Self::None => identifier.to_owned(),
            Self::Double => format!("\"{}\"", escape_identifier(identifier)),
            Self::Backtick => format!("`{}`", escape_backtick_identifier(identifier)),
            Self::Brackets => format!("[{}]", identifier),
        }
    }

    /// Strip this style's delimiters off an identifier, if present.
    pub fn strip<'a>(&self, identifier: &'a str) -> &'a str {
        if *self == Self::None || Self::detect(identifier) != *self {
            return identifier;
        }

        &identifier[self.open().len()..identifier.len() - self.close().len()]
    }
}

/// Quote-free form of an identifier as written in a statement.
pub fn normalize(identifier: &str) -> &str {
    QuoteStyle::detect(identifier).strip(identifier)
}
