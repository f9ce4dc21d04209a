//! Statement templates.

use tracing::trace;

use super::error::Error;
use super::placeholder::Placeholder;
use super::token::RewriteToken;

/// One segment of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// An immutable statement template: literal runs interleaved with
/// placeholders, in statement order. Built once, then rendered any
/// number of times; concurrent renders share it freely.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlTemplate {
    segments: Vec<Segment>,
}

impl SqlTemplate {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Placeholder(_)))
    }
}

/// Append-only builder driven by the parser's single pass over the
/// statement. Adjacent literal text coalesces into one segment;
/// appending a placeholder closes the open literal run.
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    segments: Vec<Segment>,
    literal: String,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the open literal run.
    pub fn literal(&mut self, text: &str) -> &mut Self {
        self.literal.push_str(text);
        self
    }

    /// Close the open literal run and append a placeholder.
    pub fn placeholder(&mut self, placeholder: Placeholder) -> &mut Self {
        self.flush();
        self.segments.push(Segment::Placeholder(placeholder));
        self
    }

    pub fn build(mut self) -> SqlTemplate {
        self.flush();

        // A template is never empty; a statement with no text at all
        // still renders to the empty string.
        if self.segments.is_empty() {
            self.segments.push(Segment::Literal(String::new()));
        }

        trace!("template built with {} segments", self.segments.len());

        SqlTemplate {
            segments: self.segments,
        }
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            self.segments
                .push(Segment::Literal(std::mem::take(&mut self.literal)));
        }
    }
}

/// Build a template from the original statement text and its rewrite
/// points, sorted by start offset. Literal text between spans is kept
/// byte-for-byte; each token's span is replaced by its placeholder.
pub fn compose(
    sql: &str,
    points: Vec<(RewriteToken, Placeholder)>,
) -> Result<SqlTemplate, Error> {
    let mut builder = TemplateBuilder::new();
    let mut cursor = 0;

    for (token, placeholder) in points {
        if token.stop() < token.start() || token.stop() >= sql.len() {
            return Err(Error::TokenOutOfBounds {
                start: token.start(),
                stop: token.stop(),
            });
        }

        if token.start() < cursor {
            return Err(Error::TokenOverlap(token.start()));
        }

        let literal = sql
            .get(cursor..token.start())
            .ok_or(Error::TokenOutOfBounds {
                start: token.start(),
                stop: token.stop(),
            })?;

        builder.literal(literal);
        builder.placeholder(placeholder);
        cursor = token.stop() + 1;
    }

    let tail = sql.get(cursor..).ok_or(Error::TokenOutOfBounds {
        start: cursor,
        stop: cursor,
    })?;
    builder.literal(tail);

    Ok(builder.build())
}
