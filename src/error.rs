//! Error types for the regex-compilation and graph-IO failure paths.
//!
//! Evaluation itself is total: once a product graph exists, none of the
//! three engines can fail. Everything fallible happens upstream of that, in
//! regex parsing / Thompson construction or in the graph file-builder.

use std::fmt;
use std::io;

use thiserror::Error;

/// The specific way a regex failed to parse, kept distinct from the message
/// so callers can match on it instead of scraping text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexSyntaxError {
    /// A `)` with no matching `(`.
    UnmatchedParen,
    /// A `(` with no matching `)` by end of input.
    UnclosedParen,
    /// `()`: a group containing no atoms.
    EmptyGroup,
    /// `*`, `+`, or `?` with nothing preceding it.
    QuantifierWithoutAtom,
    /// `+` or `?`: recognized as quantifiers but never implemented (§9 open
    /// questions treats them as syntax errors regardless of placement).
    UnsupportedQuantifier,
    /// `|` with no atom since the last `|` or the start of the group.
    AlternationWithNoAtoms,
    /// More than 100 levels of nested `(`.
    NestingTooDeep,
    /// The regex was the empty string.
    EmptyExpression,
}

impl fmt::Display for RegexSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RegexSyntaxError::UnmatchedParen => "unmatched parenthesis",
            RegexSyntaxError::UnclosedParen => "unclosed parenthesis",
            RegexSyntaxError::EmptyGroup => "empty group",
            RegexSyntaxError::QuantifierWithoutAtom => "quantifier with no preceding atom",
            RegexSyntaxError::UnsupportedQuantifier => "'+' and '?' are not supported",
            RegexSyntaxError::AlternationWithNoAtoms => "alternation with no atoms",
            RegexSyntaxError::NestingTooDeep => "nesting depth exceeds 100",
            RegexSyntaxError::EmptyExpression => "empty expression",
        };
        f.write_str(msg)
    }
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The regex itself does not parse; the offending input is attached.
    #[error("invalid regex {input:?}: {reason}")]
    Regex {
        input: String,
        reason: RegexSyntaxError,
    },

    /// A well-formed-looking postfix expression had the wrong operand count
    /// at some point during Thompson construction. This is an internal
    /// invariant violation (the postfix converter should never hand the NFA
    /// builder malformed input) but is surfaced rather than panicking, since
    /// the NFA builder can in principle be called directly with
    /// hand-written postfix in tests.
    #[error("malformed postfix expression: {0}")]
    Postfix(String),

    /// The graph file-builder could not open its input file.
    #[error("unable to open graph file: {0}")]
    GraphIo(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
