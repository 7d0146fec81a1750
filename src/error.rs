//! Error types for the script subsystem.
//!
//! Only [`ParseError`] ever reaches a caller. Everything that can go wrong
//! while a document runs is collected into an execution report and logged.

use thiserror::Error;

/// A malformed document. The whole document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected `GameScript` header before `{text}`")]
    MissingHeader { line: usize, text: String },

    #[error("line {line}: `Working` needs a target path")]
    EmptyTarget { line: usize },

    #[error("line {line}: `using` needs an object name")]
    EmptyAlias { line: usize },

    #[error("line {line}: malformed field declaration `{text}`")]
    MalformedField { line: usize, text: String },

    #[error("line {line}: `if` without a condition")]
    EmptyCondition { line: usize },
}

/// Why a condition could not be evaluated. Always treated as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("unsupported condition `{0}`")]
    Unsupported(String),

    #[error("missing operand in `{0}`")]
    MissingOperand(String),

    #[error("object `{0}` not found")]
    Unresolved(String),
}

/// Why a property write was dropped. Always treated as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("malformed property path `{0}`")]
    MalformedPath(String),

    #[error("unknown property `{property}` on {kind}")]
    UnknownProperty { kind: &'static str, property: String },

    #[error("value `{value}` does not fit {property}")]
    BadValue { property: String, value: String },
}

/// One failed statement inside an execution pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("condition: {0}")]
    Condition(#[from] ConditionError),

    #[error("assignment: {0}")]
    Set(#[from] SetError),
}
