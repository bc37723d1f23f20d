//! Error taxonomy for the checker engine.

use thiserror::Error;

/// Errors surfaced by [`crate::engine::CheckerEngine::check`] and the
/// parser boundary.
///
/// There are no transient failure modes and no retries: a parse failure
/// means the input is malformed, a checker failure means a contract
/// violation between a checker and the tree shape. Both abort the whole
/// call with no partial output.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text could not be parsed into a syntax tree.
    #[error("failed to parse {filename}: {reason}")]
    Parse { filename: String, reason: String },

    /// A checker failed while evaluating the tree. Checkers are not
    /// sandboxed from one another; the first failure aborts the batch.
    #[error("checker {name} failed")]
    Checker {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// An output-format selector that names no known format.
    #[error("unsupported output format: {0:?}")]
    InvalidConfig(String),

    /// The grammar could not be loaded into the parser.
    #[error("parser language error")]
    Language(#[from] tree_sitter::LanguageError),

    /// Serializing a report to its text form failed.
    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}
