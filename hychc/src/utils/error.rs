use hyterm::prelude::{Expr, Symbol};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration '{file}': {source}")]
    ConfigParse {
        source: toml::de::Error,
        file: String,
    },

    #[error("Horn clause must be universally quantified, found `{formula}`")]
    NotUniversallyQuantified { formula: Expr },

    #[error(
        "Relation '{relation}' is applied to {found} argument(s) in clause #{clause}, expected {expected}"
    )]
    ArityMismatch {
        relation: Symbol,
        expected: usize,
        found: usize,
        clause: usize,
    },

    #[error("Head of clause #{clause} is not a single relation application: `{head}`")]
    NonHornHead { clause: usize, head: Expr },
}

pub type ChcResult<T> = Result<T, ChcError>;
