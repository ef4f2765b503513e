//! Error types for lexnum.
//!
//! Every variant is a validation failure: inputs are caller-controlled and
//! deterministic, so none of them is retryable.

use thiserror::Error;

/// Result type for lexnum operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering numbering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Level index outside `[0, 8]` (or not an integer at all).
    #[error("Level index {value} out of range [0, 8]{}", context_suffix(.context))]
    LevelOutOfRange {
        value: String,
        context: Option<String>,
    },

    /// Level configurations were not supplied as an array.
    #[error("Level configurations must be an array, got {0}")]
    NotAnArray(String),

    /// No levels were supplied.
    #[error("At least one level configuration is required")]
    EmptyLevels,

    /// More than nine levels were supplied.
    #[error("A numbering definition supports at most 9 levels, got {0}")]
    TooManyLevels(usize),

    /// Two level configurations share the same `ilvl`.
    #[error("Duplicate level index {0}")]
    DuplicateLevel(i32),

    /// A level has an empty `lvlText` pattern.
    #[error("Level {0} has an empty lvlText")]
    EmptyLevelText(i32),

    /// A start value is negative or not an integer.
    #[error("Level {ilvl} has invalid start value {value}; expected a non-negative integer")]
    InvalidStart { ilvl: i32, value: String },

    /// A raw configuration could not be read into a definition.
    #[error("Invalid numbering configuration: {0}")]
    InvalidConfig(String),

    /// Preset name not recognized.
    #[error("Unknown numbering preset: {0}")]
    UnknownPreset(String),

    /// Plain-text scheme name not recognized.
    #[error("Unknown numbering scheme: {0}")]
    UnknownScheme(String),

    /// No instance with this numId was registered.
    #[error("Unknown numId: {0}")]
    UnknownNumId(i32),

    /// An instance references a definition that was not supplied.
    #[error("Unknown abstractNumId: {0}")]
    UnknownAbstractNumId(i32),

    /// The referenced definition has no level with this index.
    #[error("Abstract numbering {abstract_num_id} does not define level {ilvl}")]
    UndefinedLevel { abstract_num_id: i32, ilvl: i32 },
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(context) => format!(" ({})", context),
        None => String::new(),
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidConfig(err.to_string())
    }
}
