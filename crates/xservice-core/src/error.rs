//! Error types for xservice code generation

use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

const SOURCE_BANNER: &str = "||||||||||||||||||||||||||||||||||||||| source code |||||||||||||||||||||||||||||||||||||||";

/// Error type for every stage of code generation
#[derive(Error, Debug)]
pub enum GenError {
    /// An identifier is empty, malformed, or collides with a reserved keyword
    #[error("invalid identifier {ident:?}: {reason}")]
    InvalidIdentifier { ident: String, reason: String },

    /// A builder was handed an empty name, type or value
    #[error("{builder}: {field} is missing")]
    MissingField {
        builder: &'static str,
        field: &'static str,
    },

    /// File assembly was started without a package name
    #[error("package of go file is missing")]
    MissingPackage,

    /// File assembly was started with an unusable output file name
    #[error("invalid output file name {0:?}")]
    InvalidFileName(String),

    /// Files to generate disagree on the package they belong to
    #[error("files have conflicting {setting}: {first:?} and {second:?}")]
    ConflictingPackageName {
        setting: &'static str,
        first: String,
        second: String,
    },

    /// A method references a message no input file defines
    #[error("could not find message for {0}")]
    UnknownMessage(String),

    /// A file to generate is not part of the input descriptor set
    #[error("file to generate {0:?} is not among the input files")]
    UnknownFile(String),

    /// No documentation is attached to a descriptor node
    #[error("comment is empty")]
    EmptyComment,

    /// An operator cannot be used where it was requested
    #[error("operation is invalid in {scope} scope ({op})")]
    InvalidOperator { op: String, scope: &'static str },

    /// The assembled source could not be formatted
    #[error(
        "while formatting the source code an error occurred ({reason})\n{banner}\n{source_text}\n{banner}",
        banner = SOURCE_BANNER
    )]
    Format { reason: String, source_text: String },

    /// A precondition inside the generator itself was violated
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// A failure raised while a named builder was rendering
    #[error("{builder}: {source}")]
    Builder {
        builder: &'static str,
        #[source]
        source: Box<GenError>,
    },

    /// The embedded descriptor could not be encoded
    #[error("descriptor encoding failed: {0}")]
    Encode(String),

    /// Generator configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl GenError {
    /// Wrap this error with the name of the builder it surfaced in
    pub fn within(self, builder: &'static str) -> Self {
        GenError::Builder {
            builder,
            source: Box::new(self),
        }
    }

    /// The innermost error beneath any builder wrapping
    pub fn root(&self) -> &GenError {
        match self {
            GenError::Builder { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns a stable numeric code for reporting
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::InvalidIdentifier { .. } => 1,
            GenError::MissingField { .. } => 2,
            GenError::MissingPackage => 3,
            GenError::InvalidFileName(_) => 4,
            GenError::ConflictingPackageName { .. } => 5,
            GenError::UnknownMessage(_) => 6,
            GenError::UnknownFile(_) => 7,
            GenError::EmptyComment => 8,
            GenError::InvalidOperator { .. } => 9,
            GenError::Format { .. } => 10,
            GenError::InternalInvariantViolation(_) => 11,
            GenError::Builder { source, .. } => source.error_code(),
            GenError::Encode(_) => 12,
            GenError::Config(_) => 13,
        }
    }

    /// Bad builder input: identifiers, missing fields, operators
    pub fn is_construction(&self) -> bool {
        matches!(
            self.root(),
            GenError::InvalidIdentifier { .. }
                | GenError::MissingField { .. }
                | GenError::MissingPackage
                | GenError::InvalidFileName(_)
                | GenError::InvalidOperator { .. }
        )
    }

    /// Failures of the descriptor resolver pass
    pub fn is_resolution(&self) -> bool {
        matches!(
            self.root(),
            GenError::ConflictingPackageName { .. }
                | GenError::UnknownMessage(_)
                | GenError::UnknownFile(_)
        )
    }

    pub fn is_format(&self) -> bool {
        matches!(self.root(), GenError::Format { .. })
    }

    /// Shorthand for a missing-field error
    pub fn missing(builder: &'static str, field: &'static str) -> Self {
        GenError::MissingField { builder, field }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
