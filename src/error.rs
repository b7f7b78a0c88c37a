//! Error taxonomy for scaffolding runs.
//!
//! Every failure that can stop a generator is one of the variants below. Metadata
//! and dispatch errors are raised before any file is written, so a run is
//! all-or-nothing with respect to the model it was pointed at. Only [`ScaffoldError::Io`]
//! can happen after output has started.

use std::path::PathBuf;

/// Errors raised while reading a model or producing generated files
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// A required argument or configuration value is missing or blank
    #[error("{0}")]
    Configuration(String),

    /// The model file does not exist
    #[error("{} doesn't exist.", .0.display())]
    NotFound(PathBuf),

    /// The model source has no usable type or namespace, or declares a member twice
    #[error("malformed model source: {0}")]
    MalformedInput(String),

    /// Neither a `[Key]` property nor an `Id` property could be found
    #[error("could not determine the key property of model `{model}`; mark one with [Key] or name it Id")]
    KeyNotFound {
        /// The model type name
        model: String,
    },

    /// The generator keyword is not one of the known generators
    #[error("{0} is an invalid generator.")]
    InvalidGenerator(String),

    /// An askama template failed to render
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    /// Reading a model or writing an output file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = ScaffoldError::InvalidGenerator("servicegen:foo".to_string());
        assert_eq!(err.to_string(), "servicegen:foo is an invalid generator.");

        let err = ScaffoldError::NotFound(PathBuf::from("Models/Missing.cs"));
        assert_eq!(err.to_string(), "Models/Missing.cs doesn't exist.");

        let err = ScaffoldError::KeyNotFound {
            model: "Comment".to_string(),
        };
        assert!(err.to_string().contains("`Comment`"));
    }

    #[test]
    fn test_io_keeps_source() {
        let err = ScaffoldError::io(
            "out/Post.cs",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("out/Post.cs"));
    }
}
