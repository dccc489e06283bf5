//! Error types for the chroma_kit library

use thiserror::Error;

/// Result type alias for chroma_kit operations
pub type Result<T> = std::result::Result<T, ColorError>;

/// Failure to read a color from its textual form.
///
/// The offending field is named whenever the text was structurally valid
/// but one component fell outside its domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input was empty or only whitespace
    #[error("empty color string")]
    Empty,

    /// Input matched none of the accepted notations
    #[error("unrecognized color notation: {input:?}")]
    Malformed { input: String },

    /// Hex notation with a bad length or non-hex digits
    #[error("invalid hex color: {input:?}")]
    InvalidHex { input: String },

    /// A functional-notation component outside its documented range
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Error types for color computations
#[derive(Error, Debug)]
pub enum ColorError {
    /// Color text could not be parsed
    #[error("Color parse error: {0}")]
    Parse(#[from] ParseError),

    /// An operation had zero usable samples to work with
    #[error("No usable input: {reason}")]
    EmptyInput { reason: String },

    /// A numeric input outside its documented domain
    #[error("Invalid parameter: {parameter} = {value} (expected {expected})")]
    RangeError {
        parameter: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, written or validated
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ColorError {
    /// Create a range error for a parameter
    pub fn range(parameter: &'static str, value: impl ToString, expected: &'static str) -> Self {
        Self::RangeError {
            parameter,
            value: value.to_string(),
            expected,
        }
    }

    /// Create an empty-input error
    pub fn empty_input(reason: impl Into<String>) -> Self {
        Self::EmptyInput {
            reason: reason.into(),
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Bad user input is recoverable; the caller shows a message and asks
    /// again. Load and configuration failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ColorError::Parse(_) | ColorError::EmptyInput { .. } | ColorError::RangeError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ColorError::Parse(_) => {
                "That doesn't look like a color. Try #RRGGBB, rgb(r, g, b) or hsl(h, s%, l%).".to_string()
            }
            ColorError::EmptyInput { .. } => {
                "There are no colors to work with. Try an image with visible, non-transparent pixels.".to_string()
            }
            ColorError::RangeError { parameter, expected, .. } => {
                format!("The value for {} is not valid (expected {}).", parameter, expected)
            }
            ColorError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            ColorError::ConfigError { .. } => "The settings file could not be used.".to_string(),
        }
    }
}
