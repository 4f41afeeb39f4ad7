//! Conversion error types

use thiserror::Error;

/// Errors raised while converting a raw environment value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The variable was not present at all
    #[error("{converter} converter received no value")]
    Absent { converter: String },

    /// The raw value does not satisfy the converter contract
    #[error("{converter} converter cannot convert '{raw}': {reason}")]
    Invalid {
        converter: String,
        raw: String,
        reason: String,
    },

    /// One token of an array value failed
    #[error("array element {index} is invalid: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },

    /// Converter name that is not part of the closed set
    #[error("Unknown converter '{0}'. Valid converters are: Integer, Boolean, String, Array<T>")]
    UnknownConverter(String),
}

impl ConversionError {
    pub fn absent(converter: impl Into<String>) -> Self {
        Self::Absent {
            converter: converter.into(),
        }
    }

    pub fn invalid(
        converter: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            converter: converter.into(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    pub fn element(index: usize, source: ConversionError) -> Self {
        Self::Element {
            index,
            source: Box::new(source),
        }
    }
}
