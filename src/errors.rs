use crate::InvalidArraySize;
use std::fmt;

/// An error that can occur when reading WKT
#[derive(Debug, PartialEq)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the line and column where the error occurred (if available)
    pub fn position(&self) -> Option<(usize, usize)> {
        self.0.position()
    }
}

/// Specific type of error
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The input bytes could not be decoded with the requested encoding
    InvalidData { encoding: String },

    /// The leading keyword is not a known geometry tag
    UnsupportedType { input: String },

    /// A geometry collection body did not start with a geometry
    MissingElement { line: usize, column: usize },

    /// The number of ordinates read for a coordinate does not match the arity
    /// of the target coordinate type
    InvalidNumberOfCoordinates {
        found: usize,
        required: usize,
        type_name: &'static str,
    },

    /// The input did not contain the token the grammar requires at this position
    UnexpectedToken {
        expected: &'static str,
        line: usize,
        column: usize,
        remaining: String,
    },

    /// Geometry collections were nested deeper than the reader allows
    DepthExceeded {
        max_depth: usize,
        line: usize,
        column: usize,
    },
}

impl ErrorKind {
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            ErrorKind::MissingElement { line, column } => Some((line, column)),
            ErrorKind::UnexpectedToken { line, column, .. } => Some((line, column)),
            ErrorKind::DepthExceeded { line, column, .. } => Some((line, column)),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::InvalidData { ref encoding } => write!(
                f,
                "The Data object can not be converted using the given encoding '{}'.",
                encoding
            ),
            ErrorKind::UnsupportedType { ref input } => {
                write!(f, "Unsupported type -> '{}'", input)
            }
            ErrorKind::MissingElement { .. } => write!(
                f,
                "At least one Geometry is required unless you specify EMPTY for the GeometryCollection"
            ),
            ErrorKind::InvalidNumberOfCoordinates {
                found, type_name, ..
            } => write!(
                f,
                "Invalid number of coordinates ({}) supplied for type {}.",
                found, type_name
            ),
            ErrorKind::UnexpectedToken {
                expected,
                line,
                column,
                ref remaining,
            } => write!(
                f,
                "Unexpected token at line: {} column: {}. Expected '{}' but found -> '{}'",
                line, column, expected, remaining
            ),
            ErrorKind::DepthExceeded {
                max_depth,
                line,
                column,
            } => write!(
                f,
                "Maximum nesting depth of {} exceeded at line: {} column: {}",
                max_depth, line, column
            ),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<InvalidArraySize> for Error {
    fn from(error: InvalidArraySize) -> Self {
        Error::new(ErrorKind::InvalidNumberOfCoordinates {
            found: error.found,
            required: error.expected,
            type_name: error.type_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        assert_eq!(std::mem::size_of::<Error>(), std::mem::size_of::<usize>());
    }

    #[test]
    fn unexpected_token_display() {
        let err = Error::new(ErrorKind::UnexpectedToken {
            expected: ")",
            line: 1,
            column: 11,
            remaining: String::new(),
        });

        assert_eq!(
            err.to_string(),
            "Unexpected token at line: 1 column: 11. Expected ')' but found -> ''"
        );
        assert_eq!(err.position(), Some((1, 11)));
    }

    #[test]
    fn array_size_converts_to_arity_error() {
        let err = Error::from(InvalidArraySize {
            expected: 2,
            found: 3,
            type_name: "geowkt::Coordinate2D",
        });

        assert_eq!(
            err.to_string(),
            "Invalid number of coordinates (3) supplied for type geowkt::Coordinate2D."
        );
        assert_eq!(err.position(), None);
    }
}
