use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    InvalidInput {
        field: &'static str,
        message: String,
    },
    UnknownCategory {
        axis: &'static str,
        key: String,
    },
    Config {
        axis: &'static str,
        message: String,
    },
    Projection(String),
}

impl EstimateError {
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn unknown_category(axis: &'static str, key: impl Into<String>) -> Self {
        EstimateError::UnknownCategory {
            axis,
            key: key.into(),
        }
    }

    pub fn config(axis: &'static str, message: impl Into<String>) -> Self {
        EstimateError::Config {
            axis,
            message: message.into(),
        }
    }
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::InvalidInput { field, message } => {
                write!(f, "invalid input for '{field}': {message}")
            }
            EstimateError::UnknownCategory { axis, key } => {
                write!(f, "unknown {axis} category '{key}'")
            }
            EstimateError::Config { axis, message } => {
                write!(f, "rate table config error on axis '{axis}': {message}")
            }
            EstimateError::Projection(message) => write!(f, "projection error: {message}"),
        }
    }
}

impl std::error::Error for EstimateError {}
