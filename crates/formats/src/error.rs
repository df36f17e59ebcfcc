use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

#[derive(Debug)]
pub enum FormatError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// The properties blob parsed, but is not a JSON object.
    NotAnObject { found: &'static str },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Io(err) => write!(f, "I/O error: {err}"),
            FormatError::Parse(err) => write!(f, "JSON parse error: {err}"),
            FormatError::NotAnObject { found } => {
                write!(f, "expected a JSON object, found {found}")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Io(err) => Some(err),
            FormatError::Parse(err) => Some(err),
            FormatError::NotAnObject { .. } => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Parse(err)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err)
    }
}

pub fn from_json_str<T: DeserializeOwned>(payload: &str) -> Result<T, FormatError> {
    Ok(serde_json::from_str(payload)?)
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, FormatError> {
    let payload = fs::read_to_string(path)?;
    from_json_str(&payload)
}

#[cfg(test)]
mod tests {
    use super::{FormatError, from_json_str, load_json};

    #[test]
    fn parse_errors_are_reported() {
        let err = from_json_str::<Vec<u32>>("[1, 2").unwrap_err();
        assert!(matches!(err, FormatError::Parse(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn missing_files_are_io_errors() {
        let err = load_json::<Vec<u32>>("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, FormatError::Io(_)));
    }
}
