//! Environment variable lookups
//!
//! Configuration is read through the [`VarSource`] trait so that the same parsing
//! code runs against the process environment and against plain maps in tests.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration variables
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is not set or empty
    #[error("{0} not set")]
    Missing(String),

    /// A variable is set but could not be parsed
    #[error("invalid value for {key}: {detail}")]
    Invalid { key: String, detail: String },
}

/// Source of configuration variables
pub trait VarSource {
    /// Raw lookup of a variable
    fn var(&self, key: &str) -> Option<String>;

    /// Lookup that treats empty and whitespace-only values as unset
    fn optional(&self, key: &str) -> Option<String> {
        self.var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Lookup of a variable that must be present
    fn required(&self, key: &str) -> Result<String, EnvError> {
        self.optional(key)
            .ok_or_else(|| EnvError::Missing(key.to_string()))
    }

    /// Parse a variable, falling back to `default` when unset
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, EnvError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|e: T::Err| EnvError::Invalid {
                key: key.to_string(),
                detail: e.to_string(),
            }),
        }
    }
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl VarSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| (*v).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([("PORT", "8080"), ("EMPTY", "  "), ("BAD_PORT", "eighty")])
    }

    #[test]
    fn test_required() {
        let vars = vars();
        assert_eq!(assert_ok!(vars.required("PORT")), "8080");
        assert_eq!(
            vars.required("MISSING"),
            Err(EnvError::Missing("MISSING".to_string()))
        );
    }

    #[test]
    fn test_empty_is_unset() {
        let vars = vars();
        assert_eq!(vars.optional("EMPTY"), None);
        assert_err!(vars.required("EMPTY"));
    }

    #[test]
    fn test_parse_or() {
        let vars = vars();
        assert_eq!(vars.parse_or("PORT", 3000_u16), Ok(8080));
        assert_eq!(vars.parse_or("MISSING", 3000_u16), Ok(3000));

        let err = assert_err!(vars.parse_or("BAD_PORT", 3000_u16));
        assert!(err.to_string().contains("BAD_PORT"));
    }
}
