//! Command matching for the dispatcher

use crate::error::{BotError, Result};
use regex::Regex;
use std::fmt;

/// How a registered command recognizes an inbound command name
#[derive(Clone)]
pub enum CommandMatcher {
    /// The name must equal this string
    Exact(String),
    /// The name must contain a match of this pattern
    Pattern(Regex),
}

impl CommandMatcher {
    pub fn exact(name: impl Into<String>) -> Self {
        CommandMatcher::Exact(name.into())
    }

    /// Match names containing `pattern`
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(CommandMatcher::Pattern)
            .map_err(|e| BotError::Config(format!("invalid command pattern '{pattern}': {e}")))
    }

    /// Match names containing `word`, ignoring case
    ///
    /// ```
    /// use cryptobot::bot::CommandMatcher;
    ///
    /// let matcher = CommandMatcher::case_insensitive("btc").unwrap();
    /// assert!(matcher.matches("BTC"));
    /// assert!(matcher.matches("btcclp"));
    /// assert!(!matcher.matches("eth"));
    /// ```
    pub fn case_insensitive(word: &str) -> Result<Self> {
        Self::pattern(&format!("(?i){}", regex::escape(word)))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            CommandMatcher::Exact(exact) => exact == name,
            CommandMatcher::Pattern(regex) => regex.is_match(name),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, CommandMatcher::Exact(_))
    }
}

impl fmt::Debug for CommandMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandMatcher::Exact(name) => write!(f, "Exact({name:?})"),
            CommandMatcher::Pattern(regex) => write!(f, "Pattern({:?})", regex.as_str()),
        }
    }
}

/// Command names listed in a text resource, one per line
///
/// Blank lines are dropped, surrounding whitespace and a leading `/` removed.
pub fn parse_command_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches('/'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let matcher = CommandMatcher::exact("start");
        assert!(matcher.matches("start"));
        assert!(!matcher.matches("Start"));
        assert!(!matcher.matches("started"));
        assert!(matcher.is_exact());
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = CommandMatcher::case_insensitive("eth").unwrap();
        assert!(matcher.matches("eth"));
        assert!(matcher.matches("ETH"));
        assert!(matcher.matches("EthClp"));
        assert!(!matcher.matches("btc"));
        assert!(!matcher.is_exact());
    }

    #[test]
    fn test_case_insensitive_escapes() {
        let matcher = CommandMatcher::case_insensitive("a.b").unwrap();
        assert!(matcher.matches("A.B"));
        assert!(!matcher.matches("axb"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            CommandMatcher::pattern("("),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn test_debug() {
        let matcher = CommandMatcher::case_insensitive("btc").unwrap();
        assert_eq!(format!("{matcher:?}"), r#"Pattern("(?i)btc")"#);
        assert_eq!(
            format!("{:?}", CommandMatcher::exact("about")),
            r#"Exact("about")"#
        );
    }

    #[test]
    fn test_parse_command_list() {
        let text = "start\n\n  /help \nabout\r\nbtc\n";
        assert_eq!(
            parse_command_list(text),
            vec!["start", "help", "about", "btc"]
        );
    }
}
