//! Log level definitions
//!
//! Levels are ordered by severity, most severe first: `Critical` is 0 and
//! `Debug` is 5. A threshold of `T` admits every record whose level is `<= T`.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Level {
    Critical = 0,
    Error = 1,
    Warning = 2,
    Notice = 3,
    Info = 4,
    #[default]
    Debug = 5,
}

/// Canonical level names, indexed by discriminant.
const LEVEL_NAMES: [&str; 6] = ["CRITICAL", "ERROR", "WARNING", "NOTICE", "INFO", "DEBUG"];

impl Level {
    /// All levels, most severe first.
    pub const ALL: [Level; 6] = [
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// Permissive parse used for runtime level adjustment.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    /// Anything unrecognised becomes [`Level::Debug`], the most verbose level.
    /// Use [`parse_level`] to validate externally supplied names instead.
    pub fn new(name: &str) -> Level {
        let name = name.trim().to_uppercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .unwrap_or(Level::Debug)
    }

    pub fn as_str(&self) -> &'static str {
        LEVEL_NAMES[*self as usize]
    }

    pub fn from_u8(value: u8) -> Option<Level> {
        Level::ALL.get(value as usize).copied()
    }

    /// Whether a backend configured at `self` admits a record at `level`.
    #[inline]
    pub fn admits(&self, level: Level) -> bool {
        *self >= level
    }

    #[cfg(feature = "console")]
    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Critical => Magenta,
            Level::Error => Red,
            Level::Warning => Yellow,
            Level::Notice => Green,
            Level::Info => White,
            Level::Debug => Cyan,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        LEVEL_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .and_then(|idx| Level::from_u8(idx as u8))
            .ok_or_else(|| LoggerError::invalid_level(s))
    }
}

/// Strict parse used for validating user input.
///
/// Fails with [`LoggerError::InvalidLevel`] unless `name` matches one of the
/// six canonical names, ignoring ASCII case.
pub fn parse_level(name: &str) -> Result<Level> {
    name.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_string_roundtrip() {
        for name in LEVEL_NAMES {
            let level = parse_level(name).expect("canonical name parses");
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_strict_parse() {
        assert!(matches!(
            parse_level("bla"),
            Err(LoggerError::InvalidLevel { .. })
        ));
        assert_eq!(parse_level("iNfO").unwrap(), Level::Info);
        assert_eq!(parse_level("error").unwrap(), Level::Error);
        assert_eq!(parse_level("warninG").unwrap(), Level::Warning);
        // strict parsing does not trim
        assert!(parse_level(" info").is_err());
    }

    #[test]
    fn test_permissive_parse() {
        assert_eq!(Level::new("garbage"), Level::Debug);
        assert_eq!(Level::new("critical"), Level::Critical);
        assert_eq!(Level::new("  Notice \n"), Level::Notice);
        assert_eq!(Level::new(""), Level::Debug);
    }

    #[test]
    fn test_ordering() {
        assert!(Level::Critical < Level::Error);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Warning.admits(Level::Critical));
        assert!(Level::Warning.admits(Level::Warning));
        assert!(!Level::Warning.admits(Level::Notice));
    }

    #[test]
    fn test_from_u8() {
        for level in Level::ALL {
            assert_eq!(Level::from_u8(level as u8), Some(level));
        }
        assert_eq!(Level::from_u8(6), None);
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
        let level: Level = serde_json::from_str("\"NOTICE\"").unwrap();
        assert_eq!(level, Level::Notice);
    }
}
