use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Two-valued switch state.
///
/// The backing file holds the decimal form (`0`/`1`); the bus carries the
/// wire form (`OFF`/`ON`). Only the integer `1` ever means [`SwitchState::On`];
/// every other parsed value is [`SwitchState::Off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchState {
    Off,
    On,
}

impl SwitchState {
    /// Parse backing-file content.
    ///
    /// Numeric content other than `1` is a valid Off; non-numeric content is
    /// an error so the caller can log the degradation before falling back.
    pub fn parse(content: &str) -> Result<Self> {
        match content.trim().parse::<i64>() {
            Ok(1) => Ok(Self::On),
            Ok(_) => Ok(Self::Off),
            Err(_) => Err(DomainError::InvalidStateValue(format!(
                "not a number: {:?}",
                content.trim()
            ))),
        }
    }

    /// Map an inbound command payload. Anything other than the literal `ON`
    /// is Off - a deliberate permissive default, no rejection path exists.
    pub fn from_command_payload(payload: &str) -> Self {
        if payload == "ON" { Self::On } else { Self::Off }
    }

    /// Decimal form written to the backing file.
    pub fn file_form(&self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    /// Literal published on the state topic.
    pub fn wire_form(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_is_on() {
        assert_eq!(SwitchState::parse("1").unwrap(), SwitchState::On);
    }

    #[test]
    fn test_parse_zero_is_off() {
        assert_eq!(SwitchState::parse("0").unwrap(), SwitchState::Off);
    }

    #[test]
    fn test_parse_other_numbers_are_off() {
        assert_eq!(SwitchState::parse("2").unwrap(), SwitchState::Off);
        assert_eq!(SwitchState::parse("-1").unwrap(), SwitchState::Off);
        assert_eq!(SwitchState::parse("42").unwrap(), SwitchState::Off);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!(SwitchState::parse(" 1\n").unwrap(), SwitchState::On);
    }

    #[test]
    fn test_parse_non_numeric_is_error() {
        assert!(SwitchState::parse("on").is_err());
        assert!(SwitchState::parse("").is_err());
        assert!(SwitchState::parse("1.5").is_err());
    }

    #[test]
    fn test_command_payload_mapping() {
        assert_eq!(SwitchState::from_command_payload("ON"), SwitchState::On);
        assert_eq!(SwitchState::from_command_payload("OFF"), SwitchState::Off);
        // Permissive default: anything else is Off
        assert_eq!(SwitchState::from_command_payload("on"), SwitchState::Off);
        assert_eq!(SwitchState::from_command_payload("TOGGLE"), SwitchState::Off);
        assert_eq!(SwitchState::from_command_payload(""), SwitchState::Off);
    }

    #[test]
    fn test_file_and_wire_forms() {
        assert_eq!(SwitchState::On.file_form(), "1");
        assert_eq!(SwitchState::Off.file_form(), "0");
        assert_eq!(SwitchState::On.wire_form(), "ON");
        assert_eq!(SwitchState::Off.wire_form(), "OFF");
    }

    #[test]
    fn test_display_is_wire_form() {
        assert_eq!(format!("{}", SwitchState::On), "ON");
    }
}
