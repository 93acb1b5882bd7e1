//! Preferred contact time options.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// When the visitor would like to be contacted.
///
/// Serialized as the option label; `Anytime` is the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PreferredTime {
    #[default]
    Anytime,
    Morning,
    Afternoon,
    Evening,
}

impl PreferredTime {
    /// All options, in the order the form lists them.
    pub const OPTIONS: [PreferredTime; 4] = [
        PreferredTime::Anytime,
        PreferredTime::Morning,
        PreferredTime::Afternoon,
        PreferredTime::Evening,
    ];

    /// The submitted value for this option.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Anytime => "",
            Self::Morning => "Morning (9am–12pm)",
            Self::Afternoon => "Afternoon (12pm–4pm)",
            Self::Evening => "Evening (4pm–8pm)",
        }
    }

    /// Text shown for the option in a picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Anytime => "Anytime",
            other => other.label(),
        }
    }

    pub fn is_anytime(&self) -> bool {
        matches!(self, Self::Anytime)
    }
}

impl FromStr for PreferredTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::OPTIONS
            .iter()
            .copied()
            .find(|opt| opt.label() == s)
            .ok_or_else(|| ValidationError::UnknownPreferredTime(s.to_string()))
    }
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PreferredTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PreferredTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("".parse::<PreferredTime>().unwrap(), PreferredTime::Anytime);
        assert_eq!(
            "Morning (9am–12pm)".parse::<PreferredTime>().unwrap(),
            PreferredTime::Morning
        );
        assert_eq!(
            "Evening (4pm–8pm)".parse::<PreferredTime>().unwrap(),
            PreferredTime::Evening
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        // Hyphen instead of en dash is not an offered option.
        assert!("Morning (9am-12pm)".parse::<PreferredTime>().is_err());
        assert!("Night".parse::<PreferredTime>().is_err());
    }

    #[test]
    fn test_serialize_anytime_as_empty() {
        let json = serde_json::to_string(&PreferredTime::Anytime).unwrap();
        assert_eq!(json, "\"\"");
        let back: PreferredTime = serde_json::from_str("\"Afternoon (12pm–4pm)\"").unwrap();
        assert_eq!(back, PreferredTime::Afternoon);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(PreferredTime::Anytime.display_name(), "Anytime");
        assert_eq!(PreferredTime::Morning.display_name(), "Morning (9am–12pm)");
    }
}
