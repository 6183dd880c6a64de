use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Icon shown for characters that never had an image assigned.
pub const PLACEHOLDER_ICON: &str = "./images/pfp.jpg";

/// Stable identity for a character within a registry.
///
/// Ids are opaque and assigned at creation; they are not part of the
/// persisted snapshot, which keeps characters in display order instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharId(pub(crate) u64);

impl fmt::Display for CharId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "char-{}", self.0)
    }
}

/// One of the two opposing counters on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Counter {
    Merit,
    Demerit,
}

impl Counter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merit => "merit",
            Self::Demerit => "demerit",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Counter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merit" => Ok(Self::Merit),
            "demerit" => Ok(Self::Demerit),
            _ => Err(()),
        }
    }
}

/// Visual leaning of a card, derived from the sign of merit - demerit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    None,
    Merit,
    Demerit,
}

impl Tint {
    /// CSS class carried by the card element, empty when neutral.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Merit => "merit",
            Self::Demerit => "demerit",
        }
    }
}

/// A tracked character card.
///
/// Serialized in the original wire format (camelCase keys) so snapshots
/// written by earlier builds of the tracker round-trip unchanged. Every
/// field defaults so partial or hand-edited JSON still hydrates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub anomaly: String,
    #[serde(default)]
    pub reality: String,
    #[serde(default)]
    pub competency: String,
    #[serde(default)]
    pub merit: u32,
    #[serde(default)]
    pub demerit: u32,
    #[serde(default)]
    pub session_merit: u32,
    #[serde(default)]
    pub session_demerit: u32,
    /// Image URL or data URI; empty means "use the placeholder".
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub dead: bool,
    /// Back-face text, independently editable.
    #[serde(default)]
    pub prime_directive: String,
    #[serde(default)]
    pub encouraged_behavior: String,
}

impl Character {
    /// Create a character with the given display name and defaults elsewhere.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn counter(&self, which: Counter) -> u32 {
        match which {
            Counter::Merit => self.merit,
            Counter::Demerit => self.demerit,
        }
    }

    pub const fn counter_mut(&mut self, which: Counter) -> &mut u32 {
        match which {
            Counter::Merit => &mut self.merit,
            Counter::Demerit => &mut self.demerit,
        }
    }

    /// Derived tint classification; never stored.
    #[must_use]
    pub const fn tint(&self) -> Tint {
        if self.merit > self.demerit {
            Tint::Merit
        } else if self.demerit > self.merit {
            Tint::Demerit
        } else {
            Tint::None
        }
    }

    /// Icon to render, falling back to the placeholder for empty values.
    #[must_use]
    pub fn icon_or_placeholder(&self) -> &str {
        if self.icon.is_empty() {
            PLACEHOLDER_ICON
        } else {
            &self.icon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_follows_counter_sign() {
        let mut c = Character::default();
        assert_eq!(c.tint(), Tint::None);
        c.merit = 3;
        assert_eq!(c.tint(), Tint::Merit);
        c.demerit = 5;
        assert_eq!(c.tint(), Tint::Demerit);
        c.merit = 5;
        assert_eq!(c.tint(), Tint::None);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let c = Character {
            session_merit: 2,
            prime_directive: "serve the branch".into(),
            ..Character::named("Irving")
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"sessionMerit\":2"));
        assert!(json.contains("\"primeDirective\""));
        assert!(!json.contains("session_merit"));
    }

    #[test]
    fn partial_json_hydrates_with_defaults() {
        let c: Character = serde_json::from_str(r#"{"name":"Dylan","merit":4}"#).unwrap();
        assert_eq!(c.name, "Dylan");
        assert_eq!(c.merit, 4);
        assert_eq!(c.demerit, 0);
        assert!(!c.dead);
        assert_eq!(c.icon_or_placeholder(), PLACEHOLDER_ICON);
    }
}
