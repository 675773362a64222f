//! Class entry model

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{ClockTime, Day};

/// Display palette for class blocks
///
/// Serialized by lowercase name. Deserialization also accepts the HSL
/// string, which is how older shared links carry the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassColor {
    #[default]
    Blue,
    Rose,
    Emerald,
    Amber,
    Violet,
    Cyan,
    Orange,
    Teal,
}

impl ClassColor {
    /// Palette in presentation order
    pub fn palette() -> &'static [ClassColor] {
        &[
            ClassColor::Blue,
            ClassColor::Rose,
            ClassColor::Emerald,
            ClassColor::Amber,
            ClassColor::Violet,
            ClassColor::Cyan,
            ClassColor::Orange,
            ClassColor::Teal,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClassColor::Blue => "Blue",
            ClassColor::Rose => "Rose",
            ClassColor::Emerald => "Emerald",
            ClassColor::Amber => "Amber",
            ClassColor::Violet => "Violet",
            ClassColor::Cyan => "Cyan",
            ClassColor::Orange => "Orange",
            ClassColor::Teal => "Teal",
        }
    }

    /// HSL components as `"<hue> <sat>% <light>%"`
    pub fn hsl(&self) -> &'static str {
        match self {
            ClassColor::Blue => "220 90% 56%",
            ClassColor::Rose => "350 80% 55%",
            ClassColor::Emerald => "160 84% 39%",
            ClassColor::Amber => "38 92% 50%",
            ClassColor::Violet => "270 76% 53%",
            ClassColor::Cyan => "190 90% 45%",
            ClassColor::Orange => "25 95% 53%",
            ClassColor::Teal => "174 72% 40%",
        }
    }

    /// Palette color by name (any case) or by its HSL string
    pub fn from_key(key: &str) -> Option<ClassColor> {
        let key = key.trim();
        Self::palette()
            .iter()
            .copied()
            .find(|c| c.display_name().eq_ignore_ascii_case(key) || c.hsl() == key)
    }

    /// First palette color not in `used`, wrapping to the first color
    pub fn next_unused<'a>(used: impl IntoIterator<Item = &'a ClassColor>) -> ClassColor {
        let used: Vec<&ClassColor> = used.into_iter().collect();
        Self::palette()
            .iter()
            .copied()
            .find(|c| !used.iter().any(|u| *u == c))
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for ClassColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown class color '{}'", key)))
    }
}

impl std::fmt::Display for ClassColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Every field of an entry except its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub name: String,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub days: BTreeSet<Day>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub color: ClassColor,
}

/// One scheduled class or activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub days: BTreeSet<Day>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default)]
    pub color: ClassColor,
}

impl ClassEntry {
    /// Create an entry with a fresh id
    pub fn new(fields: EntryFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: EntryFields) -> Self {
        Self {
            id,
            name: fields.name,
            instructor: fields.instructor,
            location: fields.location,
            days: fields.days,
            start_time: fields.start_time,
            end_time: fields.end_time,
            color: fields.color,
        }
    }

    /// Replace every field but the id
    pub fn apply(&mut self, fields: EntryFields) {
        *self = Self::with_id(self.id, fields);
    }

    /// Same content under a new id
    pub fn reissued(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn fields(&self) -> EntryFields {
        EntryFields {
            name: self.name.clone(),
            instructor: self.instructor.clone(),
            location: self.location.clone(),
            days: self.days.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color,
        }
    }

    pub fn meets_on(&self, day: Day) -> bool {
        self.days.contains(&day)
    }

    /// Length in minutes; zero when the end is not after the start
    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}
