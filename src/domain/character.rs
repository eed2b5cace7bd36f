//! Character query and normalized character record.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Playable faction, sent upstream as a numeric race code.
///
/// Deserializes from either the name or the race code (`1`, `"2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "FactionWire")]
pub enum Faction {
    Elyos,
    Asmodian,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FactionWire {
    Code(u64),
    Text(String),
}

impl TryFrom<FactionWire> for Faction {
    type Error = AppError;

    fn try_from(wire: FactionWire) -> Result<Self, Self::Error> {
        match wire {
            FactionWire::Code(code) => code.to_string().parse(),
            FactionWire::Text(text) => text.parse(),
        }
    }
}

impl Faction {
    /// Race code used by the official search endpoint.
    pub fn code(&self) -> u8 {
        match self {
            Faction::Elyos => 1,
            Faction::Asmodian => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::Elyos => "elyos",
            Faction::Asmodian => "asmodian",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Faction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "elyos" | "1" => Ok(Faction::Elyos),
            "asmodian" | "2" => Ok(Faction::Asmodian),
            other => Err(AppError::Validation(format!(
                "Invalid faction '{}': must be one of elyos, asmodian",
                other
            ))),
        }
    }
}

/// Identity of the character to look up.
///
/// Constructed once per request through [`CharacterQuery::new`], which
/// rejects blank names. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterQuery {
    name: String,
    server: Option<String>,
    faction: Option<Faction>,
}

impl CharacterQuery {
    pub fn new(
        name: impl Into<String>,
        server: Option<String>,
        faction: Option<Faction>,
    ) -> Result<Self, AppError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Character name must not be empty"));
        }
        let server = server.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(Self { name, server, faction })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn faction(&self) -> Option<Faction> {
        self.faction
    }
}

/// Inbound search shapes accepted by the search operation.
///
/// Older callers send `{name, server?}` (or `characterName`); newer ones send
/// `{keyword, faction?, serverId?}`. Both normalize to [`CharacterQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SearchRequest {
    Keyword {
        keyword: String,
        #[serde(default)]
        faction: Option<Faction>,
        #[serde(default, rename = "serverId")]
        server_id: Option<ServerIdInput>,
    },
    Name {
        #[serde(alias = "characterName")]
        name: String,
        #[serde(default)]
        server: Option<String>,
    },
}

/// Server id as received on the wire: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServerIdInput {
    Number(u64),
    Text(String),
}

impl ServerIdInput {
    fn into_string(self) -> String {
        match self {
            ServerIdInput::Number(id) => id.to_string(),
            ServerIdInput::Text(text) => text,
        }
    }
}

impl SearchRequest {
    pub fn into_query(self) -> Result<CharacterQuery, AppError> {
        match self {
            SearchRequest::Keyword { keyword, faction, server_id } => {
                CharacterQuery::new(keyword, server_id.map(ServerIdInput::into_string), faction)
            }
            SearchRequest::Name { name, server } => CharacterQuery::new(name, server, None),
        }
    }
}

/// A single equipped item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enhancement_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Acquired skills and the overall completion ratio (0 to 100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSet {
    #[serde(default)]
    pub acquired_list: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_ratio: Option<f64>,
}

impl SkillSet {
    pub fn new(acquired: impl IntoIterator<Item = String>, completion_ratio: Option<f64>) -> Self {
        Self {
            acquired_list: acquired.into_iter().filter(|s| !s.trim().is_empty()).collect(),
            completion_ratio: completion_ratio.map(|r| r.clamp(0.0, 100.0)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.acquired_list.is_empty() && self.completion_ratio.is_none()
    }
}

/// Normalized character data shared by every provider.
///
/// Only `name` is required. Empty maps mean the provider had no data for
/// that section; downstream rendering treats them like absent fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat_power: Option<u64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub equipment: BTreeMap<String, EquipmentItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stats: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillSet>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub collectibles: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub engravings: BTreeMap<String, Vec<String>>,
}

impl CharacterRecord {
    /// Record carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Character record must have a name"));
        }
        Ok(())
    }

    /// Parse a record from JSON, as produced by the search operation.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let record: CharacterRecord = serde_json::from_str(content).map_err(|e| {
            AppError::ParseError { what: "character record".into(), details: e.to_string() }
        })?;
        record.validate()?;
        Ok(record)
    }
}
