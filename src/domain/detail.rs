//! Direct-by-id character detail and the upstream server directory.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{CharacterRecord, EquipmentItem};

/// Profile section of a character detail lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInfo {
    pub character_id: String,
    pub server_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combat_power: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub stats: BTreeMap<String, f64>,
}

/// One equipped item as listed by the equipment endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentEntry {
    pub slot: String,
    pub name: String,
    pub enhancement_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Result of `fetch_detail`: profile plus equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDetail {
    pub info: CharacterInfo,
    pub equipment: Vec<EquipmentEntry>,
}

impl CharacterDetail {
    /// Normalize into the shared record shape.
    ///
    /// Repeated slots (two rings, two earrings) keep every item by suffixing
    /// the slot with its ordinal.
    pub fn into_record(self) -> CharacterRecord {
        let mut equipment = BTreeMap::new();
        for entry in self.equipment {
            let mut slot = entry.slot.clone();
            let mut ordinal = 1;
            while equipment.contains_key(&slot) {
                ordinal += 1;
                slot = format!("{} {}", entry.slot, ordinal);
            }
            equipment.insert(
                slot,
                EquipmentItem {
                    name: entry.name,
                    enhancement_level: entry.enhancement_level,
                    grade: entry.grade,
                },
            );
        }

        let server = self.info.server_name.or_else(|| Some(self.info.server_id));

        CharacterRecord {
            name: self.info.name,
            server: server.filter(|s| !s.is_empty()),
            level: self.info.level,
            class: self.info.class_name,
            combat_power: self.info.combat_power,
            equipment,
            stats: self.info.stats,
            ..Default::default()
        }
    }
}

/// Entry in the upstream server directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    pub id: u32,
    pub name: String,
}

/// Server directory listing.
///
/// A degraded listing has no servers and carries the upstream error; callers
/// treat it as "service degraded", not as a hard failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerListing {
    pub servers: Vec<ServerEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerListing {
    pub fn available(servers: Vec<ServerEntry>) -> Self {
        Self { servers, error: None }
    }

    pub fn degraded(error: impl Into<String>) -> Self {
        Self { servers: Vec::new(), error: Some(error.into()) }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slot: &str, name: &str, level: u32) -> EquipmentEntry {
        EquipmentEntry {
            slot: slot.to_string(),
            name: name.to_string(),
            enhancement_level: level,
            grade: None,
        }
    }

    #[test]
    fn into_record_keeps_repeated_slots() {
        let detail = CharacterDetail {
            info: CharacterInfo {
                character_id: "c-1".into(),
                server_id: "1001".into(),
                name: "Hero".into(),
                server_name: Some("Siel".into()),
                level: Some(45),
                ..Default::default()
            },
            equipment: vec![
                entry("ring", "Ring of Dawn", 3),
                entry("ring", "Ring of Dusk", 4),
                entry("weapon", "Greatsword", 15),
            ],
        };

        let record = detail.into_record();
        assert_eq!(record.name, "Hero");
        assert_eq!(record.server.as_deref(), Some("Siel"));
        assert_eq!(record.equipment.len(), 3);
        assert_eq!(record.equipment["ring 2"].name, "Ring of Dusk");
        assert_eq!(record.equipment["weapon"].enhancement_level, 15);
    }

    #[test]
    fn into_record_falls_back_to_server_id() {
        let detail = CharacterDetail {
            info: CharacterInfo {
                character_id: "c-1".into(),
                server_id: "1001".into(),
                name: "Hero".into(),
                ..Default::default()
            },
            equipment: vec![],
        };
        assert_eq!(detail.into_record().server.as_deref(), Some("1001"));
    }

    #[test]
    fn degraded_listing_is_empty() {
        let listing = ServerListing::degraded("HTTP 500");
        assert!(listing.is_degraded());
        assert!(listing.servers.is_empty());
    }
}
