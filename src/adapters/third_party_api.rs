//! Unofficial community API.

use std::collections::BTreeMap;

use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::adapters::http::{endpoint, get_json};
use crate::adapters::pacer::RequestPacer;
use crate::domain::configuration::PROVIDER_THIRD_PARTY;
use crate::domain::extract::number_or_zero;
use crate::domain::{
    AppError, CharacterQuery, CharacterRecord, EquipmentItem, ProviderResult, SkillSet,
    ThirdPartyApiConfig,
};
use crate::ports::CharacterProvider;

const SEARCH_PATH: &str = "/character/search";

/// Numbers this API sometimes sends pre-formatted (`"12,450"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(u64),
    Text(String),
}

impl LooseNumber {
    fn value(&self) -> Option<u64> {
        match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(text) if text.chars().any(|c| c.is_ascii_digit()) => {
                Some(number_or_zero(text))
            }
            LooseNumber::Text(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterPayload {
    #[serde(default)]
    character_name: Option<String>,
    #[serde(default)]
    server_name: Option<String>,
    #[serde(default)]
    level: Option<LooseNumber>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    power: Option<LooseNumber>,
    #[serde(default)]
    equipment: BTreeMap<String, EquipmentItem>,
    #[serde(default)]
    stats: BTreeMap<String, f64>,
    #[serde(default)]
    skills: Option<SkillsPayload>,
    #[serde(default)]
    collectibles: BTreeMap<String, f64>,
    #[serde(default)]
    engravings: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillsPayload {
    #[serde(default)]
    acquired_list: Vec<String>,
    #[serde(default)]
    completion_ratio: Option<f64>,
}

impl CharacterPayload {
    fn normalize(self, query: &CharacterQuery) -> CharacterRecord {
        let name = self
            .character_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.name().to_string());

        CharacterRecord {
            name,
            server: non_blank(self.server_name),
            level: self
                .level
                .as_ref()
                .and_then(LooseNumber::value)
                .and_then(|l| u32::try_from(l).ok()),
            class: non_blank(self.class_name),
            combat_power: self.power.as_ref().and_then(LooseNumber::value),
            equipment: self.equipment,
            stats: self.stats,
            skills: self
                .skills
                .map(|s| SkillSet::new(s.acquired_list, s.completion_ratio))
                .filter(|s| !s.is_empty()),
            collectibles: self.collectibles,
            engravings: self.engravings,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Provider backed by the community JSON API.
#[derive(Debug)]
pub struct ThirdPartyApiProvider {
    client: Client,
    base_url: Url,
    pacer: RequestPacer,
}

impl ThirdPartyApiProvider {
    pub fn new(client: Client, config: &ThirdPartyApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            pacer: RequestPacer::from_millis(config.min_interval_ms),
        }
    }

    fn lookup(&self, query: &CharacterQuery) -> Result<CharacterRecord, AppError> {
        let mut url = endpoint(&self.base_url, SEARCH_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", query.name());
            pairs.append_pair("server", query.server().unwrap_or_default());
        }

        self.pacer.wait();
        let payload: CharacterPayload = get_json(&self.client, &url)?;
        Ok(payload.normalize(query))
    }
}

impl CharacterProvider for ThirdPartyApiProvider {
    fn id(&self) -> &str {
        PROVIDER_THIRD_PARTY
    }

    fn fetch(&self, query: &CharacterQuery) -> ProviderResult {
        info!("Looking up '{}' through the third-party API", query.name());
        ProviderResult::from_result(self.id(), self.lookup(query))
    }
}
