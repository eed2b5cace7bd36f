//! Structured first-party API: search, detail, and server directory.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::adapters::http::{endpoint, get_json};
use crate::adapters::pacer::RequestPacer;
use crate::domain::configuration::PROVIDER_OFFICIAL;
use crate::domain::{
    AppError, CharacterDetail, CharacterInfo, CharacterQuery, CharacterRecord, EquipmentEntry,
    OfficialApiConfig, ProviderResult, ServerEntry,
};
use crate::ports::{CharacterDirectory, CharacterProvider};

const SEARCH_PATH: &str = "/api/character/search";
const INFO_PATH: &str = "/api/character/info";
const EQUIPMENT_PATH: &str = "/api/character/equipment";
const SERVER_LIST_PATH: &str = "/api/server/list";

/// Identifier that upstream sends either as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    list: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    character_id: WireId,
    #[serde(default)]
    name: String,
    server_id: WireId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfoResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    server_name: Option<String>,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    combat_power: Option<u64>,
    #[serde(default)]
    stats: Vec<StatEntry>,
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    name: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EquipmentResponse {
    #[serde(default)]
    equipment_list: Vec<EquipmentWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EquipmentWire {
    slot: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    enchant_level: u32,
    #[serde(default)]
    grade: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerListResponse {
    #[serde(default)]
    server_list: Vec<ServerWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerWire {
    server_id: u32,
    server_name: String,
}

/// HTTP client for the first-party character API.
#[derive(Debug)]
pub struct OfficialApiClient {
    client: Client,
    base_url: Url,
    page_size: u32,
    pacer: RequestPacer,
}

impl OfficialApiClient {
    pub fn new(client: Client, config: &OfficialApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
            pacer: RequestPacer::from_millis(config.min_interval_ms),
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, AppError> {
        self.pacer.wait();
        get_json(&self.client, url)
    }

    /// Map the query's server (numeric id or name) to a server id.
    fn resolve_server_id(&self, server: Option<&str>) -> Result<Option<String>, AppError> {
        let Some(server) = server else {
            return Ok(None);
        };
        if server.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Some(server.to_string()));
        }

        let servers = self.list_servers()?;
        servers
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(server) || entry.name == server)
            .map(|entry| Some(entry.id.to_string()))
            .ok_or_else(|| AppError::upstream(format!("Unknown server '{}'", server), None))
    }

    fn search(
        &self,
        query: &CharacterQuery,
        server_id: Option<&str>,
    ) -> Result<Vec<SearchHit>, AppError> {
        let mut url = endpoint(&self.base_url, SEARCH_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("keyword", query.name());
            if let Some(faction) = query.faction() {
                pairs.append_pair("race", &faction.code().to_string());
            }
            if let Some(server_id) = server_id {
                pairs.append_pair("serverId", server_id);
            }
            pairs.append_pair("page", "1");
            pairs.append_pair("size", &self.page_size.to_string());
        }

        let response: SearchResponse = self.get(&url)?;
        debug!("Official search for '{}' returned {} hit(s)", query.name(), response.list.len());
        Ok(response.list)
    }

    fn lookup(&self, query: &CharacterQuery) -> Result<CharacterRecord, AppError> {
        let server_id = self.resolve_server_id(query.server())?;
        let hits = self.search(query, server_id.as_deref())?;

        let hit = hits
            .iter()
            .find(|hit| hit.name.eq_ignore_ascii_case(query.name()) || hit.name == query.name())
            .or_else(|| hits.first())
            .ok_or_else(|| {
                AppError::upstream(format!("No character named '{}'", query.name()), None)
            })?;

        let mut record = self
            .fetch_detail(&hit.character_id.to_string(), &hit.server_id.to_string())?
            .into_record();
        if record.name.trim().is_empty() {
            record.name = query.name().to_string();
        }
        Ok(record)
    }

    fn with_id_params(
        &self,
        path: &str,
        character_id: &str,
        server_id: &str,
    ) -> Result<Url, AppError> {
        let mut url = endpoint(&self.base_url, path)?;
        url.query_pairs_mut()
            .append_pair("characterId", character_id)
            .append_pair("serverId", server_id);
        Ok(url)
    }
}

impl CharacterDirectory for OfficialApiClient {
    fn fetch_detail(
        &self,
        character_id: &str,
        server_id: &str,
    ) -> Result<CharacterDetail, AppError> {
        if character_id.trim().is_empty() || server_id.trim().is_empty() {
            return Err(AppError::validation("Character id and server id are required"));
        }

        let info_url = self.with_id_params(INFO_PATH, character_id, server_id)?;
        let info: InfoResponse = self.get(&info_url)?;

        let equipment_url = self.with_id_params(EQUIPMENT_PATH, character_id, server_id)?;
        let equipment: EquipmentResponse = self.get(&equipment_url)?;

        let stats: BTreeMap<String, f64> =
            info.stats.into_iter().map(|stat| (stat.name, stat.value)).collect();

        Ok(CharacterDetail {
            info: CharacterInfo {
                character_id: character_id.to_string(),
                server_id: server_id.to_string(),
                name: info.name,
                server_name: info.server_name,
                level: info.level,
                class_name: info.class_name,
                combat_power: info.combat_power,
                stats,
            },
            equipment: equipment
                .equipment_list
                .into_iter()
                .map(|item| EquipmentEntry {
                    slot: item.slot,
                    name: item.name,
                    enhancement_level: item.enchant_level,
                    grade: item.grade,
                })
                .collect(),
        })
    }

    fn list_servers(&self) -> Result<Vec<ServerEntry>, AppError> {
        let url = endpoint(&self.base_url, SERVER_LIST_PATH)?;
        let response: ServerListResponse = self.get(&url)?;
        Ok(response
            .server_list
            .into_iter()
            .map(|server| ServerEntry { id: server.server_id, name: server.server_name })
            .collect())
    }
}

/// Provider backed by the first-party API.
#[derive(Debug)]
pub struct OfficialApiProvider {
    client: OfficialApiClient,
}

impl OfficialApiProvider {
    pub fn new(client: OfficialApiClient) -> Self {
        Self { client }
    }
}

impl CharacterProvider for OfficialApiProvider {
    fn id(&self) -> &str {
        PROVIDER_OFFICIAL
    }

    fn fetch(&self, query: &CharacterQuery) -> ProviderResult {
        info!("Looking up '{}' through the official API", query.name());
        ProviderResult::from_result(self.id(), self.client.lookup(query))
    }
}
