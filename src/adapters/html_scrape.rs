//! Character page scraping with named class selectors.
//!
//! The selectors below describe the page layout this provider expects.
//! Every value falls back to its zero value when its element is missing
//! (see [`crate::domain::extract`]); only a page with no profile at all is
//! treated as a failure.

use std::collections::BTreeMap;

use log::{debug, info};
use reqwest::blocking::Client;
use url::Url;

use crate::adapters::http::{ACCEPT_HTML, endpoint, get_text};
use crate::adapters::markup::Fragment;
use crate::adapters::pacer::RequestPacer;
use crate::domain::configuration::PROVIDER_SCRAPE;
use crate::domain::extract::{number_or_zero, percentage_or_zero, text_or_default};
use crate::domain::{
    AppError, CharacterQuery, CharacterRecord, EquipmentItem, ProviderResult, ScrapeConfig,
    SkillSet,
};
use crate::ports::CharacterProvider;

const SERVER: &str = ".server-name";
const LEVEL: &str = ".character-level";
const CLASS: &str = ".character-class";
const COMBAT_POWER: &str = ".combat-power";
const PROFILE: [&str; 4] = [SERVER, LEVEL, CLASS, COMBAT_POWER];

/// (slot, name, level, grade)
const GEAR: [(&str, &str, &str, &str); 2] = [
    ("weapon", ".weapon-name", ".weapon-level", ".weapon-grade"),
    ("armor", ".armor-name", ".armor-level", ".armor-grade"),
];

const NUMERIC_STATS: [(&str, &str); 5] = [
    ("attack", ".stat-attack"),
    ("defense", ".stat-defense"),
    ("hp", ".stat-hp"),
    ("accuracy", ".stat-accuracy"),
    ("evasion", ".stat-evasion"),
];

const PERCENT_STATS: [(&str, &str); 2] =
    [("criticalRate", ".stat-crit-rate"), ("criticalDamage", ".stat-crit-dmg")];

const COLLECTIONS: [(&str, &str); 4] = [
    ("wild", ".pet-wild-percent"),
    ("intelligence", ".pet-intel-percent"),
    ("nature", ".pet-nature-percent"),
    ("transformation", ".pet-trans-percent"),
];

const ENGRAVINGS: [(&str, &str); 2] =
    [("weapon", ".weapon-engraving"), ("armor", ".armor-engraving")];

/// Provider that reads the public character page.
#[derive(Debug)]
pub struct HtmlScrapeProvider {
    client: Client,
    base_url: Url,
    search_path: String,
    pacer: RequestPacer,
}

impl HtmlScrapeProvider {
    pub fn new(client: Client, config: &ScrapeConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            search_path: config.search_path.clone(),
            pacer: RequestPacer::from_millis(config.min_interval_ms),
        }
    }

    fn lookup(&self, query: &CharacterQuery) -> Result<CharacterRecord, AppError> {
        let mut url = endpoint(&self.base_url, &self.search_path)?;
        url.query_pairs_mut()
            .append_pair("characterName", query.name())
            .append_pair("server", query.server().unwrap_or_default());

        self.pacer.wait();
        let html = get_text(&self.client, &url, ACCEPT_HTML)?;
        debug!("Fetched {} bytes of character page", html.len());

        parse_character_page(&html, query.name())
    }
}

impl CharacterProvider for HtmlScrapeProvider {
    fn id(&self) -> &str {
        PROVIDER_SCRAPE
    }

    fn fetch(&self, query: &CharacterQuery) -> ProviderResult {
        info!("Looking up '{}' by scraping the character page", query.name());
        ProviderResult::from_result(self.id(), self.lookup(query))
    }
}

/// Normalize a character page into a record named `name`.
pub fn parse_character_page(html: &str, name: &str) -> Result<CharacterRecord, AppError> {
    let page = Fragment::new(html);
    if PROFILE.iter().all(|selector| page.select_one(selector).is_none()) {
        return Err(AppError::upstream(
            format!("No character profile found on page for '{}'", name),
            None,
        ));
    }

    Ok(CharacterRecord {
        name: name.to_string(),
        server: present(text(&page, SERVER)),
        level: u32::try_from(number(&page, LEVEL)).ok(),
        class: present(text(&page, CLASS)),
        combat_power: Some(number(&page, COMBAT_POWER)),
        equipment: equipment(&page),
        stats: stats(&page),
        skills: Some(skills(&page)),
        collectibles: COLLECTIONS
            .iter()
            .map(|(key, selector)| (key.to_string(), percentage_or_zero(&text(&page, selector))))
            .collect(),
        engravings: ENGRAVINGS
            .iter()
            .map(|(group, selector)| (group.to_string(), texts(&page, selector, ".engraving-text")))
            .collect(),
    })
}

fn text(scope: &Fragment<'_>, selector: &str) -> String {
    text_or_default(scope.select_one(selector).map(|f| f.text()).as_deref())
}

fn number(scope: &Fragment<'_>, selector: &str) -> u64 {
    number_or_zero(&text(scope, selector))
}

fn present(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Non-empty `inner` texts of every `outer` element.
fn texts(page: &Fragment<'_>, outer: &str, inner: &str) -> Vec<String> {
    page.select(outer).iter().map(|item| text(item, inner)).filter(|t| !t.is_empty()).collect()
}

fn equipment(page: &Fragment<'_>) -> BTreeMap<String, EquipmentItem> {
    let mut equipment = BTreeMap::new();

    for (slot, name, level, grade) in GEAR {
        let item_name = text(page, name);
        if item_name.is_empty() {
            continue;
        }
        equipment.insert(
            slot.to_string(),
            EquipmentItem {
                name: item_name,
                enhancement_level: u32::try_from(number(page, level)).unwrap_or(0),
                grade: present(text(page, grade)),
            },
        );
    }

    for (index, item) in page.select(".accessory-item").iter().enumerate() {
        let item_name = text(item, ".item-name");
        if item_name.is_empty() {
            continue;
        }
        let slot = present(text(item, ".slot-name"))
            .unwrap_or_else(|| format!("accessory {}", index + 1));
        let key = unique_key(&equipment, slot);
        equipment.insert(
            key,
            EquipmentItem {
                name: item_name,
                enhancement_level: u32::try_from(number(item, ".item-level")).unwrap_or(0),
                grade: None,
            },
        );
    }

    equipment
}

fn unique_key<V>(map: &BTreeMap<String, V>, key: String) -> String {
    if !map.contains_key(&key) {
        return key;
    }
    (2..).map(|n| format!("{} {}", key, n)).find(|k| !map.contains_key(k)).unwrap_or(key)
}

fn stats(page: &Fragment<'_>) -> BTreeMap<String, f64> {
    let numeric =
        NUMERIC_STATS.iter().map(|(key, sel)| (key.to_string(), number(page, sel) as f64));
    let percent = PERCENT_STATS
        .iter()
        .map(|(key, sel)| (key.to_string(), percentage_or_zero(&text(page, sel))));
    numeric.chain(percent).collect()
}

fn skills(page: &Fragment<'_>) -> SkillSet {
    let completion = number(page, ".stigma-completion") as f64;
    SkillSet::new(texts(page, ".stigma-skill", ".skill-name"), Some(completion))
}
