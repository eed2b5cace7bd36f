//! Deterministic prompt rendering for character analysis.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{AppError, CharacterRecord, PromptConfig};

/// Rendered in place of any field the record does not carry.
pub const UNKNOWN: &str = "unknown";

static ANALYSIS_TEMPLATE: &str = include_str!("../../assets/prompts/analysis.md.j2");
static QUESTION_TEMPLATE: &str = include_str!("../../assets/prompts/question.md.j2");

#[derive(Debug, Serialize)]
struct LabeledValue {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct AnalysisContext {
    name: String,
    server: String,
    level: String,
    class: String,
    combat_power: String,
    equipment: String,
    stats: String,
    skill_completion: String,
    skills: String,
    collectibles: Vec<LabeledValue>,
    engravings: Vec<LabeledValue>,
}

#[derive(Debug, Serialize)]
struct QuestionContext<'a> {
    name: String,
    class: String,
    combat_power: String,
    level: String,
    question: &'a str,
}

/// Render the analysis prompt for `record`.
///
/// Pure: identical records always produce identical text. Equipment and
/// stats are serialized as compact JSON and capped to the configured number
/// of characters before interpolation.
pub fn build_prompt(record: &CharacterRecord, limits: &PromptConfig) -> Result<String, AppError> {
    let context = AnalysisContext {
        name: record.name.clone(),
        server: or_unknown(record.server.as_deref()),
        level: record.level.map(|l| l.to_string()).unwrap_or_else(|| UNKNOWN.to_string()),
        class: or_unknown(record.class.as_deref()),
        combat_power: format_power(record.combat_power),
        equipment: equipment_section(record, limits.equipment_chars),
        stats: stats_section(record, limits.stats_chars),
        skill_completion: record
            .skills
            .as_ref()
            .and_then(|s| s.completion_ratio)
            .map(format_percent)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        skills: record
            .skills
            .as_ref()
            .filter(|s| !s.acquired_list.is_empty())
            .map(|s| s.acquired_list.iter().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        collectibles: record
            .collectibles
            .iter()
            .map(|(category, pct)| LabeledValue {
                label: category.clone(),
                value: format_percent(*pct),
            })
            .collect(),
        engravings: record
            .engravings
            .iter()
            .map(|(group, effects)| LabeledValue {
                label: group.clone(),
                value: if effects.is_empty() { UNKNOWN.to_string() } else { effects.join(", ") },
            })
            .collect(),
    };

    render("analysis prompt", ANALYSIS_TEMPLATE, &context)
}

/// Frame a follow-up question with the record's identity.
///
/// The restatement keeps the completion provider grounded even when prior
/// turns are missing or truncated.
pub fn build_question(record: &CharacterRecord, question: &str) -> Result<String, AppError> {
    let context = QuestionContext {
        name: record.name.clone(),
        class: or_unknown(record.class.as_deref()),
        combat_power: format_power(record.combat_power),
        level: record.level.map(|l| l.to_string()).unwrap_or_else(|| UNKNOWN.to_string()),
        question: question.trim(),
    };

    render("question prompt", QUESTION_TEMPLATE, &context)
}

/// Serialized equipment section, capped to `cap` characters.
pub fn equipment_section(record: &CharacterRecord, cap: usize) -> String {
    if record.equipment.is_empty() {
        return UNKNOWN.to_string();
    }
    let json = serde_json::to_string(&record.equipment).unwrap_or_default();
    cap_chars(&json, cap)
}

/// Serialized stats section, capped to `cap` characters.
///
/// Whole-number stats are written without a fractional part.
pub fn stats_section(record: &CharacterRecord, cap: usize) -> String {
    if record.stats.is_empty() {
        return UNKNOWN.to_string();
    }
    let map: Map<String, Value> =
        record.stats.iter().map(|(name, value)| (name.clone(), stat_value(*value))).collect();
    cap_chars(&Value::Object(map).to_string(), cap)
}

/// Keep at most `cap` characters (not bytes) of `text`.
pub fn cap_chars(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// `12450` renders as `12,450`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn render<S: Serialize>(what: &str, template: &str, context: &S) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    env.render_str(template, context)
        .map_err(|err| AppError::PromptAssembly(format!("{}: {}", what, err)))
}

fn or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn format_power(value: Option<u64>) -> String {
    value.map(group_thousands).unwrap_or_else(|| UNKNOWN.to_string())
}

fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

fn stat_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
