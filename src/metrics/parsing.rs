//! Interpretation of skill-performance and sentiment completions.
//!
//! JSON is tried first, then the `SKILL:` / `SCORE:` / `REASON:` line format.
//! Anything that cannot be read degrades to neutral values.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::core::constants::{messages, neutral};
use crate::core::types::{SentimentResult, SkillMetric};
use crate::core::utils::{preview, skill_key};
use crate::inference::parsing::{labelled_value, strip_code_fences};

/// One metric per required skill, keyed by the required skill's name.
pub fn skill_metrics(raw: &str, required: &[String]) -> BTreeMap<String, SkillMetric> {
    let parsed = parse_skill_json(raw).unwrap_or_else(|| parse_skill_lines(raw));
    if parsed.is_empty() {
        warn!("Skill evaluation output could not be interpreted: {}", preview(raw, 300));
    }

    required
        .iter()
        .map(|name| {
            let metric = parsed.get(&skill_key(name)).cloned().unwrap_or_else(|| {
                debug!("No evaluation for skill '{}'; using neutral score", name);
                neutral_skill()
            });
            (name.clone(), metric)
        })
        .collect()
}

pub fn neutral_skill() -> SkillMetric {
    SkillMetric {
        score: neutral::SKILL_SCORE,
        reasoning: messages::SKILL_EVALUATION_UNAVAILABLE.to_string(),
    }
}

pub fn sentiment(raw: &str) -> SentimentResult {
    let (score, reasoning) = match parse_sentiment_json(raw).or_else(|| parse_sentiment_lines(raw)) {
        Some(found) => found,
        None => {
            warn!("Sentiment output could not be interpreted: {}", preview(raw, 300));
            return unparseable_sentiment();
        }
    };

    SentimentResult {
        score: score.clamp(neutral::SENTIMENT_MIN, neutral::SENTIMENT_MAX),
        reasoning,
    }
}

pub fn unparseable_sentiment() -> SentimentResult {
    SentimentResult {
        score: neutral::SENTIMENT_SCORE,
        reasoning: messages::SENTIMENT_UNPARSEABLE.to_string(),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_score(s),
        _ => None,
    }
}

/// Non-finite values such as `NaN` or `inf` count as unreadable.
fn parse_score(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
}

fn text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn skill_metric(value: &Value) -> SkillMetric {
    let score = match value {
        Value::Object(fields) => fields.get("score").and_then(number),
        other => number(other),
    };
    let reasoning = match value {
        Value::Object(fields) => text(fields.get("reasoning").or_else(|| fields.get("reason"))),
        _ => String::new(),
    };

    match score {
        Some(score) => SkillMetric {
            score: score.clamp(0.0, 100.0),
            reasoning,
        },
        None => neutral_skill(),
    }
}

fn parse_skill_json(raw: &str) -> Option<HashMap<String, SkillMetric>> {
    let value: Value = serde_json::from_str(&strip_code_fences(raw)).ok()?;
    let skills = match &value {
        Value::Object(fields) => fields.get("skills").cloned().unwrap_or_else(|| value.clone()),
        Value::Array(_) => value.clone(),
        _ => return None,
    };

    let mut out = HashMap::new();
    match skills {
        Value::Object(map) => collect_map(&map, &mut out),
        Value::Array(items) => {
            for item in &items {
                let Some(name) = item.get("name").and_then(Value::as_str) else {
                    continue;
                };
                out.insert(skill_key(name), skill_metric(item));
            }
        }
        _ => return None,
    }
    Some(out)
}

fn collect_map(map: &Map<String, Value>, out: &mut HashMap<String, SkillMetric>) {
    for (name, value) in map {
        out.insert(skill_key(name), skill_metric(value));
    }
}

fn parse_skill_lines(raw: &str) -> HashMap<String, SkillMetric> {
    let mut out = HashMap::new();
    let mut current: Option<(String, SkillMetric)> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(name) = labelled_value(line, "SKILL") {
            if let Some((key, metric)) = current.take() {
                out.insert(key, metric);
            }
            current = Some((
                skill_key(name),
                SkillMetric {
                    score: neutral::SKILL_SCORE,
                    reasoning: String::new(),
                },
            ));
        } else if let Some(score) = labelled_value(line, "SCORE") {
            if let Some((_, metric)) = current.as_mut() {
                metric.score = parse_score(score)
                    .map(|s| s.clamp(0.0, 100.0))
                    .unwrap_or(neutral::SKILL_SCORE);
            }
        } else if let Some(reason) = labelled_value(line, "REASON") {
            if let Some((_, metric)) = current.as_mut() {
                metric.reasoning = reason.to_string();
            }
        }
    }

    if let Some((key, metric)) = current {
        out.insert(key, metric);
    }
    out
}

fn parse_sentiment_json(raw: &str) -> Option<(f64, String)> {
    let value: Value = serde_json::from_str(&strip_code_fences(raw)).ok()?;
    let fields = value.as_object()?;
    let score = fields.get("score").and_then(number)?;
    Some((score, text(fields.get("reasoning").or_else(|| fields.get("reason")))))
}

fn parse_sentiment_lines(raw: &str) -> Option<(f64, String)> {
    let mut score = None;
    let mut reason = None;
    for line in raw.lines() {
        if let Some(value) = labelled_value(line, "SCORE") {
            score = parse_score(value);
        } else if let Some(value) = labelled_value(line, "REASON") {
            reason = Some(value.to_string());
        }
    }
    Some((score?, reason?))
}
