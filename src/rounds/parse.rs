// Collection-log ingestion: the only place raw JSON shapes are trusted or rejected
use super::{Group, Round, RoundStore};
use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct RawRound {
    #[serde(default)]
    uid: Option<u64>,
    #[serde(default)]
    time: Option<f64>,
    groups: Vec<RawGroup>,
}

#[derive(Deserialize)]
struct RawGroup {
    name: String,
    plots: Vec<RawPlot>,
}

#[derive(Deserialize)]
struct RawPlot {
    id: RawId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_item_id(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Parse a collection log into rounds
///
/// Accepts concatenated JSON objects (one per logged round, abutting or
/// whitespace/newline separated) as well as JSON arrays of round objects.
/// Any record with a missing or ill-typed field rejects the whole batch.
pub fn parse_round_log(input: &str) -> Result<RoundStore> {
    let mut store = RoundStore::new();
    let mut record = 0usize;

    let stream = serde_json::Deserializer::from_str(input).into_iter::<Value>();
    for value in stream {
        let value = value.map_err(|e| AnalysisError::MalformedInputRecord {
            record,
            reason: format!("invalid JSON: {}", e),
        })?;

        match value {
            Value::Array(items) => {
                for item in items {
                    store.push(parse_round(record, item)?);
                    record += 1;
                }
            }
            other => {
                store.push(parse_round(record, other)?);
                record += 1;
            }
        }
    }

    tracing::debug!(
        rounds = store.len(),
        valid = store.valid_round_count(),
        "parsed round log"
    );

    Ok(store)
}

fn parse_round(record: usize, value: Value) -> Result<Round> {
    let raw: RawRound =
        serde_json::from_value(value).map_err(|e| AnalysisError::MalformedInputRecord {
            record,
            reason: e.to_string(),
        })?;

    let mut groups = Vec::with_capacity(raw.groups.len());
    for group in raw.groups {
        let mut members = Vec::with_capacity(group.plots.len());
        for plot in group.plots {
            let id = plot.id.into_item_id();
            if id.trim().is_empty() {
                return Err(AnalysisError::MalformedInputRecord {
                    record,
                    reason: format!("empty plot id in group {:?}", group.name),
                });
            }
            members.push(id);
        }
        groups.push(Group::new(group.name, members));
    }

    Ok(Round {
        uid: raw.uid,
        time: raw.time,
        groups,
    })
}
