//! JSON record format for family data files.
//!
//! Records use the family-tree field names: `fid`/`mid` for parents, `pids` for spouses and
//! `Birth` for the birth date. Empty strings stand for "not recorded".

use crate::graph::{Gender, Person};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Spouse IDs as either a JSON list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpouseIds {
    List(Vec<String>),
    Joined(String),
}

impl Default for SpouseIds {
    fn default() -> Self {
        SpouseIds::List(Vec::new())
    }
}

impl SpouseIds {
    fn into_ids(self) -> Vec<String> {
        let raw = match self {
            SpouseIds::List(ids) => ids,
            SpouseIds::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        let mut ids: Vec<String> = Vec::with_capacity(raw.len());
        for id in raw {
            let id = id.trim();
            if !id.is_empty() && !ids.iter().any(|existing| existing == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}

/// One person as stored in the family data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fid: Option<String>,
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub pids: SpouseIds,
    #[serde(default, rename = "Birth")]
    pub birth: Option<String>,
    #[serde(default, alias = "sex")]
    pub gender: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PersonRecord {
    /// Convert to a [`Person`]. Returns `None` for records without an ID.
    pub fn into_person(self) -> Option<Person> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return None;
        }
        Some(Person {
            id,
            name: self.name.trim().to_string(),
            father_id: non_empty(self.fid),
            mother_id: non_empty(self.mid),
            spouse_ids: self.pids.into_ids(),
            birth: non_empty(self.birth),
            gender: self
                .gender
                .as_deref()
                .map_or(Gender::Unknown, Gender::from_marker),
        })
    }
}

/// Parse a family data file into persons, skipping records without an ID.
pub fn people_from_json(json: &str) -> Result<Vec<Person>> {
    let records: Vec<PersonRecord> =
        serde_json::from_str(json).context("failed to deserialize family data from JSON")?;
    let total = records.len();
    let people: Vec<Person> = records
        .into_iter()
        .filter_map(PersonRecord::into_person)
        .collect();
    if people.len() < total {
        tracing::warn!("skipped {} family record(s) without an id", total - people.len());
    }
    Ok(people)
}
