//! Read family data and relationship dictionaries from disk.

use crate::config::KinConfig;
use crate::dictionary::Dictionary;
use crate::graph::FamilyGraph;
use crate::schema;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load the family graph named by the config, relative to the project root.
pub fn load_graph(project_root: &Path, config: &KinConfig) -> Result<FamilyGraph> {
    load_graph_file(&config.people_path(project_root))
}

/// Load a family graph from a JSON record file.
pub fn load_graph_file(path: &Path) -> Result<FamilyGraph> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read family data from {}", path.display()))?;
    let people = schema::people_from_json(&json)
        .with_context(|| format!("invalid family data in {}", path.display()))?;

    let mut graph = FamilyGraph::new();
    for person in people {
        let id = person.id.clone();
        if graph.insert_person(person).is_some() {
            tracing::warn!("duplicate person id {id}; keeping the later record");
        }
    }

    let issues = graph.integrity_issues();
    if !issues.is_empty() {
        tracing::warn!(
            "{} integrity issue(s) in {}; run `kin validate` for details",
            issues.len(),
            path.display()
        );
    }
    tracing::debug!("loaded {} people from {}", graph.len(), path.display());
    Ok(graph)
}

/// Load the relationship dictionary named by the config, relative to the project root.
pub fn load_dictionary(project_root: &Path, config: &KinConfig) -> Result<Dictionary> {
    load_dictionary_file(&config.dictionary_path(project_root))
}

/// Load a relationship dictionary from a JSON file.
pub fn load_dictionary_file(path: &Path) -> Result<Dictionary> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read dictionary from {}", path.display()))?;
    let dictionary = Dictionary::from_json(&json)
        .with_context(|| format!("invalid dictionary in {}", path.display()))?;
    tracing::debug!("loaded {} dictionary entries from {}", dictionary.len(), path.display());
    Ok(dictionary)
}

/// Load the dictionary if its file exists, otherwise an empty one.
///
/// An empty dictionary is usable: every code falls back to its literal expansion.
pub fn load_dictionary_or_empty(project_root: &Path, config: &KinConfig) -> Result<Dictionary> {
    let path = config.dictionary_path(project_root);
    if path.exists() {
        load_dictionary_file(&path)
    } else {
        tracing::info!(
            "no dictionary at {}; relationships will use literal names",
            path.display()
        );
        Ok(Dictionary::new())
    }
}
