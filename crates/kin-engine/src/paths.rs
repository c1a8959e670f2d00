//! Shortest relationship path between two people.
//!
//! The family graph is searched breadth-first as if undirected: parent edges are followed up
//! (F/M), children down (S/D/C), spouses across (H/W/P) and derived siblings sideways
//! (B/Z/Sib). Neighbours are expanded in exactly that order and each person is queued at most
//! once, so among equally short paths the one found first is always the same.

use kin_core::graph::{Gender, KinGraph, Person};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Code reported for a person's relationship to themselves.
pub const SELF_CODE: &str = "SELF";

/// Default ceiling on path length, in edges.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// A single hop in a relationship path, named from the perspective of the person it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    Father,
    Mother,
    Son,
    Daughter,
    /// Child of unrecorded gender.
    Child,
    Husband,
    Wife,
    /// Spouse of unrecorded gender.
    Spouse,
    Brother,
    Sister,
    /// Sibling of unrecorded gender.
    Sibling,
}

impl EdgeLabel {
    pub const ALL: [EdgeLabel; 11] = [
        EdgeLabel::Father,
        EdgeLabel::Mother,
        EdgeLabel::Son,
        EdgeLabel::Daughter,
        EdgeLabel::Child,
        EdgeLabel::Husband,
        EdgeLabel::Wife,
        EdgeLabel::Spouse,
        EdgeLabel::Brother,
        EdgeLabel::Sister,
        EdgeLabel::Sibling,
    ];

    /// Code token used in kinship codes.
    pub fn code(self) -> &'static str {
        match self {
            EdgeLabel::Father => "F",
            EdgeLabel::Mother => "M",
            EdgeLabel::Son => "S",
            EdgeLabel::Daughter => "D",
            EdgeLabel::Child => "C",
            EdgeLabel::Husband => "H",
            EdgeLabel::Wife => "W",
            EdgeLabel::Spouse => "P",
            EdgeLabel::Brother => "B",
            EdgeLabel::Sister => "Z",
            EdgeLabel::Sibling => "Sib",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.code() == code)
    }

    /// English kinship word, used when a code has no dictionary entry.
    pub fn word(self) -> &'static str {
        match self {
            EdgeLabel::Father => "Father",
            EdgeLabel::Mother => "Mother",
            EdgeLabel::Son => "Son",
            EdgeLabel::Daughter => "Daughter",
            EdgeLabel::Child => "Child",
            EdgeLabel::Husband => "Husband",
            EdgeLabel::Wife => "Wife",
            EdgeLabel::Spouse => "Spouse",
            EdgeLabel::Brother => "Brother",
            EdgeLabel::Sister => "Sister",
            EdgeLabel::Sibling => "Sibling",
        }
    }

    fn child(gender: Gender) -> Self {
        match gender {
            Gender::Male => EdgeLabel::Son,
            Gender::Female => EdgeLabel::Daughter,
            Gender::Unknown => EdgeLabel::Child,
        }
    }

    fn spouse(gender: Gender) -> Self {
        match gender {
            Gender::Male => EdgeLabel::Husband,
            Gender::Female => EdgeLabel::Wife,
            Gender::Unknown => EdgeLabel::Spouse,
        }
    }

    fn sibling(gender: Gender) -> Self {
        match gender {
            Gender::Male => EdgeLabel::Brother,
            Gender::Female => EdgeLabel::Sister,
            Gender::Unknown => EdgeLabel::Sibling,
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A path from the home person to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationPath {
    /// Person IDs, home first and target last. Never empty.
    pub nodes: Vec<String>,
    /// Hop labels; always one fewer than `nodes`.
    pub edges: Vec<EdgeLabel>,
}

impl RelationPath {
    fn single(id: &str) -> Self {
        Self {
            nodes: vec![id.to_string()],
            edges: Vec::new(),
        }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True for the home → home path.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn home(&self) -> &str {
        &self.nodes[0]
    }

    pub fn target(&self) -> &str {
        &self.nodes[self.nodes.len() - 1]
    }

    /// The node adjacent to the target, if the path has at least one edge.
    pub fn connecting(&self) -> Option<&str> {
        self.nodes
            .len()
            .checked_sub(2)
            .map(|i| self.nodes[i].as_str())
    }

    /// Unreduced code, `SELF` for the empty path.
    pub fn raw_code(&self) -> String {
        if self.edges.is_empty() {
            return SELF_CODE.to_string();
        }
        self.edges.iter().map(|e| e.code()).collect()
    }
}

/// Why no relationship path was produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("person {0} not found")]
    NotFound(String),
    #[error("{home} and {target} are not connected")]
    Unreachable { home: String, target: String },
    #[error("no path from {home} to {target} within {max_depth} steps")]
    TooFar {
        home: String,
        target: String,
        max_depth: usize,
    },
}

/// Neighbours of a person in expansion order: parents, children, spouses, siblings.
fn relatives_of<G: KinGraph + ?Sized>(graph: &G, person: &Person) -> Vec<(String, EdgeLabel)> {
    let mut relatives = Vec::new();
    if let Some(father) = &person.father_id {
        relatives.push((father.clone(), EdgeLabel::Father));
    }
    if let Some(mother) = &person.mother_id {
        relatives.push((mother.clone(), EdgeLabel::Mother));
    }
    for child in graph.children_of(&person.id) {
        relatives.push((child.clone(), EdgeLabel::child(graph.gender_of(child))));
    }
    for spouse in &person.spouse_ids {
        relatives.push((spouse.clone(), EdgeLabel::spouse(graph.gender_of(spouse))));
    }
    for sibling in graph.siblings_of(&person.id) {
        let label = EdgeLabel::sibling(graph.gender_of(&sibling));
        relatives.push((sibling, label));
    }
    relatives
}

/// Find the shortest relationship path from `home` to `target`.
///
/// Paths longer than `max_depth` edges are never produced. Both people must exist in the
/// graph; intermediate references to missing people are walked through but not expanded.
pub fn find_path<G: KinGraph + ?Sized>(
    graph: &G,
    home: &str,
    target: &str,
    max_depth: usize,
) -> Result<RelationPath, PathError> {
    for id in [home, target] {
        if graph.person(id).is_none() {
            return Err(PathError::NotFound(id.to_string()));
        }
    }
    if home == target {
        return Ok(RelationPath::single(home));
    }

    let mut queue: VecDeque<(String, Vec<String>, Vec<EdgeLabel>)> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut truncated = false;

    queue.push_back((home.to_string(), vec![home.to_string()], Vec::new()));
    visited.insert(home.to_string());

    while let Some((current, path, edges)) = queue.pop_front() {
        let Some(person) = graph.person(&current) else {
            continue;
        };
        let relatives = relatives_of(graph, person);

        if path.len() > max_depth {
            truncated |= relatives.iter().any(|(id, _)| !visited.contains(id));
            continue;
        }

        for (next, label) in relatives {
            if !visited.insert(next.clone()) {
                continue;
            }

            let mut new_path = path.clone();
            new_path.push(next.clone());
            let mut new_edges = edges.clone();
            new_edges.push(label);

            if next == target {
                tracing::debug!(
                    "path {home} -> {target}: {} step(s), {} visited",
                    new_edges.len(),
                    visited.len()
                );
                return Ok(RelationPath {
                    nodes: new_path,
                    edges: new_edges,
                });
            }

            queue.push_back((next, new_path, new_edges));
        }
    }

    if truncated {
        Err(PathError::TooFar {
            home: home.to_string(),
            target: target.to_string(),
            max_depth,
        })
    } else {
        Err(PathError::Unreachable {
            home: home.to_string(),
            target: target.to_string(),
        })
    }
}
