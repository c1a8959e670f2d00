//! Finding a person from user input: exact ID, then case-insensitive name, then fuzzy
//! suggestions.

use kin_core::graph::{FamilyGraph, Person};

/// Minimum normalized Levenshtein similarity for a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// A near-miss for a query that matched nobody.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("no person matches {query:?}")]
    NoMatch {
        query: String,
        suggestions: Vec<Suggestion>,
    },
    #[error("{query:?} matches several people: {}", .ids.join(", "))]
    Ambiguous { query: String, ids: Vec<String> },
}

/// Look a person up by ID, or by name when the name is unique.
pub fn find_person<'g>(graph: &'g FamilyGraph, query: &str) -> Result<&'g Person, LookupError> {
    let query = query.trim();
    if let Some(person) = graph.people.get(query) {
        return Ok(person);
    }

    let lowered = query.to_lowercase();
    let by_name: Vec<&Person> = graph
        .people
        .values()
        .filter(|p| p.name.to_lowercase() == lowered)
        .collect();

    match by_name.as_slice() {
        [only] => Ok(*only),
        [] => Err(LookupError::NoMatch {
            query: query.to_string(),
            suggestions: suggest(graph, query, 3),
        }),
        many => Err(LookupError::Ambiguous {
            query: query.to_string(),
            ids: many.iter().map(|p| p.id.clone()).collect(),
        }),
    }
}

/// People whose ID or name is closest to `query`, best first.
pub fn suggest(graph: &FamilyGraph, query: &str, limit: usize) -> Vec<Suggestion> {
    let query = query.to_lowercase();
    let mut scored: Vec<Suggestion> = graph
        .people
        .values()
        .filter_map(|p| {
            let by_id = strsim::normalized_levenshtein(&query, &p.id.to_lowercase());
            let by_name = strsim::normalized_levenshtein(&query, &p.name.to_lowercase());
            let score = by_id.max(by_name);
            (score >= SUGGESTION_THRESHOLD).then(|| Suggestion {
                id: p.id.clone(),
                name: p.name.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    scored.truncate(limit);
    scored
}
