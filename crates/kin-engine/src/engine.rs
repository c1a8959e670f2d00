//! Relationship queries: path → canonical code → localized term.

use crate::normalize::normalize;
use crate::paths::{DEFAULT_MAX_DEPTH, PathError, RelationPath, find_path};
use crate::resolve::{ResolveContext, resolve};
use kin_core::config::KinConfig;
use kin_core::dictionary::Dictionary;
use kin_core::graph::KinGraph;
use serde::Serialize;

/// Term reported when two people cannot be related.
pub const UNKNOWN: &str = "Unknown";

/// Query settings for a [`KinshipEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub language: String,
    pub fallback_language: String,
    pub max_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            language: "te".to_string(),
            fallback_language: "te".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineOptions {
    pub fn from_config(config: &KinConfig) -> Self {
        Self {
            language: config.language.active.clone(),
            fallback_language: config.language.fallback.clone(),
            max_depth: config.search.max_depth,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// A resolved relationship between two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Code as walked, before reduction.
    pub raw_code: String,
    /// Canonical code used for the dictionary lookup.
    pub code: String,
    /// Person IDs from home to target.
    pub path: Vec<String>,
    pub term: String,
}

/// Answers "what does `home` call `target`?" over a family graph and dictionary.
pub struct KinshipEngine<'a, G: KinGraph + ?Sized> {
    graph: &'a G,
    dictionary: &'a Dictionary,
    options: EngineOptions,
}

impl<'a, G: KinGraph + ?Sized> KinshipEngine<'a, G> {
    pub fn new(graph: &'a G, dictionary: &'a Dictionary, options: EngineOptions) -> Self {
        Self {
            graph,
            dictionary,
            options,
        }
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Shortest path from `home` to `target`, within the configured depth.
    pub fn path(&self, home: &str, target: &str) -> Result<RelationPath, PathError> {
        find_path(self.graph, home, target, self.options.max_depth)
    }

    /// Full relationship detail, or why none could be found.
    pub fn relationship(&self, home: &str, target: &str) -> Result<Relationship, PathError> {
        let path = self.path(home, target)?;
        let (Some(home_person), Some(target_person)) =
            (self.graph.person(path.home()), self.graph.person(path.target()))
        else {
            return Err(PathError::NotFound(target.to_string()));
        };

        let raw_code = path.raw_code();
        let code = normalize(&raw_code);
        let ctx = ResolveContext::new(&self.options.language, &self.options.fallback_language);
        let term = resolve(
            self.graph,
            self.dictionary,
            &code,
            &path.nodes,
            home_person,
            target_person,
            &ctx,
        );
        tracing::debug!("{home} -> {target}: {raw_code} => {code} => {term}");

        Ok(Relationship {
            raw_code,
            code,
            path: path.nodes,
            term,
        })
    }

    /// The term `home` uses for `target`, or [`UNKNOWN`].
    pub fn find_relationship(&self, home: &str, target: &str) -> String {
        match self.relationship(home, target) {
            Ok(relationship) => relationship.term,
            Err(e) => {
                tracing::debug!("no relationship for {home} -> {target}: {e}");
                UNKNOWN.to_string()
            }
        }
    }
}

impl<G: KinGraph + Sync + ?Sized> KinshipEngine<'_, G> {
    /// [`find_relationship`](Self::find_relationship) for many targets at once, resolved in
    /// parallel. Output order follows `targets`.
    pub fn relate_all(&self, home: &str, targets: &[String]) -> Vec<(String, String)> {
        use rayon::prelude::*;

        targets
            .par_iter()
            .map(|target| (target.clone(), self.find_relationship(home, target)))
            .collect()
    }
}
