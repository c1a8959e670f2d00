//! Kinship inference over a family graph.
//!
//! Finds the shortest relationship path between two people (paths), reduces it to a
//! canonical kinship code (normalize), renders the code as a localized term (resolve) and
//! builds a categorized relationship report for one person (report).

pub mod engine;
pub mod lookup;
pub mod normalize;
pub mod paths;
pub mod report;
pub mod resolve;

pub use engine::{EngineOptions, KinshipEngine, Relationship, UNKNOWN};
