//! Core types and storage for the kinship engine.
//!
//! Provides the family graph model ([`graph::FamilyGraph`] behind the [`graph::KinGraph`]
//! lookups), birth-date comparison, the relationship dictionary, configuration and JSON
//! loading.

pub mod birth;
pub mod config;
pub mod dictionary;
pub mod graph;
pub mod schema;
pub mod storage;
