//! Relationship dictionary: canonical kinship code → localized term rules.
//!
//! The on-disk shape is a JSON object keyed by code whose entries carry `name`, `male`/`female`
//! or an `ageRule` with elder/younger terms. Entries are converted once, at load, into
//! [`DictionaryEntry`] so resolution never has to probe for optional fields.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Errors raised while loading a relationship dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entry {code}: unknown age rule {rule:?}")]
    UnknownAgeRule { code: String, rule: String },
    #[error("entry {code}: no name, gendered or age-rule terms")]
    EmptyEntry { code: String },
}

/// A term in one or more languages.
///
/// A plain string applies to every language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocalizedTerm {
    Plain(String),
    ByLanguage(BTreeMap<String, String>),
}

impl Default for LocalizedTerm {
    fn default() -> Self {
        LocalizedTerm::ByLanguage(BTreeMap::new())
    }
}

impl LocalizedTerm {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        LocalizedTerm::ByLanguage(
            pairs
                .into_iter()
                .map(|(lang, term)| (lang.to_string(), term.to_string()))
                .collect(),
        )
    }

    /// Term for `language`, else for `fallback`, else the empty string.
    pub fn get(&self, language: &str, fallback: &str) -> &str {
        match self {
            LocalizedTerm::Plain(term) => term,
            LocalizedTerm::ByLanguage(terms) => terms
                .get(language)
                .filter(|t| !t.is_empty())
                .or_else(|| terms.get(fallback))
                .map_or("", String::as_str),
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        let keys = match self {
            LocalizedTerm::Plain(_) => None,
            LocalizedTerm::ByLanguage(terms) => Some(terms.keys().map(String::as_str)),
        };
        keys.into_iter().flatten()
    }
}

/// Which two people an age-disambiguated entry compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeRule {
    /// Target vs. the connecting relative (e.g. father's brother vs. father).
    PeddaChinna,
    /// Connecting sibling vs. home (e.g. brother's son).
    SiblingChild,
    /// Connecting sibling vs. home, sibling's-spouse terms (e.g. brother's wife).
    VadinaMaradalu,
    /// Target vs. home.
    DirectAge,
    /// Target's connecting parent vs. home (e.g. wife's sister's son).
    ParentAgeCompare,
}

impl AgeRule {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeRule::PeddaChinna => "pedda_chinna",
            AgeRule::SiblingChild => "sibling_child",
            AgeRule::VadinaMaradalu => "vadina_maradalu",
            AgeRule::DirectAge => "direct_age",
            AgeRule::ParentAgeCompare => "parent_age_compare",
        }
    }
}

impl FromStr for AgeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pedda_chinna" => Ok(AgeRule::PeddaChinna),
            "sibling_child" => Ok(AgeRule::SiblingChild),
            "vadina_maradalu" => Ok(AgeRule::VadinaMaradalu),
            "direct_age" => Ok(AgeRule::DirectAge),
            "parent_age_compare" => Ok(AgeRule::ParentAgeCompare),
            other => Err(other.to_string()),
        }
    }
}

/// How a canonical code renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryEntry {
    Direct {
        name: LocalizedTerm,
    },
    Gendered {
        male: Option<LocalizedTerm>,
        female: Option<LocalizedTerm>,
    },
    AgeRuled {
        rule: AgeRule,
        elder: LocalizedTerm,
        younger: LocalizedTerm,
        /// Used by `direct_age` and `parent_age_compare` when the ages cannot be ordered.
        default: Option<LocalizedTerm>,
    },
}

impl DictionaryEntry {
    fn terms(&self) -> Vec<&LocalizedTerm> {
        match self {
            DictionaryEntry::Direct { name } => vec![name],
            DictionaryEntry::Gendered { male, female } => {
                male.iter().chain(female.iter()).collect()
            }
            DictionaryEntry::AgeRuled {
                elder,
                younger,
                default,
                ..
            } => [elder, younger].into_iter().chain(default.iter()).collect(),
        }
    }
}

/// Source shape of a dictionary entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    name: Option<LocalizedTerm>,
    male: Option<LocalizedTerm>,
    female: Option<LocalizedTerm>,
    age_rule: Option<String>,
    elder: Option<LocalizedTerm>,
    younger: Option<LocalizedTerm>,
    pedda: Option<LocalizedTerm>,
    chinna: Option<LocalizedTerm>,
    default: Option<LocalizedTerm>,
}

impl RawEntry {
    fn into_entry(self, code: &str) -> Result<DictionaryEntry, DictionaryError> {
        if let Some(name) = self.name {
            return Ok(DictionaryEntry::Direct { name });
        }
        if self.male.is_some() || self.female.is_some() {
            return Ok(DictionaryEntry::Gendered {
                male: self.male,
                female: self.female,
            });
        }
        if let Some(rule) = self.age_rule {
            let rule = rule
                .parse::<AgeRule>()
                .map_err(|rule| DictionaryError::UnknownAgeRule {
                    code: code.to_string(),
                    rule,
                })?;
            return Ok(DictionaryEntry::AgeRuled {
                rule,
                elder: self.pedda.or(self.elder).unwrap_or_default(),
                younger: self.chinna.or(self.younger).unwrap_or_default(),
                default: self.default,
            });
        }
        Err(DictionaryError::EmptyEntry {
            code: code.to_string(),
        })
    }
}

/// Canonical code → entry.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, DictionaryEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dictionary from its JSON source.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for (code, entry) in raw {
            let entry = entry.into_entry(&code)?;
            entries.insert(code, entry);
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, code: impl Into<String>, entry: DictionaryEntry) {
        self.entries.insert(code.into(), entry);
    }

    pub fn get(&self, code: &str) -> Option<&DictionaryEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every language key used by any term.
    pub fn languages(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .flat_map(DictionaryEntry::terms)
            .flat_map(LocalizedTerm::languages)
            .map(str::to_string)
            .collect()
    }
}
