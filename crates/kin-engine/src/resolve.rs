//! Rendering a canonical code as a localized kinship term.

use crate::normalize::tokenize;
use crate::paths::{EdgeLabel, SELF_CODE};
use kin_core::birth::{AgeOrder, compare_age};
use kin_core::dictionary::{AgeRule, Dictionary, DictionaryEntry, LocalizedTerm};
use kin_core::graph::{Gender, KinGraph, Person};

/// Language selection for term lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveContext<'a> {
    pub language: &'a str,
    pub fallback: &'a str,
}

impl<'a> ResolveContext<'a> {
    pub fn new(language: &'a str, fallback: &'a str) -> Self {
        Self { language, fallback }
    }

    fn term<'t>(&self, term: &'t LocalizedTerm) -> &'t str {
        term.get(self.language, self.fallback)
    }
}

impl Default for ResolveContext<'_> {
    fn default() -> Self {
        Self::new("te", "te")
    }
}

/// Spell out a code with no dictionary entry: `FBS` → `Father's-Brother's-Son`.
///
/// Unknown tokens are kept verbatim.
pub fn expand_code(code: &str) -> String {
    if code == SELF_CODE {
        return "Self".to_string();
    }
    let words: Vec<&str> = tokenize(code)
        .into_iter()
        .map(|token| EdgeLabel::from_code(token).map_or(token, |label| label.word()))
        .collect();
    match words.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, init)) => {
            let mut out: Vec<String> = init.iter().map(|w| format!("{w}'s")).collect();
            out.push((*last).to_string());
            out.join("-")
        }
    }
}

/// Resolve a canonical `code` for the path `path` (home first, target last).
///
/// `home` and `target` are the path's endpoints. Codes missing from the dictionary are
/// expanded into English; entries that cannot produce a term fall back to the code itself.
pub fn resolve<G: KinGraph + ?Sized>(
    graph: &G,
    dictionary: &Dictionary,
    code: &str,
    path: &[String],
    home: &Person,
    target: &Person,
    ctx: &ResolveContext<'_>,
) -> String {
    let Some(entry) = dictionary.get(code) else {
        return expand_code(code);
    };

    match entry {
        DictionaryEntry::Direct { name } => ctx.term(name).to_string(),
        DictionaryEntry::Gendered { male, female } => {
            let term = match graph.gender_of(&target.id) {
                Gender::Male => male.as_ref(),
                Gender::Female => female.as_ref(),
                Gender::Unknown => None,
            };
            term.map_or_else(|| code.to_string(), |t| ctx.term(t).to_string())
        }
        DictionaryEntry::AgeRuled {
            rule,
            elder,
            younger,
            default,
        } => {
            let connecting = path
                .len()
                .checked_sub(2)
                .and_then(|i| path.get(i))
                .and_then(|id| graph.person(id));
            let order = match rule {
                AgeRule::PeddaChinna if path.len() >= 3 => compare_age(Some(target), connecting),
                AgeRule::SiblingChild | AgeRule::VadinaMaradalu if path.len() >= 3 => {
                    compare_age(connecting, Some(home))
                }
                AgeRule::DirectAge => compare_age(Some(target), Some(home)),
                AgeRule::ParentAgeCompare if path.len() >= 2 => {
                    compare_age(connecting, Some(home))
                }
                _ => {
                    tracing::debug!("age rule {} needs a longer path than {code}", rule.as_str());
                    return code.to_string();
                }
            };
            // Only the rules comparing against home directly carry a neutral default.
            let default = match rule {
                AgeRule::DirectAge | AgeRule::ParentAgeCompare => default.as_ref(),
                _ => None,
            };
            pick_by_age(order, elder, younger, default, ctx)
        }
    }
}

fn pick_by_age(
    order: AgeOrder,
    elder: &LocalizedTerm,
    younger: &LocalizedTerm,
    default: Option<&LocalizedTerm>,
    ctx: &ResolveContext<'_>,
) -> String {
    match order {
        AgeOrder::Older => ctx.term(elder).to_string(),
        AgeOrder::Younger => ctx.term(younger).to_string(),
        AgeOrder::Same | AgeOrder::Unknown => default
            .map(|d| ctx.term(d))
            .filter(|d| !d.is_empty())
            .map_or_else(
                || format!("{}/{}", ctx.term(elder), ctx.term(younger)),
                str::to_string,
            ),
    }
}
