//! Reduction of raw kinship codes to canonical form.
//!
//! A raw code from the path finder can describe a relation the long way round ("father's son"
//! instead of "brother"). Rewrites are applied token by token so the three-letter `Sib` token
//! is never split or matched across.

use crate::paths::SELF_CODE;

/// Rewrite rules in application order.
pub const REWRITE_RULES: &[(&[&str], &[&str])] = &[
    (&["F", "S"], &["B"]),
    (&["F", "D"], &["Z"]),
    (&["M", "S"], &["B"]),
    (&["M", "D"], &["Z"]),
    (&["F", "B", "S"], &["B"]),
    (&["F", "B", "D"], &["Z"]),
    (&["M", "Z", "S"], &["B"]),
    (&["M", "Z", "D"], &["Z"]),
    (&["F", "F", "B"], &["F", "F"]),
    (&["M", "M", "Z"], &["M", "M"]),
    (&["M", "F", "B"], &["M", "F"]),
    (&["F", "M", "Z"], &["F", "M"]),
];

/// Split a code into tokens. `Sib` is one token, every other character is its own token.
pub fn tokenize(code: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = code;
    while let Some(first) = rest.chars().next() {
        let width = if rest.starts_with("Sib") {
            3
        } else {
            first.len_utf8()
        };
        let (token, tail) = rest.split_at(width);
        tokens.push(token);
        rest = tail;
    }
    tokens
}

/// One left-to-right pass of a single rule over non-overlapping occurrences.
fn rewrite<'a>(
    tokens: &[&'a str],
    pattern: &[&'a str],
    replacement: &[&'a str],
) -> Option<Vec<&'a str>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut changed = false;
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i..].starts_with(pattern) {
            out.extend_from_slice(replacement);
            i += pattern.len();
            changed = true;
        } else {
            out.push(tokens[i]);
            i += 1;
        }
    }
    changed.then_some(out)
}

/// Reduce a raw code to its canonical form.
///
/// All rules are applied in order, repeatedly, until a full pass changes nothing. `SELF` and
/// the empty code are returned unchanged. Every rule shortens the code, so this terminates.
pub fn normalize(code: &str) -> String {
    if code == SELF_CODE {
        return code.to_string();
    }

    let mut tokens = tokenize(code);
    loop {
        let mut changed = false;
        for (pattern, replacement) in REWRITE_RULES {
            if let Some(next) = rewrite(&tokens, pattern, replacement) {
                tokens = next;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    tokens.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("FSibS"), vec!["F", "Sib", "S"]);
        assert_eq!(tokenize("SibSib"), vec!["Sib", "Sib"]);
        assert_eq!(tokenize(""), Vec::<&str>::new());
    }

    #[test]
    fn test_single_rules() {
        assert_eq!(normalize("FS"), "B");
        assert_eq!(normalize("FD"), "Z");
        assert_eq!(normalize("MS"), "B");
        assert_eq!(normalize("MD"), "Z");
        assert_eq!(normalize("MZD"), "Z");
        assert_eq!(normalize("FFB"), "FF");
        assert_eq!(normalize("MMZ"), "MM");
        assert_eq!(normalize("MFB"), "MF");
        assert_eq!(normalize("FMZ"), "FM");
    }

    #[test]
    fn test_repeated_until_stable() {
        assert_eq!(normalize("FFBSS"), "B");
        assert_eq!(normalize("FSFS"), "BB");
        // FS -> B leaves FBS, which the same pass reduces again.
        assert_eq!(normalize("FFSS"), "B");
        assert_eq!(normalize("FFBS"), "FB");
    }

    #[test]
    fn test_canonical_codes_unchanged() {
        for code in ["SELF", "", "F", "FB", "MZ", "HF", "WB", "BS", "ZD", "FF"] {
            assert_eq!(normalize(code), code, "{code} should be canonical");
        }
    }

    #[test]
    fn test_sib_token_not_split() {
        // "FSib" must not be read as "FS" + "ib".
        assert_eq!(normalize("FSib"), "FSib");
        assert_eq!(normalize("SibS"), "SibS");
        assert_eq!(normalize("FSibFS"), "FSibB");
    }

    #[test]
    fn test_idempotent_over_short_codes() {
        let alphabet = ["F", "M", "S", "D", "B", "Z", "H", "W", "Sib"];
        let mut codes = vec![String::new()];
        for _ in 0..4 {
            codes = codes
                .iter()
                .flat_map(|prefix| alphabet.iter().map(move |t| format!("{prefix}{t}")))
                .collect();
            for code in &codes {
                let once = normalize(code);
                assert_eq!(normalize(&once), once, "normalize not idempotent for {code}");
            }
        }
    }
}
