//! Heuristic text improver.
//!
//! This is the offline fallback used when no remote text enhancer is available. It rewrites
//! a small list of pejorative words into neutral phrasing and makes sure the text opens with
//! a professional preamble for the document type.
//!
//! It is a word-substitution heuristic and nothing more: there is no grammar or semantic
//! analysis, so the output can read awkwardly (for example a preamble followed by a
//! replaced verb phrase). Callers that need genuinely improved prose should supply a
//! [`TextEnhancer`](crate::enhance::TextEnhancer).
//!
//! Word lists and preambles are data ([`ImproverRules`]) and can be loaded from YAML.

use crate::document::DocumentType;
use crate::error::FormResult;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// Terms replaced by one neutral phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// Words or phrases matched whole-word and case-insensitively.
    pub terms: Vec<String>,
    pub replacement: String,
}

impl ReplacementRule {
    fn new(terms: &[&str], replacement: &str) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            replacement: replacement.to_owned(),
        }
    }
}

/// Opening phrase per document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preambles {
    pub care_plan: String,
    pub development_report: String,
    pub meeting_minutes: String,
}

impl Preambles {
    pub fn for_type(&self, document_type: DocumentType) -> &str {
        match document_type {
            DocumentType::CarePlan => &self.care_plan,
            DocumentType::DevelopmentReport => &self.development_report,
            DocumentType::MeetingMinutes => &self.meeting_minutes,
        }
    }
}

impl Default for Preambles {
    fn default() -> Self {
        Self {
            care_plan: "Durante o período de observação, identificou-se que ".into(),
            development_report: "A criança demonstra ".into(),
            meeting_minutes: "Foi observado que ".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImproverRules {
    /// Applied in order; later rules see the output of earlier ones.
    pub replacements: Vec<ReplacementRule>,
    pub preambles: Preambles,
}

impl Default for ImproverRules {
    fn default() -> Self {
        Self {
            replacements: vec![
                ReplacementRule::new(
                    &["ruim", "mal", "péssimo", "horrível"],
                    "necessita atenção",
                ),
                ReplacementRule::new(&["não consegue", "não sabe"], "está desenvolvendo"),
                ReplacementRule::new(&["problema", "defeito"], "necessidade específica"),
                ReplacementRule::new(&["burro", "idiota", "preguiçoso"], "em desenvolvimento"),
            ],
            preambles: Preambles::default(),
        }
    }
}

/// Compiled form of [`ImproverRules`].
#[derive(Debug, Clone)]
pub struct TextImprover {
    replacements: Vec<(Regex, String)>,
    preambles: Preambles,
}

impl TextImprover {
    /// Compiles `rules`. Rules without any non-blank term are skipped.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidRule` if a rule cannot be compiled (for example when its
    /// alternation exceeds the regex size limit).
    pub fn new(rules: ImproverRules) -> FormResult<Self> {
        let mut replacements = Vec::with_capacity(rules.replacements.len());
        for rule in rules.replacements {
            let alternatives: Vec<String> = rule
                .terms
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(regex::escape)
                .collect();
            if alternatives.is_empty() {
                continue;
            }
            let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
            replacements.push((Regex::new(&pattern)?, rule.replacement));
        }

        Ok(Self {
            replacements,
            preambles: rules.preambles,
        })
    }

    /// Rewrites `text` for `document_type`. Never fails.
    ///
    /// Steps:
    /// 1. Replace every flagged term (whole word, any case) with its neutral phrase.
    /// 2. Unless the text already opens with the type's preamble (compared case-insensitively),
    ///    prepend the preamble and lower-case the first letter of the original text.
    /// 3. Upper-case the first character of the result.
    ///
    /// Blank input is returned unchanged.
    pub fn improve(&self, text: &str, document_type: DocumentType) -> String {
        if text.trim().is_empty() {
            return text.to_owned();
        }

        let mut improved = text.trim().to_owned();
        for (pattern, replacement) in &self.replacements {
            improved = pattern
                .replace_all(&improved, NoExpand(replacement))
                .into_owned();
        }

        let preamble = self.preambles.for_type(document_type);
        if !preamble.trim().is_empty() && !starts_with_ignore_case(&improved, preamble) {
            improved = format!("{}{}", preamble, lowercase_first(&improved));
        }

        let improved = uppercase_first(&improved);
        tracing::debug!(
            document_type = document_type.slug(),
            input_len = text.len(),
            output_len = improved.len(),
            "applied heuristic text improvement"
        );
        improved
    }
}

impl Default for TextImprover {
    fn default() -> Self {
        Self::new(ImproverRules::default()).expect("built-in improver rules compile")
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_flagged_terms_case_insensitively() {
        let improver = TextImprover::default();
        let result = improver.improve("Ela é RUIM nisso", DocumentType::DevelopmentReport);
        assert!(result.contains("necessita atenção"));
        assert!(!result.to_lowercase().contains("ruim"));
    }

    #[test]
    fn does_not_touch_partial_words() {
        let improver = TextImprover::default();
        let result = improver.improve(
            "A ruindade do tempo e o malabarismo",
            DocumentType::MeetingMinutes,
        );
        assert!(result.contains("ruindade"));
        assert!(result.contains("malabarismo"));
        assert!(!result.contains("necessita atenção"));
    }

    #[test]
    fn replaces_accented_and_multi_word_terms() {
        let improver = TextImprover::default();
        let result = improver.improve(
            "Foi péssimo. Ele Não Consegue sentar e tem um problema.",
            DocumentType::CarePlan,
        );
        assert!(result.contains("necessita atenção"));
        assert!(result.contains("está desenvolvendo"));
        assert!(result.contains("necessidade específica"));
    }

    #[test]
    fn prepends_preamble_and_lowercases_original_start() {
        let improver = TextImprover::default();
        let result = improver.improve("Gosta de pintar.", DocumentType::DevelopmentReport);
        assert_eq!(result, "A criança demonstra gosta de pintar.");
    }

    #[test]
    fn care_plan_preamble() {
        let improver = TextImprover::default();
        let result = improver.improve("Precisa de apoio visual.", DocumentType::CarePlan);
        assert_eq!(
            result,
            "Durante o período de observação, identificou-se que precisa de apoio visual."
        );
    }

    #[test]
    fn existing_preamble_is_not_repeated() {
        let improver = TextImprover::default();
        let text = "foi observado que todos participaram.";
        let result = improver.improve(text, DocumentType::MeetingMinutes);
        assert_eq!(result, "Foi observado que todos participaram.");
    }

    #[test]
    fn blank_input_is_returned_unchanged() {
        let improver = TextImprover::default();
        for document_type in DocumentType::ALL {
            assert_eq!(improver.improve("", document_type), "");
            assert_eq!(improver.improve("  \n", document_type), "  \n");
        }
    }

    #[test]
    fn is_total_over_odd_input() {
        let improver = TextImprover::default();
        let inputs = ["$1 ruim $2", "ß", "ǆemal", "((ruim))", "\u{0}", "🙂 mal 🙂"];
        for input in inputs {
            for document_type in DocumentType::ALL {
                let _ = improver.improve(input, document_type);
            }
        }
        let result = improver.improve("$1 ruim", DocumentType::DevelopmentReport);
        assert!(result.contains("$1 necessita atenção"));
    }

    #[test]
    fn custom_rules_are_used() {
        let rules = ImproverRules {
            replacements: vec![
                ReplacementRule::new(&["agitado"], "ativo"),
                ReplacementRule::new(&["  "], "ignored"),
            ],
            preambles: Preambles {
                care_plan: String::new(),
                development_report: String::new(),
                meeting_minutes: String::new(),
            },
        };
        let improver = TextImprover::new(rules).unwrap();
        assert_eq!(
            improver.improve("muito agitado hoje", DocumentType::CarePlan),
            "Muito ativo hoje"
        );
    }
}
