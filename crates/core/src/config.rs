//! Portal runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the renderer and
//! improver. Core code never reads environment variables itself; the binary reads them and
//! hands the raw values to [`PortalConfig::from_env_values`] and [`load_improver_rules`].

use crate::constants::{DEFAULT_INSTITUTION, DEFAULT_SIGNATORY_NAME, DEFAULT_SIGNATORY_ROLE};
use crate::error::{FormError, FormResult};
use crate::improve::ImproverRules;
use portal_types::NonEmptyText;
use std::path::Path;

/// Who signs the generated documents and on behalf of which institution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    signatory_name: NonEmptyText,
    signatory_role: NonEmptyText,
    institution: NonEmptyText,
}

impl PortalConfig {
    pub fn new(
        signatory_name: NonEmptyText,
        signatory_role: NonEmptyText,
        institution: NonEmptyText,
    ) -> Self {
        Self {
            signatory_name,
            signatory_role,
            institution,
        }
    }

    /// Builds a config from optional raw values, typically read from the environment.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_env_values(
        signatory_name: Option<String>,
        signatory_role: Option<String>,
        institution: Option<String>,
    ) -> Self {
        fn or_default(value: Option<String>, default: &str) -> NonEmptyText {
            value
                .and_then(|v| NonEmptyText::new(v).ok())
                .unwrap_or_else(|| default_text(default))
        }

        Self {
            signatory_name: or_default(signatory_name, DEFAULT_SIGNATORY_NAME),
            signatory_role: or_default(signatory_role, DEFAULT_SIGNATORY_ROLE),
            institution: or_default(institution, DEFAULT_INSTITUTION),
        }
    }

    pub fn signatory_name(&self) -> &str {
        self.signatory_name.as_str()
    }

    pub fn signatory_role(&self) -> &str {
        self.signatory_role.as_str()
    }

    pub fn institution(&self) -> &str {
        self.institution.as_str()
    }

    /// `"<name> - <role>"`, the default value of "Elaborado por" fields.
    pub fn author_line(&self) -> String {
        format!("{} - {}", self.signatory_name, self.signatory_role)
    }
}

fn default_text(value: &str) -> NonEmptyText {
    NonEmptyText::new(value).expect("built-in defaults are non-empty")
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::from_env_values(None, None, None)
    }
}

/// Loads improver rules from an optional YAML file.
///
/// `None` (or a blank path) yields the built-in rules.
///
/// # Errors
///
/// Returns `FormError::FileRead` if the file cannot be read,
/// `FormError::YamlDeserialization` if it is not a valid rules document, and
/// `FormError::InvalidInput` if it defines no replacement terms at all.
pub fn load_improver_rules(path: Option<&Path>) -> FormResult<ImproverRules> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(ImproverRules::default());
    };

    let contents = std::fs::read_to_string(path).map_err(FormError::FileRead)?;
    let rules: ImproverRules =
        serde_yaml::from_str(&contents).map_err(FormError::YamlDeserialization)?;

    if rules.replacements.iter().all(|rule| rule.terms.is_empty()) {
        return Err(FormError::InvalidInput(format!(
            "improver rules file {} defines no replacement terms",
            path.display()
        )));
    }

    tracing::debug!(
        path = %path.display(),
        rules = rules.replacements.len(),
        "loaded improver rules"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_institution() {
        let config = PortalConfig::default();
        assert_eq!(config.signatory_name(), "Myrian Fortuna");
        assert_eq!(config.signatory_role(), "Coordenadora Pedagógica");
        assert_eq!(config.institution(), "Creche Municipal");
    }

    #[test]
    fn blank_env_values_fall_back() {
        let config = PortalConfig::from_env_values(
            Some("  ".into()),
            Some("Diretora".into()),
            None,
        );
        assert_eq!(config.signatory_name(), "Myrian Fortuna");
        assert_eq!(config.signatory_role(), "Diretora");
        assert_eq!(config.author_line(), "Myrian Fortuna - Diretora");
    }

    #[test]
    fn load_rules_without_path_uses_builtin() {
        let rules = load_improver_rules(None).unwrap();
        assert_eq!(rules, ImproverRules::default());
    }

    #[test]
    fn load_rules_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "replacements:\n  - terms: [chato]\n    replacement: desafiador\npreambles:\n  care_plan: \"Observou-se que \"\n  development_report: \"A criança apresenta \"\n  meeting_minutes: \"Registrou-se que \""
        )
        .unwrap();

        let rules = load_improver_rules(Some(file.path())).unwrap();
        assert_eq!(rules.replacements.len(), 1);
        assert_eq!(rules.replacements[0].replacement, "desafiador");
        assert_eq!(rules.preambles.meeting_minutes, "Registrou-se que ");
    }

    #[test]
    fn load_rules_rejects_empty_term_lists() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "replacements: []").unwrap();

        assert!(matches!(
            load_improver_rules(Some(file.path())),
            Err(FormError::InvalidInput(_))
        ));
    }

    #[test]
    fn load_rules_missing_file() {
        let result = load_improver_rules(Some(Path::new("/nonexistent/rules.yaml")));
        assert!(matches!(result, Err(FormError::FileRead(_))));
    }
}
