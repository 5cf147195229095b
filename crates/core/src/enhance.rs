//! Text enhancement capability.
//!
//! A [`TextEnhancer`] is anything that can rewrite observation text into professional prose,
//! typically a remote language model. The portal never probes for one: the caller either hands
//! an implementation to [`Enhancer::new`] or passes `None`, in which case every request goes to
//! the heuristic [`TextImprover`].
//!
//! ```ignore
//! struct Offline;
//!
//! impl TextEnhancer for Offline {
//!     fn name(&self) -> &str {
//!         "offline"
//!     }
//!
//!     fn enhance(&self, _request: &EnhanceRequest) -> Result<String, EnhanceError> {
//!         Err(EnhanceError::Unavailable)
//!     }
//! }
//! ```

use crate::document::DocumentType;
use crate::form_data::FormData;
use crate::improve::TextImprover;
use crate::registry::{self, FieldKind};

/// Errors a [`TextEnhancer`] may report. All of them are recovered by falling back to the
/// heuristic improver.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("text enhancer is not available")]
    Unavailable,
    #[error("text enhancement failed: {0}")]
    Failed(String),
}

/// One piece of text to enhance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceRequest {
    pub document_type: DocumentType,
    /// The original observation text.
    pub text: String,
    /// Instruction text built by [`improvement_prompt`].
    pub prompt: String,
}

impl EnhanceRequest {
    pub fn new(document_type: DocumentType, text: impl Into<String>) -> Self {
        let text = text.into();
        let prompt = improvement_prompt(&text, document_type);
        Self {
            document_type,
            text,
            prompt,
        }
    }
}

/// Port for external text enhancement services.
pub trait TextEnhancer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Returns the rewritten text for `request`.
    fn enhance(&self, request: &EnhanceRequest) -> Result<String, EnhanceError>;
}

/// Builds the instruction sent to a text enhancer for `document_type`.
pub fn improvement_prompt(text: &str, document_type: DocumentType) -> String {
    let (intro, requirements) = match document_type {
        DocumentType::CarePlan => (
            "Transforme estas observações informais em texto profissional para um PAD (Plano de Atendimento Diferenciado):",
            [
                "Use linguagem técnica e respeitosa",
                "Foque nas necessidades específicas da criança",
                "Evite palavras inadequadas ou julgamentos",
                "Mantenha tom profissional para supervisores",
            ],
        ),
        DocumentType::DevelopmentReport => (
            "Transforme estas observações em texto profissional para relatório individual de desenvolvimento:",
            [
                "Linguagem respeitosa para os pais",
                "Destaque aspectos positivos do desenvolvimento",
                "Use termos pedagógicos apropriados",
                "Evite palavras que possam ofender",
            ],
        ),
        DocumentType::MeetingMinutes => (
            "Transforme estas observações em texto formal para ata de reunião:",
            [
                "Linguagem formal e objetiva",
                "Foque em decisões e ações",
                "Use terceira pessoa",
                "Evite opiniões pessoais",
            ],
        ),
    };

    let mut prompt = format!("{intro}\n\nObservações originais: \"{text}\"\n\nRequisitos:\n");
    for requirement in requirements {
        prompt.push_str("- ");
        prompt.push_str(requirement);
        prompt.push('\n');
    }
    prompt.push_str("- Máximo 3 parágrafos\n\nTexto melhorado:");
    prompt
}

/// Where an [`Enhanced`] text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancementSource {
    /// Produced by the named [`TextEnhancer`].
    Remote(String),
    Heuristic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhanced {
    pub text: String,
    pub source: EnhancementSource,
}

/// Routes enhancement requests to an optional [`TextEnhancer`], falling back to the heuristic
/// improver.
pub struct Enhancer {
    improver: TextImprover,
    remote: Option<Box<dyn TextEnhancer>>,
}

impl Enhancer {
    pub fn new(improver: TextImprover, remote: Option<Box<dyn TextEnhancer>>) -> Self {
        Self { improver, remote }
    }

    /// Heuristic-only enhancer.
    pub fn offline(improver: TextImprover) -> Self {
        Self::new(improver, None)
    }

    pub fn improver(&self) -> &TextImprover {
        &self.improver
    }

    /// Enhances `text`. Never fails: remote errors and blank remote answers are logged and the
    /// heuristic result is returned instead.
    pub fn enhance(&self, text: &str, document_type: DocumentType) -> Enhanced {
        if let Some(remote) = &self.remote {
            if !text.trim().is_empty() {
                let request = EnhanceRequest::new(document_type, text);
                match remote.enhance(&request) {
                    Ok(answer) if !answer.trim().is_empty() => {
                        return Enhanced {
                            text: answer.trim().to_owned(),
                            source: EnhancementSource::Remote(remote.name().to_owned()),
                        };
                    }
                    Ok(_) => {
                        tracing::warn!(
                            enhancer = remote.name(),
                            "text enhancer returned an empty answer, using heuristic improver"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            enhancer = remote.name(),
                            error = %e,
                            "text enhancer failed, using heuristic improver"
                        );
                    }
                }
            }
        }

        Enhanced {
            text: self.improver.improve(text, document_type),
            source: EnhancementSource::Heuristic,
        }
    }

    /// Returns a copy of `data` with every filled narrative field enhanced. Other fields are
    /// left as entered.
    pub fn enhance_form(&self, document_type: DocumentType, data: &FormData) -> FormData {
        data.iter()
            .map(|(field, value)| {
                let narrative = registry::field_spec(document_type, field)
                    .is_some_and(|spec| spec.kind == FieldKind::Narrative);
                if narrative && !value.is_empty() {
                    (field.to_owned(), self.enhance(value, document_type).text)
                } else {
                    (field.to_owned(), value.to_owned())
                }
            })
            .collect()
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::offline(TextImprover::default())
    }
}

impl std::fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enhancer")
            .field("improver", &self.improver)
            .field("remote", &self.remote.as_ref().map(|r| r.name().to_owned()))
            .finish()
    }
}
