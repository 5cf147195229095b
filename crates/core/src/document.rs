//! Document types and the rendered document value.

use crate::error::{FormError, FormResult};
use chrono::{DateTime, Utc};
use portal_types::DocumentDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// The kinds of document the portal can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// PAD: Plano de Atendimento Diferenciado (individualised care plan).
    #[serde(rename = "pad")]
    CarePlan,
    /// Relatório Individual de Desenvolvimento.
    #[serde(rename = "relatorio")]
    DevelopmentReport,
    /// Ata de Reunião.
    #[serde(rename = "ata")]
    MeetingMinutes,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::CarePlan,
        DocumentType::DevelopmentReport,
        DocumentType::MeetingMinutes,
    ];

    /// Short key used by forms and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::CarePlan => "pad",
            DocumentType::DevelopmentReport => "relatorio",
            DocumentType::MeetingMinutes => "ata",
        }
    }

    /// Heading printed on the first line of the document.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::CarePlan => "PLANO DE ATENDIMENTO DIFERENCIADO (PAD)",
            DocumentType::DevelopmentReport => "RELATÓRIO INDIVIDUAL DE DESENVOLVIMENTO",
            DocumentType::MeetingMinutes => "ATA DE REUNIÃO",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::CarePlan => "PAD (Plano de Atendimento Diferenciado)",
            DocumentType::DevelopmentReport => "Relatório Individual",
            DocumentType::MeetingMinutes => "Ata de Reunião",
        }
    }

    /// ASCII prefix for exported file names.
    pub fn file_stem(&self) -> &'static str {
        match self {
            DocumentType::CarePlan => "PAD",
            DocumentType::DevelopmentReport => "Relatorio",
            DocumentType::MeetingMinutes => "Ata",
        }
    }

    /// Resolves a form key, falling back to `DevelopmentReport` for anything unrecognised.
    ///
    /// The browser portal behaved this way because its lookup tables defaulted to the report
    /// entry on a key miss. That looks accidental rather than designed, so the fallback is kept
    /// only behind this explicitly named entry point and logged every time it fires. Prefer
    /// [`DocumentType::from_str`], which rejects unknown keys.
    pub fn parse_or_fallback(key: &str) -> DocumentType {
        match key.parse() {
            Ok(document_type) => document_type,
            Err(_) => {
                tracing::warn!(
                    key,
                    "unrecognised document type, falling back to development report"
                );
                DocumentType::DevelopmentReport
            }
        }
    }
}

impl FromStr for DocumentType {
    type Err = FormError;

    fn from_str(s: &str) -> FormResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "pad" | "care-plan" | "careplan" => Ok(DocumentType::CarePlan),
            "relatorio" | "relatório" | "development-report" | "developmentreport" => {
                Ok(DocumentType::DevelopmentReport)
            }
            "ata" | "meeting-minutes" | "meetingminutes" => Ok(DocumentType::MeetingMinutes),
            _ => Err(FormError::UnknownDocumentType(s.to_owned())),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The immutable output of one render.
///
/// Rendering again produces a new value with a new `id`; there is no API to edit one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    id: Uuid,
    document_type: DocumentType,
    text: String,
    created_at: DateTime<Utc>,
    subject: Option<String>,
}

impl RenderedDocument {
    pub(crate) fn new(
        document_type: DocumentType,
        text: String,
        created_at: DateTime<Utc>,
        subject: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_type,
            text,
            created_at,
            subject,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// The document body consumed by every export adapter.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The child the document is about, when the form names one.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn created_on(&self) -> DocumentDate {
        DocumentDate::from(self.created_at.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_parse_back_to_their_type() {
        for document_type in DocumentType::ALL {
            assert_eq!(
                document_type.slug().parse::<DocumentType>().unwrap(),
                document_type
            );
        }
    }

    #[test]
    fn parse_accepts_english_names_and_case() {
        assert_eq!(
            "Care-Plan".parse::<DocumentType>().unwrap(),
            DocumentType::CarePlan
        );
        assert_eq!(
            " ATA ".parse::<DocumentType>().unwrap(),
            DocumentType::MeetingMinutes
        );
    }

    #[test]
    fn strict_parse_rejects_unknown_key() {
        let err = "boletim".parse::<DocumentType>().unwrap_err();
        assert!(matches!(err, FormError::UnknownDocumentType(ref key) if key == "boletim"));
    }

    #[test]
    fn lenient_parse_falls_back_to_report() {
        assert_eq!(
            DocumentType::parse_or_fallback("boletim"),
            DocumentType::DevelopmentReport
        );
        assert_eq!(
            DocumentType::parse_or_fallback("pad"),
            DocumentType::CarePlan
        );
    }

    #[test]
    fn serde_uses_slugs() {
        let json = serde_json::to_string(&DocumentType::MeetingMinutes).unwrap();
        assert_eq!(json, "\"ata\"");
        let parsed: DocumentType = serde_json::from_str("\"pad\"").unwrap();
        assert_eq!(parsed, DocumentType::CarePlan);
    }
}
