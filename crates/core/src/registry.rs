//! Form registry: which fields each document type collects, which are required, and how they
//! are labelled for the person filling the form.
//!
//! The tables here are pure data. Validation walks the required list in order and stops at
//! the first blank field so the caller can point the user at exactly one input.

use crate::config::PortalConfig;
use crate::document::DocumentType;
use crate::error::{FormError, FormResult};
use crate::form_data::FormData;
use portal_types::DocumentDate;

/// How a field is entered and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// ISO calendar date, rendered `dd/mm/yyyy`.
    Date,
    /// Free observation text; the only kind the text improver rewrites.
    Narrative,
}

/// Description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: true,
        kind,
    }
}

const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: false,
        kind,
    }
}

// Required fields first, in validation order.
const CARE_PLAN_FIELDS: &[FieldSpec] = &[
    field("nome", "Nome da Criança", FieldKind::Text),
    field("idade", "Idade", FieldKind::Text),
    field("data", "Data", FieldKind::Date),
    field("periodo", "Período", FieldKind::Text),
    field("elaborado", "Elaborado por", FieldKind::Text),
    field("necessidades", "Necessidades Identificadas", FieldKind::Narrative),
    field("objetivos", "Objetivos do Plano", FieldKind::Narrative),
    field("estrategias", "Estratégias Propostas", FieldKind::Narrative),
    optional("nascimento", "Data de Nascimento", FieldKind::Date),
    optional("responsavel", "Responsável Legal", FieldKind::Text),
    optional("diagnostico", "Diagnóstico/Suspeita", FieldKind::Narrative),
    optional("observacoes", "Observações", FieldKind::Narrative),
];

const DEVELOPMENT_REPORT_FIELDS: &[FieldSpec] = &[
    field("nome", "Nome da Criança", FieldKind::Text),
    field("idade", "Idade", FieldKind::Text),
    field("periodo", "Período", FieldKind::Text),
    field("observacoes", "Observações", FieldKind::Narrative),
    optional("turma", "Turma", FieldKind::Text),
    optional("data", "Data do Relatório", FieldKind::Date),
    optional(
        "socioemocional",
        "Desenvolvimento Socioemocional",
        FieldKind::Narrative,
    ),
    optional("cognitivo", "Desenvolvimento Cognitivo", FieldKind::Narrative),
    optional("motor", "Desenvolvimento Motor", FieldKind::Narrative),
    optional("linguagem", "Linguagem e Comunicação", FieldKind::Narrative),
    optional(
        "autonomia",
        "Autonomia e Cuidados Pessoais",
        FieldKind::Narrative,
    ),
];

const MEETING_MINUTES_FIELDS: &[FieldSpec] = &[
    field("data", "Data da Reunião", FieldKind::Date),
    field("horario", "Horário", FieldKind::Text),
    field("tipo", "Tipo de Reunião", FieldKind::Text),
    field("participantes", "Participantes", FieldKind::Text),
    field("pauta", "Pauta da Reunião", FieldKind::Text),
    field(
        "desenvolvimento",
        "Desenvolvimento da Reunião",
        FieldKind::Narrative,
    ),
    optional("local", "Local", FieldKind::Text),
    optional("decisoes", "Decisões Tomadas", FieldKind::Narrative),
    optional("acoes", "Ações e Responsáveis", FieldKind::Text),
    optional("prazos", "Prazos Estabelecidos", FieldKind::Text),
    optional("observacoes", "Observações Adicionais", FieldKind::Narrative),
];

/// Every field of `document_type`, required fields first.
pub fn fields(document_type: DocumentType) -> &'static [FieldSpec] {
    match document_type {
        DocumentType::CarePlan => CARE_PLAN_FIELDS,
        DocumentType::DevelopmentReport => DEVELOPMENT_REPORT_FIELDS,
        DocumentType::MeetingMinutes => MEETING_MINUTES_FIELDS,
    }
}

pub fn field_spec(document_type: DocumentType, name: &str) -> Option<&'static FieldSpec> {
    fields(document_type).iter().find(|spec| spec.name == name)
}

/// Ordered names of the fields that must be filled before rendering.
pub fn required_fields(document_type: DocumentType) -> Vec<&'static str> {
    fields(document_type)
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
        .collect()
}

/// Required fields for a raw form key.
///
/// Unknown keys resolve to the development report field set; see
/// [`DocumentType::parse_or_fallback`].
pub fn required_fields_for_key(key: &str) -> Vec<&'static str> {
    required_fields(DocumentType::parse_or_fallback(key))
}

/// Human-readable label for `field`. Fields the registry does not know are labelled with
/// their own name.
pub fn field_label<'a>(document_type: DocumentType, field: &'a str) -> &'a str {
    match field_spec(document_type, field) {
        Some(spec) => spec.label,
        None => field,
    }
}

/// Checks that every required field of `document_type` is filled.
///
/// # Errors
///
/// Returns `FormError::MissingField` for the first required field (in registry order) that is
/// absent or blank.
pub fn validate(document_type: DocumentType, data: &FormData) -> FormResult<()> {
    match fields(document_type)
        .iter()
        .find(|spec| spec.required && !data.is_filled(spec.name))
    {
        Some(spec) => Err(FormError::MissingField {
            document_type,
            field: spec.name,
            label: spec.label,
        }),
        None => Ok(()),
    }
}

/// Fills blank defaults the way the form did when it was opened: date fields get `today` and
/// the care plan author gets the configured signatory. Filled values are never overwritten.
pub fn prefill(
    document_type: DocumentType,
    data: &mut FormData,
    config: &PortalConfig,
    today: DocumentDate,
) {
    for spec in fields(document_type) {
        if data.is_filled(spec.name) {
            continue;
        }
        match (spec.kind, spec.name) {
            // A birth date is never "today".
            (FieldKind::Date, "nascimento") => {}
            (FieldKind::Date, _) => {
                data.insert(spec.name, today.iso());
            }
            (_, "elaborado") => {
                data.insert(spec.name, config.author_line());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> DocumentDate {
        DocumentDate::parse("2024-05-20").unwrap()
    }

    #[test]
    fn required_fields_are_ordered() {
        assert_eq!(
            required_fields(DocumentType::DevelopmentReport),
            vec!["nome", "idade", "periodo", "observacoes"]
        );
        assert_eq!(
            required_fields(DocumentType::MeetingMinutes),
            vec![
                "data",
                "horario",
                "tipo",
                "participantes",
                "pauta",
                "desenvolvimento"
            ]
        );
        assert_eq!(required_fields(DocumentType::CarePlan).len(), 8);
    }

    #[test]
    fn unknown_key_uses_report_field_set() {
        assert_eq!(
            required_fields_for_key("desconhecido"),
            required_fields(DocumentType::DevelopmentReport)
        );
        assert_eq!(
            required_fields_for_key("ata"),
            required_fields(DocumentType::MeetingMinutes)
        );
    }

    #[test]
    fn labels_depend_on_type() {
        assert_eq!(field_label(DocumentType::CarePlan, "data"), "Data");
        assert_eq!(
            field_label(DocumentType::MeetingMinutes, "data"),
            "Data da Reunião"
        );
        assert_eq!(
            field_label(DocumentType::CarePlan, "campo_extra"),
            "campo_extra"
        );
    }

    #[test]
    fn required_fields_come_first() {
        for document_type in DocumentType::ALL {
            let specs = fields(document_type);
            let first_optional = specs.iter().position(|s| !s.required).unwrap();
            assert!(specs[first_optional..].iter().all(|s| !s.required));
        }
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let data = FormData::new().with("nome", "Ana").with("periodo", "2024-Q1");
        let err = validate(DocumentType::DevelopmentReport, &data).unwrap_err();
        match err {
            FormError::MissingField {
                document_type,
                field,
                label,
            } => {
                assert_eq!(document_type, DocumentType::DevelopmentReport);
                assert_eq!(field, "idade");
                assert_eq!(label, "Idade");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_treats_whitespace_as_missing() {
        let data = FormData::new()
            .with("nome", "Ana")
            .with("idade", "4")
            .with("periodo", "2024-Q1")
            .with("observacoes", "  \n ");
        let err = validate(DocumentType::DevelopmentReport, &data).unwrap_err();
        assert!(matches!(
            err,
            FormError::MissingField {
                field: "observacoes",
                ..
            }
        ));
    }

    #[test]
    fn validation_message_names_type_and_label() {
        let err = validate(DocumentType::MeetingMinutes, &FormData::new()).unwrap_err();
        assert!(err.is_validation());
        let message = err.to_string();
        assert!(message.contains("Ata de Reunião"));
        assert!(message.contains("Data da Reunião"));
    }

    #[test]
    fn prefill_sets_dates_and_author_only_when_blank() {
        let config = PortalConfig::default();
        let mut data = FormData::new().with("periodo", "1º semestre");
        prefill(DocumentType::CarePlan, &mut data, &config, today());

        assert_eq!(data.value("data"), Some("2024-05-20"));
        assert_eq!(
            data.value("elaborado"),
            Some("Myrian Fortuna - Coordenadora Pedagógica")
        );
        assert_eq!(data.value("nascimento"), None);
        assert_eq!(data.value("periodo"), Some("1º semestre"));

        let mut filled = FormData::new().with("data", "2024-01-02");
        prefill(DocumentType::MeetingMinutes, &mut filled, &config, today());
        assert_eq!(filled.value("data"), Some("2024-01-02"));
    }
}
