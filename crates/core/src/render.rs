//! Template renderer.
//!
//! Turns a validated [`FormData`] into the plain-text document for its type. Each template is
//! a fixed sequence of labelled sections:
//!
//! ```text
//! <TITLE>
//!
//! <HEADER>
//! <body copied verbatim>
//!
//! <HEADER>
//! Label: value
//! Label: value
//!
//! _________________________________
//! <signatory>
//! <role>
//! <institution>
//!
//! Data: dd/mm/yyyy
//! ```
//!
//! Optional narrative sections and optional `Label: value` lines are left out entirely when
//! their field is blank. The output is plain text, so nothing is escaped.

use crate::config::PortalConfig;
use crate::constants::{CARE_PLAN_FOLLOW_UP, MINUTES_CLOSING, REPORT_CLOSING, SIGNATURE_LINE};
use crate::document::{DocumentType, RenderedDocument};
use crate::error::FormResult;
use crate::form_data::FormData;
use crate::registry;
use chrono::{DateTime, Utc};
use portal_types::DocumentDate;

/// Renders form submissions into [`RenderedDocument`]s.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    config: PortalConfig,
}

impl TemplateRenderer {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Renders `data` as a `document_type` document dated now.
    ///
    /// # Errors
    ///
    /// Returns `FormError::MissingField` naming the first required field that is blank.
    pub fn render(
        &self,
        document_type: DocumentType,
        data: &FormData,
    ) -> FormResult<RenderedDocument> {
        self.render_at(document_type, data, Utc::now())
    }

    /// Renders `data` as if the current time were `now`.
    ///
    /// `now` becomes the document's `created_at` and stands in for any absent date field, so
    /// two calls with the same data and the same `now` produce identical text.
    ///
    /// # Errors
    ///
    /// Returns `FormError::MissingField` naming the first required field that is blank.
    pub fn render_at(
        &self,
        document_type: DocumentType,
        data: &FormData,
        now: DateTime<Utc>,
    ) -> FormResult<RenderedDocument> {
        registry::validate(document_type, data)?;

        let today = DocumentDate::from(now.date_naive());
        let document_date = data
            .value("data")
            .map(format_date)
            .unwrap_or_else(|| today.to_string());

        let body = match document_type {
            DocumentType::CarePlan => self.care_plan(data, &document_date),
            DocumentType::DevelopmentReport => self.development_report(data, &document_date),
            DocumentType::MeetingMinutes => self.meeting_minutes(data, &document_date),
        };
        let text = body.finish(self.signature_block(&document_date));

        tracing::debug!(
            document_type = document_type.slug(),
            chars = text.chars().count(),
            "rendered document"
        );

        Ok(RenderedDocument::new(
            document_type,
            text,
            now,
            data.value("nome").map(str::to_owned),
        ))
    }

    fn care_plan(&self, data: &FormData, document_date: &str) -> Sections {
        let mut doc = Sections::new(DocumentType::CarePlan.title());
        doc.lines(
            "IDENTIFICAÇÃO",
            [
                ("Nome da criança", data.value("nome").map(str::to_owned)),
                ("Idade", data.value("idade").map(str::to_owned)),
                ("Data de nascimento", data.value("nascimento").map(format_date)),
                ("Responsável legal", data.value("responsavel").map(str::to_owned)),
            ],
        );
        doc.lines(
            "INFORMAÇÕES DO DOCUMENTO",
            [
                ("Data do documento", Some(document_date.to_owned())),
                ("Período de observação", data.value("periodo").map(str::to_owned)),
                ("Elaborado por", data.value("elaborado").map(str::to_owned)),
            ],
        );
        doc.section("NECESSIDADES IDENTIFICADAS", data.value("necessidades"));
        doc.section("DIAGNÓSTICO/SUSPEITA", data.value("diagnostico"));
        doc.section("OBJETIVOS DO PLANO", data.value("objetivos"));
        doc.section("ESTRATÉGIAS PROPOSTAS", data.value("estrategias"));
        doc.section("OBSERVAÇÕES ADICIONAIS", data.value("observacoes"));
        doc.section("ACOMPANHAMENTO", Some(CARE_PLAN_FOLLOW_UP));
        doc
    }

    fn development_report(&self, data: &FormData, document_date: &str) -> Sections {
        let mut doc = Sections::new(DocumentType::DevelopmentReport.title());
        doc.lines(
            "IDENTIFICAÇÃO",
            [
                ("Nome da criança", data.value("nome").map(str::to_owned)),
                ("Idade", data.value("idade").map(str::to_owned)),
                ("Turma/Grupo", data.value("turma").map(str::to_owned)),
                ("Período de observação", data.value("periodo").map(str::to_owned)),
                ("Data do relatório", Some(document_date.to_owned())),
            ],
        );
        doc.section("DESENVOLVIMENTO SOCIOEMOCIONAL", data.value("socioemocional"));
        doc.section("DESENVOLVIMENTO COGNITIVO", data.value("cognitivo"));
        doc.section("DESENVOLVIMENTO MOTOR", data.value("motor"));
        doc.section("LINGUAGEM E COMUNICAÇÃO", data.value("linguagem"));
        doc.section("AUTONOMIA E CUIDADOS PESSOAIS", data.value("autonomia"));
        doc.section("OBSERVAÇÕES GERAIS", data.value("observacoes"));
        doc.section("CONSIDERAÇÕES FINAIS", Some(REPORT_CLOSING));
        doc
    }

    fn meeting_minutes(&self, data: &FormData, document_date: &str) -> Sections {
        let kind = data.value("tipo").unwrap_or_default();
        let title = format!(
            "{} {}",
            DocumentType::MeetingMinutes.title(),
            kind.to_uppercase()
        );
        let mut doc = Sections::new(title.trim_end());
        doc.lines(
            "INFORMAÇÕES DA REUNIÃO",
            [
                ("Data", Some(document_date.to_owned())),
                ("Horário", data.value("horario").map(str::to_owned)),
                (
                    "Local",
                    Some(
                        data.value("local")
                            .unwrap_or(self.config.institution())
                            .to_owned(),
                    ),
                ),
                ("Tipo de reunião", Some(kind.to_owned())),
            ],
        );
        doc.section("PARTICIPANTES", data.value("participantes"));
        doc.section("PAUTA", data.value("pauta"));
        doc.section("DESENVOLVIMENTO DA REUNIÃO", data.value("desenvolvimento"));
        doc.section("DECISÕES TOMADAS", data.value("decisoes"));
        doc.section("AÇÕES E RESPONSÁVEIS", data.value("acoes"));
        doc.section("PRAZOS ESTABELECIDOS", data.value("prazos"));
        doc.section("OBSERVAÇÕES ADICIONAIS", data.value("observacoes"));
        let closing = MINUTES_CLOSING.replace("{signatory}", self.config.signatory_name());
        doc.section("ENCERRAMENTO", Some(closing.as_str()));
        doc
    }

    /// Closing block shared by every document type.
    fn signature_block(&self, document_date: &str) -> String {
        format!(
            "{}\n{}\n{}\n{}\n\nData: {}",
            SIGNATURE_LINE,
            self.config.signatory_name(),
            self.config.signatory_role(),
            self.config.institution(),
            document_date
        )
    }
}

/// Formats an ISO date as `dd/mm/yyyy`; anything else is returned as entered.
pub fn format_date(value: &str) -> String {
    match DocumentDate::parse(value) {
        Ok(date) => date.to_string(),
        Err(_) => value.to_owned(),
    }
}

/// Accumulates the blank-line separated blocks of one document.
struct Sections {
    blocks: Vec<String>,
}

impl Sections {
    fn new(title: &str) -> Self {
        Self {
            blocks: vec![title.to_owned()],
        }
    }

    /// Adds `HEADER\nbody`; skipped when `body` is `None`.
    fn section(&mut self, header: &str, body: Option<&str>) {
        if let Some(body) = body {
            self.blocks.push(format!("{header}\n{body}"));
        }
    }

    /// Adds `HEADER` followed by `Label: value` lines, leaving out lines without a value.
    fn lines<const N: usize>(&mut self, header: &str, lines: [(&str, Option<String>); N]) {
        let mut block = header.to_owned();
        for (label, value) in lines {
            if let Some(value) = value {
                block.push('\n');
                block.push_str(label);
                block.push_str(": ");
                block.push_str(&value);
            }
        }
        self.blocks.push(block);
    }

    fn finish(mut self, signature: String) -> String {
        self.blocks.push(signature);
        self.blocks.join("\n\n")
    }
}
