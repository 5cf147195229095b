//! Plain-text export of rendered documents.

use crate::constants::TEXT_EXTENSION;
use crate::document::RenderedDocument;
use crate::error::{FormError, FormResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suggested file name for `document`: `<Stem>[_<Subject>]_<YYYY-MM-DD>.<extension>`.
///
/// Whitespace runs in the subject become a single `_` and path separators are dropped, so the
/// result is always a bare file name.
pub fn file_name(document: &RenderedDocument, extension: &str) -> String {
    let mut name = document.document_type().file_stem().to_owned();
    if let Some(subject) = document.subject() {
        let subject = subject
            .split_whitespace()
            .map(|part| part.replace(['/', '\\'], ""))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        if !subject.is_empty() {
            name.push('_');
            name.push_str(&subject);
        }
    }
    format!("{}_{}.{}", name, document.created_on().iso(), extension)
}

/// Writes rendered documents as UTF-8 `.txt` files into one directory.
#[derive(Debug, Clone)]
pub struct TextExporter {
    output_dir: PathBuf,
}

impl TextExporter {
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` if `output_dir` is not an existing directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> FormResult<Self> {
        let output_dir = output_dir.into();
        if !output_dir.is_dir() {
            return Err(FormError::InvalidInput(format!(
                "output directory does not exist: {}",
                output_dir.display()
            )));
        }
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `document` and returns the path of the new file.
    ///
    /// # Errors
    ///
    /// Returns `FormError::FileExists` if a file with the same name is already present and
    /// `FormError::FileWrite` for any other I/O failure.
    pub fn write(&self, document: &RenderedDocument) -> FormResult<PathBuf> {
        let path = self
            .output_dir
            .join(file_name(document, TEXT_EXTENSION));

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(FormError::FileExists(path));
            }
            Err(e) => return Err(FormError::FileWrite(e)),
        };
        file.write_all(document.text().as_bytes())
            .map_err(FormError::FileWrite)?;
        file.write_all(b"\n").map_err(FormError::FileWrite)?;

        tracing::info!(
            document_id = %document.id(),
            document_type = document.document_type().slug(),
            path = %path.display(),
            "exported document"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentType;
    use chrono::{TimeZone, Utc};

    fn document(subject: Option<&str>) -> RenderedDocument {
        RenderedDocument::new(
            DocumentType::DevelopmentReport,
            "RELATÓRIO INDIVIDUAL DE DESENVOLVIMENTO\n\nconteúdo".to_owned(),
            Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap(),
            subject.map(str::to_owned),
        )
    }

    #[test]
    fn file_name_includes_subject_and_date() {
        assert_eq!(
            file_name(&document(Some("Ana  Clara Souza")), "txt"),
            "Relatorio_Ana_Clara_Souza_2024-04-15.txt"
        );
        assert_eq!(
            file_name(&document(None), "docx"),
            "Relatorio_2024-04-15.docx"
        );
    }

    #[test]
    fn file_name_strips_path_separators() {
        assert_eq!(
            file_name(&document(Some("../etc/ x")), "txt"),
            "Relatorio_..etc_x_2024-04-15.txt"
        );
    }

    #[test]
    fn write_creates_file_with_text() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TextExporter::new(dir.path()).unwrap();
        let doc = document(Some("Ana"));

        let path = exporter.write(&doc).unwrap();
        assert_eq!(path, dir.path().join("Relatorio_Ana_2024-04-15.txt"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{}\n", doc.text()));
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TextExporter::new(dir.path()).unwrap();
        exporter.write(&document(Some("Ana"))).unwrap();

        let err = exporter.write(&document(Some("Ana"))).unwrap_err();
        assert!(matches!(err, FormError::FileExists(_)));
    }

    #[test]
    fn new_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            TextExporter::new(missing),
            Err(FormError::InvalidInput(_))
        ));
    }
}
