use crate::document::DocumentType;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{document_type}: o campo obrigatório \"{label}\" ({field}) não foi preenchido")]
    MissingField {
        document_type: DocumentType,
        field: &'static str,
        label: &'static str,
    },
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid improver rule: {0}")]
    InvalidRule(#[from] regex::Error),

    #[error("refusing to overwrite existing file: {}", .0.display())]
    FileExists(std::path::PathBuf),
    #[error("failed to write document file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("failed to deserialize JSON: {0}")]
    Deserialization(serde_json::Error),
}

impl FormError {
    /// True for the user-correctable validation failure raised at render time.
    pub fn is_validation(&self) -> bool {
        matches!(self, FormError::MissingField { .. })
    }
}

pub type FormResult<T> = std::result::Result<T, FormError>;
