//! # Portal Core
//!
//! Core logic of the childcare document portal.
//!
//! This crate turns form submissions into plain-text institutional documents:
//! - The form registry (fields, labels, required fields per document type)
//! - Validation and template rendering into [`RenderedDocument`]s
//! - Heuristic text improvement, with an optional [`TextEnhancer`] seam for remote services
//! - Plain-text export to a directory
//!
//! **No environment access**: configuration is resolved by the binary and passed in as a
//! [`PortalConfig`].

pub mod config;
pub mod constants;
pub mod document;
pub mod enhance;
pub mod error;
pub mod export;
pub mod form_data;
pub mod improve;
pub mod registry;
pub mod render;

pub use config::{load_improver_rules, PortalConfig};
pub use document::{DocumentType, RenderedDocument};
pub use enhance::{EnhanceError, EnhanceRequest, Enhanced, EnhancementSource, Enhancer, TextEnhancer};
pub use error::{FormError, FormResult};
pub use export::{file_name, TextExporter};
pub use form_data::FormData;
pub use improve::{ImproverRules, TextImprover};
pub use registry::{FieldKind, FieldSpec};
pub use render::TemplateRenderer;

pub use portal_types::{DocumentDate, NonEmptyText};
