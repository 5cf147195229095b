//! Constants used throughout the portal core crate.
//!
//! Fixed document wording lives here so the templates stay readable.

/// Default signatory printed in every closing block.
pub const DEFAULT_SIGNATORY_NAME: &str = "Myrian Fortuna";

/// Default role printed under the signatory name.
pub const DEFAULT_SIGNATORY_ROLE: &str = "Coordenadora Pedagógica";

/// Default institution, also used as the meeting location when none is given.
pub const DEFAULT_INSTITUTION: &str = "Creche Municipal";

/// Signature line drawn above the signatory name.
pub const SIGNATURE_LINE: &str = "_________________________________";

/// Extension used by the plain-text exporter.
pub const TEXT_EXTENSION: &str = "txt";

pub const CARE_PLAN_FOLLOW_UP: &str = "Este plano deverá ser revisado periodicamente, com avaliação dos progressos e ajustes necessários nas estratégias propostas. A família será mantida informada sobre o desenvolvimento da criança e orientada sobre como apoiar o processo de aprendizagem em casa.";

pub const REPORT_CLOSING: &str = "Este relatório reflete o desenvolvimento da criança durante o período observado. É importante que a família mantenha diálogo constante com a escola para acompanhar o progresso e apoiar o desenvolvimento integral da criança.\n\nEstamos à disposição para esclarecimentos e orientações adicionais.";

/// Closing paragraph of meeting minutes; `{signatory}` is substituted at render time.
pub const MINUTES_CLOSING: &str = "Nada mais havendo a tratar, a reunião foi encerrada e eu, {signatory}, lavrei a presente ata que, após lida e aprovada, será assinada por todos os participantes.";
