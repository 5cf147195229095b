use chrono::{NaiveTime, Utc};
use clap::{Parser, Subcommand};
use portal_core::{
    load_improver_rules, registry, DocumentDate, DocumentType, Enhancer, FormData, FormError,
    PortalConfig, TemplateRenderer, TextExporter, TextImprover,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Childcare document portal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List document types
    Types,
    /// List the fields of a document type
    Fields {
        /// Document type (pad, relatorio, ata)
        document_type: DocumentType,
    },
    /// Render a document from a JSON or YAML form file
    Render {
        /// Document type (pad, relatorio, ata)
        document_type: DocumentType,
        /// Form data file (.json, .yaml)
        #[arg(long)]
        data: PathBuf,
        /// Render date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<DocumentDate>,
        /// Fill blank dates and author fields with their defaults
        #[arg(long)]
        prefill: bool,
        /// Improve narrative fields before rendering
        #[arg(long)]
        improve: bool,
        /// Write a .txt file into this directory instead of printing
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Improve a piece of observation text
    Improve {
        /// Document type (pad, relatorio, ata)
        document_type: DocumentType,
        /// Text to improve
        text: String,
    },
}

/// Settings read from the environment once at startup.
struct Settings {
    config: PortalConfig,
    improver_rules: Option<PathBuf>,
}

impl Settings {
    fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self {
            config: PortalConfig::from_env_values(
                var("PORTAL_SIGNATORY_NAME"),
                var("PORTAL_SIGNATORY_ROLE"),
                var("PORTAL_INSTITUTION"),
            ),
            improver_rules: var("PORTAL_IMPROVER_RULES").map(PathBuf::from),
        }
    }

    fn improver(&self) -> anyhow::Result<TextImprover> {
        let rules = load_improver_rules(self.improver_rules.as_deref())?;
        Ok(TextImprover::new(rules)?)
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portal=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match run(cli.command, &settings) {
        Err(e) if is_validation_error(&e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
        other => other,
    }
}

fn is_validation_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<FormError>()
        .is_some_and(FormError::is_validation)
}

fn run(command: Commands, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Commands::Types => {
            for document_type in DocumentType::ALL {
                println!("{:<10} {}", document_type.slug(), document_type);
            }
        }
        Commands::Fields { document_type } => {
            for spec in registry::fields(document_type) {
                let marker = if spec.required { "*" } else { " " };
                println!("{marker} {:<16} {}", spec.name, spec.label);
            }
        }
        Commands::Render {
            document_type,
            data,
            date,
            prefill,
            improve,
            out,
        } => {
            let now = match date {
                Some(date) => date.naive().and_time(NaiveTime::MIN).and_utc(),
                None => Utc::now(),
            };
            let mut form = FormData::from_file(&data)?;
            if prefill {
                let today = DocumentDate::from(now.date_naive());
                registry::prefill(document_type, &mut form, &settings.config, today);
            }
            if improve {
                let enhancer = Enhancer::offline(settings.improver()?);
                form = enhancer.enhance_form(document_type, &form);
            }

            let renderer = TemplateRenderer::new(settings.config.clone());
            let document = renderer.render_at(document_type, &form, now)?;

            match out {
                Some(dir) => {
                    let path = TextExporter::new(dir)?.write(&document)?;
                    println!("{}", path.display());
                }
                None => println!("{}", document.text()),
            }
        }
        Commands::Improve {
            document_type,
            text,
        } => {
            let enhancer = Enhancer::offline(settings.improver()?);
            println!("{}", enhancer.enhance(&text, document_type).text);
        }
    }
    Ok(())
}
