use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use evalia_cli::config::{API_KEY_ENV, ConfigStore};
use evalia_cli::generate::{improve_record, save_record, write_report};
use evalia_cli::interactive::{Outcome, run_wizard};
use evalia_core::Field;
use evalia_core::Record;
use evalia_core::wizard::Wizard;
use evalia_export::SUGGESTED_FILENAME;
use eyre::{Result, WrapErr};

#[derive(Parser)]
#[command(name = "evalia")]
#[command(about = "Informe psicológico para procedimiento bariátrico")]
#[command(version)]
struct Cli {
    /// Log as JSON lines instead of text
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a record JSON file to PDF
    Render {
        /// Flat JSON object of field keys to values
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = SUGGESTED_FILENAME)]
        output: PathBuf,
        /// Field keys to improve before rendering (e.g. observaciones)
        #[arg(long, value_delimiter = ',')]
        improve: Vec<Field>,
    },
    /// Fill the evaluation step by step, then render it
    Wizard {
        #[arg(long, default_value = SUGGESTED_FILENAME)]
        output: PathBuf,
        /// Also write the captured record as JSON
        #[arg(long)]
        save_record: Option<PathBuf>,
        #[arg(long, value_delimiter = ',')]
        improve: Vec<Field>,
    },
    /// Show or change the rewrite service settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config with the API key redacted
    Show,
    /// Update stored settings
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let store = ConfigStore::default_location()?;

    match cli.command {
        Commands::Render {
            input,
            output,
            improve,
        } => {
            let json = std::fs::read_to_string(&input)
                .wrap_err_with(|| format!("failed to read {}", input.display()))?;
            let mut record = Record::from_json(&json)?;
            run_improvements(&mut record, &improve, &store)?;
            report(&record, &output)
        }
        Commands::Wizard {
            output,
            save_record,
            improve,
        } => {
            let mut wizard = Wizard::new();
            let stdin = std::io::stdin();
            let outcome = run_wizard(&mut wizard, &mut stdin.lock(), &mut std::io::stdout())?;
            if outcome == Outcome::Aborted {
                eprintln!("Evaluación incompleta; no se generó el informe.");
                return Ok(());
            }

            let mut record = wizard.into_record();
            if let Some(path) = &save_record {
                save_record_file(&record, path)?;
            }
            run_improvements(&mut record, &improve, &store)?;
            report(&record, &output)
        }
        Commands::Config { action } => run_config(action, &store),
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn save_record_file(record: &Record, path: &Path) -> Result<()> {
    save_record(record, path)?;
    println!("Registro guardado: {}", path.display());
    Ok(())
}

fn run_improvements(record: &mut Record, fields: &[Field], store: &ConfigStore) -> Result<()> {
    if fields.is_empty() {
        return Ok(());
    }

    let config = store.load()?;
    let summary = improve_record(record, fields, &config, config.resolved_api_key());
    for field in &summary.improved {
        println!("Texto mejorado: {field}");
    }
    for (field, message) in &summary.failed {
        eprintln!("No se pudo mejorar {field}: {message}");
    }
    Ok(())
}

fn report(record: &Record, output: &Path) -> Result<()> {
    let rendered = write_report(record, output)?;
    println!(
        "Informe generado: {} ({} páginas)",
        output.display(),
        rendered.page_count
    );
    Ok(())
}

fn run_config(action: ConfigAction, store: &ConfigStore) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = store.load()?;
            let info = store.info(&config, std::env::var(API_KEY_ENV).ok());
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        ConfigAction::Set {
            api_key,
            model,
            max_tokens,
            timeout_secs,
            endpoint,
        } => {
            let mut config = store.load()?;
            if let Some(key) = api_key {
                config.api_key = Some(key);
            }
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(max_tokens) = max_tokens {
                config.max_tokens = max_tokens;
            }
            if let Some(timeout_secs) = timeout_secs {
                config.timeout_secs = timeout_secs;
            }
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            store.save(&config)?;
            println!("Configuración guardada en {}", store.path().display());
        }
    }
    Ok(())
}
