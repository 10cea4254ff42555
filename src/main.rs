use chrono::Datelike;
use clap::Parser;
use destino::core::cycles;
use destino::domain::model::{HandPhoto, OracleOutcome};
use destino::utils::{logger, validation::Validate};
use destino::{AppConfig, CliConfig, GeminiClient, KnowledgeBase, ReadingEngine, ReadingRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting destino CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Credentials are checked before any analysis happens.
    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(3);
        }
    };

    let birth_date = match cycles::parse_birth_date(&cli.birth_date) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let reference_year = cli
        .reference_year
        .unwrap_or_else(|| chrono::Local::now().year());

    let mut photos = Vec::new();
    for path in &cli.photos {
        match HandPhoto::from_file(path) {
            Ok(photo) => photos.push(photo),
            Err(e) => {
                eprintln!("❌ Could not read photo '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }

    let oracle = GeminiClient::new(&app_config)?;
    let engine = ReadingEngine::new(oracle, KnowledgeBase::global());
    let request = ReadingRequest {
        question: cli.question.clone(),
        birth_date,
        reference_year,
        photos,
        consult_oracle: !cli.offline,
    };

    match engine.run(&request).await {
        Ok(reading) => {
            tracing::info!("✅ Reading completed (personal year {})", reading.personal_year);
            println!("{}", reading.interpretation.narrative_text);
            match reading.oracle {
                OracleOutcome::Text(text) => {
                    println!("---");
                    println!("{}", text);
                }
                OracleOutcome::Unavailable { message } => {
                    eprintln!("⚠️ Análisis del oráculo no disponible: {}", message);
                }
                OracleOutcome::Skipped => {}
            }
        }
        Err(e) => {
            tracing::error!("❌ Reading failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
