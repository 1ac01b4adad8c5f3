use clap::Parser;
use maptrans::utils::{logger, validation::Validate};
use maptrans::{CliConfig, DescriptorConfig, MapTransError, TranslationEngine, Value};
use std::io::{Read, Write};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting maptrans CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!("❌ Translation failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> maptrans::Result<()> {
    config.validate()?;

    let descriptor = DescriptorConfig::from_file(&config.descriptor)?.build()?;
    let engine = if config.verify {
        tracing::info!("🔍 Verification enabled");
        TranslationEngine::new_with_verification(descriptor)
    } else {
        TranslationEngine::new(descriptor)
    };

    let input = read_input(config.input.as_deref())?;
    let document: Value = serde_json::from_str(&input)?;
    let output = engine.run(&document)?;

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    write_output(config.output.as_deref(), &rendered)?;

    tracing::info!("✅ Translation completed successfully!");
    if let Some(path) = &config.output {
        tracing::info!("📁 Output saved to: {}", path);
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String, MapTransError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&str>, rendered: &str) -> Result<(), MapTransError> {
    match path {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, rendered)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }
    Ok(())
}
