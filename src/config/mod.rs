pub mod descriptor_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub use descriptor_config::{DescriptorConfig, FieldConfig, FieldKind};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "maptrans")]
#[command(about = "Translate JSON records with a declarative field descriptor")]
pub struct CliConfig {
    #[arg(long, short = 'd', help = "TOML descriptor file")]
    pub descriptor: String,

    #[arg(long, short = 'i', help = "JSON input file (object or array of objects); stdin when omitted")]
    pub input: Option<String>,

    #[arg(long, short = 'o', help = "Output file; stdout when omitted")]
    pub output: Option<String>,

    #[arg(
        long,
        help = "Check every result against its source with the inverted descriptor. Renamed values with surrounding whitespace are reported as mismatches"
    )]
    pub verify: bool,

    #[arg(long, help = "Pretty-print the output JSON")]
    pub pretty: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::Result<()> {
        crate::utils::validation::validate_non_empty_string("descriptor", &self.descriptor)?;
        if let Some(input) = &self.input {
            crate::utils::validation::validate_non_empty_string("input", input)?;
        }
        if let Some(output) = &self.output {
            crate::utils::validation::validate_non_empty_string("output", output)?;
        }
        Ok(())
    }
}
