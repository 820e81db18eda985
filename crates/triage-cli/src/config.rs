//! Application configuration

use crate::cli::ClassifyArgs;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use triage_classifiers::ClassifierConfig;
use triage_core::{ColumnMapping, DEFAULT_TABLE_LABEL};

/// Environment prefix; `TRIAGE__OUTPUT_DIR`, `TRIAGE__CLASSIFIER__GFE_CASE_INSENSITIVE`
const ENV_PREFIX: &str = "TRIAGE";

/// Searched for when no configuration file is given
const DEFAULT_CONFIG_NAME: &str = "triage";

/// Settings for a classification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Label of the table holding product events
    #[serde(default = "default_sheet")]
    pub sheet: String,

    /// Input column names
    #[serde(default)]
    pub columns: ColumnMapping,

    /// Classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Workflow rule set file; the built-in rules apply when unset
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Directory the reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Write the row-level summary
    #[serde(default = "default_true")]
    pub row_summary: bool,

    /// Write the GFE pivot
    #[serde(default = "default_true")]
    pub pivot: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist. Without one, `triage.yaml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.classifier.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, args: &ClassifyArgs) {
        if let Some(sheet) = &args.sheet {
            self.sheet = sheet.clone();
        }

        if let Some(rules) = &args.rules {
            self.rules_path = Some(rules.clone());
        }

        if let Some(out_dir) = &args.out_dir {
            self.output_dir = out_dir.clone();
        }

        if args.no_row_summary {
            self.row_summary = false;
        }

        if args.no_pivot {
            self.pivot = false;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet: default_sheet(),
            columns: ColumnMapping::default(),
            classifier: ClassifierConfig::default(),
            rules_path: None,
            output_dir: default_output_dir(),
            row_summary: true,
            pivot: true,
        }
    }
}

fn default_sheet() -> String {
    DEFAULT_TABLE_LABEL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./triage-out")
}

fn default_true() -> bool {
    true
}
