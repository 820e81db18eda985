use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version, about = "Product event triage and workflow routing")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify product events and write the workflow reports
    Classify(ClassifyArgs),

    /// Filter and sort a CSV table, then print column statistics
    View(ViewArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Source directory (one CSV per table) or a single CSV file
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Label of the table holding product events
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Workflow rule set file
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Skip the row-level summary
    #[arg(long)]
    pub no_row_summary: bool,

    /// Skip the GFE pivot
    #[arg(long)]
    pub no_pivot: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// CSV file to view
    #[arg(short, long)]
    pub input: PathBuf,

    /// Column to filter on
    #[arg(long, requires = "filter_value")]
    pub filter_column: Option<String>,

    /// Case-insensitive substring the filter column must contain
    #[arg(long, requires = "filter_column")]
    pub filter_value: Option<String>,

    /// Column to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort_by")]
    pub descending: bool,

    /// Write the view here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::parse_from([
            "triage", "classify", "-i", "site-a", "-i", "site-b.csv", "--no-pivot", "-v",
        ]);
        assert!(cli.verbose);
        let Commands::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.inputs.len(), 2);
        assert!(args.no_pivot);
        assert!(!args.no_row_summary);
    }

    #[test]
    fn test_filter_value_requires_column() {
        let result = Cli::try_parse_from(["triage", "view", "-i", "a.csv", "--filter-value", "x"]);
        assert!(result.is_err());
    }
}
