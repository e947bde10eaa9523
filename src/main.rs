mod export;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use firecal_core::error::ExportError;
use firecal_firestore::FilterOp;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "firecal-cli")]
#[command(about = "Export Firestore events by type to an iCalendar (.ics) file")]
pub struct Cli {
    /// GCP/Firebase project id (optional if present in the credentials)
    #[arg(long)]
    pub project: Option<String>,

    /// Path to a service account JSON key (optional if
    /// GOOGLE_APPLICATION_CREDENTIALS is set)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Firestore collection name
    #[arg(long, default_value = "events")]
    pub collection: String,

    /// Event type filter value(s), e.g. --types meeting --types week-end
    #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
    pub types: Vec<String>,

    /// Output .ics filepath
    #[arg(long, default_value = "events.ics")]
    pub output: PathBuf,

    /// Timezone (IANA name)
    #[arg(long, default_value = "Europe/Brussels")]
    pub tz: String,

    /// Field name to filter on
    #[arg(long, default_value = "type")]
    pub where_field: String,

    /// Filter operator
    #[arg(long, value_enum, default_value = "member-of-set")]
    pub where_op: WhereOp,

    /// Optional orderBy field (e.g. start)
    #[arg(long)]
    pub order_by: Option<String>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

/// CLI surface of the two supported filter operators.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WhereOp {
    Equals,
    MemberOfSet,
}

impl From<WhereOp> for FilterOp {
    fn from(op: WhereOp) -> Self {
        match op {
            WhereOp::Equals => FilterOp::Equals,
            WhereOp::MemberOfSet => FilterOp::MemberOfSet,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match export::run(&cli).await {
        Ok(count) => {
            println!("Wrote {} events to {}", count, cli.output.display());
        }
        Err(err) => {
            eprintln!("{err:#}");
            let code = err
                .downcast_ref::<ExportError>()
                .map(ExportError::exit_code)
                .unwrap_or(1);
            std::process::exit(code);
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "firecal_cli=debug,firecal_core=debug,firecal_firestore=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_applied() {
        let cli = Cli::parse_from(["firecal-cli", "--types", "meeting"]);
        assert_eq!(cli.collection, "events");
        assert_eq!(cli.tz, "Europe/Brussels");
        assert_eq!(cli.where_field, "type");
        assert!(matches!(cli.where_op, WhereOp::MemberOfSet));
        assert_eq!(cli.output, PathBuf::from("events.ics"));
        assert!(cli.order_by.is_none());
    }

    #[test]
    fn types_accepts_repeats_and_commas() {
        let cli = Cli::parse_from([
            "firecal-cli",
            "--types",
            "meeting,week-end",
            "--types",
            "other",
        ]);
        assert_eq!(cli.types, vec!["meeting", "week-end", "other"]);
    }

    #[test]
    fn where_op_parses_both_operators() {
        let cli = Cli::parse_from(["firecal-cli", "--types", "meeting", "--where-op", "equals"]);
        assert!(matches!(cli.where_op, WhereOp::Equals));

        let cli = Cli::parse_from([
            "firecal-cli",
            "--types",
            "meeting",
            "--where-op",
            "member-of-set",
        ]);
        assert!(matches!(cli.where_op, WhereOp::MemberOfSet));
    }
}
