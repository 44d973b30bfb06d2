use std::path::PathBuf;

use clap::{Args, Parser};

/// Logging flags shared by both binaries.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LogFlags {
    /// Quiet mode (errors only, no progress lines)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Create the document store schema described by the entity diagram.
#[derive(Debug, Parser)]
#[command(name = "stem-provision", version)]
pub struct ProvisionCli {
    /// Diagram to read (defaults to `diagram.path` from config)
    #[arg(long, value_name = "PATH")]
    pub diagram: Option<PathBuf>,

    /// Print the derived plan as JSON and exit without contacting the store
    #[arg(long, conflicts_with = "dry_run")]
    pub plan: bool,

    /// List what would be created and exit without contacting the store
    #[arg(long)]
    pub dry_run: bool,

    /// Also write the derived plan as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub schema_out: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogFlags,
}

impl ProvisionCli {
    /// Whether this invocation talks to the store at all.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.plan || self.dry_run
    }
}

/// List the most recent events in the document store.
#[derive(Debug, Parser)]
#[command(name = "stem-events", version)]
pub struct EventsCli {
    #[command(flatten)]
    pub log: LogFlags,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn clap_command_trees_are_valid() {
        ProvisionCli::command().debug_assert();
        EventsCli::command().debug_assert();
    }

    #[test]
    fn provision_without_arguments_runs_online() {
        let cli = ProvisionCli::try_parse_from(["stem-provision"]).expect("cli should parse");
        assert!(cli.diagram.is_none());
        assert!(!cli.is_offline());
        assert!(!cli.log.quiet);
    }

    #[test]
    fn provision_flags_parse() {
        let cli = ProvisionCli::try_parse_from([
            "stem-provision",
            "--diagram",
            "model.mmd",
            "--dry-run",
            "--schema-out",
            "plan.json",
            "-v",
        ])
        .expect("cli should parse");
        assert_eq!(cli.diagram, Some(PathBuf::from("model.mmd")));
        assert_eq!(cli.schema_out, Some(PathBuf::from("plan.json")));
        assert!(cli.dry_run);
        assert!(cli.is_offline());
        assert!(cli.log.verbose);
    }

    #[test]
    fn plan_and_dry_run_conflict() {
        assert!(ProvisionCli::try_parse_from(["stem-provision", "--plan", "--dry-run"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(EventsCli::try_parse_from(["stem-events", "-q", "-v"]).is_err());
    }

    #[test]
    fn events_takes_no_positionals() {
        assert!(EventsCli::try_parse_from(["stem-events", "extra"]).is_err());
    }
}
