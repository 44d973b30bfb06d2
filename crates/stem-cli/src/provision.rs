//! The `stem-provision` workflow and its console narration.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use stem_config::StemConfig;
use stem_store::AppwriteClient;
use stem_sync::{Reconciler, ResourceState, SyncEvent, SyncPlan, SyncReport};

use crate::cli::ProvisionCli;
use crate::output;

/// Printed after every run that reached the store.
pub const BACKFILL_NOTE: &str = "Note: attributes are only created for collections created in this run.\n\
Collections that already existed are not back-filled with fields added to the diagram since.";

pub async fn run(cli: &ProvisionCli) -> anyhow::Result<()> {
    let config = StemConfig::load_with_dotenv().context("failed to load configuration")?;
    let diagram = cli
        .diagram
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.diagram.path));

    let schema = stem_diagram::load_schema(&diagram)?;
    let plan = SyncPlan::from_schema(&schema);
    tracing::debug!(
        collections = plan.len(),
        attributes = plan.attribute_count(),
        "derived sync plan"
    );

    if let Some(path) = &cli.schema_out {
        output::write_json(path, &plan)?;
    }
    if cli.plan {
        println!("{}", output::render_json(&plan)?);
        return Ok(());
    }
    if cli.dry_run {
        print!("{}", render_dry_run(&plan));
        return Ok(());
    }

    let store = &config.store;
    store.validate()?;
    let client = AppwriteClient::from_config(store)?;

    println!("Setting up collections for STEM Network");
    println!("Endpoint: {}", store.base_url());
    println!("Project: {}", store.project_id);
    println!("Database: {}", store.database_id);

    let quiet = cli.log.quiet;
    let report = Reconciler::new(&client, &store.database_id)
        .on_event(|event| {
            if !quiet {
                println!("{}", narrate(event));
            }
        })
        .reconcile(&plan)
        .await?;

    print!("{}", render_summary(&report));
    Ok(())
}

/// One progress line per reconciliation event.
#[must_use]
pub fn narrate(event: &SyncEvent<'_>) -> String {
    match event {
        SyncEvent::DatabaseExists { database_id } => {
            format!("✓ Database '{database_id}' already exists")
        }
        SyncEvent::DatabaseCreating { database_id } => {
            format!("Creating database '{database_id}'...")
        }
        SyncEvent::DatabaseCreated { database_id } => {
            format!("✓ Created database '{database_id}'")
        }
        SyncEvent::CollectionStarted { entity } => format!("\n=== {entity} Collection ==="),
        SyncEvent::CollectionExists { collection_id, .. } => {
            format!("  ✓ Collection '{collection_id}' already exists")
        }
        SyncEvent::CollectionCreating { collection_id, .. } => {
            format!("  Creating collection '{collection_id}'...")
        }
        SyncEvent::CollectionCreated { collection_id, .. } => {
            format!("  ✓ Created collection '{collection_id}'")
        }
        SyncEvent::AttributeCreated { key, kind } => {
            format!("    ✓ Created attribute '{key}' ({kind})")
        }
        SyncEvent::AttributeExists { key } => format!("    - Attribute '{key}' already exists"),
        SyncEvent::AttributeFailed { key, reason } => {
            format!("    ✗ Error creating attribute '{key}': {reason}")
        }
    }
}

/// What a run would create, without contacting the store.
#[must_use]
pub fn render_dry_run(plan: &SyncPlan) -> String {
    let mut out = String::new();
    for collection in plan.collections() {
        let _ = writeln!(out, "{} -> {}", collection.entity, collection.collection_id);
        for attribute in &collection.attributes {
            let spec = &attribute.spec;
            let _ = write!(out, "    {}: {}", spec.key, spec.kind);
            if spec.array {
                out.push_str("[]");
            }
            if let Some(size) = spec.size {
                let _ = write!(out, " (size {size})");
            }
            if !attribute.declared_type.eq_ignore_ascii_case(spec.kind.as_str()) {
                let _ = write!(out, " <- {}", attribute.declared_type);
            }
            out.push('\n');
        }
    }
    let _ = writeln!(
        out,
        "\n{} collections, {} attributes",
        plan.len(),
        plan.attribute_count()
    );
    out
}

#[must_use]
pub fn render_summary(report: &SyncReport) -> String {
    let failures = report.failures();
    let mut out = String::from("\nSetup complete!\n");
    let _ = writeln!(
        out,
        "  Collections: {} created, {} already existed",
        report.collections_in(ResourceState::Created),
        report.collections_in(ResourceState::Existing)
    );
    let _ = writeln!(
        out,
        "  Attributes:  {} created, {} already existed, {} failed",
        report.attributes_created(),
        report.attributes_skipped(),
        failures.len()
    );
    for (collection_id, attribute) in &failures {
        if let stem_sync::AttributeOutcome::Failed { reason } = &attribute.outcome {
            let _ = writeln!(out, "    ✗ {collection_id}.{}: {reason}", attribute.key);
        }
    }
    let _ = writeln!(out, "\n{BACKFILL_NOTE}");
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stem_core::AttributeKind;
    use stem_sync::{AttributeOutcome, AttributeReport, CollectionReport};

    use super::*;

    const METRO: &str = "class Metro {
  +name: string
  +bio: richtext
  +tags: string[]
  +capacity: int
}
";

    #[test]
    fn narration_matches_progress_style() {
        assert_eq!(
            narrate(&SyncEvent::AttributeCreated {
                key: "name",
                kind: AttributeKind::String
            }),
            "    ✓ Created attribute 'name' (string)"
        );
        assert_eq!(
            narrate(&SyncEvent::AttributeFailed {
                key: "bad",
                reason: "status 400: Invalid key"
            }),
            "    ✗ Error creating attribute 'bad': status 400: Invalid key"
        );
        assert_eq!(
            narrate(&SyncEvent::CollectionStarted { entity: "RSVP" }),
            "\n=== RSVP Collection ==="
        );
    }

    #[test]
    fn dry_run_lists_attributes() {
        let plan = SyncPlan::from_schema(&stem_diagram::parse_diagram(METRO));
        assert_eq!(
            render_dry_run(&plan),
            "Metro -> metros
    name: string (size 255)
    bio: string (size 65535) <- richtext
    tags: string[] (size 255)
    capacity: integer <- int

1 collections, 4 attributes
"
        );
    }

    #[test]
    fn summary_counts_and_lists_failures() {
        let report = SyncReport {
            database_id: "db".into(),
            database: ResourceState::Existing,
            collections: vec![
                CollectionReport {
                    entity: "Metro".into(),
                    collection_id: "metros".into(),
                    state: ResourceState::Created,
                    attributes: vec![
                        AttributeReport {
                            key: "name".into(),
                            kind: AttributeKind::String,
                            outcome: AttributeOutcome::Created,
                        },
                        AttributeReport {
                            key: "bad".into(),
                            kind: AttributeKind::String,
                            outcome: AttributeOutcome::Failed {
                                reason: "status 400: Invalid key".into(),
                            },
                        },
                    ],
                },
                CollectionReport {
                    entity: "Tag".into(),
                    collection_id: "tags".into(),
                    state: ResourceState::Existing,
                    attributes: Vec::new(),
                },
            ],
        };
        let summary = render_summary(&report);
        assert!(summary.contains("Collections: 1 created, 1 already existed"));
        assert!(summary.contains("Attributes:  1 created, 0 already existed, 1 failed"));
        assert!(summary.contains("✗ metros.bad: status 400: Invalid key"));
        assert!(summary.ends_with(&format!("{BACKFILL_NOTE}\n")));
    }
}
