//! Offline provisioning output for the project diagram.

use stem_cli::provision::render_dry_run;
use stem_sync::SyncPlan;

const PROJECT_DIAGRAM: &str = include_str!("../../../docs/data-model.mmd");

fn project_plan() -> SyncPlan {
    SyncPlan::from_schema(&stem_diagram::parse_schema(PROJECT_DIAGRAM).expect("diagram parses"))
}

#[test]
fn dry_run_uses_resolved_collection_ids() {
    let rendered = render_dry_run(&project_plan());
    for line in [
        "RSVP -> rsvps",
        "JobPosting -> job_postings",
        "InstructorAssignment -> instructor_assignments",
        "Person -> persons",
    ] {
        assert!(rendered.contains(line), "missing {line:?}");
    }
    assert!(rendered.contains("    specializations: string[] (size 255)"));
    assert!(rendered.contains("    hourly_rate: float <- decimal"));
}

#[test]
fn plan_json_round_trips_through_file() {
    let plan = project_plan();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    stem_cli::output::write_json(&path, &plan).unwrap();

    let restored: SyncPlan =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(restored, plan);
    assert_eq!(restored.len(), 13);
}
