//! The `stem-events` listing.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use stem_config::StemConfig;
use stem_store::{
    AppwriteClient, Document, DocumentQuery, DocumentStore, MAX_PAGE_SIZE, RemoteOutcome,
};

use crate::cli::EventsCli;
use crate::progress::{self, Progress};

/// Entity whose collection is listed.
pub const EVENT_ENTITY: &str = "Event";

/// Attribute the listing is ordered by, newest first.
pub const ORDER_ATTRIBUTE: &str = "event_date";

const RULE_WIDTH: usize = 80;

pub async fn run(cli: &EventsCli) -> anyhow::Result<()> {
    let config = StemConfig::load_with_dotenv()?;
    let store = &config.store;
    store.validate()?;
    let client = AppwriteClient::from_config(store)?;
    let collection_id = stem_core::collection_id(EVENT_ENTITY);

    let query = DocumentQuery::default()
        .order_desc(ORDER_ATTRIBUTE)
        .limit(MAX_PAGE_SIZE);
    let spinner = Progress::spinner("Fetching events", progress::enabled(cli.log.quiet));
    let outcome = client
        .list_documents(&store.database_id, &collection_id, &query)
        .await;
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) => {
            spinner.finish_err("request failed");
            return Err(error.into());
        }
    };
    spinner.finish_clear();

    let list = match outcome {
        RemoteOutcome::Found(list) => list,
        RemoteOutcome::NotFound => anyhow::bail!(
            "collection '{collection_id}' not found in database '{}'",
            store.database_id
        ),
        RemoteOutcome::Conflict => anyhow::bail!("store answered with a conflict"),
        RemoteOutcome::Other { status, message } => {
            anyhow::bail!("store answered {status}: {message}")
        }
    };
    tracing::debug!(total = list.total, shown = list.documents.len(), "listed events");

    print!("{}", render_report(&list.documents));
    Ok(())
}

/// Format a stored date or timestamp as `YYYY-MM-DD`.
///
/// Values that do not parse are shown as stored.
#[must_use]
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return "No date".to_string();
    };
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[must_use]
pub fn render_event(event: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", event.id().unwrap_or_default());
    let _ = writeln!(out, "Title: {}", event.str_field("title").unwrap_or("Untitled"));
    if let Some(slug) = event.str_field("slug") {
        let _ = writeln!(out, "Slug: {slug}");
    }
    if let Some(blurb) = event.str_field("blurb") {
        let _ = writeln!(out, "Blurb: {blurb}");
    }
    let _ = writeln!(out, "Date: {}", format_date(event.str_field("event_date")));
    if let Some(start) = event.str_field("start_time") {
        match event.str_field("end_time") {
            Some(end) => {
                let _ = writeln!(out, "Time: {start} - {end}");
            }
            None => {
                let _ = writeln!(out, "Time: {start}");
            }
        }
    }
    if let Some(capacity) = event.i64_field("capacity").filter(|c| *c != 0) {
        let _ = writeln!(out, "Capacity: {capacity}");
    }
    let _ = writeln!(out, "Status: {}", event.str_field("status").unwrap_or("draft"));
    let _ = writeln!(
        out,
        "Registration: {}",
        event.str_field("registration_type").unwrap_or("open")
    );
    let _ = writeln!(out, "Created: {}", format_date(event.created_at()));
    out
}

#[must_use]
pub fn render_report(events: &[Document]) -> String {
    if events.is_empty() {
        return "No events found.\n".to_string();
    }

    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{rule}\nFound {} event(s)\n{rule}\n\n", events.len());
    for event in events {
        out.push_str(&render_event(event));
        let _ = writeln!(out, "{}\n", "-".repeat(RULE_WIDTH));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stem_store::DocumentList;

    use super::*;

    fn events(json: &str) -> Vec<Document> {
        serde_json::from_str::<DocumentList>(json).unwrap().documents
    }

    #[test]
    fn format_date_handles_store_timestamps() {
        assert_eq!(
            format_date(Some("2024-06-15T09:30:00.000+00:00")),
            "2024-06-15"
        );
        assert_eq!(format_date(Some("2024-06-15T23:30:00Z")), "2024-06-15");
        assert_eq!(format_date(Some("2024-06-15T09:30:00")), "2024-06-15");
        assert_eq!(format_date(Some("2024-06-15")), "2024-06-15");
    }

    #[test]
    fn format_date_falls_back() {
        assert_eq!(format_date(None), "No date");
        assert_eq!(format_date(Some("next tuesday")), "next tuesday");
    }

    #[test]
    fn empty_listing_says_so() {
        assert_eq!(render_report(&[]), "No events found.\n");
    }

    #[test]
    fn full_event_renders_every_line() {
        let list = events(
            r#"{"total":1,"documents":[{
                "$id":"evt_1",
                "$createdAt":"2024-05-01T08:00:00.000+00:00",
                "title":"Robotics Night",
                "slug":"robotics-night",
                "blurb":"Build a bot",
                "event_date":"2024-06-15T00:00:00.000+00:00",
                "start_time":"18:00",
                "end_time":"20:00",
                "capacity":24,
                "status":"published",
                "registration_type":"waitlist"
            }]}"#,
        );
        assert_eq!(
            render_event(&list[0]),
            "ID: evt_1
Title: Robotics Night
Slug: robotics-night
Blurb: Build a bot
Date: 2024-06-15
Time: 18:00 - 20:00
Capacity: 24
Status: published
Registration: waitlist
Created: 2024-05-01
"
        );
    }

    #[test]
    fn sparse_event_uses_defaults() {
        let list = events(
            r#"{"total":1,"documents":[{
                "$id":"evt_2",
                "$createdAt":"2024-05-01T08:00:00.000+00:00",
                "start_time":"18:00",
                "capacity":0,
                "status":null
            }]}"#,
        );
        assert_eq!(
            render_event(&list[0]),
            "ID: evt_2
Title: Untitled
Date: No date
Time: 18:00
Status: draft
Registration: open
Created: 2024-05-01
"
        );
    }

    #[test]
    fn report_has_header_and_separators() {
        let list = events(
            r#"{"total":2,"documents":[
                {"$id":"a","$createdAt":"2024-05-01T08:00:00.000+00:00"},
                {"$id":"b","$createdAt":"2024-04-01T08:00:00.000+00:00"}
            ]}"#,
        );
        let report = render_report(&list);
        assert!(report.starts_with(&format!("\n{}\nFound 2 event(s)\n", "=".repeat(80))));
        assert_eq!(report.matches(&"-".repeat(80)).count(), 2);
        assert!(report.find("ID: a").unwrap() < report.find("ID: b").unwrap());
    }
}
