//! `p6sync inspect` command implementation
//!
//! Dry run: parses and normalizes an export and reports what an upload
//! would send, optionally dumping every bucket as JSON Lines.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colored::Colorize;
use p6_common::UploadDate;
use p6_ingest::normalize::NormalizedBatch;
use p6_ingest::BucketId;
use tracing::debug;

use crate::error::Result;
use crate::session::Session;
use crate::InspectArgs;

/// Inspect one export file
pub async fn run(args: &InspectArgs) -> Result<()> {
    let upload_date = UploadDate::resolve(args.upload_date, UploadDate::today().date());
    println!("{} Inspecting {}", "→".cyan(), args.file.display());

    let mut reporter = super::reporter(0, !args.no_progress);
    let inspection = Session::new()
        .inspect(&args.file, upload_date, &mut reporter)
        .await?;

    println!("{}", inspection.summary.to_table());
    if inspection.summary.total_dropped() > 0 {
        println!(
            "{} {} record(s) would be dropped by validation",
            "!".yellow(),
            inspection.summary.total_dropped()
        );
    }

    if let Some(dir) = &args.output {
        let written = write_reports(dir, &inspection.batches)?;
        println!(
            "{} Wrote {} report file(s) to {}",
            "✓".green(),
            written.len(),
            dir.display()
        );
    }
    Ok(())
}

/// Write one `<bucket>.jsonl` file per bucket into `dir`
pub fn write_reports(dir: &Path, batches: &BTreeMap<BucketId, NormalizedBatch>) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(batches.len());
    for (bucket, batch) in batches {
        let path = dir.join(format!("{}.jsonl", bucket.label()));
        serde_jsonlines::write_json_lines(&path, &batch.records)?;
        debug!(path = %path.display(), records = batch.records.len(), "Wrote report");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use p6_common::{EntityKind, FieldValue, NormalizedRecord};

    #[test]
    fn test_write_reports_one_file_per_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let mut batches = BTreeMap::new();
        batches.insert(
            BucketId::current(EntityKind::Resource),
            NormalizedBatch {
                records: vec![
                    NormalizedRecord::new(EntityKind::Resource, vec![("objectId", FieldValue::Int(1))]),
                    NormalizedRecord::new(EntityKind::Resource, vec![("objectId", FieldValue::Int(2))]),
                ],
                parsed: 2,
                dropped: 0,
            },
        );
        batches.insert(BucketId::baseline(EntityKind::Resource), NormalizedBatch::default());

        let written = write_reports(dir.path(), &batches).unwrap();
        assert_eq!(written.len(), 2);

        let current = std::fs::read_to_string(dir.path().join("resource.jsonl")).unwrap();
        assert_eq!(current, "{\"objectId\":1}\n{\"objectId\":2}\n");
        let baseline = std::fs::read_to_string(dir.path().join("baseline_resource.jsonl")).unwrap();
        assert!(baseline.is_empty());
    }
}
