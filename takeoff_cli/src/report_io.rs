//! Reading model snapshots and writing reports.
//!
//! Reports are saved atomically: written to `<path>.tmp`, synced, then
//! renamed over the target so a failed run never leaves half a report.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use takeoff_core::loads::LiveLoadEntry;
use takeoff_core::{Model, SourceDocument};

/// Suffix appended to the input stem for the default report name
pub const REPORT_SUFFIX: &str = "_takeoff.json";

/// `<dir>/<stem>_takeoff.json` beside the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    input.with_file_name(format!("{}{}", stem, REPORT_SUFFIX))
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// A JSON snapshot, optionally paired with the raw IFC text it came from
pub fn load_model(snapshot: &Path, source: Option<&Path>) -> Result<Model> {
    let model = Model::from_json(&read_text(snapshot)?)
        .with_context(|| format!("parsing model snapshot {}", snapshot.display()))?;
    match source {
        Some(path) => Ok(model.with_source(load_source(path)?)),
        None => Ok(model),
    }
}

/// Raw IFC text with its header schema
pub fn load_source(path: &Path) -> Result<SourceDocument> {
    Ok(SourceDocument::from_step_text(read_text(path)?))
}

/// A JSON array of `{floor, percentage_load, area_load}` entries
pub fn load_live_loads(path: &Path) -> Result<Vec<LiveLoadEntry>> {
    serde_json::from_str(&read_text(path)?).with_context(|| format!("parsing live loads {}", path.display()))
}

/// Pretty JSON, written atomically
pub fn save_report<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file =
        File::create(&tmp_path).with_context(|| format!("creating temp file {}", tmp_path.display()))?;
    tmp_file
        .write_all(json.as_bytes())
        .with_context(|| format!("writing temp file {}", tmp_path.display()))?;
    tmp_file
        .sync_all()
        .with_context(|| format!("syncing temp file {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path).map_err(|err| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        anyhow::Error::new(err).context(format!("renaming report to {}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_core::ModelAccess;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/jobs/25-001/house.json"));
        assert_eq!(path, Path::new("/jobs/25-001/house_takeoff.json"));
        assert_eq!(default_output_path(Path::new("model")), Path::new("model_takeoff.json"));
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        save_report(&serde_json::json!({ "perimeter": 60.0 }), &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("report.json.tmp").exists());
        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["perimeter"], 60.0);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = save_report(&1, &path).unwrap_err();
        assert!(err.to_string().contains("creating temp file"));
    }

    #[test]
    fn test_load_model_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("house.json");
        let source = dir.path().join("house.ifc");
        fs::write(
            &snapshot,
            r#"{"entities": [{"id": 1, "type": "IfcBuildingStorey", "attributes": {"Name": "Level 1"}}]}"#,
        )
        .unwrap();
        fs::write(&source, "HEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\n").unwrap();

        let model = load_model(&snapshot, Some(&source)).unwrap();
        assert_eq!(model.schema(), "IFC4");
        assert_eq!(model.len(), 1);
        assert!(model.source_text().is_some());
    }

    #[test]
    fn test_load_model_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("broken.json");
        fs::write(&snapshot, "{ not json").unwrap();
        let err = load_model(&snapshot, None).unwrap_err();
        assert!(err.to_string().contains("parsing model snapshot"));
    }

    #[test]
    fn test_load_live_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live.json");
        fs::write(&path, r#"[{"floor": 1, "percentage_load": 50.0, "area_load": 400.0}]"#).unwrap();
        let entries = load_live_loads(&path).unwrap();
        assert_eq!(entries, vec![LiveLoadEntry { floor: 1, percentage_load: 50.0, area_load: 400.0 }]);
    }
}
