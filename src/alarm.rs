//! Failure side channel for pipeline supervisors.
//!
//! On error the wrapper drops a structured diagnostic record into
//! `alarms.json` in the working directory, where an orchestrating pipeline
//! can pick it up, and optionally duplicates the full debug report to the
//! path named by `SEEDCUT_ERRFILE`. The sink is wired up in `main` with
//! explicit paths; the cutoff computation itself never writes files.

use crate::cutoff::CutoffError;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

const ALARM_FILE: &str = "alarms.json";
const ERRFILE_VAR: &str = "SEEDCUT_ERRFILE";

/// One diagnostic record, serialized as a single-element JSON array.
#[derive(Serialize)]
struct Alarm {
    exception: String,
    info: String,
    message: String,
    name: String,
    severity: String,
    owner: String,
    #[serde(rename = "createdAt")]
    created_at: String,
    id: String,
}

pub struct AlarmSink {
    alarm_path: PathBuf,
    errfile: Option<PathBuf>,
}

impl AlarmSink {
    pub fn new(alarm_path: PathBuf, errfile: Option<PathBuf>) -> Self {
        AlarmSink { alarm_path, errfile }
    }

    /// Sink writing to the working directory, with the secondary log
    /// location taken from the `SEEDCUT_ERRFILE` environment variable.
    pub fn from_env() -> Self {
        AlarmSink::new(
            PathBuf::from(ALARM_FILE),
            std::env::var_os(ERRFILE_VAR).map(PathBuf::from),
        )
    }

    /// Records a failure. The secondary log is best-effort; the structured
    /// record is not.
    pub fn report(&self, err: &anyhow::Error) -> Result<()> {
        let info = format!("{err:?}");

        if let Some(path) = &self.errfile {
            if let Err(e) = std::fs::write(path, &info) {
                warn!("Could not write error log {}: {}", path.display(), e);
            }
        }

        let kind = error_kind(err);
        let alarm = Alarm {
            exception: kind.to_string(),
            info,
            message: err
                .chain()
                .map(|cause| cause.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            name: kind.to_string(),
            severity: "ERROR".to_string(),
            owner: env!("CARGO_PKG_NAME").to_string(),
            created_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            id: format!("{:032x}", rand::random::<u128>()),
        };

        std::fs::write(&self.alarm_path, serde_json::to_string_pretty(&[alarm])?)?;
        Ok(())
    }
}

/// Names the error kind the way a supervisor expects to filter on it.
fn error_kind(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<CutoffError>() {
        Some(CutoffError::InvalidTarget { .. }) => "InvalidTarget",
        Some(CutoffError::MalformedStats { .. }) => "MalformedStats",
        Some(CutoffError::EmptyInput) => "EmptyInput",
        Some(CutoffError::CoverageUnreachable { .. }) => "CoverageUnreachable",
        None => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::AlarmSink;
    use crate::cutoff::CutoffError;

    #[test]
    fn writes_structured_record() {
        let dir = tempfile::tempdir().unwrap();
        let alarm_path = dir.path().join("alarms.json");
        let errfile = dir.path().join("err.log");

        let err = anyhow::Error::from(CutoffError::CoverageUnreachable {
            target: 20_000,
            total: 17_000,
        })
        .context("User-provided genome_size: 1000");

        let sink = AlarmSink::new(alarm_path.clone(), Some(errfile.clone()));
        sink.report(&err).unwrap();

        let recorded: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&alarm_path).unwrap()).unwrap();
        let record = &recorded[0];
        assert_eq!(record["exception"], "CoverageUnreachable");
        assert_eq!(record["severity"], "ERROR");
        assert!(record["message"]
            .as_str()
            .unwrap()
            .contains("not enough bases"));
        assert!(!record["id"].as_str().unwrap().is_empty());

        assert!(std::fs::read_to_string(&errfile).unwrap().contains("genome_size"));
    }

    #[test]
    fn unclassified_errors_still_record() {
        let dir = tempfile::tempdir().unwrap();
        let alarm_path = dir.path().join("alarms.json");

        let err = anyhow::anyhow!("something unrelated went wrong");
        AlarmSink::new(alarm_path.clone(), None).report(&err).unwrap();

        let recorded: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&alarm_path).unwrap()).unwrap();
        assert_eq!(recorded[0]["exception"], "Error");
    }
}
