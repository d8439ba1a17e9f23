use crate::workflow::runner::WorkflowResult;
use anyhow::Context;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// One JSON line per replay, without the per-event log.
#[derive(Debug, Serialize)]
struct ReportLine<'a> {
    mode: String,
    samples: usize,
    step_count: u64,
    session_steps: u64,
    distance_m: f32,
    metrics: &'a stepcore::telemetry::MetricsSnapshot,
}

pub fn append_report<P: AsRef<Path>>(path: P, result: &WorkflowResult) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let line = ReportLine {
        mode: result.mode.to_string(),
        samples: result.samples,
        step_count: result.step_count,
        session_steps: result.session.steps,
        distance_m: result.session.distance_m,
        metrics: &result.metrics,
    };
    let mut encoded = serde_json::to_string(&line).context("serializing report")?;
    encoded.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path_ref)
        .with_context(|| format!("opening report {}", path_ref.display()))?;
    file.write_all(encoded.as_bytes())
        .with_context(|| format!("writing report {}", path_ref.display()))?;
    Ok(())
}
