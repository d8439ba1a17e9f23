use anyhow::Context;
use std::fs;
use std::path::Path;
use stepcore::SensorSample;

/// Reads a JSON array of samples.
pub fn load_trace<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<SensorSample>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading trace {}", path_ref.display()))?;
    let samples = serde_json::from_str(&contents)
        .with_context(|| format!("parsing trace {}", path_ref.display()))?;
    Ok(samples)
}

pub fn save_trace<P: AsRef<Path>>(path: P, samples: &[SensorSample]) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(samples).context("serializing trace")?;
    fs::write(path_ref, json).with_context(|| format!("writing trace {}", path_ref.display()))?;
    Ok(())
}
