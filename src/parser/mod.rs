use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use serde_json::Value;
use std::path::Path;

use crate::model::{LEGACY_SCRIPTS_KEY, SceneFile, ScriptRecord};

/// Read and parse a scene file from disk.
pub fn load_scene(path: &Path) -> Result<SceneFile> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    info!("{}: {} bytes", path.display(), json.len());
    load_from_json(&json).with_context(|| format!("Parsing {}", path.display()))
}

/// Parse a scene JSON string.
///
/// The file must be an object with an `objects` array. The `scripts` array
/// (or its legacy key) is optional; a malformed entry in it is reported and dropped so one bad
/// script does not make the whole scene unreadable.
pub fn load_from_json(json: &str) -> Result<SceneFile> {
    // Grab the entire file as a dynamic value first.
    let mut root: Value = serde_json::from_str(json)?;

    let obj = root
        .as_object_mut()
        .ok_or_else(|| anyhow!("scene file is not a JSON object"))?;
    if !obj.get("objects").is_some_and(Value::is_array) {
        return Err(anyhow!("scene file has no `objects` array"));
    }

    let legacy = obj.remove(LEGACY_SCRIPTS_KEY);
    let scripts = match obj.remove("scripts").or(legacy) {
        Some(Value::Array(entries)) => parse_scripts(entries),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(anyhow!("`scripts` must be an array")),
    };

    let mut file: SceneFile = serde_json::from_value(root)?;
    file.scripts = scripts;
    debug!(
        "scene parsed: {} objects, {} scripts",
        file.scene.objects.len(),
        file.scripts.len()
    );
    Ok(file)
}

// ─────────────────────────────────────────────────────
/// Helper: parse the `scripts` array entry by entry.
fn parse_scripts(entries: Vec<Value>) -> Vec<ScriptRecord> {
    let total = entries.len();
    let mut records = Vec::<ScriptRecord>::with_capacity(total);

    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ScriptRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!("script entry {i} dropped: {e}"),
        }
    }

    if records.len() != total {
        warn!("kept {} of {total} script entries", records.len());
    }
    records
}
