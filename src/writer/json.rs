//! Write the scene, including the embedded scripts, back to JSON.

use crate::model::SceneFile;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

pub fn emit(file: &SceneFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
    }
    let json = to_string(file)?;
    fs::write(path, json).with_context(|| format!("Writing {}", path.display()))?;
    info!(
        "wrote {} ({} objects, {} scripts)",
        path.display(),
        file.scene.objects.len(),
        file.scripts.len()
    );
    Ok(())
}

pub fn to_string(file: &SceneFile) -> Result<String> {
    Ok(serde_json::to_string_pretty(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldRecord, SceneObject, ScriptRecord};
    use crate::parser::load_from_json;

    #[test]
    fn test_scene_survives_write_and_read() {
        let mut file = SceneFile::default();
        file.scene.objects.push(SceneObject::cube("Crate"));
        let mut record = ScriptRecord {
            name: "demo".into(),
            content: "GameScript\nWorking Hierarchy.Crate".into(),
            target_objects: vec!["Hierarchy.Crate".into()],
            ..Default::default()
        };
        record.line_values.insert(
            "line_1".into(),
            FieldRecord {
                value: "3".into(),
                initial_value: "5".into(),
            },
        );
        file.scripts.push(record);

        let json = to_string(&file).unwrap();
        assert!(!json.contains("\"player\""));
        assert_eq!(load_from_json(&json).unwrap(), file);
    }
}
