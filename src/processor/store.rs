//! All loaded documents, in load order.

use super::ast::{FieldId, ScriptDocument};
use super::script_parser;
use super::vm::{self, ExecReport};
use super::world::World;
use crate::error::ParseError;
use crate::model::{FieldRecord, ScriptRecord};
use log::{info, warn};

#[derive(Debug, Default, Clone)]
pub struct ScriptStore {
    docs: Vec<ScriptDocument>,
}

impl ScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and appends a document. Nothing is stored on error.
    pub fn load(&mut self, src: &str, name: &str) -> Result<&ScriptDocument, ParseError> {
        let doc = script_parser::parse(src, name).inspect_err(|e| {
            warn!("{name}: parse error: {e}");
        })?;
        info!(
            "{name}: loaded ({} targets, {} fields, {} statements)",
            doc.targets.len(),
            doc.fields.len(),
            super::ast::count_all(&doc.body)
        );
        self.docs.push(doc);
        Ok(&self.docs[self.docs.len() - 1])
    }

    /// Re-parses an edited document in place. The old one stays on error.
    ///
    /// Returns `Ok(false)` if no document has that name.
    pub fn replace(&mut self, name: &str, src: &str) -> Result<bool, ParseError> {
        let Some(slot) = self.docs.iter_mut().find(|d| d.name == name) else {
            return Ok(false);
        };
        *slot = script_parser::parse(src, name).inspect_err(|e| {
            warn!("{name}: parse error, keeping previous version: {e}");
        })?;
        info!("{name}: replaced");
        Ok(true)
    }

    pub fn remove(&mut self, name: &str) -> Option<ScriptDocument> {
        let idx = self.docs.iter().position(|d| d.name == name)?;
        info!("{name}: removed");
        Some(self.docs.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&ScriptDocument> {
        self.docs.iter().find(|d| d.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ScriptDocument> {
        self.docs.iter_mut().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptDocument> {
        self.docs.iter()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Runs every document once, in load order.
    pub fn execute_all(&mut self, world: &mut dyn World, apply_initial_values: bool) -> ExecReport {
        let mut total = ExecReport::default();
        for doc in &mut self.docs {
            let report = vm::execute(doc, world, apply_initial_values);
            total.targets += report.targets;
            total.applied += report.applied;
            total.skipped += report.skipped;
            total.failures.extend(report.failures);
        }
        total
    }

    pub fn to_records(&self) -> Vec<ScriptRecord> {
        self.docs.iter().map(to_record).collect()
    }

    /// Loads persisted documents: re-parse the source, then apply saved
    /// field values by id. Ids that no longer exist are skipped, as are
    /// records whose source no longer parses.
    pub fn restore(&mut self, records: &[ScriptRecord]) -> usize {
        let mut loaded = 0;
        for record in records {
            let Ok(mut doc) = script_parser::parse(&record.content, &record.name) else {
                warn!("{}: saved script no longer parses, skipped", record.name);
                continue;
            };
            for (key, saved) in &record.line_values {
                let Some(field) = key
                    .parse::<FieldId>()
                    .ok()
                    .and_then(|id| doc.fields.get_mut(&id))
                else {
                    continue;
                };
                field.current_value = saved.value.clone();
                field.initial_value = saved.initial_value.clone();
            }
            for (alias, canonical) in &record.using_objects {
                doc.aliases
                    .entry(alias.clone())
                    .or_insert_with(|| canonical.clone());
            }
            self.docs.push(doc);
            loaded += 1;
        }
        info!("restored {loaded} of {} scripts with saved values", records.len());
        loaded
    }
}

fn to_record(doc: &ScriptDocument) -> ScriptRecord {
    ScriptRecord {
        name: doc.name.clone(),
        content: doc.source.clone(),
        target_objects: doc.targets.clone(),
        using_objects: doc.aliases.clone(),
        line_values: doc
            .fields
            .iter()
            .map(|(id, f)| {
                (
                    id.to_string(),
                    FieldRecord {
                        value: f.current_value.clone(),
                        initial_value: f.initial_value.clone(),
                    },
                )
            })
            .collect(),
    }
}
