//! Field values: the editable side of `line "…"` declarations.

use super::ast::{FieldId, ScriptDocument};
use super::resolver::ExecContext;
use super::setter;
use super::vm::resolve_targets;
use super::world::World;
use log::{debug, warn};

/// Copies every non-empty initial value into the current value.
pub fn apply_initial_values(doc: &mut ScriptDocument) {
    for (id, field) in doc.fields.iter_mut() {
        if !field.initial_value.is_empty() {
            field.current_value = field.initial_value.clone();
            debug!("{}: applied initial value '{}' to {id}", doc.name, field.initial_value);
        }
    }
}

/// Stores a new current value. While the game runs, a bound field also
/// pushes the value straight into every resolved target.
///
/// Returns `false` if the document has no such field.
pub fn update_field(
    doc: &mut ScriptDocument,
    id: FieldId,
    value: &str,
    running: bool,
    world: &mut dyn World,
) -> bool {
    let Some(field) = doc.fields.get_mut(&id) else {
        return false;
    };
    field.current_value = value.to_string();
    debug!("{}: field {id} updated to '{value}'", doc.name);

    let Some(property) = field.bound_property.clone() else {
        return true;
    };
    if !running {
        return true;
    }

    let doc = &*doc;
    for target in resolve_targets(doc, world) {
        let name = world.name(target).unwrap_or_default().to_string();
        let ctx = ExecContext {
            doc,
            target,
            target_name: &name,
        };
        if let Err(e) = setter::set(&ctx, world, &property, value) {
            warn!("{}: live update of {property} failed: {e}", doc.name);
        }
    }
    true
}
