//! Tree-walking executor. Runs a document's statements once per resolved
//! target; invoked at play start and then once every simulation tick.

use super::ast::{ScriptDocument, Statement};
use super::condition;
use super::fields;
use super::resolver::{self, ExecContext};
use super::setter::{self, SetOutcome};
use super::world::{Handle, World};
use crate::error::ExecError;
use log::debug;

/// What one execution pass did. Failures never stop sibling statements.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExecReport {
    pub targets: usize,
    pub applied: usize,
    pub skipped: usize,
    pub failures: Vec<ExecError>,
}

impl ExecReport {
    fn record(&mut self, res: Result<SetOutcome, ExecError>) {
        match res {
            Ok(SetOutcome::Applied) => self.applied += 1,
            Ok(SetOutcome::Skipped) => self.skipped += 1,
            Err(e) => self.failures.push(e),
        }
    }
}

pub fn execute(
    doc: &mut ScriptDocument,
    world: &mut dyn World,
    apply_initial_values: bool,
) -> ExecReport {
    if apply_initial_values {
        fields::apply_initial_values(doc);
    }
    run(doc, world)
}

/// Runs the statement tree without touching field values.
pub fn run(doc: &ScriptDocument, world: &mut dyn World) -> ExecReport {
    let mut report = ExecReport::default();

    let targets = resolve_targets(doc, world);
    if targets.is_empty() {
        debug!("{}: no objects found for {:?}", doc.name, doc.targets);
        return report;
    }

    for target in targets {
        let name = world.name(target).unwrap_or_default().to_string();
        let ctx = ExecContext {
            doc,
            target,
            target_name: &name,
        };
        run_statements(&ctx, world, &doc.body, &mut report);
        report.targets += 1;
    }

    for failure in &report.failures {
        debug!("{}: {failure}", doc.name);
    }
    report
}

/// Declared target paths that currently resolve, in declaration order.
pub fn resolve_targets(doc: &ScriptDocument, world: &dyn World) -> Vec<Handle> {
    doc.targets
        .iter()
        .filter_map(|path| resolver::resolve(world, path))
        .collect()
}

/// Walks the tree with an explicit frame stack; nesting depth is unbounded.
fn run_statements(
    ctx: &ExecContext,
    world: &mut dyn World,
    body: &[Statement],
    report: &mut ExecReport,
) {
    let mut frames = vec![body.iter()];
    while let Some(frame) = frames.last_mut() {
        let Some(stmt) = frame.next() else {
            frames.pop();
            continue;
        };
        match stmt {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let hit = condition::evaluate(ctx, world, condition).unwrap_or_else(|e| {
                    report.failures.push(e.into());
                    false
                });
                let branch = if hit { then_branch } else { else_branch };
                frames.push(branch.iter());
            }
            Statement::FieldAssignment { property, field } => {
                let Some(def) = ctx.doc.field(*field) else {
                    continue;
                };
                if !def.current_value.is_empty() {
                    report.record(write(ctx, world, property, &def.current_value));
                }
            }
            Statement::LiteralAssignment { property, literal } => {
                report.record(write(ctx, world, property, literal));
            }
            Statement::RawCommand { text } => {
                if let Some((property, value)) = text.split_once('=') {
                    report.record(write(ctx, world, property.trim(), value.trim()));
                }
            }
        }
    }
}

fn write(
    ctx: &ExecContext,
    world: &mut dyn World,
    property: &str,
    value: &str,
) -> Result<SetOutcome, ExecError> {
    Ok(setter::set(ctx, world, property, value)?)
}
