//! The GameScript interpreter.
//!
//! Text goes through `script_parser` into a `ScriptDocument`, documents live
//! in a `ScriptStore`, and the `Runtime` re-executes all of them every tick
//! while the game is running.
pub mod ast;
pub mod condition;
pub mod fields;
pub mod lexer;
pub mod resolver;
pub mod script_parser;
pub mod setter;
pub mod store;
pub mod value;
pub mod vm;
pub mod world;

pub use ast::{FieldId, ScriptDocument, Statement};
pub use store::ScriptStore;
pub use vm::ExecReport;
pub use world::{Handle, World};

use log::info;

/// Play-mode state around a script store.
#[derive(Debug, Default)]
pub struct Runtime {
    pub store: ScriptStore,
    running: bool,
}

impl Runtime {
    pub fn new(store: ScriptStore) -> Self {
        Self {
            store,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Enters play mode: initial field values are applied, then every
    /// document runs once.
    pub fn start(&mut self, world: &mut dyn World) -> ExecReport {
        self.running = true;
        let report = self.store.execute_all(world, true);
        info!(
            "play mode: {} scripts, {} writes, {} failed statements",
            self.store.len(),
            report.applied,
            report.failures.len()
        );
        report
    }

    /// One simulation step. Does nothing while stopped.
    pub fn tick(&mut self, world: &mut dyn World) -> ExecReport {
        if !self.running {
            return ExecReport::default();
        }
        self.store.execute_all(world, false)
    }

    pub fn stop(&mut self) {
        self.running = false;
        info!("play mode stopped");
    }

    /// Editor field edit. While running the field is pushed live and the
    /// owning document is re-run so dependent branches see the new value.
    ///
    /// Returns `false` if the document or field does not exist.
    pub fn update_field(
        &mut self,
        script: &str,
        id: FieldId,
        value: &str,
        world: &mut dyn World,
    ) -> bool {
        let Some(doc) = self.store.get_mut(script) else {
            return false;
        };
        if !fields::update_field(doc, id, value, self.running, world) {
            return false;
        }
        if self.running {
            vm::execute(doc, world, false);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::vm::tests::recorder;

    const SRC: &str = "GameScript\nWorking Hierarchy.Player\n{\nline \"Jump Power\"\nline.ask Player.JumpForce\nPlayer.JumpForce = [line]\n}";

    fn runtime() -> Runtime {
        let mut store = ScriptStore::new();
        store.load(SRC, "jump").unwrap();
        Runtime::new(store)
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut rt = runtime();
        let mut world = recorder();

        assert_eq!(rt.tick(&mut world), ExecReport::default());
        assert!(world.writes.is_empty());

        let report = rt.start(&mut world);
        assert!(rt.is_running());
        assert_eq!(report.applied, 1);
        assert_eq!(world.scene.player.as_ref().unwrap().jump_force, 10.0);

        assert_eq!(rt.tick(&mut world).applied, 1);
        rt.stop();
        assert_eq!(rt.tick(&mut world).applied, 0);
        assert_eq!(world.writes.len(), 2);
    }

    #[test]
    fn test_update_field_live() {
        let mut rt = runtime();
        let mut world = recorder();

        assert!(rt.update_field("jump", FieldId(1), "3", &mut world));
        assert!(world.writes.is_empty());

        rt.start(&mut world);
        world.writes.clear();
        assert!(rt.update_field("jump", FieldId(1), "4", &mut world));
        // live push, then the re-run of the document
        assert_eq!(world.writes, vec!["player JumpForce 4", "player JumpForce 4"]);

        assert!(!rt.update_field("jump", FieldId(2), "4", &mut world));
        assert!(!rt.update_field("missing", FieldId(1), "4", &mut world));
    }
}
