//! Object references: `Hierarchy.<Name>`, bare names and aliases.

use super::ast::ScriptDocument;
use super::world::{Handle, World};

/// Reserved name of the player singleton.
pub const PLAYER: &str = "Player";
/// Reserved name meaning "whichever object the script is running on".
pub const BLOCK: &str = "Block";

const NAMESPACE: &str = "Hierarchy.";

pub fn strip_namespace(path: &str) -> &str {
    let path = path.trim();
    path.strip_prefix(NAMESPACE).unwrap_or(path)
}

pub fn resolve(world: &dyn World, path: &str) -> Option<Handle> {
    let name = strip_namespace(path);
    if name == PLAYER && world.has_player() {
        return Some(Handle::Player);
    }
    world.find_object(name).map(Handle::Object)
}

/// Everything one statement needs to know about where it runs. Passed down
/// explicitly through evaluation and property writes.
#[derive(Debug, Clone, Copy)]
pub struct ExecContext<'a> {
    pub doc: &'a ScriptDocument,
    pub target: Handle,
    pub target_name: &'a str,
}

impl<'a> ExecContext<'a> {
    /// Canonical object name for a reference, after alias substitution.
    pub fn canonical(&self, reference: &'a str) -> &'a str {
        self.doc.canonical(strip_namespace(reference))
    }

    pub fn resolve(&self, world: &dyn World, reference: &str) -> Option<Handle> {
        let name = strip_namespace(reference);
        resolve(world, self.doc.canonical(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Player, Scene, SceneObject};

    fn scene(with_player: bool) -> Scene {
        let mut scene = Scene::default();
        scene.objects.push(SceneObject::cube("Player"));
        scene.objects.push(SceneObject::cube("Green_Cube"));
        scene.objects.push(SceneObject::cube("Green_Cube"));
        if with_player {
            scene.player = Some(Player::default());
        }
        scene
    }

    #[test]
    fn test_resolve() {
        let world = scene(true);
        let test_cases = vec![
            ("Hierarchy.Player", Some(Handle::Player)),
            ("Player", Some(Handle::Player)),
            ("Hierarchy.Green_Cube", Some(Handle::Object(1))),
            (" Green_Cube ", Some(Handle::Object(1))),
            ("Hierarchy.Missing", None),
            ("Hierarchy.", None),
        ];
        for (path, expected) in test_cases {
            assert_eq!(resolve(&world, path), expected, "path {path:?}");
        }
    }

    #[test]
    fn test_player_falls_back_to_object_without_singleton() {
        let world = scene(false);
        assert_eq!(resolve(&world, "Hierarchy.Player"), Some(Handle::Object(0)));
    }

    #[test]
    fn test_alias_substitution() {
        let world = scene(true);
        let mut doc = ScriptDocument::new("t", "");
        doc.aliases.insert("Block".into(), "Green_Cube".into());
        let ctx = ExecContext {
            doc: &doc,
            target: Handle::Player,
            target_name: "Player",
        };
        assert_eq!(ctx.resolve(&world, "Block"), Some(Handle::Object(1)));
        assert_eq!(ctx.resolve(&world, "Hierarchy.Block"), Some(Handle::Object(1)));
        assert_eq!(ctx.canonical("Block"), "Green_Cube");
        assert_eq!(ctx.canonical("Player"), "Player");
    }
}
