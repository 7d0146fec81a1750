use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::processor::world::{Handle, PlayerScalar, TransformChannel, World};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::default(),
            rotation: Vec3::default(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Axis-aligned box in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl CollisionBox {
    const UNIT: CollisionBox = CollisionBox {
        min: Vec3::new(-0.5, -0.5, -0.5),
        max: Vec3::new(0.5, 0.5, 0.5),
    };
    const PLAYER: CollisionBox = CollisionBox {
        min: Vec3::new(-0.4, 0.0, -0.4),
        max: Vec3::new(0.4, 2.0, 0.4),
    };

    /// Box of the same extent, scaled and centred on the transform's
    /// position. Rotation is ignored.
    pub fn transformed(&self, t: &Transform) -> CollisionBox {
        let half = Vec3::new(
            (self.max.x - self.min.x).abs() * 0.5 * t.scale.x,
            (self.max.y - self.min.y).abs() * 0.5 * t.scale.y,
            (self.max.z - self.min.z).abs() * 0.5 * t.scale.z,
        );
        let c = t.position;
        CollisionBox {
            min: Vec3::new(c.x - half.x, c.y - half.y, c.z - half.z),
            max: Vec3::new(c.x + half.x, c.y + half.y, c.z + half.z),
        }
    }

    /// Touching boxes count as intersecting.
    pub fn intersects(&self, other: &CollisionBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

fn default_true() -> bool {
    true
}

fn default_shape() -> String {
    "cube".to_string()
}

/// Colors are written as `[r, g, b]`; older scene files store `"#rrggbb"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb([u8; 3]),
    Hex(String),
}

fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn deserialize_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 3], D::Error> {
    match ColorRepr::deserialize(deserializer)? {
        ColorRepr::Rgb(rgb) => Ok(rgb),
        ColorRepr::Hex(text) => parse_hex_color(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{text}`"))),
    }
}

/// An object in the scene hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(
        default = "SceneObject::default_color",
        deserialize_with = "deserialize_color"
    )]
    pub color: [u8; 3],
    #[serde(default)]
    pub is_player: bool,
    #[serde(default = "default_true")]
    pub collision_enabled: bool,
}

impl SceneObject {
    pub fn cube(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shape: default_shape(),
            transform: Transform::default(),
            color: Self::default_color(),
            is_player: false,
            collision_enabled: true,
        }
    }

    fn default_color() -> [u8; 3] {
        [128, 128, 128]
    }

    /// Every shape currently uses a unit box.
    pub fn collision_box(&self) -> CollisionBox {
        CollisionBox::UNIT
    }
}

/// The player singleton that exists while the game runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub transform: Transform,
    pub move_speed: f32,
    pub jump_force: f32,
    pub rotation_speed: f32,
    pub spin_speed: f32,
    pub collision_enabled: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: crate::processor::resolver::PLAYER.to_string(),
            transform: Transform::default(),
            move_speed: 1.3,
            jump_force: 2.3,
            rotation_speed: 5.0,
            spin_speed: 2.0,
            collision_enabled: true,
        }
    }
}

/// Objects plus the optional player: the world scripts run against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
}

impl Scene {
    /// Creates the player singleton from the first object flagged
    /// `is_player`. Returns `false` when the scene has none.
    pub fn spawn_player(&mut self) -> bool {
        let Some(obj) = self.objects.iter().find(|o| o.is_player) else {
            return false;
        };
        self.player = Some(Player {
            transform: obj.transform,
            ..Player::default()
        });
        true
    }

    fn bounds(&self, handle: Handle) -> Option<CollisionBox> {
        match handle {
            Handle::Player => {
                let p = self.player.as_ref()?;
                Some(CollisionBox::PLAYER.transformed(&p.transform))
            }
            Handle::Object(i) => {
                let o = self.objects.get(i)?;
                Some(o.collision_box().transformed(&o.transform))
            }
        }
    }
}

impl World for Scene {
    fn has_player(&self) -> bool {
        self.player.is_some()
    }

    fn find_object(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    fn name(&self, handle: Handle) -> Option<&str> {
        match handle {
            Handle::Player => self.player.as_ref().map(|p| p.name.as_str()),
            Handle::Object(i) => self.objects.get(i).map(|o| o.name.as_str()),
        }
    }

    fn collision_enabled(&self, handle: Handle) -> bool {
        match handle {
            Handle::Player => self.player.as_ref().is_some_and(|p| p.collision_enabled),
            Handle::Object(i) => self.objects.get(i).is_some_and(|o| o.collision_enabled),
        }
    }

    fn bounds_intersect(&self, a: Handle, b: Handle) -> bool {
        match (self.bounds(a), self.bounds(b)) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        }
    }

    fn set_player_scalar(&mut self, prop: PlayerScalar, value: f32) {
        let Some(p) = self.player.as_mut() else {
            return;
        };
        match prop {
            PlayerScalar::Speed => p.move_speed = value,
            PlayerScalar::JumpForce => p.jump_force = value,
            PlayerScalar::CameraRotationSpeed => p.rotation_speed = value,
            PlayerScalar::SpinSpeed => p.spin_speed = value,
        }
    }

    fn set_collision(&mut self, handle: Handle, enabled: bool) {
        match handle {
            Handle::Player => {
                if let Some(p) = self.player.as_mut() {
                    p.collision_enabled = enabled;
                }
            }
            Handle::Object(i) => {
                if let Some(o) = self.objects.get_mut(i) {
                    o.collision_enabled = enabled;
                }
            }
        }
    }

    fn set_transform(&mut self, index: usize, channel: TransformChannel, value: [f32; 3]) {
        let Some(o) = self.objects.get_mut(index) else {
            return;
        };
        let slot = match channel {
            TransformChannel::Position => &mut o.transform.position,
            TransformChannel::Rotation => &mut o.transform.rotation,
            TransformChannel::Scale => &mut o.transform.scale,
        };
        *slot = value.into();
    }

    fn set_color(&mut self, index: usize, rgb: [u8; 3]) {
        if let Some(o) = self.objects.get_mut(index) {
            o.color = rgb;
        }
    }
}

/// Saved value of one field, keyed by `line_<n>` in [`ScriptRecord`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub initial_value: String,
}

/// How one script is embedded in a scene file. `content` is re-parsed on
/// load; the other fields only carry state the source cannot reproduce.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub target_objects: Vec<String>,
    #[serde(default)]
    pub using_objects: BTreeMap<String, String>,
    #[serde(default)]
    pub line_values: BTreeMap<String, FieldRecord>,
}

/// Key older scene files keep their scripts under.
pub const LEGACY_SCRIPTS_KEY: &str = "gayscripts";

/// Entire scene file as read from / written to disk. Always written with a
/// `scripts` key; files using the legacy key are still read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(flatten)]
    pub scene: Scene,
    #[serde(default, alias = "gayscripts")]
    pub scripts: Vec<ScriptRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_intersection() {
        let a = CollisionBox::UNIT.transformed(&Transform::default());
        let test_cases = vec![
            (Vec3::new(0.5, 0.0, 0.0), 1.0, true),
            (Vec3::new(1.0, 0.0, 0.0), 1.0, true), // touching
            (Vec3::new(1.01, 0.0, 0.0), 1.0, false),
            (Vec3::new(1.5, 0.0, 0.0), 2.0, true),
            (Vec3::new(0.0, -3.0, 0.0), 1.0, false),
        ];

        for (position, scale, expected) in test_cases {
            let t = Transform {
                position,
                scale: Vec3::new(scale, scale, scale),
                ..Transform::default()
            };
            let b = CollisionBox::UNIT.transformed(&t);
            assert_eq!(a.intersects(&b), expected, "at {position:?} x{scale}");
            assert_eq!(b.intersects(&a), expected);
        }
    }

    #[test]
    fn test_spawn_player_copies_transform() {
        let mut scene = Scene::default();
        assert!(!scene.spawn_player());

        let mut hero = SceneObject::cube("Player");
        hero.is_player = true;
        hero.transform.position = Vec3::new(1.0, 2.0, 3.0);
        scene.objects.push(SceneObject::cube("Floor"));
        scene.objects.push(hero);

        assert!(scene.spawn_player());
        let player = scene.player.as_ref().unwrap();
        assert_eq!(player.name, "Player");
        assert_eq!(player.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(player.move_speed, 1.3);
    }

    #[test]
    fn test_scene_file_defaults() {
        let json = r#"{ "objects": [ { "name": "Crate" } ] }"#;
        let file: SceneFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.scene.objects, vec![SceneObject::cube("Crate")]);
        assert_eq!(file.scene.player, None);
        assert!(file.scripts.is_empty());
    }

    #[test]
    fn test_color_forms() {
        let test_cases = vec![
            (r#"[1, 2, 3]"#, Some([1, 2, 3])),
            (r##""#00ff80""##, Some([0, 255, 128])),
            (r##""#5A7bC8""##, Some([90, 123, 200])),
            (r##""#fff""##, None),
            (r#""00ff80""#, None),
            (r##""#gg0000""##, None),
            (r#"[300, 0, 0]"#, None),
        ];

        for (color, expected) in test_cases {
            let json = format!(r#"{{ "name": "Crate", "color": {color} }}"#);
            let obj = serde_json::from_str::<SceneObject>(&json).ok();
            assert_eq!(obj.map(|o| o.color), expected, "color {color}");
        }
    }

    #[test]
    fn test_reads_legacy_scene_layout() {
        let json = r##"{
            "camera": { "position": { "x": 0, "y": 5, "z": 10 }, "rotation": { "x": 0, "y": 0, "z": 0 } },
            "objects": [{
                "name": "Cube",
                "shape": "cube",
                "transform": {
                    "position": { "x": 1, "y": 0, "z": 0 },
                    "rotation": { "x": 0, "y": 0, "z": 0 },
                    "scale": { "x": 1, "y": 1, "z": 1 }
                },
                "color": "#32c864",
                "is_player": false,
                "collision_enabled": true
            }],
            "gayscripts": [{ "name": "s", "content": "GameScript", "target_objects": [] }]
        }"##;
        let file: SceneFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.scene.objects[0].color, [50, 200, 100]);
        assert_eq!(file.scene.objects[0].transform.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(file.scripts.len(), 1);

        let written = serde_json::to_value(&file).unwrap();
        assert!(written.get(LEGACY_SCRIPTS_KEY).is_none());
        assert_eq!(written["objects"][0]["color"], serde_json::json!([50, 200, 100]));
    }
}
