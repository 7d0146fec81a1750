//! What the interpreter needs from the surrounding engine.
//!
//! The scene graph, transform math and bounding boxes live behind this
//! trait; the interpreter itself never does geometry.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The player singleton, only present while the game runs.
    Player,
    /// Index into the engine's object list.
    Object(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerScalar {
    Speed,
    JumpForce,
    CameraRotationSpeed,
    SpinSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformChannel {
    Position,
    Rotation,
    Scale,
}

pub trait World {
    fn has_player(&self) -> bool;

    /// First object with exactly this name.
    fn find_object(&self, name: &str) -> Option<usize>;

    fn name(&self, handle: Handle) -> Option<&str>;

    fn collision_enabled(&self, handle: Handle) -> bool;

    /// Intersection of both objects' transformed bounding volumes.
    fn bounds_intersect(&self, a: Handle, b: Handle) -> bool;

    fn set_player_scalar(&mut self, prop: PlayerScalar, value: f32);

    fn set_collision(&mut self, handle: Handle, enabled: bool);

    fn set_transform(&mut self, index: usize, channel: TransformChannel, value: [f32; 3]);

    fn set_color(&mut self, index: usize, rgb: [u8; 3]);
}
