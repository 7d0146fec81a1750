//! Property writes: `<Object>.<Property> = <value>`.
//!
//! Each target kind has a closed set of properties looked up by name in a
//! static table. Unknown names and ill-shaped values are dropped.

use super::resolver::{BLOCK, ExecContext, PLAYER, strip_namespace};
use super::value::{Value, coerce};
use super::world::{Handle, PlayerScalar, TransformChannel, World};
use crate::error::SetError;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerProperty {
    Scalar(PlayerScalar),
    Colision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectProperty {
    Transform(TransformChannel),
    Color,
    Colision,
}

const PLAYER_PROPERTIES: &[(&str, PlayerProperty)] = &[
    ("Speed", PlayerProperty::Scalar(PlayerScalar::Speed)),
    ("JumpForce", PlayerProperty::Scalar(PlayerScalar::JumpForce)),
    ("Colision", PlayerProperty::Colision),
    (
        "CameraRotationSpeed",
        PlayerProperty::Scalar(PlayerScalar::CameraRotationSpeed),
    ),
    ("SpinSpeed", PlayerProperty::Scalar(PlayerScalar::SpinSpeed)),
];

const OBJECT_PROPERTIES: &[(&str, ObjectProperty)] = &[
    ("Position", ObjectProperty::Transform(TransformChannel::Position)),
    ("Rotation", ObjectProperty::Transform(TransformChannel::Rotation)),
    ("Scale", ObjectProperty::Transform(TransformChannel::Scale)),
    ("Color", ObjectProperty::Color),
    ("Colision", ObjectProperty::Colision),
];

impl PlayerProperty {
    pub fn lookup(name: &str) -> Option<Self> {
        PLAYER_PROPERTIES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
    }
}

impl ObjectProperty {
    pub fn lookup(name: &str) -> Option<Self> {
        OBJECT_PROPERTIES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Applied,
    /// Addressed to an object other than the one being iterated.
    Skipped,
}

pub fn set(
    ctx: &ExecContext,
    world: &mut dyn World,
    property_path: &str,
    raw: &str,
) -> Result<SetOutcome, SetError> {
    let path = strip_namespace(property_path);
    let (object, property) = path
        .split_once('.')
        .filter(|(o, p)| !o.trim().is_empty() && !p.contains('.'))
        .ok_or_else(|| SetError::MalformedPath(property_path.to_string()))?;
    let object = ctx.doc.canonical(object.trim());
    let property = property.trim();

    if object != PLAYER && object != BLOCK && object != ctx.target_name {
        return Ok(SetOutcome::Skipped);
    }

    let value = coerce(raw);
    let bad_value = || SetError::BadValue {
        property: property.to_string(),
        value: raw.trim().to_string(),
    };

    match ctx.target {
        Handle::Player => {
            let prop = PlayerProperty::lookup(property).ok_or_else(|| SetError::UnknownProperty {
                kind: "player",
                property: property.to_string(),
            })?;
            match prop {
                PlayerProperty::Scalar(scalar) => {
                    world.set_player_scalar(scalar, value.as_f32().ok_or_else(bad_value)?)
                }
                PlayerProperty::Colision => {
                    world.set_collision(Handle::Player, value.as_bool().ok_or_else(bad_value)?)
                }
            }
        }
        Handle::Object(index) => {
            let prop = ObjectProperty::lookup(property).ok_or_else(|| SetError::UnknownProperty {
                kind: "object",
                property: property.to_string(),
            })?;
            match prop {
                ObjectProperty::Transform(channel) => {
                    world.set_transform(index, channel, value.as_vec3().ok_or_else(bad_value)?)
                }
                ObjectProperty::Color => world.set_color(index, value.as_rgb().ok_or_else(bad_value)?),
                ObjectProperty::Colision => {
                    world.set_collision(ctx.target, value.as_bool().ok_or_else(bad_value)?)
                }
            }
        }
    }

    debug!("set {}.{property} = {}", ctx.target_name, show(&value));
    Ok(SetOutcome::Applied)
}

fn show(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Text(t) => t.clone(),
        Value::List(items) => format!("({})", items.join(", ")),
    }
}
