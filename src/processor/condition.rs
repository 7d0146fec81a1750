//! The one supported predicate: `<A> Colision == <B>`.

use super::resolver::ExecContext;
use super::world::World;
use crate::error::ConditionError;
use log::debug;

/// Spelled this way in every saved scene; do not correct it.
pub const COLLISION_KEYWORD: &str = "Colision";
const OPERATOR: &str = "==";

pub fn evaluate(ctx: &ExecContext, world: &dyn World, condition: &str) -> Result<bool, ConditionError> {
    let (left, right) = split_collision(condition)?;

    let a = ctx
        .resolve(world, left)
        .ok_or_else(|| ConditionError::Unresolved(left.to_string()))?;
    let b = ctx
        .resolve(world, right)
        .ok_or_else(|| ConditionError::Unresolved(right.to_string()))?;

    if !world.collision_enabled(a) || !world.collision_enabled(b) {
        debug!("collision {left} vs {right}: disabled");
        return Ok(false);
    }

    let hit = world.bounds_intersect(a, b);
    debug!("collision {left} vs {right} = {hit}");
    Ok(hit)
}

/// Splits `A Colision == B` / `A.Colision == B` / `A.Prop Colision == B`
/// into the two object references.
fn split_collision(condition: &str) -> Result<(&str, &str), ConditionError> {
    let unsupported = || ConditionError::Unsupported(condition.to_string());

    let (left, right) = condition.split_once(OPERATOR).ok_or_else(unsupported)?;
    let left = left.trim_end();
    let left = left.strip_suffix(COLLISION_KEYWORD).ok_or_else(unsupported)?;
    let left = left.trim_end().trim_end_matches('.');

    // drop any property suffix: `Player.Anything` -> `Player`
    let left = match left.split_once('.') {
        Some((object, _)) if object != "Hierarchy" => object,
        _ => left,
    };
    let left = left.trim();
    let right = right.trim();

    if left.is_empty() || right.is_empty() {
        return Err(ConditionError::MissingOperand(condition.to_string()));
    }
    if left.contains(char::is_whitespace) || right.contains(char::is_whitespace) {
        return Err(unsupported());
    }
    Ok((left, right))
}
