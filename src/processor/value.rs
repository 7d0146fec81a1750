//! Right-hand side coercion shared by every assignment.

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Comma separated; elements are interpreted by the property setter.
    List(Vec<String>),
}

pub fn coerce(raw: &str) -> Value {
    let text = raw.trim();
    if text.contains(',') {
        return Value::List(text.split(',').map(|s| s.trim().to_string()).collect());
    }
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match text.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(text.to_string()),
    }
}

impl Value {
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        let [x, y, z] = self.triple()?;
        Some([x.parse().ok()?, y.parse().ok()?, z.parse().ok()?])
    }

    pub fn as_rgb(&self) -> Option<[u8; 3]> {
        let [r, g, b] = self.triple()?;
        Some([r.parse().ok()?, g.parse().ok()?, b.parse().ok()?])
    }

    fn triple(&self) -> Option<[&str; 3]> {
        match self {
            Value::List(items) if items.len() == 3 => {
                Some([items[0].as_str(), items[1].as_str(), items[2].as_str()])
            }
            _ => None,
        }
    }
}
