//! Parsed form of one GameScript document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 1-based ordinal of a `line "…"` declaration inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .strip_prefix("line_")
            .ok_or_else(|| format!("field id `{s}` must look like line_<n>"))?;
        match n.parse::<u32>() {
            Ok(0) | Err(_) => Err(format!("invalid field number in `{s}`")),
            Ok(n) => Ok(FieldId(n)),
        }
    }
}

/// An editable input slot declared with `line "<label>"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub label: String,
    pub initial_value: String,
    pub current_value: String,
    /// Set by `line.ask <Object.Property>`; used for live updates.
    pub bound_property: Option<String>,
}

impl FieldDef {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            initial_value: default_initial_value(label).to_string(),
            current_value: String::new(),
            bound_property: None,
        }
    }
}

/// Seed value picked from the label. Scene files written by older editors
/// rely on these exact numbers.
pub fn default_initial_value(label: &str) -> &'static str {
    if label.contains("Speed") {
        "5"
    } else if label.contains("Jump") {
        "10"
    } else if label.contains("Rotation") {
        "2"
    } else {
        ""
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `if <condition>` … [`else` …]
    If {
        condition: String,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },

    /// `Object.Property = [line]` – copies the field's current value.
    FieldAssignment { property: String, field: FieldId },

    /// `Object.Property = <value>`
    LiteralAssignment { property: String, literal: String },

    /// Anything else. Only acted on when it contains `=`.
    RawCommand { text: String },
}

impl Statement {
    /// Number of statements in this subtree, including itself.
    pub fn count(&self) -> usize {
        count_all(std::slice::from_ref(self))
    }

    fn branches_mut(&mut self) -> Option<(&mut Vec<Statement>, &mut Vec<Statement>)> {
        match self {
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => Some((then_branch, else_branch)),
            _ => None,
        }
    }
}

/// Nesting is unbounded, so neither counting nor dropping may recurse.
pub fn count_all(stmts: &[Statement]) -> usize {
    let mut pending: Vec<&[Statement]> = vec![stmts];
    let mut total = 0;
    while let Some(level) = pending.pop() {
        total += level.len();
        for stmt in level {
            if let Statement::If {
                then_branch,
                else_branch,
                ..
            } = stmt
            {
                pending.push(then_branch);
                pending.push(else_branch);
            }
        }
    }
    total
}

impl Drop for Statement {
    fn drop(&mut self) {
        let Some((then_branch, else_branch)) = self.branches_mut() else {
            return;
        };
        let mut pending = std::mem::take(then_branch);
        pending.append(else_branch);
        while let Some(mut stmt) = pending.pop() {
            if let Some((then_branch, else_branch)) = stmt.branches_mut() {
                pending.append(then_branch);
                pending.append(else_branch);
            }
        }
    }
}

/// One complete script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptDocument {
    pub name: String,
    pub source: String,
    pub targets: Vec<String>,
    /// alias → canonical object name
    pub aliases: BTreeMap<String, String>,
    /// Ordered by id, which is also declaration order.
    pub fields: BTreeMap<FieldId, FieldDef>,
    pub body: Vec<Statement>,
}

impl ScriptDocument {
    pub fn new(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            targets: Vec::new(),
            aliases: BTreeMap::new(),
            fields: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDef> {
        self.fields.get(&id)
    }

    /// Maps a reference's leading segment through the alias table.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_heuristic() {
        let test_cases = vec![
            ("Player Speed", "5"),
            ("Movement Speed", "5"),
            ("Jump Power", "10"),
            ("Camera Rotation Speed", "5"),
            ("Cube Rotation", "2"),
            ("Cube Color (r,g,b)", ""),
            ("speed", ""),
        ];

        for (label, expected) in test_cases {
            let field = FieldDef::new(label);
            assert_eq!(field.initial_value, expected, "label {label}");
            assert_eq!(field.current_value, "");
            assert_eq!(field.bound_property, None);
        }
    }

    #[test]
    fn test_field_id_text_form() {
        assert_eq!(FieldId(3).to_string(), "line_3");
        assert_eq!("line_12".parse::<FieldId>(), Ok(FieldId(12)));
        assert!("line_0".parse::<FieldId>().is_err());
        assert!("field_1".parse::<FieldId>().is_err());
        assert!("line_x".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_statement_count() {
        let body = vec![
            Statement::LiteralAssignment {
                property: "Block.Color".into(),
                literal: "0,255,0".into(),
            },
            Statement::If {
                condition: "Player Colision == Block".into(),
                then_branch: vec![Statement::RawCommand { text: "noop".into() }],
                else_branch: vec![],
            },
        ];
        assert_eq!(count_all(&body), 3);
    }

    #[test]
    fn test_very_deep_tree_counts_and_drops() {
        let depth = 200_000;
        let mut stmt = Statement::RawCommand { text: "noop".into() };
        for _ in 0..depth {
            stmt = Statement::If {
                condition: "A Colision == B".into(),
                then_branch: vec![stmt],
                else_branch: vec![],
            };
        }
        assert_eq!(stmt.count(), depth + 1);
        drop(stmt);
    }
}
