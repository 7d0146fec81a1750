//! Line classifier for GameScript.
//!
//! The language is line-oriented, so instead of characters we break the
//! source into lines and each line into at most three tokens: leading `}`
//! braces, one "core" token, and a trailing `{`. The parser decides what the
//! tokens mean in context.
//
//  Line shapes (informal):
//
//      GameScript
//      Working Hierarchy.<Object>
//      using <Alias>: [<Canonical>]
//      line "<label>"
//      line.ask <Object>.<Property>
//      <Object>.<Property> = ... [line] ...
//      <Object>.<Property> = <value>
//      if <condition> [{]
//      [}] else [{]
//      { | }
//
//  `#` starts a comment unless it sits inside double quotes.

use crate::error::ParseError;
use std::iter::Enumerate;
use std::str::Lines;

pub const HEADER: &str = "GameScript";
const FIELD_MARKER: &str = "[line]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Header,
    Working(String),
    Using {
        alias: String,
        canonical: Option<String>,
    },
    Open,
    Close,
    If(String),
    Else,
    Field(String),
    Ask(String),
    FieldAssign(String),
    Assign {
        property: String,
        value: String,
    },
    Command(String),
}

/// Tokens of one non-blank source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based
    pub number: usize,
    pub tokens: Vec<Token>,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            lines: src.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Line, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            let number = idx + 1;
            let text = strip_comment(raw).trim();
            if text.is_empty() {
                continue;
            }
            return Some(tokenize(text, number).map(|tokens| Line { number, tokens }));
        }
        None
    }
}

fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

fn tokenize(text: &str, number: usize) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(after) = rest.strip_prefix('}') {
        tokens.push(Token::Close);
        rest = after.trim_start();
    }

    let mut trailing_open = false;
    if let Some(before) = rest.strip_suffix('{') {
        trailing_open = true;
        rest = before.trim_end();
    }

    if !rest.is_empty() {
        tokens.push(classify(rest, number)?);
    }
    if trailing_open {
        tokens.push(Token::Open);
    }
    Ok(tokens)
}

fn classify(text: &str, number: usize) -> Result<Token, ParseError> {
    if text == HEADER {
        return Ok(Token::Header);
    }

    if let Some(path) = text.strip_prefix("Working") {
        let path = path.trim();
        if path.is_empty() {
            return Err(ParseError::EmptyTarget { line: number });
        }
        return Ok(Token::Working(path.to_string()));
    }

    if let Some(decl) = text.strip_prefix("using") {
        let (alias, canonical) = match decl.split_once(':') {
            Some((alias, canonical)) => (alias.trim(), canonical.trim()),
            None => (decl.trim(), ""),
        };
        if alias.is_empty() {
            return Err(ParseError::EmptyAlias { line: number });
        }
        return Ok(Token::Using {
            alias: alias.to_string(),
            canonical: (!canonical.is_empty()).then(|| canonical.to_string()),
        });
    }

    if text == "if" {
        return Err(ParseError::EmptyCondition { line: number });
    }
    if let Some(condition) = text.strip_prefix("if ") {
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(ParseError::EmptyCondition { line: number });
        }
        return Ok(Token::If(condition.to_string()));
    }

    if text == "else" {
        return Ok(Token::Else);
    }

    if let Some(label) = text.strip_prefix("line \"") {
        return match label.split_once('"') {
            Some((label, _)) if !label.is_empty() => Ok(Token::Field(label.to_string())),
            _ => Err(ParseError::MalformedField {
                line: number,
                text: text.to_string(),
            }),
        };
    }

    if let Some(ask) = text.strip_prefix("line.ask") {
        if let Some(path) = ask.split_whitespace().next() {
            return Ok(Token::Ask(path.to_string()));
        }
        // `line.ask` with no path binds nothing
        return Ok(Token::Command(text.to_string()));
    }

    if let Some((left, right)) = text.split_once('=') {
        let property = left.trim().to_string();
        // any `[line]` on the right binds the field; the rest is not evaluated
        if right.contains(FIELD_MARKER) {
            return Ok(Token::FieldAssign(property));
        }
        return Ok(Token::Assign {
            property,
            value: right.trim().to_string(),
        });
    }

    Ok(Token::Command(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Vec<Token>> {
        let lines: Result<Vec<_>, _> = Lexer::new(src).collect();
        lines.unwrap().into_iter().map(|l| l.tokens).collect()
    }

    #[test]
    fn test_tokenisation() {
        let test_cases = vec![
            ("GameScript", vec![Token::Header]),
            (
                "Working Hierarchy.Player",
                vec![Token::Working("Hierarchy.Player".into())],
            ),
            (
                "using Player:",
                vec![Token::Using {
                    alias: "Player".into(),
                    canonical: None,
                }],
            ),
            (
                "using Block: Green_Cube",
                vec![Token::Using {
                    alias: "Block".into(),
                    canonical: Some("Green_Cube".into()),
                }],
            ),
            (
                "line \"Movement Speed\"",
                vec![Token::Field("Movement Speed".into())],
            ),
            (
                "line.ask Player.Speed",
                vec![Token::Ask("Player.Speed".into())],
            ),
            (
                "Player.Speed = [line]",
                vec![Token::FieldAssign("Player.Speed".into())],
            ),
            (
                "Block.Color = 0, 255, 0  # Default green",
                vec![Token::Assign {
                    property: "Block.Color".into(),
                    value: "0, 255, 0".into(),
                }],
            ),
            (
                "if Player Colision == Block {",
                vec![Token::If("Player Colision == Block".into()), Token::Open],
            ),
            ("} else {", vec![Token::Close, Token::Else, Token::Open]),
            ("}", vec![Token::Close]),
            ("{", vec![Token::Open]),
            ("jump", vec![Token::Command("jump".into())]),
            (
                "Player.Speed = [line] * 2",
                vec![Token::FieldAssign("Player.Speed".into())],
            ),
            (
                "Block.Scale=[line]",
                vec![Token::FieldAssign("Block.Scale".into())],
            ),
        ];

        for (src, expected) in test_cases {
            assert_eq!(tokens(src), vec![expected], "source {src:?}");
        }
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let src = "\n   \n# heading\nGameScript\n\t# indented comment\n";
        let lines: Vec<_> = Lexer::new(src).map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 4);
        assert_eq!(lines[0].tokens, vec![Token::Header]);
    }

    #[test]
    fn test_hash_inside_label_is_kept() {
        assert_eq!(
            tokens("line \"Cube #1 Color\""),
            vec![vec![Token::Field("Cube #1 Color".into())]]
        );
    }

    #[test]
    fn test_lexical_errors() {
        let test_cases = vec![
            ("Working", ParseError::EmptyTarget { line: 1 }),
            ("using :", ParseError::EmptyAlias { line: 1 }),
            ("if", ParseError::EmptyCondition { line: 1 }),
            ("if   {", ParseError::EmptyCondition { line: 1 }),
            (
                "line \"Speed",
                ParseError::MalformedField {
                    line: 1,
                    text: "line \"Speed".into(),
                },
            ),
            (
                "line \"\"",
                ParseError::MalformedField {
                    line: 1,
                    text: "line \"\"".into(),
                },
            ),
        ];

        for (src, expected) in test_cases {
            let res: Result<Vec<_>, _> = Lexer::new(src).collect();
            assert_eq!(res, Err(expected), "source {src:?}");
        }
    }
}
