//! Recursive-descent reader for asset bundle declarations
//!
//! Reads the class-level property defaults of a bundle class:
//!
//! ```text
//! namespace app\assets;
//!
//! class AppAsset extends AssetBundle
//! {
//!     public $basePath = '@webroot';
//!     public $baseUrl = '@web';
//!     public $css = ['css/site.css', ['css/print.css', 'media' => 'print']];
//!     public $js = [];
//!     public $depends = ['yii\web\YiiAsset', BootstrapAsset::class];
//! }
//! ```
//!
//! Each field is read independently. A field that is not declared is
//! [`Field::Absent`]; a field whose value cannot be read is
//! [`Field::Malformed`] and yields a [`ParseIssue`]. Neither stops the
//! remaining fields from being read.

use super::ParseIssue;
use super::lexer::{Spanned, Token, tokenize};

/// Outcome of reading one declared field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Present(T),
    Malformed(String),
}

impl<T> Field<T> {
    /// Present value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Field::Malformed(_))
    }
}

/// Everything read from one bundle source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSource {
    pub namespace: Option<String>,
    pub class_name: Option<String>,
    pub base_path: Field<String>,
    pub base_url: Field<String>,
    pub source_path: Field<String>,
    pub css: Field<Vec<String>>,
    pub js: Field<Vec<String>>,
    pub depends: Field<Vec<String>>,
    pub issues: Vec<ParseIssue>,
}

/// A single value inside an array or on the right of an assignment
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Str(String),
    /// `Scope::Constant`, reduced to the scope name
    ScopeRef(String),
    Ident(String),
    Array(Vec<Entry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: Option<Value>,
    value: Value,
}

/// Which element shapes a list field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    /// `$css` / `$js`: file names, optionally wrapped with options
    Files,
    /// `$depends`: string literals and class references
    Dependencies,
}

/// Deepest array nesting read before a value is rejected
const MAX_NESTING: usize = 32;

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Arrays currently open
    depth: usize,
}

type ParseResult<T> = std::result::Result<T, String>;

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|s| &s.token)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |s| s.line)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|s| &s.token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn found(&self) -> String {
        self.peek()
            .map_or_else(|| "end of file".to_string(), Token::describe)
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(format!(
                "expected {}, found {}",
                expected.describe(),
                self.found()
            ))
        }
    }

    /// Skip to just past the next `;` outside any brackets
    fn recover(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            match token {
                Token::LBracket | Token::LParen => depth += 1,
                Token::RBracket | Token::RParen => depth = depth.saturating_sub(1),
                Token::Semicolon if depth == 0 => return,
                _ => {}
            }
        }
    }

    /// value := term ('.' term)*
    ///
    /// Concatenation is folded into one string so that defaults such as
    /// `__DIR__ . '/dist'` read as `__DIR__/dist`.
    fn parse_value(&mut self) -> ParseResult<Value> {
        let first = self.parse_term()?;
        if self.peek() != Some(&Token::Dot) {
            return Ok(first);
        }

        let mut joined = scalar_text(&first)
            .ok_or_else(|| "arrays cannot be concatenated".to_string())?;
        while self.peek() == Some(&Token::Dot) {
            self.advance();
            let next = self.parse_term()?;
            let text =
                scalar_text(&next).ok_or_else(|| "arrays cannot be concatenated".to_string())?;
            joined.push_str(&text);
        }
        Ok(Value::Str(joined))
    }

    fn parse_term(&mut self) -> ParseResult<Value> {
        match self.peek().cloned() {
            Some(Token::Str(value)) => {
                self.advance();
                Ok(Value::Str(value))
            }
            Some(Token::LBracket) => {
                self.advance();
                self.parse_array(&Token::RBracket)
            }
            Some(Token::Ident(name)) if name.eq_ignore_ascii_case("array") => {
                self.advance();
                self.expect(&Token::LParen)?;
                self.parse_array(&Token::RParen)
            }
            Some(Token::Ident(name)) => {
                self.advance();
                if self.peek() == Some(&Token::DoubleColon) {
                    self.advance();
                    match self.advance() {
                        Some(Token::Ident(_)) => {
                            Ok(Value::ScopeRef(name.trim_start_matches('\\').to_string()))
                        }
                        _ => Err(format!("expected constant name after '{name}::'")),
                    }
                } else {
                    Ok(Value::Ident(name))
                }
            }
            Some(Token::Unterminated) => Err("unterminated string literal".to_string()),
            _ => Err(format!("expected a value, found {}", self.found())),
        }
    }

    fn parse_array(&mut self, close: &Token) -> ParseResult<Value> {
        if self.depth >= MAX_NESTING {
            return Err(format!("arrays nested deeper than {MAX_NESTING} levels"));
        }
        self.depth += 1;
        let entries = self.parse_entries(close);
        self.depth -= 1;
        entries.map(Value::Array)
    }

    /// entries := (entry (',' entry)* ','?)? close
    fn parse_entries(&mut self, close: &Token) -> ParseResult<Vec<Entry>> {
        let mut entries = Vec::new();
        loop {
            if self.peek() == Some(close) {
                self.advance();
                return Ok(entries);
            }

            let first = self.parse_value()?;
            let entry = if self.peek() == Some(&Token::FatArrow) {
                self.advance();
                Entry {
                    key: Some(first),
                    value: self.parse_value()?,
                }
            } else {
                Entry {
                    key: None,
                    value: first,
                }
            };
            entries.push(entry);

            match self.peek() {
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(token) if token == close => {}
                _ => {
                    return Err(format!(
                        "expected ',' or {}, found {}",
                        close.describe(),
                        self.found()
                    ));
                }
            }
        }
    }

    /// Read the value after `=` up to the terminating `;`
    fn parse_assignment(&mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;
        self.expect(&Token::Semicolon)?;
        Ok(value)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) | Value::Ident(s) | Value::ScopeRef(s) => Some(s.clone()),
        Value::Array(_) => None,
    }
}

fn to_string_field(value: Value) -> Field<String> {
    match value {
        Value::Str(s) => Field::Present(s),
        Value::Ident(name) if name.eq_ignore_ascii_case("null") => Field::Absent,
        Value::Ident(name) => Field::Malformed(format!("expected string literal, found '{name}'")),
        Value::ScopeRef(scope) => {
            Field::Malformed(format!("expected string literal, found '{scope}::…'"))
        }
        Value::Array(_) => Field::Malformed("expected string literal, found array".to_string()),
    }
}

/// Reduce one list element, or explain why it was skipped
fn list_item(entry: &Entry, kind: ListKind) -> std::result::Result<Option<String>, String> {
    // string keys are options ('media' => 'print'), never file names
    if matches!(entry.key, Some(Value::Str(_))) {
        return Ok(None);
    }

    match (&entry.value, kind) {
        (Value::Str(s), _) => Ok(Some(s.clone())),
        (Value::ScopeRef(scope), ListKind::Dependencies) => Ok(Some(scope.clone())),
        (Value::Array(inner), ListKind::Files) => Ok(inner.iter().find_map(|e| {
            match (&e.key, &e.value) {
                (None, Value::Str(s)) => Some(s.clone()),
                _ => None,
            }
        })),
        (Value::ScopeRef(scope), ListKind::Files) => {
            Err(format!("unsupported file entry '{scope}::…'"))
        }
        (Value::Ident(name), _) => Err(format!("unsupported entry '{name}'")),
        (Value::Array(_), ListKind::Dependencies) => {
            Err("nested arrays are not valid dependencies".to_string())
        }
    }
}

fn to_list_field(
    value: Value,
    kind: ListKind,
    field: &str,
    line: usize,
    issues: &mut Vec<ParseIssue>,
) -> Field<Vec<String>> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Ident(name) if name.eq_ignore_ascii_case("null") => return Field::Absent,
        other => {
            let found = scalar_text(&other).unwrap_or_default();
            return Field::Malformed(format!("expected array, found '{found}'"));
        }
    };

    let mut items = Vec::new();
    for entry in &entries {
        match list_item(entry, kind) {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(message) => issues.push(ParseIssue {
                field: field.to_string(),
                line,
                message,
            }),
        }
    }
    Field::Present(items)
}

/// Read namespace, class name and bundle properties from source text
pub fn parse_source(source: &str) -> ParsedSource {
    let tokens = tokenize(source);
    let mut parser = Parser::new(&tokens);
    let mut parsed = ParsedSource::default();

    while let Some(token) = parser.peek().cloned() {
        match token {
            Token::Ident(keyword) if keyword == "namespace" && parsed.namespace.is_none() => {
                parser.advance();
                if let Some(Token::Ident(name)) = parser.peek().cloned() {
                    parser.advance();
                    parsed.namespace = Some(name.trim_start_matches('\\').to_string());
                }
            }
            Token::Ident(keyword) if keyword == "class" && parsed.class_name.is_none() => {
                parser.advance();
                if let Some(Token::Ident(name)) = parser.peek().cloned() {
                    parser.advance();
                    parsed.class_name = Some(name);
                }
            }
            Token::DoubleColon => {
                // `Foo::class` must not be taken for a class declaration
                parser.advance();
                parser.advance();
            }
            Token::Variable(name) if parser.peek_at(1) == Some(&Token::Assign) => {
                read_property(&mut parser, &name, &mut parsed);
            }
            _ => {
                parser.advance();
            }
        }
    }

    parsed
}

fn read_property(parser: &mut Parser<'_>, name: &str, parsed: &mut ParsedSource) {
    let already_read = match name {
        "basePath" => !matches!(parsed.base_path, Field::Absent),
        "baseUrl" => !matches!(parsed.base_url, Field::Absent),
        "sourcePath" => !matches!(parsed.source_path, Field::Absent),
        "css" => !matches!(parsed.css, Field::Absent),
        "js" => !matches!(parsed.js, Field::Absent),
        "depends" => !matches!(parsed.depends, Field::Absent),
        _ => true,
    };
    // `$name =`: skip the variable and the `=`
    parser.advance();
    parser.advance();
    if already_read {
        return;
    }

    let line = parser.line();
    let value = match parser.parse_assignment() {
        Ok(value) => value,
        Err(message) => {
            parsed.issues.push(ParseIssue {
                field: name.to_string(),
                line,
                message: message.clone(),
            });
            parser.recover();
            assign_malformed(parsed, name, message);
            return;
        }
    };

    let issues = &mut parsed.issues;
    match name {
        "basePath" => parsed.base_path = to_string_field(value),
        "baseUrl" => parsed.base_url = to_string_field(value),
        "sourcePath" => parsed.source_path = to_string_field(value),
        "css" => parsed.css = to_list_field(value, ListKind::Files, name, line, issues),
        "js" => parsed.js = to_list_field(value, ListKind::Files, name, line, issues),
        _ => parsed.depends = to_list_field(value, ListKind::Dependencies, name, line, issues),
    }

    let malformed = match name {
        "basePath" => field_reason(&parsed.base_path),
        "baseUrl" => field_reason(&parsed.base_url),
        "sourcePath" => field_reason(&parsed.source_path),
        "css" => field_reason(&parsed.css),
        "js" => field_reason(&parsed.js),
        _ => field_reason(&parsed.depends),
    };
    if let Some(message) = malformed {
        parsed.issues.push(ParseIssue {
            field: name.to_string(),
            line,
            message,
        });
    }
}

fn field_reason<T>(field: &Field<T>) -> Option<String> {
    match field {
        Field::Malformed(reason) => Some(reason.clone()),
        Field::Absent | Field::Present(_) => None,
    }
}

fn assign_malformed(parsed: &mut ParsedSource, name: &str, message: String) {
    match name {
        "basePath" => parsed.base_path = Field::Malformed(message),
        "baseUrl" => parsed.base_url = Field::Malformed(message),
        "sourcePath" => parsed.source_path = Field::Malformed(message),
        "css" => parsed.css = Field::Malformed(message),
        "js" => parsed.js = Field::Malformed(message),
        _ => parsed.depends = Field::Malformed(message),
    }
}
