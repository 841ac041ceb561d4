//! Tokenizer for asset bundle class files
//!
//! Only the subset of PHP that bundle declarations use is recognised.
//! Everything else degrades to [`Token::Other`], so unknown syntax never
//! stops the scan.

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifier, keyword or `\`-qualified name (also numbers)
    Ident(String),
    /// `$name`, stored without the sigil
    Variable(String),
    /// Quoted string literal, unescaped
    Str(String),
    /// String literal missing its closing quote
    Unterminated,
    DoubleColon,
    FatArrow,
    Assign,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,
    Other(char),
}

impl Token {
    /// Short human description used in parse issues
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("'{name}'"),
            Token::Variable(name) => format!("'${name}'"),
            Token::Str(_) => "string literal".to_string(),
            Token::Unterminated => "unterminated string".to_string(),
            Token::DoubleColon => "'::'".to_string(),
            Token::FatArrow => "'=>'".to_string(),
            Token::Assign => "'='".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::Other(c) => format!("'{c}'"),
        }
    }
}

/// A token with the 1-based line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skip a `#[...]` attribute; the opening `#[` is already consumed
    fn skip_attribute(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.bump() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '\'' | '"' => {
                    self.read_string(c);
                }
                _ => {}
            }
        }
    }

    fn skip_block_comment(&mut self) {
        // opening "/*" already consumed
        while let Some(c) = self.bump() {
            if c == '*' && self.peek() == Some('/') {
                self.bump();
                return;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '\\' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }

    /// Read a quoted literal; the opening quote is already consumed
    fn read_string(&mut self, quote: char) -> Token {
        let mut value = String::new();
        while let Some(c) = self.bump() {
            if c == quote {
                return Token::Str(value);
            }
            if c != '\\' {
                value.push(c);
                continue;
            }
            match self.peek() {
                Some(next) if next == quote || next == '\\' => {
                    value.push(next);
                    self.bump();
                }
                Some(next) if quote == '"' && matches!(next, 'n' | 't' | 'r' | '$') => {
                    value.push(match next {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                    self.bump();
                }
                _ => value.push('\\'),
            }
        }
        Token::Unterminated
    }

    fn next_token(&mut self) -> Option<Spanned> {
        loop {
            let c = self.peek()?;
            if c.is_whitespace() {
                self.bump();
                continue;
            }
            match (c, self.peek_at(1)) {
                ('#', Some('[')) => {
                    self.bump();
                    self.bump();
                    self.skip_attribute();
                    continue;
                }
                ('/', Some('/')) | ('#', _) => {
                    self.skip_line();
                    continue;
                }
                ('/', Some('*')) => {
                    self.bump();
                    self.bump();
                    self.skip_block_comment();
                    continue;
                }
                _ => break,
            }
        }

        let line = self.line;
        let c = self.peek()?;
        let token = if c.is_alphanumeric() || c == '_' || c == '\\' {
            Token::Ident(self.read_word())
        } else {
            self.bump();
            match c {
                '$' => {
                    let name = self.read_word();
                    if name.is_empty() {
                        Token::Other('$')
                    } else {
                        Token::Variable(name)
                    }
                }
                '\'' | '"' => self.read_string(c),
                ':' if self.peek() == Some(':') => {
                    self.bump();
                    Token::DoubleColon
                }
                '=' if self.peek() == Some('>') => {
                    self.bump();
                    Token::FatArrow
                }
                '=' if self.peek() == Some('=') => {
                    while self.peek() == Some('=') {
                        self.bump();
                    }
                    Token::Other('=')
                }
                '=' => Token::Assign,
                '[' => Token::LBracket,
                ']' => Token::RBracket,
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                ';' => Token::Semicolon,
                '.' => Token::Dot,
                other => Token::Other(other),
            }
        };

        Some(Spanned { token, line })
    }
}

/// Split source text into tokens, dropping whitespace and comments
pub fn tokenize(source: &str) -> Vec<Spanned> {
    let mut lexer = Lexer {
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tokens
}
