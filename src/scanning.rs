/// Characters that split an expression into tokens. Each one is also a token itself.
pub const DELIMITERS: &str = " \t*+-/()[]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    word, operator, punctuation, whitespace
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    fn new(content: String, kind: TokenKind, offset: usize) -> Self {
        Self{content, kind, offset}
    }

    pub fn is(&self, content: &str) -> bool {
        self.content == content
    }
}

pub trait Scanner {
    /// The token under the cursor, or `None` once the input is exhausted.
    fn get_current(&self) -> Option<Token>;
    fn advance(&mut self);
}

pub struct StringScanner {
    string: String,
    token: Option<Token>,
    index: usize,
}

pub fn is_delimiter(character: char) -> bool {
    DELIMITERS.contains(character)
}

fn kind_of(character: char) -> TokenKind {
    match character {
        '+' | '-' | '*' | '/' => TokenKind::operator,
        '(' | ')' | '[' | ']' => TokenKind::punctuation,
        _ => TokenKind::whitespace,
    }
}

impl StringScanner {
    pub fn new(string: String) -> Self {
        let mut source = Self {
            string,
            token: None,
            index: 0,
        };
        source.advance();
        source
    }

    pub fn is_empty(&self) -> bool {
        self.string.trim().is_empty()
    }

    fn view(&self) -> &str {
        &self.string[self.index..]
    }

    fn get_word(&self) -> Token {
        let length = self.view()
            .find(is_delimiter)
            .unwrap_or(self.view().len());
        Token::new(self.view()[..length].into(), TokenKind::word, self.index)
    }

    fn get_single(&self, character: char) -> Token {
        Token::new(character.into(), kind_of(character), self.index)
    }

    fn get_token(&self) -> Option<Token> {
        let character = self.view().chars().next()?;
        if is_delimiter(character) {
            Some(self.get_single(character))
        } else {
            Some(self.get_word())
        }
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<Token> {
        self.token.clone()
    }

    fn advance(&mut self) {
        if let Some(token) = &self.token {
            self.index = token.offset + token.content.len();
        }
        self.token = self.get_token();
    }
}

/// Splits `string` on [`DELIMITERS`], keeping every delimiter as its own token.
pub fn tokenize(string: &str) -> Vec<Token> {
    let mut scanner = StringScanner::new(string.into());
    let mut tokens = Vec::new();
    while let Some(token) = scanner.get_current() {
        tokens.push(token);
        scanner.advance();
    }
    tokens
}
