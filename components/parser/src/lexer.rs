//! JavaScript Lexer - tokenizes source code into tokens
//!
//! The lexer is pull-based: every call to [`Lexer::next_token`] scans exactly
//! one token. Between calls it keeps just enough context to decide what a
//! `/`, a `}` or a `#` means:
//!
//! - whether the previous token produced a value (division) or not (regex)
//! - a stack of open braces, template substitutions and class bodies

use core_types::{ErrorKind, SourceLocation, SourcePosition, SyntaxError, SyntaxResult};
use serde::Serialize;
use tracing::trace;

/// JavaScript keyword types
///
/// Contextual words (`let`, `async`, `await`, `yield`, `static`, `get`, `set`,
/// `of`, `from`, `as`) are lexed as identifiers and recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    /// const keyword
    Const,
    /// var keyword
    Var,
    /// function keyword
    Function,
    /// return keyword
    Return,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// for keyword
    For,
    /// break keyword
    Break,
    /// continue keyword
    Continue,
    /// class keyword
    Class,
    /// extends keyword
    Extends,
    /// new keyword
    New,
    /// this keyword
    This,
    /// super keyword
    Super,
    /// true keyword
    True,
    /// false keyword
    False,
    /// null keyword
    Null,
    /// typeof keyword
    Typeof,
    /// void keyword
    Void,
    /// instanceof keyword
    Instanceof,
    /// in keyword
    In,
    /// try keyword
    Try,
    /// catch keyword
    Catch,
    /// finally keyword
    Finally,
    /// throw keyword
    Throw,
    /// import keyword
    Import,
    /// export keyword
    Export,
    /// default keyword
    Default,
    /// delete keyword
    Delete,
    /// with keyword
    With,
    /// switch keyword
    Switch,
    /// case keyword
    Case,
    /// do keyword
    Do,
    /// debugger keyword
    Debugger,
}

impl Keyword {
    /// Look up the keyword spelled by `word`
    pub fn from_word(word: &str) -> Option<Keyword> {
        let keyword = match word {
            "const" => Keyword::Const,
            "var" => Keyword::Var,
            "function" => Keyword::Function,
            "return" => Keyword::Return,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "class" => Keyword::Class,
            "extends" => Keyword::Extends,
            "new" => Keyword::New,
            "this" => Keyword::This,
            "super" => Keyword::Super,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "typeof" => Keyword::Typeof,
            "void" => Keyword::Void,
            "instanceof" => Keyword::Instanceof,
            "in" => Keyword::In,
            "try" => Keyword::Try,
            "catch" => Keyword::Catch,
            "finally" => Keyword::Finally,
            "throw" => Keyword::Throw,
            "import" => Keyword::Import,
            "export" => Keyword::Export,
            "default" => Keyword::Default,
            "delete" => Keyword::Delete,
            "with" => Keyword::With,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "do" => Keyword::Do,
            "debugger" => Keyword::Debugger,
            _ => return None,
        };
        Some(keyword)
    }

    /// Source spelling of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Const => "const",
            Keyword::Var => "var",
            Keyword::Function => "function",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Class => "class",
            Keyword::Extends => "extends",
            Keyword::New => "new",
            Keyword::This => "this",
            Keyword::Super => "super",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::Typeof => "typeof",
            Keyword::Void => "void",
            Keyword::Instanceof => "instanceof",
            Keyword::In => "in",
            Keyword::Try => "try",
            Keyword::Catch => "catch",
            Keyword::Finally => "finally",
            Keyword::Throw => "throw",
            Keyword::Import => "import",
            Keyword::Export => "export",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::With => "with",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Do => "do",
            Keyword::Debugger => "debugger",
        }
    }
}

/// JavaScript punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Punctuator {
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Opening bracket
    LBracket,
    /// Closing bracket
    RBracket,
    /// Semicolon
    Semicolon,
    /// Comma
    Comma,
    /// Dot
    Dot,
    /// Spread operator
    Spread,
    /// Optional chaining
    OptionalChain,
    /// Colon
    Colon,
    /// Question mark
    Question,
    /// Assignment
    Assign,
    /// Arrow function
    Arrow,
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Multiply
    Star,
    /// Divide
    Slash,
    /// Modulo
    Percent,
    /// Exponentiation
    StarStar,
    /// Equality
    EqEq,
    /// Strict equality
    EqEqEq,
    /// Inequality
    NotEq,
    /// Strict inequality
    NotEqEq,
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,
    /// Logical AND
    AndAnd,
    /// Logical OR
    OrOr,
    /// Nullish coalescing
    NullishCoalesce,
    /// Logical NOT
    Not,
    /// Bitwise AND
    And,
    /// Bitwise OR
    Or,
    /// Bitwise XOR
    Xor,
    /// Bitwise NOT
    Tilde,
    /// Left shift
    LtLt,
    /// Right shift
    GtGt,
    /// Unsigned right shift
    GtGtGt,
    /// Plus equals
    PlusEq,
    /// Minus equals
    MinusEq,
    /// Multiply equals
    StarEq,
    /// Divide equals
    SlashEq,
    /// Modulo equals
    PercentEq,
    /// Exponentiation equals
    StarStarEq,
    /// Bitwise AND equals
    AndEq,
    /// Bitwise OR equals
    OrEq,
    /// Bitwise XOR equals
    XorEq,
    /// Left shift equals
    LtLtEq,
    /// Right shift equals
    GtGtEq,
    /// Unsigned right shift equals
    GtGtGtEq,
    /// Logical AND equals
    AndAndEq,
    /// Logical OR equals
    OrOrEq,
    /// Nullish coalescing equals
    NullishCoalesceEq,
    /// Increment
    PlusPlus,
    /// Decrement
    MinusMinus,
}

/// Kind of a token produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    /// Reserved word
    Keyword(Keyword),
    /// Operator or delimiter
    Punctuator(Punctuator),
    /// Identifier (including contextual keywords)
    Identifier,
    /// Private name (`#name`), only inside class bodies
    PrivateName,
    /// Number literal
    NumericLiteral,
    /// BigInt literal (integer with `n` suffix)
    BigIntLiteral,
    /// String literal
    StringLiteral,
    /// Regular expression literal
    RegexLiteral,
    /// Template literal with no substitutions
    NoSubstitutionTemplate,
    /// Template head: from ` to first ${
    TemplateHead,
    /// Template middle: from } to next ${
    TemplateMiddle,
    /// Template tail: from } to closing `
    TemplateTail,
    /// End of input
    Eof,
}

impl SyntaxKind {
    /// True when a `/` following this token is a division operator
    fn produces_value(self, raw: &str) -> bool {
        match self {
            SyntaxKind::Identifier => raw != "yield" && raw != "await",
            SyntaxKind::PrivateName
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegexLiteral
            | SyntaxKind::NoSubstitutionTemplate
            | SyntaxKind::TemplateTail => true,
            SyntaxKind::Keyword(k) => matches!(
                k,
                Keyword::This | Keyword::Super | Keyword::True | Keyword::False | Keyword::Null
            ),
            SyntaxKind::Punctuator(p) => matches!(
                p,
                Punctuator::RParen
                    | Punctuator::RBracket
                    | Punctuator::RBrace
                    | Punctuator::PlusPlus
                    | Punctuator::MinusMinus
            ),
            SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle | SyntaxKind::Eof => false,
        }
    }
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Token kind
    pub kind: SyntaxKind,
    /// Exact source text of the token
    pub raw_value: String,
    /// Source span of the token
    pub location: SourceLocation,
    /// A line terminator appeared between the previous token and this one
    pub newline_before: bool,
}

impl Token {
    /// True if this token is the given punctuator
    pub fn is_punctuator(&self, p: Punctuator) -> bool {
        self.kind == SyntaxKind::Punctuator(p)
    }

    /// True if this token is the given keyword
    pub fn is_keyword(&self, k: Keyword) -> bool {
        self.kind == SyntaxKind::Keyword(k)
    }

    /// True if this token is an identifier spelled `name` without escapes
    pub fn is_identifier_named(&self, name: &str) -> bool {
        self.kind == SyntaxKind::Identifier && self.raw_value == name
    }
}

/// Lexical context pushed by `{`, `${` and class bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexContext {
    /// Ordinary brace: block, object literal, function body
    Brace,
    /// Template substitution opened by `${`
    Substitution,
    /// Brace enclosing a class body
    ClassBody,
}

/// Snapshot of the complete lexer state, used for bounded lookahead
#[derive(Debug, Clone)]
pub struct LexerCheckpoint {
    position: usize,
    row: u32,
    col: u32,
    regex_allowed: bool,
    context: Vec<LexContext>,
    value: String,
}

/// Lexer for JavaScript source code
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    position: usize,
    row: u32,
    col: u32,
    /// A `/` at the current position starts a regex literal
    regex_allowed: bool,
    context: Vec<LexContext>,
    /// Decoded value of the most recent token
    value: String,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            source,
            chars: source.chars().collect(),
            position: 0,
            row: 0,
            col: 0,
            regex_allowed: true,
            context: Vec::new(),
            value: String::new(),
        };

        lexer.skip_hashbang();
        lexer
    }

    /// The full source text being tokenized
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Decoded value of the most recently produced token.
    ///
    /// String literals have escapes resolved, templates yield their cooked
    /// text, identifiers and private names yield their name, numeric literals
    /// yield their digits without separators. Other tokens yield their raw
    /// text.
    pub fn source_value(&self) -> &str {
        &self.value
    }

    /// Current position of the cursor
    pub fn current_position(&self) -> SourcePosition {
        SourcePosition::new(self.row, self.col, self.position)
    }

    /// Snapshot the lexer state
    pub fn checkpoint(&self) -> LexerCheckpoint {
        LexerCheckpoint {
            position: self.position,
            row: self.row,
            col: self.col,
            regex_allowed: self.regex_allowed,
            context: self.context.clone(),
            value: self.value.clone(),
        }
    }

    /// Rewind to a snapshot taken by [`Lexer::checkpoint`]
    pub fn restore(&mut self, checkpoint: LexerCheckpoint) {
        self.position = checkpoint.position;
        self.row = checkpoint.row;
        self.col = checkpoint.col;
        self.regex_allowed = checkpoint.regex_allowed;
        self.context = checkpoint.context;
        self.value = checkpoint.value;
    }

    /// Mark the most recently opened brace as a class body.
    ///
    /// Must be called right after the `{` token of a class body has been
    /// produced. Private names lex only while a class body is open; the
    /// context ends with the matching `}`.
    pub fn enter_class_body(&mut self) {
        if let Some(top) = self.context.last_mut() {
            if *top == LexContext::Brace {
                *top = LexContext::ClassBody;
            }
        }
    }

    /// True while any enclosing brace is a class body
    pub fn in_class_body(&self) -> bool {
        self.context.contains(&LexContext::ClassBody)
    }

    /// Skip hashbang comment (#!) at the beginning of the source
    fn skip_hashbang(&mut self) {
        if self.peek() == '#' && self.peek_next() == Some('!') {
            while !self.is_at_end() && !is_line_terminator(self.peek()) {
                self.advance();
            }
        }
    }

    /// Get the next token from the source.
    ///
    /// Once the input is exhausted every call returns an `Eof` token at the
    /// end position.
    pub fn next_token(&mut self) -> SyntaxResult<Token> {
        let row_before = self.row;
        self.skip_whitespace_and_comments()?;
        let newline_before = self.row > row_before;

        let start = self.current_position();
        self.value.clear();

        if self.is_at_end() {
            self.regex_allowed = true;
            return Ok(Token {
                kind: SyntaxKind::Eof,
                raw_value: String::new(),
                location: SourceLocation::at(start),
                newline_before,
            });
        }

        let kind = self.scan_token(start)?;
        Ok(self.finish_token(kind, start, newline_before))
    }

    /// Re-read a `/` or `/=` token starting at `start` as a regex literal.
    ///
    /// The previous token cannot tell a regex from a division after `)` or
    /// `}`; the parser calls this when the slash appears where an
    /// expression must begin.
    pub fn rescan_as_regex(
        &mut self,
        start: SourcePosition,
        newline_before: bool,
    ) -> SyntaxResult<Token> {
        self.position = start.index;
        self.row = start.row;
        self.col = start.col;
        self.value.clear();

        self.advance();
        let kind = self.scan_regexp(start)?;
        Ok(self.finish_token(kind, start, newline_before))
    }

    fn finish_token(&mut self, kind: SyntaxKind, start: SourcePosition, newline_before: bool) -> Token {
        let end = self.current_position();
        let raw_value: String = self.chars[start.index..end.index].iter().collect();
        if !has_decoded_value(kind) {
            self.value.clone_from(&raw_value);
        }
        self.regex_allowed = !kind.produces_value(&raw_value);

        trace!(?kind, raw = %raw_value, row = start.row, col = start.col, "token");

        Token {
            kind,
            raw_value,
            location: SourceLocation::new(start, end),
            newline_before,
        }
    }

    fn scan_token(&mut self, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        let ch = self.advance();

        let punct = match ch {
            '(' => Punctuator::LParen,
            ')' => Punctuator::RParen,
            '{' => {
                self.context.push(LexContext::Brace);
                Punctuator::LBrace
            }
            '}' => {
                if self.context.pop() == Some(LexContext::Substitution) {
                    return self.scan_template_part(start, false);
                }
                Punctuator::RBrace
            }
            '[' => Punctuator::LBracket,
            ']' => Punctuator::RBracket,
            ';' => Punctuator::Semicolon,
            ',' => Punctuator::Comma,
            ':' => Punctuator::Colon,
            '~' => Punctuator::Tilde,

            '.' => {
                if self.peek() == '.' && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    Punctuator::Spread
                } else if self.peek().is_ascii_digit() {
                    // Number with leading decimal: .5, .123, etc.
                    return self.scan_leading_decimal_number(start);
                } else {
                    Punctuator::Dot
                }
            }

            '?' => {
                if self.match_char('?') {
                    if self.match_char('=') {
                        Punctuator::NullishCoalesceEq
                    } else {
                        Punctuator::NullishCoalesce
                    }
                } else if self.peek() == '.'
                    && !self.peek_next().is_some_and(|c| c.is_ascii_digit())
                {
                    // `?.5` is a conditional followed by a number, not a chain
                    self.advance();
                    Punctuator::OptionalChain
                } else {
                    Punctuator::Question
                }
            }

            '=' => {
                if self.match_char('>') {
                    Punctuator::Arrow
                } else if self.match_char('=') {
                    if self.match_char('=') {
                        Punctuator::EqEqEq
                    } else {
                        Punctuator::EqEq
                    }
                } else {
                    Punctuator::Assign
                }
            }

            '+' => {
                if self.match_char('+') {
                    Punctuator::PlusPlus
                } else if self.match_char('=') {
                    Punctuator::PlusEq
                } else {
                    Punctuator::Plus
                }
            }

            '-' => {
                if self.match_char('-') {
                    Punctuator::MinusMinus
                } else if self.match_char('=') {
                    Punctuator::MinusEq
                } else {
                    Punctuator::Minus
                }
            }

            '*' => {
                if self.match_char('*') {
                    if self.match_char('=') {
                        Punctuator::StarStarEq
                    } else {
                        Punctuator::StarStar
                    }
                } else if self.match_char('=') {
                    Punctuator::StarEq
                } else {
                    Punctuator::Star
                }
            }

            '/' => {
                if self.regex_allowed {
                    return self.scan_regexp(start);
                }
                if self.match_char('=') {
                    Punctuator::SlashEq
                } else {
                    Punctuator::Slash
                }
            }

            '%' => {
                if self.match_char('=') {
                    Punctuator::PercentEq
                } else {
                    Punctuator::Percent
                }
            }

            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Punctuator::NotEqEq
                    } else {
                        Punctuator::NotEq
                    }
                } else {
                    Punctuator::Not
                }
            }

            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        Punctuator::LtLtEq
                    } else {
                        Punctuator::LtLt
                    }
                } else if self.match_char('=') {
                    Punctuator::LtEq
                } else {
                    Punctuator::Lt
                }
            }

            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            Punctuator::GtGtGtEq
                        } else {
                            Punctuator::GtGtGt
                        }
                    } else if self.match_char('=') {
                        Punctuator::GtGtEq
                    } else {
                        Punctuator::GtGt
                    }
                } else if self.match_char('=') {
                    Punctuator::GtEq
                } else {
                    Punctuator::Gt
                }
            }

            '&' => {
                if self.match_char('&') {
                    if self.match_char('=') {
                        Punctuator::AndAndEq
                    } else {
                        Punctuator::AndAnd
                    }
                } else if self.match_char('=') {
                    Punctuator::AndEq
                } else {
                    Punctuator::And
                }
            }

            '|' => {
                if self.match_char('|') {
                    if self.match_char('=') {
                        Punctuator::OrOrEq
                    } else {
                        Punctuator::OrOr
                    }
                } else if self.match_char('=') {
                    Punctuator::OrEq
                } else {
                    Punctuator::Or
                }
            }

            '^' => {
                if self.match_char('=') {
                    Punctuator::XorEq
                } else {
                    Punctuator::Xor
                }
            }

            '`' => return self.scan_template_part(start, true),

            '"' | '\'' => return self.scan_string(ch, start),

            _ if ch.is_ascii_digit() => return self.scan_number(ch, start),

            _ if is_id_start(ch) => {
                self.value.push(ch);
                let had_escape = self.scan_identifier_rest()?;
                return Ok(self.identifier_kind(had_escape));
            }

            // Unicode escape sequence starting an identifier: A or \u{41}
            '\\' => {
                let first = self.parse_unicode_escape(start)?;
                if !is_id_start(first) {
                    return Err(self.error_from(ErrorKind::InvalidEscapeSequence, start));
                }
                self.value.push(first);
                self.scan_identifier_rest()?;
                return Ok(SyntaxKind::Identifier);
            }

            '#' => return self.scan_private_name(start),

            _ => {
                return Err(SyntaxError::with_detail(
                    ErrorKind::UnexpectedCharacter,
                    format!("'{}'", ch),
                    SourceLocation::new(start, self.current_position()),
                ));
            }
        };

        Ok(SyntaxKind::Punctuator(punct))
    }

    fn identifier_kind(&self, had_escape: bool) -> SyntaxKind {
        // Escaped keywords are identifiers
        if had_escape {
            return SyntaxKind::Identifier;
        }
        match Keyword::from_word(&self.value) {
            Some(keyword) => SyntaxKind::Keyword(keyword),
            None => SyntaxKind::Identifier,
        }
    }

    /// Scan identifier characters after the first one into `value`.
    /// Returns true if any unicode escape was used.
    fn scan_identifier_rest(&mut self) -> SyntaxResult<bool> {
        let mut had_escape = false;
        while !self.is_at_end() {
            let ch = self.peek();
            if ch == '\\' {
                let escape_start = self.current_position();
                self.advance();
                let decoded = self.parse_unicode_escape(escape_start)?;
                if !is_id_continue(decoded) {
                    return Err(self.error_from(ErrorKind::InvalidEscapeSequence, escape_start));
                }
                had_escape = true;
                self.value.push(decoded);
            } else if is_id_continue(ch) {
                let c = self.advance();
                self.value.push(c);
            } else {
                break;
            }
        }
        Ok(had_escape)
    }

    /// Scan a private name (#name); the '#' has already been consumed
    fn scan_private_name(&mut self, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        if !self.in_class_body() {
            return Err(self.error_from(ErrorKind::PrivateFieldCanNotUseInObject, start));
        }

        let ch = self.peek();
        if ch == '\\' {
            self.advance();
            let first = self.parse_unicode_escape(start)?;
            if !is_id_start(first) {
                return Err(self.error_from(ErrorKind::InvalidEscapeSequence, start));
            }
            self.value.push(first);
        } else if is_id_start(ch) {
            let c = self.advance();
            self.value.push(c);
        } else {
            return Err(self.error_from(ErrorKind::UnexpectedCharacter, start));
        }
        self.scan_identifier_rest()?;
        Ok(SyntaxKind::PrivateName)
    }

    /// Parse a Unicode escape sequence after the backslash: uXXXX or u{XXXX}
    fn parse_unicode_escape(&mut self, start: SourcePosition) -> SyntaxResult<char> {
        if !self.match_char('u') {
            return Err(self.error_from(ErrorKind::InvalidEscapeSequence, start));
        }

        let code_point = if self.match_char('{') {
            let mut code: u32 = 0;
            let mut digits = 0;
            while !self.is_at_end() && self.peek() != '}' {
                let digit = self
                    .peek()
                    .to_digit(16)
                    .ok_or_else(|| self.error_from(ErrorKind::InvalidEscapeSequence, start))?;
                self.advance();
                code = code.saturating_mul(16).saturating_add(digit);
                digits += 1;
            }
            if digits == 0 || !self.match_char('}') || code > 0x10FFFF {
                return Err(self.error_from(ErrorKind::InvalidEscapeSequence, start));
            }
            code
        } else {
            self.read_hex_digits(4, start)?
        };

        char::from_u32(code_point).ok_or_else(|| self.error_from(ErrorKind::InvalidEscapeSequence, start))
    }

    fn read_hex_digits(&mut self, count: usize, start: SourcePosition) -> SyntaxResult<u32> {
        let mut code = 0;
        for _ in 0..count {
            let digit = match self.peek().to_digit(16) {
                Some(d) if !self.is_at_end() => d,
                _ => return Err(self.error_from(ErrorKind::InvalidEscapeSequence, start)),
            };
            self.advance();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn scan_string(&mut self, quote: char, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        loop {
            if self.is_at_end() {
                return Err(self.error_from(ErrorKind::UnterminatedString, start));
            }
            let ch = self.peek();
            if ch == quote {
                self.advance();
                return Ok(SyntaxKind::StringLiteral);
            }
            match ch {
                '\\' => {
                    self.advance();
                    self.scan_escape(false, start)?;
                }
                '\n' | '\r' => return Err(self.error_from(ErrorKind::UnterminatedString, start)),
                _ => {
                    let c = self.advance();
                    self.value.push(c);
                }
            }
        }
    }

    /// Decode one escape sequence (backslash already consumed) into `value`
    fn scan_escape(&mut self, in_template: bool, start: SourcePosition) -> SyntaxResult<()> {
        if self.is_at_end() {
            let kind = if in_template {
                ErrorKind::UnterminatedTemplate
            } else {
                ErrorKind::UnterminatedString
            };
            return Err(self.error_from(kind, start));
        }

        let escape_start = self.current_position();
        match self.peek() {
            'u' => {
                let ch = self.parse_unicode_escape(escape_start)?;
                self.value.push(ch);
                return Ok(());
            }
            'x' => {
                self.advance();
                let code = self.read_hex_digits(2, escape_start)?;
                // Two hex digits always form a valid scalar value
                self.value.push(char::from_u32(code).unwrap_or_default());
                return Ok(());
            }
            _ => {}
        }

        let escaped = self.advance();
        match escaped {
            'n' => self.value.push('\n'),
            't' => self.value.push('\t'),
            'r' => self.value.push('\r'),
            'b' => self.value.push('\u{0008}'),
            'f' => self.value.push('\u{000C}'),
            'v' => self.value.push('\u{000B}'),
            '0' if !self.peek().is_ascii_digit() || self.is_at_end() => self.value.push('\0'),
            '0'..='7' if !in_template => {
                // Legacy octal escape: up to three octal digits, value below 256
                let mut code = escaped.to_digit(8).unwrap_or_default();
                let max_len = if escaped <= '3' { 3 } else { 2 };
                let mut len = 1;
                while len < max_len {
                    match self.peek().to_digit(8) {
                        Some(d) if !self.is_at_end() => {
                            self.advance();
                            code = code * 8 + d;
                            len += 1;
                        }
                        _ => break,
                    }
                }
                self.value.push(char::from_u32(code).unwrap_or_default());
            }
            '0'..='9' if in_template => {
                return Err(self.error_from(ErrorKind::InvalidEscapeSequence, escape_start));
            }
            // Line continuation
            '\r' => {
                self.match_char('\n');
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => self.value.push(other),
        }
        Ok(())
    }

    /// Scan template characters up to `${` or the closing backtick.
    /// The opening backtick or the closing `}` has already been consumed.
    fn scan_template_part(&mut self, start: SourcePosition, is_head: bool) -> SyntaxResult<SyntaxKind> {
        loop {
            if self.is_at_end() {
                return Err(self.error_from(ErrorKind::UnterminatedTemplate, start));
            }
            match self.peek() {
                '`' => {
                    self.advance();
                    return Ok(if is_head {
                        SyntaxKind::NoSubstitutionTemplate
                    } else {
                        SyntaxKind::TemplateTail
                    });
                }
                '$' if self.peek_next() == Some('{') => {
                    self.advance();
                    self.advance();
                    self.context.push(LexContext::Substitution);
                    return Ok(if is_head {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    });
                }
                '\\' => {
                    self.advance();
                    self.scan_escape(true, start)?;
                }
                '\r' => {
                    // CR and CRLF are cooked as LF
                    self.advance();
                    self.match_char('\n');
                    self.value.push('\n');
                }
                _ => {
                    let ch = self.advance();
                    self.value.push(ch);
                }
            }
        }
    }

    /// Scan a regular expression literal; the opening '/' has been consumed
    fn scan_regexp(&mut self, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        let mut in_class = false;

        loop {
            if self.is_at_end() || is_line_terminator(self.peek()) {
                return Err(self.error_from(ErrorKind::UnterminatedRegex, start));
            }
            let ch = self.advance();
            match ch {
                '\\' => {
                    if self.is_at_end() || is_line_terminator(self.peek()) {
                        return Err(self.error_from(ErrorKind::UnterminatedRegex, start));
                    }
                    self.advance();
                }
                '[' => in_class = true,
                ']' if in_class => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }

        // Flags
        while !self.is_at_end() && is_id_continue(self.peek()) {
            self.advance();
        }

        Ok(SyntaxKind::RegexLiteral)
    }

    fn scan_number(&mut self, first: char, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        self.value.push(first);

        if first == '0' {
            let radix = match self.peek() {
                'x' | 'X' => Some(16),
                'o' | 'O' => Some(8),
                'b' | 'B' => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                let c = self.advance();
                self.value.push(c);
                if self.scan_digits(radix, 0, start)? == 0 {
                    return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
                }
                let kind = if self.match_char('n') {
                    SyntaxKind::BigIntLiteral
                } else {
                    SyntaxKind::NumericLiteral
                };
                return self.finish_number(kind, start);
            }

            if self.peek().is_ascii_digit() {
                // Legacy octal (017) or non-octal decimal with leading zero (089)
                while self.peek().is_ascii_digit() && !self.is_at_end() {
                    let c = self.advance();
                    self.value.push(c);
                }
                if is_legacy_octal(&self.value) {
                    if self.peek() == 'n' || self.peek() == '_' {
                        return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
                    }
                    return self.finish_number(SyntaxKind::NumericLiteral, start);
                }
                if self.peek() == 'n' {
                    return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
                }
            }
        } else {
            self.scan_digits(10, 1, start)?;
        }

        let mut is_integer = true;
        if self.peek() == '.' && !self.is_at_end() {
            is_integer = false;
            let c = self.advance();
            self.value.push(c);
            self.scan_digits(10, 0, start)?;
        }
        if !self.scan_exponent(start)? && is_integer && self.match_char('n') {
            return self.finish_number(SyntaxKind::BigIntLiteral, start);
        }
        self.finish_number(SyntaxKind::NumericLiteral, start)
    }

    /// Scan a number that starts with a decimal point: .5, .123, .1e5, etc.
    fn scan_leading_decimal_number(&mut self, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        self.value.push_str("0.");
        self.scan_digits(10, 0, start)?;
        self.scan_exponent(start)?;
        self.finish_number(SyntaxKind::NumericLiteral, start)
    }

    /// Scan an optional exponent part; returns true if one was present
    fn scan_exponent(&mut self, start: SourcePosition) -> SyntaxResult<bool> {
        if self.is_at_end() || !matches!(self.peek(), 'e' | 'E') {
            return Ok(false);
        }
        let c = self.advance();
        self.value.push(c);
        if matches!(self.peek(), '+' | '-') && !self.is_at_end() {
            let c = self.advance();
            self.value.push(c);
        }
        if self.scan_digits(10, 0, start)? == 0 {
            return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
        }
        Ok(true)
    }

    /// Scan digits of `radix` with numeric separators into `value`.
    /// `seen` is the number of digits already consumed.
    fn scan_digits(&mut self, radix: u32, seen: usize, start: SourcePosition) -> SyntaxResult<usize> {
        let mut count = seen;
        let mut last_was_separator = false;
        while !self.is_at_end() {
            let ch = self.peek();
            if ch.is_digit(radix) {
                let c = self.advance();
                self.value.push(c);
                count += 1;
                last_was_separator = false;
            } else if ch == '_' {
                if count == 0 || last_was_separator {
                    return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
                }
                self.advance();
                last_was_separator = true;
            } else {
                break;
            }
        }
        if last_was_separator {
            return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
        }
        Ok(count - seen)
    }

    /// A numeric literal must not run straight into an identifier or digit
    fn finish_number(&mut self, kind: SyntaxKind, start: SourcePosition) -> SyntaxResult<SyntaxKind> {
        let next = self.peek();
        if !self.is_at_end() && (is_id_start(next) || next.is_ascii_digit() || next == '\\') {
            self.advance();
            return Err(self.error_from(ErrorKind::InvalidNumericLiteral, start));
        }
        Ok(kind)
    }

    fn skip_whitespace_and_comments(&mut self) -> SyntaxResult<()> {
        while !self.is_at_end() {
            match self.peek() {
                // ECMAScript WhiteSpace: TAB, VT, FF, SP, NBSP, ZWNBSP (BOM), and other Zs category
                '\t' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | '\u{FEFF}' => {
                    self.advance();
                }
                c if is_line_terminator(c) || c.is_whitespace() => {
                    self.advance();
                }
                '/' => match self.peek_next() {
                    Some('/') => {
                        while !self.is_at_end() && !is_line_terminator(self.peek()) {
                            self.advance();
                        }
                    }
                    Some('*') => {
                        let comment_start = self.current_position();
                        self.advance();
                        self.advance();
                        let mut found_end = false;
                        while !self.is_at_end() {
                            if self.peek() == '*' && self.peek_next() == Some('/') {
                                self.advance();
                                self.advance();
                                found_end = true;
                                break;
                            }
                            self.advance();
                        }
                        if !found_end {
                            return Err(self.error_from(ErrorKind::UnterminatedComment, comment_start));
                        }
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars.get(self.position).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    /// Consume one character, keeping row/col in sync.
    /// CRLF counts as a single line terminator.
    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        let ends_line = match ch {
            '\r' => self.peek() != '\n' || self.is_at_end(),
            c => is_line_terminator(c),
        };
        if ends_line {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.position] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn error_from(&self, kind: ErrorKind, start: SourcePosition) -> SyntaxError {
        SyntaxError::new(kind, SourceLocation::new(start, self.current_position()))
    }
}

/// Tokenize a complete source string, excluding the final `Eof` token
pub fn tokenize(source: &str) -> SyntaxResult<Vec<Token>> {
    let _span = tracing::debug_span!("tokenize", len = source.len()).entered();
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == SyntaxKind::Eof {
            break;
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Numeric value of a literal as reported by [`Lexer::source_value`].
///
/// Handles `0x`/`0o`/`0b` prefixes and legacy octal; other input is parsed as
/// a decimal float.
pub fn parse_numeric_value(text: &str) -> Option<f64> {
    let prefix = text.get(..2).map(|p| p.to_ascii_lowercase());
    match prefix.as_deref() {
        Some("0x") => radix_value(&text[2..], 16),
        Some("0o") => radix_value(&text[2..], 8),
        Some("0b") => radix_value(&text[2..], 2),
        _ if is_legacy_octal(text) => radix_value(&text[1..], 8),
        _ => text.parse().ok(),
    }
}

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

fn is_legacy_octal(text: &str) -> bool {
    text.len() > 1 && text.starts_with('0') && text.chars().all(|c| ('0'..='7').contains(&c))
}

/// Raw text of a template token without its delimiters
pub fn template_raw_text(kind: SyntaxKind, raw: &str) -> &str {
    let (prefix, suffix) = match kind {
        SyntaxKind::NoSubstitutionTemplate | SyntaxKind::TemplateTail => (1, 1),
        SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle => (1, 2),
        _ => (0, 0),
    };
    raw.get(prefix..raw.len().saturating_sub(suffix)).unwrap_or("")
}

fn has_decoded_value(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::Keyword(_)
            | SyntaxKind::PrivateName
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplate
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail
    )
}

/// Check if character is a line terminator (per ECMAScript spec)
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_id_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_id_continue(ch: char) -> bool {
    is_id_start(ch) || ch.is_alphanumeric() || ch == '\u{200C}' || ch == '\u{200D}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn single(source: &str) -> (Token, String) {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token().unwrap();
        (token, lexer.source_value().to_string())
    }

    #[test]
    fn test_lexer_empty_source() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().unwrap().kind, SyntaxKind::Eof);
    }

    #[test]
    fn test_lexer_eof_is_stable() {
        let mut lexer = Lexer::new("a");
        lexer.next_token().unwrap();
        let first = lexer.next_token().unwrap();
        let second = lexer.next_token().unwrap();
        assert_eq!(first.kind, SyntaxKind::Eof);
        assert_eq!(first, second);
    }

    #[test]
    fn test_lexer_identifier_and_location() {
        let (token, value) = single("  foo");
        assert_eq!(token.kind, SyntaxKind::Identifier);
        assert_eq!(value, "foo");
        assert_eq!(token.location.start, SourcePosition::new(0, 2, 2));
        assert_eq!(token.location.end, SourcePosition::new(0, 5, 5));
    }

    #[test]
    fn test_lexer_keywords_and_contextual_words() {
        assert_eq!(
            kinds("const let async"),
            vec![
                SyntaxKind::Keyword(Keyword::Const),
                SyntaxKind::Identifier,
                SyntaxKind::Identifier
            ]
        );
    }

    #[test]
    fn test_lexer_escaped_keyword_is_identifier() {
        let (token, value) = single("\\u0063onst");
        assert_eq!(token.kind, SyntaxKind::Identifier);
        assert_eq!(value, "const");
    }

    #[test]
    fn test_lexer_string_escapes_are_decoded() {
        let (token, value) = single(r#""a\n\x41\u{42}C""#);
        assert_eq!(token.kind, SyntaxKind::StringLiteral);
        assert_eq!(token.raw_value, r#""a\n\x41\u{42}C""#);
        assert_eq!(value, "a\nABC");
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = Lexer::new("'abc").next_token().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        let err = Lexer::new("'abc\n'").next_token().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_lexer_numbers() {
        for (source, expected) in [
            ("123.45", 123.45),
            ("1_000", 1000.0),
            ("0x1f", 31.0),
            ("0b101", 5.0),
            ("0o17", 15.0),
            ("017", 15.0),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("2.5E-1", 0.25),
            ("1.", 1.0),
        ] {
            let (token, value) = single(source);
            assert_eq!(token.kind, SyntaxKind::NumericLiteral, "{}", source);
            assert_eq!(parse_numeric_value(&value), Some(expected), "{}", source);
        }
    }

    #[test]
    fn test_lexer_bigint() {
        let (token, value) = single("0x1fn");
        assert_eq!(token.kind, SyntaxKind::BigIntLiteral);
        assert_eq!(value, "0x1f");
        let (token, value) = single("123n");
        assert_eq!(token.kind, SyntaxKind::BigIntLiteral);
        assert_eq!(value, "123");
    }

    #[test]
    fn test_lexer_malformed_numbers() {
        for source in ["0x", "1__0", "1_", "3in", "1.5n", "1e", "017n", "0b12"] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidNumericLiteral, "{}", source);
        }
    }

    #[test]
    fn test_lexer_optional_chain_vs_conditional_number() {
        assert_eq!(
            kinds("a?.b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Punctuator(Punctuator::OptionalChain),
                SyntaxKind::Identifier
            ]
        );
        assert_eq!(
            kinds("a?.5:1"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Punctuator(Punctuator::Question),
                SyntaxKind::NumericLiteral,
                SyntaxKind::Punctuator(Punctuator::Colon),
                SyntaxKind::NumericLiteral
            ]
        );
    }

    #[test]
    fn test_lexer_regex_vs_division() {
        assert_eq!(
            kinds("a / b / c"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Punctuator(Punctuator::Slash),
                SyntaxKind::Identifier,
                SyntaxKind::Punctuator(Punctuator::Slash),
                SyntaxKind::Identifier
            ]
        );
        assert_eq!(
            kinds("x = /[/]a\\/b/gi"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Punctuator(Punctuator::Assign),
                SyntaxKind::RegexLiteral
            ]
        );
        assert_eq!(
            kinds("(1) / 2"),
            vec![
                SyntaxKind::Punctuator(Punctuator::LParen),
                SyntaxKind::NumericLiteral,
                SyntaxKind::Punctuator(Punctuator::RParen),
                SyntaxKind::Punctuator(Punctuator::Slash),
                SyntaxKind::NumericLiteral
            ]
        );
    }

    #[test]
    fn test_lexer_unterminated_regex() {
        let err = tokenize("x = /abc\n/").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedRegex);
    }

    #[test]
    fn test_lexer_template_with_substitutions() {
        let tokens = tokenize("`a${b}c${ {d} }e`").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TemplateHead,
                SyntaxKind::Identifier,
                SyntaxKind::TemplateMiddle,
                SyntaxKind::Punctuator(Punctuator::LBrace),
                SyntaxKind::Identifier,
                SyntaxKind::Punctuator(Punctuator::RBrace),
                SyntaxKind::TemplateTail
            ]
        );
        assert_eq!(template_raw_text(tokens[2].kind, &tokens[2].raw_value), "c");
        assert_eq!(template_raw_text(tokens[6].kind, &tokens[6].raw_value), "e");
    }

    #[test]
    fn test_lexer_template_cooked_value() {
        let (token, value) = single("`x\\ty`");
        assert_eq!(token.kind, SyntaxKind::NoSubstitutionTemplate);
        assert_eq!(value, "x\ty");
    }

    #[test]
    fn test_lexer_unterminated_template() {
        let err = tokenize("`abc${x}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedTemplate);
    }

    #[test]
    fn test_lexer_private_name_requires_class_body() {
        let err = tokenize("#x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::PrivateFieldCanNotUseInObject);

        let mut lexer = Lexer::new("{ #x } #y");
        lexer.next_token().unwrap();
        lexer.enter_class_body();
        let private = lexer.next_token().unwrap();
        assert_eq!(private.kind, SyntaxKind::PrivateName);
        assert_eq!(lexer.source_value(), "x");
        lexer.next_token().unwrap();
        assert!(!lexer.in_class_body());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_lexer_newline_tracking() {
        let tokens = tokenize("a\nb /* c\n */ d // e\nf").unwrap();
        let flags: Vec<_> = tokens.iter().map(|t| t.newline_before).collect();
        assert_eq!(flags, vec![false, true, true, true]);
        assert_eq!(tokens[3].location.start.row, 3);
    }

    #[test]
    fn test_lexer_crlf_counts_once() {
        let tokens = tokenize("a\r\nb").unwrap();
        assert_eq!(tokens[1].location.start, SourcePosition::new(1, 0, 3));
    }

    #[test]
    fn test_lexer_unterminated_comment() {
        let err = tokenize("a /* b").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_lexer_hashbang_is_skipped() {
        assert_eq!(kinds("#!/usr/bin/env node\nx"), vec![SyntaxKind::Identifier]);
    }

    #[test]
    fn test_lexer_checkpoint_restore() {
        let mut lexer = Lexer::new("a b c");
        lexer.next_token().unwrap();
        let checkpoint = lexer.checkpoint();
        let b = lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.restore(checkpoint);
        assert_eq!(lexer.next_token().unwrap(), b);
        assert_eq!(lexer.source_value(), "b");
    }

    #[test]
    fn test_lexer_rescan_as_regex() {
        let mut lexer = Lexer::new("if (x) /a\\//g.test(y)");
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        let slash = lexer.next_token().unwrap();
        assert_eq!(slash.kind, SyntaxKind::Punctuator(Punctuator::Slash));

        let regex = lexer.rescan_as_regex(slash.location.start, slash.newline_before).unwrap();
        assert_eq!(regex.kind, SyntaxKind::RegexLiteral);
        assert_eq!(regex.raw_value, "/a\\//g");
        assert_eq!(regex.location.start.index, 7);
        assert_eq!(lexer.source_value(), "/a\\//g");

        // A regex produces a value, so the next `/` would divide
        let dot = lexer.next_token().unwrap();
        assert_eq!(dot.kind, SyntaxKind::Punctuator(Punctuator::Dot));
    }

    #[test]
    fn test_lexer_unexpected_character() {
        let err = tokenize("a @ b").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
        assert_eq!(err.location.start.index, 2);
    }
}
