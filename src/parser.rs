use crate::error::ParseError;
use crate::types::{Rule, Strategy, Term};

/// One line of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `name := head = body`
    Declare(Rule),

    /// `apply name[strategy](expr)`; without an operand the previous result is used
    Apply {
        rule: String,
        strategy: Strategy,
        target: Option<Term>,
    },

    /// A bare expression
    Expr(Term),

    Quit,

    /// Blank or comment-only line
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Op(String),
    Def,
    Equal,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Eof,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_op_char(c: char) -> bool {
    "+-*/^%<>&|!~@$?.".contains(c)
}

fn tokenize(src: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        // comment runs to end of line
        if c == '#' {
            break;
        }

        if is_name_char(c) || is_op_char(c) {
            let pred: fn(char) -> bool = if is_name_char(c) { is_name_char } else { is_op_char };
            let mut end = pos;
            while let Some(&(i, ch)) = chars.peek() {
                if !pred(ch) {
                    break;
                }
                end = i + ch.len_utf8();
                chars.next();
            }
            let text = src[pos..end].to_string();
            let token = if is_name_char(c) {
                Token::Name(text)
            } else {
                Token::Op(text)
            };
            tokens.push((token, pos));
            continue;
        }

        chars.next();
        let token = match c {
            ':' => match chars.peek() {
                Some(&(_, '=')) => {
                    chars.next();
                    Token::Def
                }
                _ => return Err(ParseError::new("expected `:=`", pos)),
            },
            '=' => Token::Equal,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            other => return Err(ParseError::new(format!("unexpected character `{other}`"), pos)),
        };
        tokens.push((token, pos));
    }

    tokens.push((Token::Eof, src.len()));
    Ok(tokens)
}

/// (left, right) binding power of an infix operator.
/// `^` is right associative, everything else associates to the left.
fn binding_power(op: &str) -> (u8, u8) {
    match op {
        "+" | "-" => (3, 4),
        "*" | "/" | "%" => (5, 6),
        "^" => (8, 7),
        _ => (1, 2),
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    index: usize,
}

impl Parser {
    fn new(src: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: tokenize(src)?,
            index: 0,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index].0
    }

    fn peek_at(&self, ahead: usize) -> &Token {
        let i = (self.index + ahead).min(self.tokens.len() - 1);
        &self.tokens[i].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.index].1
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.index].0.clone();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), ParseError> {
        if *self.peek() == expected {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek() {
            Token::Name(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.error(format!("expected {what}"))),
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            Token::Eof => Ok(()),
            _ => Err(self.error("unexpected trailing input")),
        }
    }

    fn error<S: Into<String>>(&self, message: S) -> ParseError {
        ParseError::new(message, self.offset())
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let first = self.peek().clone();
        let second = self.peek_at(1).clone();
        match (&first, &second) {
            (Token::Eof, _) => Ok(Statement::Empty),
            (Token::Name(word), Token::Eof) if word == "quit" => Ok(Statement::Quit),
            (Token::Name(word), Token::Name(_)) if word == "apply" => {
                self.bump();
                self.apply()
            }
            (Token::Name(_), Token::Def) => {
                let name = self.expect_name("a rule name")?;
                self.bump();
                let head = self.expr(0)?;
                self.expect(Token::Equal, "`=` between rule head and body")?;
                let body = self.expr(0)?;
                self.expect_end()?;
                Ok(Statement::Declare(Rule::new(name, head, body)))
            }
            _ => {
                let term = self.expr(0)?;
                self.expect_end()?;
                Ok(Statement::Expr(term))
            }
        }
    }

    fn apply(&mut self) -> Result<Statement, ParseError> {
        let rule = self.expect_name("a rule name after `apply`")?;

        let mut strategy = Strategy::default();
        if *self.peek() == Token::LBracket {
            self.bump();
            let offset = self.offset();
            let name = self.expect_name("a strategy name")?;
            strategy = Strategy::from_name(&name).ok_or_else(|| {
                ParseError::new(
                    format!("unknown strategy `{name}` (expected `first` or `all`)"),
                    offset,
                )
            })?;
            self.expect(Token::RBracket, "`]` after strategy")?;
        }

        let mut target = None;
        if *self.peek() == Token::LParen {
            self.bump();
            target = Some(self.expr(0)?);
            self.expect(Token::RParen, "`)` after apply operand")?;
        }

        self.expect_end()?;
        Ok(Statement::Apply {
            rule,
            strategy,
            target,
        })
    }

    fn expr(&mut self, min_bp: u8) -> Result<Term, ParseError> {
        let mut lhs = self.operand()?;

        loop {
            let op = match self.peek() {
                Token::Op(op) => op.clone(),
                _ => break,
            };
            let (l_bp, r_bp) = binding_power(&op);
            if l_bp < min_bp {
                break;
            }
            self.bump();
            let rhs = self.expr(r_bp)?;
            lhs = Term::operator(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn operand(&mut self) -> Result<Term, ParseError> {
        match self.peek().clone() {
            Token::Name(name) => {
                self.bump();
                if *self.peek() == Token::LParen {
                    self.bump();
                    let args = self.arguments()?;
                    Ok(Term::Function(name, args))
                } else {
                    Ok(Term::Symbol(name))
                }
            }
            Token::LBrace => {
                self.bump();
                let name = self.expect_name("a variable name inside `{}`")?;
                self.expect(Token::RBrace, "`}` after variable name")?;
                Ok(Term::Variable(name))
            }
            Token::LParen => {
                self.bump();
                let inner = self.expr(0)?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.error("expected a term")),
        }
    }

    /// Arguments after an opening `(`, through the closing `)`.
    fn arguments(&mut self) -> Result<Vec<Term>, ParseError> {
        let mut args = Vec::new();
        if *self.peek() == Token::RParen {
            self.bump();
            return Ok(args);
        }

        loop {
            args.push(self.expr(0)?);
            match self.peek() {
                Token::Comma => {
                    self.bump();
                }
                Token::RParen => {
                    self.bump();
                    break;
                }
                _ => return Err(self.error("expected `,` or `)` in argument list")),
            }
        }

        Ok(args)
    }
}

/// Parse one line of source into a statement.
pub fn parse_statement(src: &str) -> Result<Statement, ParseError> {
    Parser::new(src)?.statement()
}

/// Parse a single expression, e.g. `f({x}, a+b)`.
pub fn parse_term(src: &str) -> Result<Term, ParseError> {
    let mut parser = Parser::new(src)?;
    let term = parser.expr(0)?;
    parser.expect_end()?;
    Ok(term)
}
