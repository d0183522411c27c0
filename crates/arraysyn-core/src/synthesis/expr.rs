//! Arithmetic angle expressions such as `pi/2` or `3*pi/4`
//!
//! Grammar (whitespace ignored, case-insensitive `pi`):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-') unary | atom
//! atom   := number | 'pi' | '(' expr ')'
//! ```

use std::f64::consts::PI;

use crate::error::{Result, SynthesisError};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Pi,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            'p' if chars.get(i + 1) == Some(&'i') => {
                tokens.push(Token::Pi);
                i += 2;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // Scientific notation: 1e-3, 2.5E2
                if i < chars.len() && chars[i] == 'e' {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(literal.parse().ok()?));
            }
            _ => return None,
        }
    }

    Some(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.peek();
        self.pos += 1;
        t
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star { value * rhs } else { value / rhs };
        }
        Some(value)
    }

    fn unary(&mut self) -> Option<f64> {
        match self.peek()? {
            Token::Plus => {
                self.pos += 1;
                self.unary()
            }
            Token::Minus => {
                self.pos += 1;
                self.unary().map(|v| -v)
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Option<f64> {
        match self.next()? {
            Token::Number(v) => Some(v),
            Token::Pi => Some(PI),
            Token::LParen => {
                let v = self.expr()?;
                match self.next()? {
                    Token::RParen => Some(v),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Evaluate an angle expression to a finite number
pub fn evaluate(text: &str) -> Result<f64> {
    let invalid = || SynthesisError::InvalidAngleExpression(text.trim().to_string());

    let tokens = tokenize(text).ok_or_else(invalid)?;
    if tokens.is_empty() {
        return Err(invalid());
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr().ok_or_else(invalid)?;
    if parser.pos != parser.tokens.len() || !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}
