//! A tokenizer-agnostic token stream.
//!
//! [`TokenStream`] owns a cursor and a [`TokenFunc`] and keeps exactly one
//! token in flight. The lenient surface (`is_exhausted`, `current`,
//! `advance`) never fails; the strict one (`next_token`, `peek`,
//! `assert_next_token`, `skip_tokens`) reports [`TokenError`]s for callers
//! that expect a particular shape.

use std::marker::PhantomData;

use thiserror::Error;

use crate::cursor::Cursor;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TokenError {
    #[error("no more tokens")]
    Exhausted,
    #[error("expected `{expected}`, found `{found}`")]
    Mismatch { expected: String, found: String },
    #[error("could not find opening double quote after backslash")]
    UnterminatedContinuation,
}

/// Produces one token per call from a cursor.
pub trait TokenFunc<'a, C: Cursor<'a>> {
    type Token;

    /// Returns `None` once no further non-empty token can be produced.
    fn next_token(&mut self, cursor: &mut C) -> Option<Self::Token>;

    /// A failure that ended the stream early, reported once.
    fn take_error(&mut self) -> Option<TokenError> {
        None
    }
}

pub struct TokenStream<'a, C, F>
where
    C: Cursor<'a>,
    F: TokenFunc<'a, C>,
{
    cursor: C,
    func: F,
    current: Option<F::Token>,
    error: Option<TokenError>,
    _marker: PhantomData<&'a ()>,
}

impl<'a, C, F> TokenStream<'a, C, F>
where
    C: Cursor<'a>,
    F: TokenFunc<'a, C>,
{
    pub fn new(cursor: C, func: F) -> Self {
        let mut stream = Self { cursor, func, current: None, error: None, _marker: PhantomData };
        stream.advance();
        stream
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// The token in flight, `None` once exhausted.
    pub fn current(&self) -> Option<&F::Token> {
        self.current.as_ref()
    }

    pub fn advance(&mut self) {
        self.current = self.func.next_token(&mut self.cursor);
        if self.current.is_none() {
            self.error = self.func.take_error();
        }
    }

    pub fn next_token(&mut self) -> Result<F::Token, TokenError> {
        match self.current.take() {
            Some(token) => {
                self.advance();
                Ok(token)
            }
            None => Err(self.exhausted()),
        }
    }

    pub fn peek(&self) -> Result<&F::Token, TokenError> {
        self.current.as_ref().ok_or_else(|| self.exhausted())
    }

    pub fn skip_tokens(&mut self, n: usize) -> Result<(), TokenError> {
        for _ in 0..n {
            self.next_token()?;
        }
        Ok(())
    }

    pub fn into_cursor(self) -> C {
        self.cursor
    }

    fn exhausted(&self) -> TokenError {
        self.error.clone().unwrap_or(TokenError::Exhausted)
    }
}

impl<'a, C, F> TokenStream<'a, C, F>
where
    C: Cursor<'a>,
    F: TokenFunc<'a, C>,
    F::Token: AsRef<str>,
{
    /// Consumes the next token, failing unless its text is `expected`.
    pub fn assert_next_token(&mut self, expected: &str) -> Result<(), TokenError> {
        let token = self.next_token()?;
        let found = token.as_ref();
        if found == expected {
            Ok(())
        } else {
            Err(TokenError::Mismatch { expected: expected.to_owned(), found: found.to_owned() })
        }
    }
}

impl<'a, C, F> Iterator for TokenStream<'a, C, F>
where
    C: Cursor<'a>,
    F: TokenFunc<'a, C>,
{
    type Item = F::Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().ok()
    }
}
