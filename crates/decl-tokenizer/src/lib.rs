//! Tokenizers for idTech4-style declaration files.
//!
//! All tokenizers run on the same [`Cursor`] abstraction, so they accept
//! borrowed text ([`StrCursor`]) and buffered readers ([`StreamCursor`]) alike,
//! and all are driven through the generic [`TokenStream`].

mod block;
mod cursor;
mod def;
mod def_block;
mod stream;
mod token;

pub use block::{BlockSyntaxTokenizer, BlockTokens};
pub use cursor::{Cursor, EOF_CHAR, StrCursor, StreamCursor};
pub use def::{DefTokenizer, DefTokens, KEPT_DELIMITERS, WHITESPACE};
pub use def_block::{DefBlock, DefBlockTokenizer, DefBlockTokens};
pub use stream::{TokenError, TokenFunc, TokenStream};
pub use text_size::{TextRange, TextSize};
pub use token::{Token, TokenKind};
