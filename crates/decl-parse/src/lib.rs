//! Lossless parser for idTech4 decl sources.
//!
//! The parser groups the classified token stream into a [`SyntaxTree`]:
//! trivia stays at the top level and each `type name { ... }` run becomes a
//! decl block. Rendering the tree reproduces the input byte for byte, so the
//! tree is safe to edit and write back.

use std::fmt;
use std::io::{self, BufRead};

use decl_errors::Diagnostic;
use decl_syntax::SyntaxTree;
use decl_tokenizer::{StrCursor, StreamCursor};

mod parser;

/// A parsed decl source together with the warnings raised while parsing.
#[derive(Clone, Debug, Default)]
pub struct Parse<'a> {
    tree: SyntaxTree<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parse<'a> {
    pub fn tree(&self) -> &SyntaxTree<'a> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SyntaxTree<'a> {
        &mut self.tree
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_tree(self) -> SyntaxTree<'a> {
        self.tree
    }

    /// The tree dump followed by the list of diagnostics.
    pub fn debug_tree(&self) -> String {
        DebugParse(self).to_string()
    }
}

struct DebugParse<'p, 'a>(&'p Parse<'a>);

impl fmt::Display for DebugParse<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.tree.debug_tree())?;
        writeln!(f, "Diagnostics:")?;
        for diagnostic in &self.0.diagnostics {
            writeln!(f, "  {diagnostic}")?;
        }
        Ok(())
    }
}

/// Parses `text`, borrowing every token from it.
pub fn parse(text: &str) -> Parse<'_> {
    let (parse, _) = parser::Parser::new(StrCursor::new(text)).parse();
    parse
}

/// Parses a character stream, reading it to the end.
///
/// Read failures (including invalid UTF-8) stop the parse and are returned
/// instead of a partial tree.
pub fn parse_reader(reader: impl BufRead) -> io::Result<Parse<'static>> {
    let (parse, cursor) = parser::Parser::new(StreamCursor::new(reader)).parse();
    cursor.finish()?;
    Ok(parse)
}
