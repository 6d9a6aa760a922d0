/*!
# Parsers

Front-ends used by structural extraction and quality analysis:

- **Generic lexer** (logos) - word/punctuation token stream for any language
- **Python** (tree-sitter) - full syntax tree with strict error detection
*/

pub mod lexer;
pub mod python;

pub use lexer::{tokenize, GenericLexer, Token, TokenKind};
pub use python::{parse_python, walk_preorder, PythonModule};
