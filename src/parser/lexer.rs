/*!
# Generic Tokenizer

Language-agnostic token stream used as the structural fingerprint for
languages without a grammar. Emits maximal word runs and single structural
punctuation characters; everything else (whitespace, operators, quotes) is
dropped.
*/

use logos::Logos;
use serde::{Deserialize, Serialize};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[regex(r"\w+")]
    Word,

    #[regex(r"[{}()\[\];,.]")]
    Punctuation,
}

/// Token with its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

/// Stateless word/punctuation lexer
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericLexer;

impl GenericLexer {
    pub fn new() -> Self {
        Self
    }

    pub fn lex(&self, input: &str) -> Vec<Token> {
        let mut lexer = TokenKind::lexer(input);
        let mut tokens = Vec::new();

        while let Some(result) = lexer.next() {
            // unmatched input is not part of the stream
            if let Ok(kind) = result {
                tokens.push(Token {
                    kind,
                    value: lexer.slice().to_string(),
                });
            }
        }

        tokens
    }
}

/// Splits code into word runs and structural punctuation
pub fn tokenize(code: &str) -> Vec<String> {
    GenericLexer::new()
        .lex(code)
        .into_iter()
        .map(|token| token.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_words_and_punctuation() {
        let tokens = tokenize("int main() { return a.b[0]; }");
        assert_eq!(
            tokens,
            vec!["int", "main", "(", ")", "{", "return", "a", ".", "b", "[", "0", "]", ";", "}"]
        );
    }

    #[test]
    fn test_operators_and_quotes_are_dropped() {
        let tokens = tokenize("x = \"hi\" + y * 2, z");
        assert_eq!(tokens, vec!["x", "hi", "y", "2", ",", "z"]);
    }

    #[test]
    fn test_unicode_words() {
        let tokens = tokenize("résumé_1 := naïve;");
        assert_eq!(tokens, vec!["résumé_1", "naïve", ";"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t+-*").is_empty());
    }

    #[test]
    fn test_token_kinds() {
        let tokens = GenericLexer::new().lex("f(x)");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Punctuation,
                TokenKind::Word,
                TokenKind::Punctuation
            ]
        );
    }
}
