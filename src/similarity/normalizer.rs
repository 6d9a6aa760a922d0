/*!
# Code Normalizer

Removes comments, collapses whitespace and lowercases source text so that
formatting and commenting changes do not affect similarity.

For Python, triple-quoted blocks are removed as docstrings. A genuine
triple-quoted string literal is indistinguishable here and is removed as
well; scores across the system depend on this behaviour.
*/

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{CommentStyle, Language};

static HASH_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"#.*").unwrap());
static DOUBLE_QUOTED_DOCSTRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#""""[\s\S]*?""""#).unwrap());
static SINGLE_QUOTED_DOCSTRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"'''[\s\S]*?'''").unwrap());
static SLASH_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").unwrap());
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips comments for `language`, collapses whitespace, trims and lowercases
pub fn normalize(code: &str, language: &Language) -> String {
    let stripped = strip_comments(code, language.comment_style());
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_lowercase()
}

fn strip_comments(code: &str, style: CommentStyle) -> String {
    match style {
        CommentStyle::Hash => {
            let code = HASH_LINE_COMMENT.replace_all(code, "");
            let code = DOUBLE_QUOTED_DOCSTRING.replace_all(&code, "");
            SINGLE_QUOTED_DOCSTRING.replace_all(&code, "").into_owned()
        }
        CommentStyle::CFamily => {
            let code = SLASH_LINE_COMMENT.replace_all(code, "");
            BLOCK_COMMENT.replace_all(&code, "").into_owned()
        }
        CommentStyle::None => code.to_string(),
    }
}
