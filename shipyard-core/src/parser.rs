//! Indentation-aware tree parser for game data text.
//!
//! Every non-blank, non-comment line becomes a [`ParseNode`]. A line nests
//! beneath the closest preceding line with a shallower indent. The parser is a
//! single pass over an explicit stack of open ancestors, so nesting depth never
//! grows the call stack.

use thiserror::Error;

use crate::node::ParseNode;

/// How leading whitespace maps onto nesting levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConvention {
    /// Columns contributed by one leading tab. Spaces always count one.
    pub tab_width: usize,
    /// Columns that make up one nesting level.
    pub level_width: usize,
}

impl Default for IndentConvention {
    fn default() -> Self {
        Self {
            tab_width: 1,
            level_width: 1,
        }
    }
}

impl IndentConvention {
    /// Measure the indentation of `line` in columns.
    #[must_use]
    pub fn measure(&self, line: &str) -> usize {
        line.chars()
            .map_while(|ch| match ch {
                '\t' => Some(self.tab_width),
                ' ' => Some(1),
                _ => None,
            })
            .sum()
    }
}

/// Options controlling how source text is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Lines whose first non-blank text starts with this marker are skipped.
    pub comment_marker: String,
    /// Indentation convention used to measure nesting.
    pub indent: IndentConvention,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            comment_marker: "#".to_owned(),
            indent: IndentConvention::default(),
        }
    }
}

impl ParserOptions {
    fn is_comment(&self, body: &str) -> bool {
        !self.comment_marker.is_empty() && body.starts_with(self.comment_marker.as_str())
    }
}

/// Errors raised while building the node forest.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A line jumped more than one level deeper than its enclosing line.
    #[error(
        "malformed indentation on line {line}: {indent} columns where at most {allowed} are allowed"
    )]
    MalformedIndentation {
        /// 1-based line number of the offending line.
        line: usize,
        /// Measured indentation of the offending line.
        indent: usize,
        /// Deepest indentation the enclosing line permits.
        allowed: usize,
    },
}

struct OpenNode {
    node: ParseNode,
    indent: usize,
}

/// Parse `text` with the default [`ParserOptions`].
///
/// # Examples
///
/// ```
/// use shipyard_core::parse;
///
/// # fn main() -> Result<(), shipyard_core::ParseError> {
/// let forest = parse("ship Test Ship\n\tmass 100")?;
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].value.as_deref(), Some("Test Ship"));
/// assert_eq!(forest[0].children[0].key, "mass");
/// # Ok(())
/// # }
/// ```
pub fn parse(text: &str) -> Result<Vec<ParseNode>, ParseError> {
    parse_with(text, &ParserOptions::default())
}

/// Parse `text` into an ordered forest of nodes.
///
/// # Errors
/// Returns [`ParseError::MalformedIndentation`] when a line is indented more
/// than one level beyond the line it would nest under.
pub fn parse_with(text: &str, options: &ParserOptions) -> Result<Vec<ParseNode>, ParseError> {
    let mut roots = Vec::new();
    let mut open: Vec<OpenNode> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let body = line.trim_start();
        if body.is_empty() || options.is_comment(body) {
            continue;
        }

        let indent = options.indent.measure(line);
        while open.last().is_some_and(|top| top.indent >= indent) {
            close_top(&mut open, &mut roots);
        }
        if let Some(parent) = open.last() {
            let allowed = parent.indent + options.indent.level_width;
            if indent > allowed {
                return Err(ParseError::MalformedIndentation {
                    line: index + 1,
                    indent,
                    allowed,
                });
            }
        }

        let mut tokens = split_tokens(body).into_iter();
        let Some((key, _)) = tokens.next() else {
            continue;
        };
        let (values, quoting): (Vec<String>, Vec<bool>) = tokens.unzip();
        let quoted = quoting.contains(&true);
        open.push(OpenNode {
            node: ParseNode::from_line(key, values, quoted, index + 1),
            indent,
        });
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }
    Ok(roots)
}

fn close_top(open: &mut Vec<OpenNode>, roots: &mut Vec<ParseNode>) {
    let Some(closed) = open.pop() else {
        return;
    };
    match open.last_mut() {
        Some(parent) => parent.node.children.push(closed.node),
        None => roots.push(closed.node),
    }
}

/// Split a line body into tokens.
///
/// Whitespace separates tokens; a span opened by `"` or `` ` `` runs to the
/// matching quote (or the end of the line) and forms a single token.
///
/// # Examples
///
/// ```
/// use shipyard_core::tokenize;
///
/// assert_eq!(
///     tokenize(r#"gun -10 20 "Heavy Laser""#),
///     vec!["gun", "-10", "20", "Heavy Laser"]
/// );
/// ```
#[must_use]
pub fn tokenize(body: &str) -> Vec<String> {
    split_tokens(body)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Tokens of `body`, each flagged with whether it was a quoted span.
fn split_tokens(body: &str) -> Vec<(String, bool)> {
    let mut tokens = Vec::new();
    let mut chars = body.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        let quoted = ch == '"' || ch == '`';
        if quoted {
            chars.next();
            for inner in chars.by_ref() {
                if inner == ch {
                    break;
                }
                token.push(inner);
            }
        } else {
            while let Some(&inner) = chars.peek() {
                if inner.is_whitespace() {
                    break;
                }
                token.push(inner);
                chars.next();
            }
        }
        tokens.push((token, quoted));
    }
    tokens
}
