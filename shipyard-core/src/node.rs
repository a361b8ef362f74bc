//! Parsed lines of the indentation-structured source format.

/// One line of source text together with the lines nested beneath it.
///
/// Siblings may repeat the same key (a ship lists one `gun` line per
/// hardpoint), so children are kept as an ordered list rather than a map.
///
/// # Examples
///
/// ```
/// use shipyard_core::ParseNode;
///
/// let node = ParseNode::new("mass", vec!["100".into()], 2);
/// assert_eq!(node.value.as_deref(), Some("100"));
/// assert!(node.children.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    /// First token on the line.
    pub key: String,
    /// The text after the key as one scalar: the lone token, or the whole
    /// remainder when none of it was quoted (`ship Test Ship` is named
    /// `Test Ship`).
    pub value: Option<String>,
    /// Every token after the key, quoted spans kept whole.
    pub values: Vec<String>,
    /// Lines indented strictly deeper than this one, in file order.
    pub children: Vec<ParseNode>,
    /// 1-based line number in the originating file.
    pub source_line: usize,
}

impl ParseNode {
    /// Build a childless node from already delimited tokens.
    ///
    /// [`ParseNode::value`] is set only when exactly one token is given.
    #[must_use]
    pub fn new(key: impl Into<String>, values: Vec<String>, source_line: usize) -> Self {
        Self::from_line(key, values, true, source_line)
    }

    /// Build a childless node from the tokens of a source line.
    ///
    /// When `quoted` is false and several words follow the key, the words
    /// joined by single spaces also become [`ParseNode::value`].
    pub(crate) fn from_line(
        key: impl Into<String>,
        values: Vec<String>,
        quoted: bool,
        source_line: usize,
    ) -> Self {
        let value = match values.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            words if !quoted => Some(words.join(" ")),
            _ => None,
        };
        Self {
            key: key.into(),
            value,
            values,
            children: Vec::new(),
            source_line,
        }
    }

    /// Depth of the subtree rooted here; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Self, usize)> = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}
