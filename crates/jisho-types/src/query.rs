/// Text in the search box plus where the caret sits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
    cursor: usize,
}

impl Query {
    /// Build a query; the caret defaults to the end and is clamped to the text
    pub fn new(text: impl Into<String>, cursor_hint: Option<usize>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let cursor = cursor_hint.map_or(len, |hint| hint.min(len));

        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret offset in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Character count with leading and trailing whitespace trimmed
    pub fn significant_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}
