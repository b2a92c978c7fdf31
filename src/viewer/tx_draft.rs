/// Outbound command text being typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxDraft {
    text: String,
}

impl TxDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends printable ASCII (`' '..='~'`); anything else is ignored.
    pub fn push(&mut self, c: char) -> bool {
        if matches!(c, ' '..='~') {
            self.text.push(c);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
