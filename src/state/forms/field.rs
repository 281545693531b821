//! Text input buffers for typed fields

use crate::schema::{FieldKind, FieldSpec};

/// How typed characters are accepted and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    /// Rendered masked
    Secret,
    /// Digits and at most one decimal point
    Numeric,
}

/// Edit buffer of a single typed field
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub buffer: String,
    pub mode: InputMode,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str, is_multiline: bool) -> Self {
        Self {
            name,
            label,
            buffer: String::new(),
            mode: InputMode::Text,
            is_multiline,
        }
    }

    /// Create a masked field
    pub fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            mode: InputMode::Secret,
            ..Self::text(name, label, false)
        }
    }

    /// Create a numeric field
    pub fn numeric(name: &'static str, label: &'static str) -> Self {
        Self {
            mode: InputMode::Numeric,
            ..Self::text(name, label, false)
        }
    }

    /// Build the input for a typed schema field; `None` for selection kinds
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        match spec.kind {
            FieldKind::Text { multiline } => Some(Self::text(spec.name, spec.label, multiline)),
            FieldKind::Secret => Some(Self::secret(spec.name, spec.label)),
            FieldKind::Numeric => Some(Self::numeric(spec.name, spec.label)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.buffer
    }

    /// Push a character; returns false if the input mode rejects it
    pub fn push_char(&mut self, c: char) -> bool {
        let accepted = match self.mode {
            InputMode::Text => self.is_multiline || c != '\n',
            InputMode::Secret => !c.is_control(),
            InputMode::Numeric => c.is_ascii_digit() || (c == '.' && !self.buffer.contains('.')),
        };
        if accepted {
            self.buffer.push(c);
        }
        accepted
    }

    /// Remove the last character; returns false if the buffer was empty
    pub fn pop_char(&mut self) -> bool {
        self.buffer.pop().is_some()
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.mode {
            InputMode::Secret => "•".repeat(self.buffer.chars().count()),
            InputMode::Text | InputMode::Numeric => self.buffer.clone(),
        }
    }
}
