//! Create/edit form: four labeled fields, one focus cursor, validation.
//!
//! Text editing inside a field goes through the [`TextField`] trait so the
//! form only decides *which* field receives input, never how characters
//! are inserted. [`InputField`] implements it on top of `tui_input`.

use tui_input::{Input, InputRequest};

use crate::error::ValidationError;
use crate::types::{DEFAULT_PORT, TargetRecord};

use super::targets::Direction;

/// Number of fields in the form.
pub const FIELD_COUNT: usize = 4;

/// Maximum characters accepted by a single field.
pub const CHAR_LIMIT: usize = 156;

// ============================================================================
// FIELDS
// ============================================================================

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    User,
    Host,
    Port,
    Nickname,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [Field::User, Field::Host, Field::Port, Field::Nickname];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::User => "Username",
            Field::Host => "Host",
            Field::Port => "Port",
            Field::Nickname => "Nickname",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::User => "Username",
            Field::Host => "Host",
            Field::Port => "Port (default 22)",
            Field::Nickname => "Nickname (optional)",
        }
    }
}

/// A field-local editing request, decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    DeleteWord,
    Clear,
}

/// Minimal capability a single-line text widget must offer the form.
pub trait TextField {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: &str);
    fn placeholder(&self) -> &str;
    fn focus(&mut self);
    fn blur(&mut self);
    fn is_focused(&self) -> bool;
    /// Apply an edit. Returns true if the value or cursor changed.
    fn handle_edit(&mut self, edit: TextEdit) -> bool;
    /// Cursor position in display columns.
    fn cursor(&self) -> usize;

    fn clear(&mut self) {
        self.set_value("");
    }
}

/// [`TextField`] backed by `tui_input::Input`.
#[derive(Debug, Clone)]
pub struct InputField {
    input: Input,
    placeholder: String,
    focused: bool,
}

impl InputField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        InputField {
            input: Input::default(),
            placeholder: placeholder.into(),
            focused: false,
        }
    }

    fn request_for(edit: TextEdit) -> InputRequest {
        match edit {
            TextEdit::Insert(c) => InputRequest::InsertChar(c),
            TextEdit::Backspace => InputRequest::DeletePrevChar,
            TextEdit::Delete => InputRequest::DeleteNextChar,
            TextEdit::Left => InputRequest::GoToPrevChar,
            TextEdit::Right => InputRequest::GoToNextChar,
            TextEdit::Home => InputRequest::GoToStart,
            TextEdit::End => InputRequest::GoToEnd,
            TextEdit::DeleteWord => InputRequest::DeletePrevWord,
            TextEdit::Clear => InputRequest::DeleteLine,
        }
    }
}

impl TextField for InputField {
    fn value(&self) -> &str {
        self.input.value()
    }

    fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn handle_edit(&mut self, edit: TextEdit) -> bool {
        if matches!(edit, TextEdit::Insert(_)) && self.input.value().chars().count() >= CHAR_LIMIT {
            return false;
        }
        self.input.handle(Self::request_for(edit)).is_some()
    }

    fn cursor(&self) -> usize {
        self.input.visual_cursor()
    }
}

// ============================================================================
// FORM
// ============================================================================

/// The four-field target form.
///
/// Optionally bound to an edit index: `Some(i)` edits the record at `i`,
/// `None` creates a new one.
#[derive(Debug)]
pub struct FormEditor<F = InputField> {
    fields: [F; FIELD_COUNT],
    focus: usize,
    edit_index: Option<usize>,
}

impl FormEditor<InputField> {
    pub fn new() -> Self {
        Self::with_fields(Field::ALL.map(|f| InputField::new(f.placeholder())))
    }
}

impl Default for FormEditor<InputField> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TextField> FormEditor<F> {
    /// Build a form from concrete widgets, in [`Field::ALL`] order.
    pub fn with_fields(mut fields: [F; FIELD_COUNT]) -> Self {
        for field in fields.iter_mut() {
            field.blur();
        }
        fields[0].focus();
        FormEditor {
            fields,
            focus: 0,
            edit_index: None,
        }
    }

    pub fn field(&self, field: Field) -> &F {
        &self.fields[field.index()]
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn is_last_field_focused(&self) -> bool {
        self.focus == FIELD_COUNT - 1
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn bind_edit_index(&mut self, index: usize) {
        self.edit_index = Some(index);
    }

    /// Move focus to `index`. Out-of-range indices are ignored.
    pub fn focus(&mut self, index: usize) {
        if index >= FIELD_COUNT {
            return;
        }
        self.fields[self.focus].blur();
        self.focus = index;
        self.fields[self.focus].focus();
    }

    /// Step focus by one, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) {
        let next = match direction {
            Direction::Forward => (self.focus + 1) % FIELD_COUNT,
            Direction::Backward => (self.focus + FIELD_COUNT - 1) % FIELD_COUNT,
        };
        self.focus(next);
    }

    /// Fill every field from `target`. A default port shows as empty.
    pub fn set_from_record(&mut self, target: &TargetRecord) {
        let port = if target.port == DEFAULT_PORT {
            String::new()
        } else {
            target.port.to_string()
        };

        self.fields[Field::User.index()].set_value(&target.user);
        self.fields[Field::Host.index()].set_value(&target.host);
        self.fields[Field::Port.index()].set_value(&port);
        self.fields[Field::Nickname.index()].set_value(target.nickname.as_deref().unwrap_or(""));
        self.focus(0);
    }

    /// Clear values, focus the first field and drop any edit binding.
    /// Placeholders are kept.
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.clear();
        }
        self.focus(0);
        self.edit_index = None;
    }

    /// Forward a field-local edit to the focused field.
    pub fn handle_edit(&mut self, edit: TextEdit) -> bool {
        self.fields[self.focus].handle_edit(edit)
    }

    /// Validate the trimmed field values into a target.
    pub fn parse(&self) -> Result<TargetRecord, ValidationError> {
        let value = |field: Field| self.fields[field.index()].value().trim();

        let user = value(Field::User);
        let host = value(Field::Host);
        if user.is_empty() || host.is_empty() {
            return Err(ValidationError::MissingUserOrHost);
        }

        let port_text = value(Field::Port);
        let port = if port_text.is_empty() {
            DEFAULT_PORT
        } else {
            match port_text.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ValidationError::InvalidPort(port_text.to_string())),
            }
        };

        Ok(TargetRecord::new(user, host, port).with_nickname(value(Field::Nickname)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
