//! Dialog-style editing of a single scalar settings field
//!
//! A controller is either closed or holds one edit session. The session keeps
//! the raw text the user is typing and the closure that knows where a parsed
//! value goes. Keystrokes outside the allowed character class are dropped on
//! entry; text that still fails to parse on confirm is discarded without
//! touching the settings record.

use std::fmt::{self, Debug, Display};

use thiserror::Error;

/// A scalar type that can be edited as text.
pub trait EditableValue: Copy + Debug + Display + 'static {
    /// Whether `c` may appear at `position` of the filtered text.
    fn accepts(c: char, position: usize) -> bool;

    /// Parse filtered text into a value.
    fn parse_text(text: &str) -> Option<Self>;
}

macro_rules! unsigned_editable {
    ($($ty:ty),*) => {
        $(
            impl EditableValue for $ty {
                fn accepts(c: char, _position: usize) -> bool {
                    c.is_ascii_digit()
                }

                fn parse_text(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

unsigned_editable!(u32, u64);

impl EditableValue for i64 {
    fn accepts(c: char, position: usize) -> bool {
        c.is_ascii_digit() || (c == '-' && position == 0)
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

/// Keep only the characters `V` accepts, in order.
pub fn filter_input<V: EditableValue>(raw: &str) -> String {
    let mut filtered = String::with_capacity(raw.len());
    let mut position = 0;
    for c in raw.chars() {
        if V::accepts(c, position) {
            filtered.push(c);
            position += 1;
        }
    }
    filtered
}

/// Why a confirmed edit was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejection {
    /// The buffer was empty at confirm time
    #[error("no value entered")]
    Empty,
    /// The buffer held accepted characters that still do not form a value
    /// (e.g. out of range)
    #[error("'{text}' is not a valid value")]
    Unparsable { text: String },
}

/// Result of [`EditableFieldController::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome<V> {
    /// The value was parsed and handed to the commit closure
    Committed(V),
    /// The edit was closed without committing
    Discarded(EditRejection),
    /// No edit session was open
    NotEditing,
}

impl<V> ConfirmOutcome<V> {
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

struct EditSession<V> {
    label: String,
    initial: V,
    text: String,
    commit: Box<dyn FnOnce(V)>,
}

/// Read-only view of the open session for rendering a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView<'a, V> {
    pub label: &'a str,
    pub initial: V,
    pub text: &'a str,
}

/// Edit lifecycle for one scalar field at a time.
pub struct EditableFieldController<V: EditableValue> {
    session: Option<EditSession<V>>,
}

impl<V: EditableValue> Default for EditableFieldController<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: EditableValue> EditableFieldController<V> {
    pub const fn new() -> Self {
        Self { session: None }
    }

    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<SessionView<'_, V>> {
        self.session.as_ref().map(|session| SessionView {
            label: &session.label,
            initial: session.initial,
            text: &session.text,
        })
    }

    /// Open an edit session seeded with `initial`.
    ///
    /// Returns `false` and leaves the current session untouched when one is
    /// already open.
    pub fn begin_edit(
        &mut self,
        label: impl Into<String>,
        initial: V,
        commit: impl FnOnce(V) + 'static,
    ) -> bool {
        if let Some(active) = &self.session {
            tracing::debug!(active = %active.label, "edit already in progress; ignoring begin_edit");
            return false;
        }

        let label = label.into();
        tracing::debug!(label = %label, %initial, "edit started");
        self.session = Some(EditSession {
            label,
            initial,
            text: initial.to_string(),
            commit: Box::new(commit),
        });
        true
    }

    /// Replace the buffer with `raw`, dropping characters the field does not
    /// accept. Ignored when no session is open.
    pub fn on_text_changed(&mut self, raw: &str) {
        if let Some(session) = self.session.as_mut() {
            session.text = filter_input::<V>(raw);
        }
    }

    /// Parse the buffer and commit it, then close the session.
    pub fn confirm(&mut self) -> ConfirmOutcome<V> {
        let Some(session) = self.session.take() else {
            return ConfirmOutcome::NotEditing;
        };

        if session.text.is_empty() {
            tracing::debug!(label = %session.label, "edit discarded: empty input");
            return ConfirmOutcome::Discarded(EditRejection::Empty);
        }

        match V::parse_text(&session.text) {
            Some(value) => {
                tracing::debug!(label = %session.label, %value, "edit committed");
                (session.commit)(value);
                ConfirmOutcome::Committed(value)
            }
            None => {
                tracing::debug!(
                    label = %session.label,
                    text = %session.text,
                    "edit discarded: unparsable input"
                );
                ConfirmOutcome::Discarded(EditRejection::Unparsable { text: session.text })
            }
        }
    }

    /// Close the session without committing. Returns `false` if none was open.
    pub fn cancel(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        tracing::debug!(label = %session.label, "edit cancelled");
        true
    }
}

impl<V: EditableValue> fmt::Debug for EditableFieldController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableFieldController")
            .field("session", &self.session())
            .finish()
    }
}
