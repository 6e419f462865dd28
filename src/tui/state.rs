//! TUI state algebra.
//!
//! `App` is the whole interaction state: the active view, the target
//! list, the form and the status line. The transition function in
//! `update` mutates it in response to semantic `Action`s and reports what
//! the effects layer must do next through a `Transition`.

use crossterm::event::KeyEvent;

use crate::error::{LaunchError, StoreError};
use crate::store::ConfigStore;
use crate::types::{Config, TargetRecord, ThemeConfig};

use super::form::{FormEditor, TextEdit};
use super::status::StatusChannel;
use super::targets::TargetList;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can feed into the app.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// The terminal was resized; only a redraw is needed.
    Resize,
    /// The status message stamped with this generation has timed out.
    StatusTimeout(u64),
    /// The external connection returned control to us.
    ConnectionClosed(Result<(), LaunchError>),
}

// ============================================================================
// VIEW STATE
// ============================================================================

/// The active modal context. Decides which keys mean what and what the
/// renderer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    ListTargets,
    CreateTarget,
    EditTarget,
    ConfirmDelete,
}

impl ViewState {
    /// Create and Edit share the form and its key table.
    pub fn is_form(self) -> bool {
        matches!(self, ViewState::CreateTarget | ViewState::EditTarget)
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub view: ViewState,
    pub targets: TargetList,
    pub form: FormEditor,
    pub status: StatusChannel,

    /// Theme table from the config file, written back untouched on save.
    pub theme: ThemeConfig,

    /// Where targets are stored, shown on the empty list screen.
    pub location: String,

    /// An unread config file left by an earlier release.
    pub legacy_location: Option<String>,

    /// Set when the startup load failed. Only quitting is possible then.
    pub load_error: Option<StoreError>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Start on the target list with a loaded config.
    pub fn new(config: Config, location: impl Into<String>) -> Self {
        App {
            view: ViewState::ListTargets,
            targets: TargetList::new(config.targets),
            form: FormEditor::new(),
            status: StatusChannel::default(),
            theme: config.theme,
            location: location.into(),
            legacy_location: None,
            load_error: None,
            should_quit: false,
        }
    }

    /// The permanent error state entered when the config cannot be loaded.
    pub fn failed(error: StoreError, location: impl Into<String>) -> Self {
        App {
            load_error: Some(error),
            ..App::new(Config::default(), location)
        }
    }

    /// Load from `store`, falling into the error state on failure.
    pub fn load(store: &dyn ConfigStore) -> Self {
        match store.load() {
            Ok(config) => App {
                legacy_location: store.legacy_location(),
                ..App::new(config, store.location())
            },
            Err(e) => {
                log::error!("{}", e);
                App::failed(e, store.location())
            }
        }
    }

    /// The document to hand to the store: current list plus the theme
    /// that was loaded.
    pub fn snapshot(&self) -> Config {
        Config {
            targets: self.targets.as_slice().to_vec(),
            theme: self.theme.clone(),
        }
    }

    /// The record shown in the edit view's subtitle.
    pub fn editing(&self) -> Option<&TargetRecord> {
        self.form.edit_index().and_then(|i| self.targets.get(i))
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions according to the
/// current view; the transition function decides what each one means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the list cursor up.
    MoveUp,
    /// Move the list cursor down.
    MoveDown,
    /// Focus the next form field.
    NextField,
    /// Focus the previous form field.
    PrevField,
    /// Connect from the list; next field or finalize in the form.
    Enter,
    /// Open the create form.
    Create,
    /// Open the edit form for the selected target.
    Edit,
    /// Ask to delete the selected target.
    Delete,
    /// Answer yes on the delete prompt.
    Confirm,
    /// Answer no on the delete prompt.
    Deny,
    /// Leave the form without saving.
    Back,
    /// Edit the focused form field.
    Text(TextEdit),
    /// Quit from the list view.
    Quit,
    /// Ctrl+C: quit from anywhere.
    ForceQuit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// What the effects layer must do after an update.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Redraw and wait for the next event.
    Stay,
    /// Quit the application.
    Quit,
    /// Execute a side effect, then resume.
    Effect(Effect),
}

/// Side effect requested by a transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Suspend the TUI, run `ssh` for this target, resume.
    Connect(TargetRecord),
}

// ============================================================================
// TESTS
// ============================================================================
