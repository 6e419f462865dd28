//! TUI module for the interactive connection manager.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: pure data types (ViewState, Action, Transition)
//! - `targets`, `form`, `status`: the components the state is built from
//! - `update`: transitions, with persistence through an injected store
//! - `view`: pure rendering
//! - `run`: effects (terminal, event loop, ssh hand-off)

pub mod form;
pub mod run;
pub mod state;
pub mod status;
pub mod targets;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
