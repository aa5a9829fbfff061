//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* navigation outputs and turns them into cells
//! on the terminal. It never mutates navigation state.

pub mod grid_widget;
pub mod layout;
pub mod popup;
pub mod theme;
