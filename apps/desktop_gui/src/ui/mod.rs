//! UI layer for the desktop GUI: the form window and its response area.

pub mod app;

pub use app::TriageApp;
