//! Reusable widgets for the dashboard

pub mod input;

pub use input::TextInput;
