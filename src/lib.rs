pub mod components;
pub mod config;
pub mod drag;
pub mod entries;
pub mod error;
pub mod notifications;
pub mod reorder;
pub mod state;
