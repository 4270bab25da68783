//! UI layer: app shell, panels and theme primitives.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::FulfillmentApp;
