//! Controller layer: UI events, component state machines, reducer, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod state;
