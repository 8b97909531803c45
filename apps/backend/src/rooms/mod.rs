//! Room ownership: per-room state container, mutation guard, and registry.

pub mod registry;
pub mod room;
