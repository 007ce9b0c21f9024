//! Data models for Equipos

pub mod component;
pub mod enums;
pub mod equipment;
pub mod problem;

// Re-export commonly used types
pub use component::{Component, ComponentAssignment, EquipmentComponent};
pub use enums::{EquipmentStatus, StatusEvent};
pub use equipment::{Equipment, EquipmentDetail, EquipmentSummary};
pub use problem::{Problem, ProblemListing, Resolution};
