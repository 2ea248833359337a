//! Force-directed skill graph: topology, simulation and the Leptos shell.

mod component;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod physics;
mod render;
pub mod rng;
mod scheduler;
pub mod search;
pub mod state;
pub mod types;

pub use component::{SkillDetail, SkillGraph};
pub use error::GraphError;
pub use model::GraphModel;
pub use physics::PhysicsConfig;
pub use types::{CategorySpec, GraphLink, GraphNode, LinkStrength, NodeKind, Point, SkillRecord, Taxonomy};
