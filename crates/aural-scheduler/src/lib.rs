//! Per-block scene scheduling: assembling a render-ready [`Scene`] from
//! the data model in `aural-scene`, and driving its two-pass render
//! pipeline each block (spec §4 "Scene scheduling", §4.5 "Ordering
//! guarantees").

pub mod context;
pub mod geometry;
pub mod receiver_slot;
pub mod scene;
pub mod warning;

pub use context::RenderContext;
pub use receiver_slot::ReceiverSlot;
pub use scene::Scene;
pub use warning::SchedulerWarning;
