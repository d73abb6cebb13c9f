//! Presentation of a spin as a turning wheel.
//!
//! The layout and rotation maths are shared by the server, which exposes the layout so clients
//! draw exactly what it computes, and by the [WheelModel] view model.

mod layout;
mod model;
mod rotation;

pub use layout::{MAX_SECTORS, PALETTE, Sector, WheelItem, WheelKind, WheelLayout};
pub use model::{Effect, Event, Phase, SPIN_FAILED_MESSAGE, WheelModel};
pub use rotation::{SpinPlan, plan_spin, target_rotation};

#[cfg(test)]
pub(crate) use layout::test_items;
