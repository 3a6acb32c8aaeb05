//! Ridge Runtime - Frame loop infrastructure
//!
//! Provides the per-frame building blocks the viewer loop polls:
//! - `FrameClock` - frame delta time and FPS sampling
//! - `InputState` - keyboard state, action bindings, and pointer deltas

mod clock;
mod input;

pub use clock::FrameClock;
pub use input::InputState;
