//! Actor model: message-passing concurrency for the terminal front end.
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │     App      │
//!                                      │ (Calculator) │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀─────────────────  │              │
//! └──────────────┘                     └──────────────┘
//! ```
//!
//! The calculator state lives only on the app thread. The other two
//! threads see key events and finished frames, nothing else.

mod input;
mod messages;
mod renderer;
mod screen;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand};
pub use renderer::{run_loop, RenderStats, Renderer, RendererActor};
pub use screen::Screen;
