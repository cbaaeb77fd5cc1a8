pub mod config;
pub mod transition;
pub mod cursor;
pub mod pointer;
pub mod ripple;
pub mod chain;
pub mod frame;
pub mod loader;
pub mod animator;

pub use animator::{Animator, SourceStatus};
pub use config::{AnimatorConfig, ChainConfig, ConfigError, CursorConfig, RippleConfig};
pub use frame::{RenderCommand, RenderFrame, TrailSegment};
pub use pointer::PointerHandle;
pub use transition::{interpolate_sets, TransitionManager};
