//! Hover-driven displacement transition between two images, rendered with WebGL2.
//!
//! The pure pieces (config, hit-testing, tweening, camera maths) build on any
//! target so they can be tested on the host; the browser glue lives in `wasm`.

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod interaction;
pub mod tween;

pub use config::{AssetPaths, EffectConfig, Variant};
pub use error::EffectError;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, Effect, CONTAINER_ID};
