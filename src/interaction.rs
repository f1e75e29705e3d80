//! Pointer state machine deciding where `uProgress` should head and when
//! texture B must change. Event listeners feed it; it never touches the DOM.

use std::collections::{HashMap, HashSet};

use crate::config::EffectConfig;
use crate::hover::{hit_test, BoxSize, HoverPoint, Point};

/// Progress value showing texture A only.
pub const PROGRESS_HIDDEN: f32 = 0.0;
/// Progress value showing texture B only.
pub const PROGRESS_REVEALED: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    EnterLeave,
    Proximity {
        points: Vec<HoverPoint>,
        radius: f64,
    },
}

/// What a pointer event asks the effect to do.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverUpdate {
    /// New progress target, if the event sets one.
    pub target: Option<f32>,
    /// Hover point whose image should replace texture B.
    pub swap: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverController {
    mode: Mode,
    active: Option<usize>,
}

impl HoverController {
    pub fn new(config: &EffectConfig) -> Self {
        let mode = if config.variant.uses_proximity() {
            Mode::Proximity {
                points: config.hover_points.clone(),
                radius: config.hit_radius_px,
            }
        } else {
            Mode::EnterLeave
        };
        Self { mode, active: None }
    }

    pub fn tracks_pointer_moves(&self) -> bool {
        matches!(self.mode, Mode::Proximity { .. })
    }

    pub fn active_point(&self) -> Option<usize> {
        self.active
    }

    pub fn point(&self, index: usize) -> Option<&HoverPoint> {
        match &self.mode {
            Mode::Proximity { points, .. } => points.get(index),
            Mode::EnterLeave => None,
        }
    }

    /// Proximity mode waits for the first move instead.
    pub fn pointer_enter(&mut self) -> HoverUpdate {
        match self.mode {
            Mode::EnterLeave => HoverUpdate {
                target: Some(PROGRESS_REVEALED),
                swap: None,
            },
            Mode::Proximity { .. } => HoverUpdate::default(),
        }
    }

    pub fn pointer_leave(&mut self) -> HoverUpdate {
        self.active = None;
        HoverUpdate {
            target: Some(PROGRESS_HIDDEN),
            swap: None,
        }
    }

    /// `pointer` is relative to the container's top-left corner.
    pub fn pointer_move(&mut self, pointer: Point, size: BoxSize) -> HoverUpdate {
        let Mode::Proximity { points, radius } = &self.mode else {
            return HoverUpdate::default();
        };
        let hit = hit_test(points, pointer, size, *radius);
        let swap = match hit {
            Some(i) if self.active != Some(i) => Some(i),
            _ => None,
        };
        self.active = hit;
        let target = match hit {
            Some(_) => PROGRESS_REVEALED,
            None => PROGRESS_HIDDEN,
        };
        HoverUpdate {
            target: Some(target),
            swap,
        }
    }
}

/// Next step for a texture B request.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapRequest<T> {
    /// The image is cached; bind this handle now.
    Bind(T),
    /// Nothing cached or in flight: start a load and report it back with
    /// [`TextureSwap::loaded`] or [`TextureSwap::failed`].
    Load,
    /// A load for the same image is already in flight.
    Wait,
}

/// Outcome of a finished load.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// Set when the image is still the one wanted for texture B.
    pub bind: Option<T>,
    /// A handle previously cached under the same path, now owned by the caller.
    pub replaced: Option<T>,
}

/// Bookkeeping for hover-point textures: a cache by image path, the loads in
/// flight, and the image most recently asked for.
///
/// Each path is fetched at most once while it is cached or pending, and a load
/// that lands after a newer request is cached without being bound.
#[derive(Debug, Clone)]
pub struct TextureSwap<T> {
    cache: HashMap<String, T>,
    pending: HashSet<String>,
    wanted: Option<String>,
}

impl<T> Default for TextureSwap<T> {
    fn default() -> Self {
        Self {
            cache: HashMap::new(),
            pending: HashSet::new(),
            wanted: None,
        }
    }
}

impl<T: Clone> TextureSwap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as the wanted texture B and says how to get it there.
    pub fn request(&mut self, path: &str) -> SwapRequest<T> {
        self.wanted = Some(path.to_owned());
        if let Some(texture) = self.cache.get(path) {
            return SwapRequest::Bind(texture.clone());
        }
        if self.pending.insert(path.to_owned()) {
            SwapRequest::Load
        } else {
            SwapRequest::Wait
        }
    }

    pub fn loaded(&mut self, path: &str, texture: T) -> Loaded<T> {
        self.pending.remove(path);
        let bind = self.is_wanted(path).then(|| texture.clone());
        let replaced = self.cache.insert(path.to_owned(), texture);
        Loaded { bind, replaced }
    }

    /// Forgets an in-flight load so a later request can retry it.
    pub fn failed(&mut self, path: &str) {
        self.pending.remove(path);
    }

    pub fn is_pending(&self, path: &str) -> bool {
        self.pending.contains(path)
    }

    /// Cached handle for the wanted image, for a material built after the
    /// request was made.
    pub fn wanted_texture(&self) -> Option<&T> {
        self.wanted.as_ref().and_then(|path| self.cache.get(path))
    }

    fn is_wanted(&self, path: &str) -> bool {
        self.wanted.as_deref() == Some(path)
    }
}
