use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, WebGl2RenderingContext as GL, WebGlTexture};

use super::assets;
use super::material::{upload_texture, Material};
use super::scene::Scene;
use crate::config::{EffectConfig, Variant};
use crate::error::EffectError;
use crate::interaction::{HoverController, HoverUpdate, SwapRequest, TextureSwap, PROGRESS_HIDDEN};
use crate::tween::Tween;

pub(super) struct EffectState {
    pub scene: Scene,
    pub config: EffectConfig,
    /// `None` until the asset loader finishes; frames are skipped meanwhile.
    pub material: Option<Material>,
    pub progress: Tween,
    pub hover: HoverController,
    hover_textures: TextureSwap<WebGlTexture>,
    /// Frames that only cleared the canvas because the material was missing.
    skipped_frames: u32,
}

impl EffectState {
    pub fn frame(&mut self, now_ms: f64) {
        let gl = &self.scene.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        let Some(material) = &self.material else {
            self.skipped_frames = self.skipped_frames.saturating_add(1);
            return;
        };
        material.draw(gl, &self.scene.camera, self.progress.value_at(now_ms));
    }

    fn install_material(&mut self, mut material: Material) {
        if let Some(texture) = self.hover_textures.wanted_texture() {
            material.set_texture2(texture.clone());
        }
        self.material = Some(material);
    }

    fn bind_texture2(&mut self, texture: WebGlTexture) {
        if let Some(material) = self.material.as_mut() {
            material.set_texture2(texture);
        }
    }

    fn hover_texture_loaded(&mut self, path: &str, texture: WebGlTexture) {
        let loaded = self.hover_textures.loaded(path, texture);
        if let Some(texture) = loaded.bind {
            self.bind_texture2(texture);
        }
        if let Some(old) = loaded.replaced {
            self.scene.gl.delete_texture(Some(&old));
        }
    }
}

/// A mounted effect. Clones share the same state.
#[derive(Clone)]
pub struct Effect {
    pub(super) state: Rc<RefCell<EffectState>>,
}

impl Effect {
    pub(super) fn new(
        container: HtmlElement,
        config: EffectConfig,
    ) -> Result<Self, EffectError> {
        let scene = Scene::attach(container)?;
        let progress = Tween::at_rest(PROGRESS_HIDDEN, config.duration_ms, config.ease);
        let state = EffectState {
            scene,
            progress,
            hover: HoverController::new(&config),
            config,
            material: None,
            hover_textures: TextureSwap::new(),
            skipped_frames: 0,
        };
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
        })
    }

    pub fn variant(&self) -> Variant {
        self.state.borrow().config.variant
    }

    /// Value the progress animation is heading for.
    pub fn progress_target(&self) -> f32 {
        self.state.borrow().progress.target()
    }

    pub fn progress(&self) -> f32 {
        self.state.borrow().progress.value_at(now_ms())
    }

    /// True once textures and shaders are loaded and the material is drawn.
    pub fn is_ready(&self) -> bool {
        self.state.borrow().material.is_some()
    }

    /// Animation frames that were skipped while the material was loading.
    pub fn skipped_frames(&self) -> u32 {
        self.state.borrow().skipped_frames
    }

    /// Fetches the configured assets in the background and builds the material.
    pub(super) fn load_assets(&self) {
        let state = Rc::clone(&self.state);
        let paths = state.borrow().config.assets.clone();
        spawn_local(async move {
            let built = match assets::load(&paths).await {
                Ok(loaded) => Material::build(&state.borrow().scene.gl, &loaded),
                Err(e) => Err(e),
            };
            match built {
                Ok(material) => {
                    state.borrow_mut().install_material(material);
                    log::info!("distortion material ready");
                }
                Err(e) => log::error!("distortion effect assets failed: {e}"),
            }
        });
    }

    /// Applies a pointer-driven update: retargets progress and swaps texture B.
    pub(super) fn apply(&self, update: HoverUpdate) {
        if let Some(target) = update.target {
            self.state.borrow_mut().progress.retarget(target, now_ms());
        }
        if let Some(index) = update.swap {
            self.swap_texture2(index);
        }
    }

    fn swap_texture2(&self, index: usize) {
        let path = {
            let mut state = self.state.borrow_mut();
            let Some(point) = state.hover.point(index) else {
                return;
            };
            let path = point.image.clone();
            log::debug!("hover point `{}` active", point.name);
            match state.hover_textures.request(&path) {
                SwapRequest::Bind(texture) => {
                    state.bind_texture2(texture);
                    return;
                }
                SwapRequest::Wait => return,
                SwapRequest::Load => path,
            }
        };

        let state = Rc::clone(&self.state);
        spawn_local(async move {
            let uploaded = match assets::load_image(&path).await {
                Ok(image) => upload_texture(&state.borrow().scene.gl, &image),
                Err(e) => Err(e),
            };
            let mut state = state.borrow_mut();
            match uploaded {
                Ok(texture) => state.hover_texture_loaded(&path, texture),
                Err(e) => {
                    state.hover_textures.failed(&path);
                    log::error!("hover texture {path} failed: {e}");
                }
            }
        });
    }
}

pub(super) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}
