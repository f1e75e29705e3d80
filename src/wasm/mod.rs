use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::EffectConfig;
use crate::error::EffectError;

mod assets;
mod effect;
mod listeners;
mod material;
mod render;
mod scene;

pub use effect::Effect;

/// Id of the element the effect mounts into.
pub const CONTAINER_ID: &str = "webgl-container";

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or(EffectError::NoWindow)?;
    let document = window.document().ok_or(EffectError::NoDocument)?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = mount(CONTAINER_ID) {
                log::error!("distortion effect failed to start: {e}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount(CONTAINER_ID)?;
    }
    Ok(())
}

/// Mounts the effect into the element with id `container_id`.
///
/// A missing container is logged and yields `Ok(None)`; nothing is attached.
pub fn mount(container_id: &str) -> Result<Option<Effect>, EffectError> {
    let window = web_sys::window().ok_or(EffectError::NoWindow)?;
    let document = window.document().ok_or(EffectError::NoDocument)?;

    let Some(container) = document.get_element_by_id(container_id) else {
        log::error!("WebGL container #{container_id} not found");
        return Ok(None);
    };
    let Ok(container) = container.dyn_into::<HtmlElement>() else {
        let message = format!("#{container_id} is not an HTML element");
        return Err(EffectError::Config(message));
    };

    let config = EffectConfig::from_attributes(
        container.get_attribute("data-variant").as_deref(),
        container.get_attribute("data-effect-config").as_deref(),
    )?;
    log::info!(
        "mounting {} distortion effect into #{container_id}",
        config.variant
    );

    let effect = Effect::new(container, config)?;
    listeners::attach(&effect)?;
    render::start(&effect)?;
    effect.load_assets();
    Ok(Some(effect))
}
