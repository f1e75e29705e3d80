use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use super::effect::Effect;
use crate::error::EffectError;

/// Starts the animation-frame loop. It never stops; frames before the material
/// is ready only clear the canvas.
pub fn start(effect: &Effect) -> Result<(), EffectError> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);
    let state = Rc::clone(&effect.state);
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        state.borrow_mut().frame(now_ms);

        // schedule next
        let Some(window) = window() else {
            return;
        };
        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let window = window().ok_or(EffectError::NoWindow)?;
    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}
