use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget, MouseEvent};

use super::effect::Effect;
use crate::error::EffectError;
use crate::hover::{BoxSize, Point};

/// Wires pointer and resize events to the effect. Listeners live as long as the page.
pub fn attach(effect: &Effect) -> Result<(), EffectError> {
    let container = effect.state.borrow().scene.container.clone();
    let tracks_moves = effect.state.borrow().hover.tracks_pointer_moves();

    listen(&container, "mouseenter", {
        let effect = effect.clone();
        move |_| {
            let update = effect.state.borrow_mut().hover.pointer_enter();
            effect.apply(update);
        }
    })?;

    listen(&container, "mouseleave", {
        let effect = effect.clone();
        move |_| {
            let update = effect.state.borrow_mut().hover.pointer_leave();
            effect.apply(update);
        }
    })?;

    if tracks_moves {
        listen(&container, "mousemove", {
            let effect = effect.clone();
            let container = container.clone();
            move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = container.get_bounding_client_rect();
                let pointer = Point::new(
                    f64::from(event.client_x()) - rect.left(),
                    f64::from(event.client_y()) - rect.top(),
                );
                let size = BoxSize::new(rect.width(), rect.height());
                let update = effect.state.borrow_mut().hover.pointer_move(pointer, size);
                effect.apply(update);
            }
        })?;
    }

    let window = web_sys::window().ok_or(EffectError::NoWindow)?;
    listen(&window, "resize", {
        let effect = effect.clone();
        move |_| effect.state.borrow_mut().scene.resize()
    })?;

    Ok(())
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), EffectError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
