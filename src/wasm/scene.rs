use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, WebGl2RenderingContext as GL, WebGlContextAttributes};

use crate::camera::PerspectiveCamera;
use crate::error::EffectError;
use crate::hover::BoxSize;

/// Canvas, GL context and camera bound to the page container.
pub struct Scene {
    pub container: HtmlElement,
    pub canvas: HtmlCanvasElement,
    pub gl: GL,
    pub camera: PerspectiveCamera,
}

impl Scene {
    /// Creates a canvas inside `container` and acquires its WebGL2 context.
    pub fn attach(container: HtmlElement) -> Result<Self, EffectError> {
        let document = container.owner_document().ok_or(EffectError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| EffectError::GlCreate("canvas"))?;
        let style = canvas.style();
        style.set_property("display", "block")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;

        let attributes = WebGlContextAttributes::new();
        attributes.set_antialias(true);
        attributes.set_alpha(true);
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &attributes)?
            .ok_or(EffectError::WebGl2Unsupported)?
            .dyn_into()
            .map_err(|_| EffectError::WebGl2Unsupported)?;

        container.append_child(&canvas)?;

        let size = container_size(&container);
        let mut scene = Self {
            container,
            canvas,
            gl,
            camera: PerspectiveCamera::for_viewport(size.width, size.height),
        };
        scene.resize();
        Ok(scene)
    }

    pub fn size(&self) -> BoxSize {
        container_size(&self.container)
    }

    /// Matches the drawing buffer, viewport and camera to the container.
    pub fn resize(&mut self) {
        let size = self.size();
        let width = size.width.max(1.0) as u32;
        let height = size.height.max(1.0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
        self.camera.set_viewport(size.width, size.height);
    }
}

fn container_size(container: &HtmlElement) -> BoxSize {
    BoxSize::new(
        f64::from(container.offset_width()),
        f64::from(container.offset_height()),
    )
}
