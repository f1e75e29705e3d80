//! Async fetching of images and shader sources.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Response};

use crate::config::AssetPaths;
use crate::error::EffectError;

/// Everything the material needs, decoded and ready for upload.
pub struct LoadedAssets {
    pub texture1: HtmlImageElement,
    pub texture2: HtmlImageElement,
    pub displacement: HtmlImageElement,
    pub vertex_source: String,
    pub fragment_source: String,
}

pub async fn load(paths: &AssetPaths) -> Result<LoadedAssets, EffectError> {
    let texture1 = load_image(&paths.texture1).await?;
    let texture2 = load_image(&paths.texture2).await?;
    let displacement = load_image(&paths.displacement).await?;
    let vertex_source = fetch_text(&paths.vertex_shader).await?;
    let fragment_source = fetch_text(&paths.fragment_shader).await?;
    log::debug!(
        "loaded {}, {}, {} and shaders",
        paths.texture1,
        paths.texture2,
        paths.displacement
    );
    Ok(LoadedAssets {
        texture1,
        texture2,
        displacement,
        vertex_source,
        fragment_source,
    })
}

/// Resolves once the image at `url` is fully decoded.
pub async fn load_image(url: &str) -> Result<HtmlImageElement, EffectError> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));
    image.set_src(url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| EffectError::ImageLoad(url.to_owned()))?;
    Ok(image)
}

pub async fn fetch_text(url: &str) -> Result<String, EffectError> {
    let window = web_sys::window().ok_or(EffectError::NoWindow)?;
    let response = JsFuture::from(window.fetch_with_str(url)).await?;
    let Ok(response) = response.dyn_into::<Response>() else {
        let message = format!("fetch({url}) did not resolve to a Response");
        return Err(EffectError::Js(message));
    };
    if !response.ok() {
        return Err(EffectError::Fetch {
            url: url.to_owned(),
            status: response.status(),
        });
    }
    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| EffectError::Js(format!("body of {url} is not text")))
}
