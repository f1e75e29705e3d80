//! Shader program, plane mesh and the four effect inputs: `uTexture1`,
//! `uTexture2`, `uDisplacement` and `uProgress`.

use js_sys::{Float32Array, Uint16Array};
use web_sys::{
    HtmlImageElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::assets::LoadedAssets;
use crate::camera::PerspectiveCamera;
use crate::error::{EffectError, ShaderStage};
use crate::geometry::PlaneGeometry;

struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    model_view: Option<WebGlUniformLocation>,
    texture1: Option<WebGlUniformLocation>,
    texture2: Option<WebGlUniformLocation>,
    displacement: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            projection: gl.get_uniform_location(program, "projectionMatrix"),
            model_view: gl.get_uniform_location(program, "modelViewMatrix"),
            texture1: gl.get_uniform_location(program, "uTexture1"),
            texture2: gl.get_uniform_location(program, "uTexture2"),
            displacement: gl.get_uniform_location(program, "uDisplacement"),
            progress: gl.get_uniform_location(program, "uProgress"),
        }
    }
}

/// GL objects created while building a material. A failed build releases them.
#[derive(Default)]
struct Allocations {
    vertex_arrays: Vec<WebGlVertexArrayObject>,
    buffers: Vec<WebGlBuffer>,
    textures: Vec<WebGlTexture>,
}

impl Allocations {
    fn vertex_array(&mut self, gl: &GL) -> Result<WebGlVertexArrayObject, EffectError> {
        let vao = gl
            .create_vertex_array()
            .ok_or(EffectError::GlCreate("vertex array"))?;
        self.vertex_arrays.push(vao.clone());
        Ok(vao)
    }

    fn buffer(&mut self, gl: &GL, what: &'static str) -> Result<WebGlBuffer, EffectError> {
        let buffer = gl.create_buffer().ok_or(EffectError::GlCreate(what))?;
        self.buffers.push(buffer.clone());
        Ok(buffer)
    }

    fn texture(&mut self, gl: &GL, image: &HtmlImageElement) -> Result<WebGlTexture, EffectError> {
        let texture = upload_texture(gl, image)?;
        self.textures.push(texture.clone());
        Ok(texture)
    }

    fn release(self, gl: &GL) {
        for texture in &self.textures {
            gl.delete_texture(Some(texture));
        }
        for buffer in &self.buffers {
            gl.delete_buffer(Some(buffer));
        }
        for vao in &self.vertex_arrays {
            gl.delete_vertex_array(Some(vao));
        }
    }
}

pub struct Material {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    index_count: i32,
    uniforms: Uniforms,
    texture1: WebGlTexture,
    texture2: WebGlTexture,
    displacement: WebGlTexture,
}

impl Material {
    pub fn build(gl: &GL, assets: &LoadedAssets) -> Result<Self, EffectError> {
        let program = compile_program(gl, &assets.vertex_source, &assets.fragment_source)?;
        let mut created = Allocations::default();
        match Self::assemble(gl, program.clone(), assets, &mut created) {
            Ok(material) => Ok(material),
            Err(e) => {
                created.release(gl);
                gl.delete_program(Some(&program));
                Err(e)
            }
        }
    }

    fn assemble(
        gl: &GL,
        program: WebGlProgram,
        assets: &LoadedAssets,
        created: &mut Allocations,
    ) -> Result<Self, EffectError> {
        let plane = PlaneGeometry::new(2.0, 2.0);
        let vao = upload_plane(gl, &program, &plane, created)?;
        let uniforms = Uniforms::locate(gl, &program);

        Ok(Self {
            texture1: created.texture(gl, &assets.texture1)?,
            texture2: created.texture(gl, &assets.texture2)?,
            displacement: created.texture(gl, &assets.displacement)?,
            program,
            vao,
            index_count: plane.index_count(),
            uniforms,
        })
    }

    /// Replaces texture B; the previous handle is left to its owner.
    pub fn set_texture2(&mut self, texture: WebGlTexture) {
        self.texture2 = texture;
    }

    pub fn draw(&self, gl: &GL, camera: &PerspectiveCamera, progress: f32) {
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        let u = &self.uniforms;
        let projection = camera.projection();
        let view = camera.view();
        gl.uniform_matrix4fv_with_f32_array(u.projection.as_ref(), false, &projection);
        gl.uniform_matrix4fv_with_f32_array(u.model_view.as_ref(), false, &view);

        for (unit, texture, location) in [
            (0, &self.texture1, &u.texture1),
            (1, &self.texture2, &u.texture2),
            (2, &self.displacement, &u.displacement),
        ] {
            gl.active_texture(GL::TEXTURE0 + unit);
            gl.bind_texture(GL::TEXTURE_2D, Some(texture));
            gl.uniform1i(location.as_ref(), unit as i32);
        }
        gl.uniform1f(u.progress.as_ref(), progress);

        let count = self.index_count;
        gl.draw_elements_with_i32(GL::TRIANGLES, count, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}

pub fn compile_program(
    gl: &GL,
    vert_src: &str,
    frag_src: &str,
) -> Result<WebGlProgram, EffectError> {
    let vs = compile_shader(gl, ShaderStage::Vertex, vert_src)?;
    let fs = match compile_shader(gl, ShaderStage::Fragment, frag_src) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(Some(&vs));
            return Err(e);
        }
    };

    let program = gl.create_program().ok_or(EffectError::GlCreate("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    gl.detach_shader(&program, &vs);
    gl.detach_shader(&program, &fs);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !linked {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        return Err(EffectError::ProgramLink(log));
    }
    Ok(program)
}

fn compile_shader(
    gl: &GL,
    stage: ShaderStage,
    source: &str,
) -> Result<WebGlShader, EffectError> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or(EffectError::GlCreate("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(EffectError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

fn upload_plane(
    gl: &GL,
    program: &WebGlProgram,
    plane: &PlaneGeometry,
    created: &mut Allocations,
) -> Result<WebGlVertexArrayObject, EffectError> {
    let vao = created.vertex_array(gl)?;
    gl.bind_vertex_array(Some(&vao));
    let filled = fill_plane(gl, program, plane, created);
    gl.bind_vertex_array(None);
    filled?;
    Ok(vao)
}

/// Uploads the plane's buffers into the currently bound vertex array.
fn fill_plane(
    gl: &GL,
    program: &WebGlProgram,
    plane: &PlaneGeometry,
    created: &mut Allocations,
) -> Result<(), EffectError> {
    let position = gl.get_attrib_location(program, "position");
    if position < 0 {
        return Err(EffectError::MissingAttribute("position"));
    }
    bind_attribute(gl, created, position as u32, 3, &plane.positions)?;

    // `uv` may be compiled out by a shader that ignores it.
    let uv = gl.get_attrib_location(program, "uv");
    if uv >= 0 {
        bind_attribute(gl, created, uv as u32, 2, &plane.uvs)?;
    }

    let indices = created.buffer(gl, "index buffer")?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    gl.buffer_data_with_array_buffer_view(
        GL::ELEMENT_ARRAY_BUFFER,
        &Uint16Array::from(plane.indices.as_slice()),
        GL::STATIC_DRAW,
    );
    Ok(())
}

fn bind_attribute(
    gl: &GL,
    created: &mut Allocations,
    location: u32,
    size: i32,
    data: &[f32],
) -> Result<(), EffectError> {
    let buffer = created.buffer(gl, "vertex buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let array = Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
    Ok(())
}

/// Uploads a decoded image as a clamped, linearly filtered 2D texture.
pub fn upload_texture(
    gl: &GL,
    image: &HtmlImageElement,
) -> Result<WebGlTexture, EffectError> {
    let texture = gl.create_texture().ok_or(EffectError::GlCreate("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    );
    gl.bind_texture(GL::TEXTURE_2D, None);
    if let Err(e) = uploaded {
        gl.delete_texture(Some(&texture));
        return Err(e.into());
    }
    Ok(texture)
}
