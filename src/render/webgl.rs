use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::mesh::geometry::VERTEX_STRIDE;
use crate::mesh::Mesh;

/// Which faces a draw call keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCull {
    None,
    Back,
    Front,
}

/// How fragments combine with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Opaque,
    Alpha,
    Additive,
}

/// Geometry living on the GPU, ready to be drawn with one call
pub struct GpuMesh {
    pub vao: WebGlVertexArrayObject,
    _vertices: WebGlBuffer,
    _indices: WebGlBuffer,
    pub index_count: i32,
    /// `TRIANGLES` or `LINES`
    pub mode: u32,
}

/// Wrapper around the WebGL2 context with helper methods
pub struct GlContext {
    pub gl: GL,
}

impl GlContext {
    pub fn new(gl: GL) -> Self {
        Self { gl }
    }

    /// Compile a shader from source
    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader, String> {
        let gl = &self.gl;

        let shader = gl.create_shader(shader_type).ok_or("Failed to create shader")?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        if gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            Err(format!("Shader compilation failed: {}", log))
        }
    }

    /// Link a program from vertex and fragment sources
    pub fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, String> {
        let gl = &self.gl;

        let vert_shader = self.compile_shader(GL::VERTEX_SHADER, vert_src)?;
        let frag_shader = self.compile_shader(GL::FRAGMENT_SHADER, frag_src)?;

        let program = gl.create_program().ok_or("Failed to create program")?;
        gl.attach_shader(&program, &vert_shader);
        gl.attach_shader(&program, &frag_shader);
        gl.link_program(&program);

        gl.delete_shader(Some(&vert_shader));
        gl.delete_shader(Some(&frag_shader));

        if gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(program)
        } else {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            Err(format!("Program linking failed: {}", log))
        }
    }

    /// Create an array buffer and upload `data` into it
    fn create_buffer_f32(&self, data: &[f32], usage: u32) -> Result<WebGlBuffer, String> {
        let gl = &self.gl;

        let buffer = gl.create_buffer().ok_or("Failed to create buffer")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));

        // Safety: the view is consumed by buffer_data before any allocation
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, usage);
        }

        Ok(buffer)
    }

    fn create_index_buffer(&self, data: &[u32]) -> Result<WebGlBuffer, String> {
        let gl = &self.gl;

        let buffer = gl.create_buffer().ok_or("Failed to create index buffer")?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buffer));

        unsafe {
            let array = js_sys::Uint32Array::view(data);
            gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &array, GL::STATIC_DRAW);
        }

        Ok(buffer)
    }

    /// Upload a mesh with the position/normal/uv layout.
    ///
    /// `indices` overrides the mesh's triangle list, which is how the
    /// wireframe shares the globe's vertices.
    pub fn upload_mesh(&self, mesh: &Mesh, indices: Option<&[u32]>, mode: u32) -> Result<GpuMesh, String> {
        let gl = &self.gl;
        let indices = indices.unwrap_or(mesh.index_data());

        let vao = gl.create_vertex_array().ok_or("Failed to create VAO")?;
        gl.bind_vertex_array(Some(&vao));

        let vertices = self.create_buffer_f32(&mesh.vertex_data(), GL::STATIC_DRAW)?;
        let stride = (VERTEX_STRIDE * 4) as i32;
        // position, normal, uv
        for (location, size, offset) in [(0u32, 3i32, 0i32), (1, 3, 12), (2, 2, 24)] {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, stride, offset);
        }

        let index_buffer = self.create_index_buffer(indices)?;

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            _vertices: vertices,
            _indices: index_buffer,
            index_count: indices.len() as i32,
            mode,
        })
    }

    /// Upload interleaved point data: position(3) + size(1) + alpha(1) + color(3)
    pub fn upload_points(&self, data: &[f32]) -> Result<(WebGlVertexArrayObject, WebGlBuffer), String> {
        let gl = &self.gl;

        let vao = gl.create_vertex_array().ok_or("Failed to create VAO")?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.create_buffer_f32(data, GL::STATIC_DRAW)?;
        let stride = 8 * 4;
        for (location, size, offset) in [(0u32, 3i32, 0i32), (1, 1, 12), (2, 1, 16), (3, 3, 20)] {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, stride, offset);
        }

        gl.bind_vertex_array(None);
        Ok((vao, buffer))
    }

    pub fn draw(&self, mesh: &GpuMesh) {
        self.gl.bind_vertex_array(Some(&mesh.vao));
        self.gl
            .draw_elements_with_i32(mesh.mode, mesh.index_count, GL::UNSIGNED_INT, 0);
        self.gl.bind_vertex_array(None);
    }

    pub fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_1i(&self, location: Option<&WebGlUniformLocation>, value: i32) {
        self.gl.uniform1i(location, value);
    }

    pub fn uniform_3f(&self, location: Option<&WebGlUniformLocation>, v: [f32; 3]) {
        self.gl.uniform3f(location, v[0], v[1], v[2]);
    }

    pub fn uniform_matrix4fv(&self, location: Option<&WebGlUniformLocation>, data: &[f32; 16]) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, data);
    }

    pub fn clear(&self, color: [f32; 4]) {
        self.gl.clear_color(color[0], color[1], color[2], color[3]);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    pub fn enable_depth_test(&self) {
        self.gl.enable(GL::DEPTH_TEST);
    }

    /// Transparent layers test against depth without writing it
    pub fn set_depth_write(&self, enabled: bool) {
        self.gl.depth_mask(enabled);
    }

    pub fn set_cull(&self, cull: FaceCull) {
        match cull {
            FaceCull::None => self.gl.disable(GL::CULL_FACE),
            FaceCull::Back | FaceCull::Front => {
                self.gl.enable(GL::CULL_FACE);
                self.gl
                    .cull_face(if cull == FaceCull::Back { GL::BACK } else { GL::FRONT });
            }
        }
    }

    pub fn set_blend(&self, blend: Blend) {
        match blend {
            Blend::Opaque => self.gl.disable(GL::BLEND),
            Blend::Alpha => {
                self.gl.enable(GL::BLEND);
                self.gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
            }
            Blend::Additive => {
                self.gl.enable(GL::BLEND);
                self.gl.blend_func(GL::SRC_ALPHA, GL::ONE);
            }
        }
    }

    pub fn viewport(&self, width: i32, height: i32) {
        self.gl.viewport(0, 0, width, height);
    }
}
