use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use super::shaders::*;
use super::webgl::{Blend, FaceCull, GlContext, GpuMesh};
use crate::math::Mat4;
use crate::mesh::uv_sphere;
use crate::particles::{StarField, FLOATS_PER_STAR};
use crate::scene::{
    GlobeScene, Material, ATMOSPHERE_RADIUS, GLOBE_RADIUS, GLOBE_SEGMENTS, MARKER_RADIUS,
    MARKER_SEGMENTS,
};

/// Cached uniform locations for the surface shader
struct SurfaceUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    lit: Option<WebGlUniformLocation>,
    ambient_intensity: Option<WebGlUniformLocation>,
    light_position: Option<WebGlUniformLocation>,
    light_intensity: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the star shader
struct StarUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
}

struct StarBuffers {
    vao: WebGlVertexArrayObject,
    _buffer: WebGlBuffer,
    count: i32,
}

/// Draws the globe, its wireframe, the markers, the atmosphere and the stars
pub struct GlobePipeline {
    ctx: GlContext,

    surface_program: WebGlProgram,
    star_program: WebGlProgram,
    surface_uniforms: SurfaceUniforms,
    star_uniforms: StarUniforms,

    globe: GpuMesh,
    wireframe: GpuMesh,
    marker: GpuMesh,
    atmosphere: GpuMesh,
    stars: StarBuffers,

    width: i32,
    height: i32,
}

impl GlobePipeline {
    pub fn new(gl: GL, width: i32, height: i32, stars: &StarField) -> Result<Self, String> {
        let ctx = GlContext::new(gl);

        let surface_program = ctx.create_program(SURFACE_VERTEX_SHADER, SURFACE_FRAGMENT_SHADER)?;
        let star_program = ctx.create_program(STAR_VERTEX_SHADER, STAR_FRAGMENT_SHADER)?;

        let surface_uniforms = SurfaceUniforms {
            model: ctx.get_uniform_location(&surface_program, "u_model"),
            view: ctx.get_uniform_location(&surface_program, "u_view"),
            projection: ctx.get_uniform_location(&surface_program, "u_projection"),
            color: ctx.get_uniform_location(&surface_program, "u_color"),
            emissive: ctx.get_uniform_location(&surface_program, "u_emissive"),
            opacity: ctx.get_uniform_location(&surface_program, "u_opacity"),
            shininess: ctx.get_uniform_location(&surface_program, "u_shininess"),
            lit: ctx.get_uniform_location(&surface_program, "u_lit"),
            ambient_intensity: ctx.get_uniform_location(&surface_program, "u_ambient_intensity"),
            light_position: ctx.get_uniform_location(&surface_program, "u_light_position"),
            light_intensity: ctx.get_uniform_location(&surface_program, "u_light_intensity"),
            camera_pos: ctx.get_uniform_location(&surface_program, "u_camera_pos"),
        };

        let star_uniforms = StarUniforms {
            view: ctx.get_uniform_location(&star_program, "u_view"),
            projection: ctx.get_uniform_location(&star_program, "u_projection"),
            point_scale: ctx.get_uniform_location(&star_program, "u_point_scale"),
        };

        let globe_mesh = uv_sphere(GLOBE_RADIUS, GLOBE_SEGMENTS, GLOBE_SEGMENTS);
        let globe = ctx.upload_mesh(&globe_mesh, None, GL::TRIANGLES)?;
        let wireframe = ctx.upload_mesh(&globe_mesh, Some(&globe_mesh.wireframe_indices()), GL::LINES)?;

        let marker_mesh = uv_sphere(MARKER_RADIUS, MARKER_SEGMENTS, MARKER_SEGMENTS);
        let marker = ctx.upload_mesh(&marker_mesh, None, GL::TRIANGLES)?;

        let atmosphere_mesh = uv_sphere(ATMOSPHERE_RADIUS, GLOBE_SEGMENTS, GLOBE_SEGMENTS);
        let atmosphere = ctx.upload_mesh(&atmosphere_mesh, None, GL::TRIANGLES)?;

        let star_data = stars.particle_data();
        let (star_vao, star_buffer) = ctx.upload_points(&star_data)?;
        let stars = StarBuffers {
            vao: star_vao,
            _buffer: star_buffer,
            count: (star_data.len() / FLOATS_PER_STAR) as i32,
        };

        ctx.enable_depth_test();
        ctx.gl.depth_func(GL::LEQUAL);
        ctx.viewport(width, height);

        Ok(Self {
            ctx,
            surface_program,
            star_program,
            surface_uniforms,
            star_uniforms,
            globe,
            wireframe,
            marker,
            atmosphere,
            stars,
            width,
            height,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.ctx.viewport(width, height);
    }

    fn set_material(&self, material: &Material) {
        let u = &self.surface_uniforms;
        self.ctx.uniform_3f(u.color.as_ref(), material.color.to_array());
        self.ctx.uniform_3f(u.emissive.as_ref(), material.emissive.to_array());
        self.ctx.uniform_1f(u.opacity.as_ref(), material.opacity);
        self.ctx.uniform_1f(u.shininess.as_ref(), material.shininess);
        self.ctx.uniform_1i(u.lit.as_ref(), material.lit as i32);
    }

    fn draw_surface(&self, mesh: &GpuMesh, model: &Mat4, material: &Material) {
        self.ctx
            .uniform_matrix4fv(self.surface_uniforms.model.as_ref(), model.as_slice());
        self.set_material(material);
        self.ctx.draw(mesh);
    }

    /// Render one frame with the globe at `globe_model`
    pub fn render(&self, scene: &GlobeScene, globe_model: &Mat4, time_ms: f64) {
        let gl = &self.ctx.gl;
        let style = &scene.style;
        let camera = &scene.camera;

        let projection = camera.projection(self.aspect());
        let view = camera.view();

        self.ctx.clear(style.clear_color);

        // Stars sit behind everything and never occlude
        gl.use_program(Some(&self.star_program));
        self.ctx.set_depth_write(false);
        self.ctx.set_cull(FaceCull::None);
        self.ctx.set_blend(Blend::Alpha);
        self.ctx
            .uniform_matrix4fv(self.star_uniforms.view.as_ref(), view.as_slice());
        self.ctx
            .uniform_matrix4fv(self.star_uniforms.projection.as_ref(), projection.as_slice());
        self.ctx
            .uniform_1f(self.star_uniforms.point_scale.as_ref(), self.height as f32 / 2.0);
        gl.bind_vertex_array(Some(&self.stars.vao));
        gl.draw_arrays(GL::POINTS, 0, self.stars.count);
        gl.bind_vertex_array(None);

        gl.use_program(Some(&self.surface_program));
        let u = &self.surface_uniforms;
        self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_3f(u.camera_pos.as_ref(), camera.position.to_array());
        self.ctx
            .uniform_1f(u.ambient_intensity.as_ref(), style.lighting.ambient_intensity);
        self.ctx
            .uniform_3f(u.light_position.as_ref(), style.lighting.point_position.to_array());
        self.ctx
            .uniform_1f(u.light_intensity.as_ref(), style.lighting.point_intensity);

        // Globe
        self.ctx.set_depth_write(true);
        self.ctx.set_cull(FaceCull::Back);
        self.draw_surface(&self.globe, globe_model, &style.globe);

        // Wireframe rides on the globe surface
        self.ctx.set_depth_write(false);
        self.ctx.set_cull(FaceCull::None);
        self.draw_surface(&self.wireframe, globe_model, &style.wireframe);

        // Markers
        self.ctx.set_depth_write(true);
        self.ctx.set_cull(FaceCull::Back);
        for i in 0..scene.markers().len() {
            let model = scene.marker_model(i, globe_model, time_ms);
            self.draw_surface(&self.marker, &model, &style.marker);
        }

        // Atmosphere: inside faces only, added on top
        self.ctx.set_depth_write(false);
        self.ctx.set_cull(FaceCull::Front);
        self.ctx.set_blend(Blend::Additive);
        self.draw_surface(&self.atmosphere, globe_model, &style.atmosphere);

        self.ctx.set_depth_write(true);
        self.ctx.set_blend(Blend::Alpha);
    }
}
