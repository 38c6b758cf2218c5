/// Vertex shader shared by every mesh in the scene
pub const SURFACE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec2 v_uv;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Phong surface with an ambient term and one point light.
///
/// With `u_lit == 0` the fragment is the flat material colour, which is what
/// markers, wireframe lines and the atmosphere shell use.
pub const SURFACE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;
in vec2 v_uv;

uniform vec3 u_color;
uniform vec3 u_emissive;
uniform float u_opacity;
uniform float u_shininess;
uniform int u_lit;

uniform float u_ambient_intensity;
uniform vec3 u_light_position;
uniform float u_light_intensity;
uniform vec3 u_camera_pos;

out vec4 fragColor;

void main() {
    if (u_lit == 0) {
        fragColor = vec4(u_color, u_opacity);
        return;
    }

    vec3 normal = normalize(v_normal);
    vec3 light_dir = normalize(u_light_position - v_world_position);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    float ndotl = max(dot(normal, light_dir), 0.0);
    vec3 diffuse = u_color * ndotl * u_light_intensity;
    vec3 ambient = u_color * u_ambient_intensity;

    vec3 half_dir = normalize(light_dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), max(u_shininess, 1.0));
    vec3 specular = vec3(0.067) * spec * u_light_intensity;

    vec3 color = ambient + diffuse + specular + u_emissive;

    fragColor = vec4(min(color, vec3(1.0)), u_opacity);
}
"#;

/// Vertex shader for the star field
pub const STAR_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in float a_size;
layout(location = 2) in float a_alpha;
layout(location = 3) in vec3 a_color;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_point_scale;

out float v_alpha;
out vec3 v_color;

void main() {
    v_alpha = a_alpha;
    v_color = a_color;

    vec4 view_pos = u_view * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    // Size attenuates with distance but never drops below one pixel
    gl_PointSize = max(a_size * (u_point_scale / -view_pos.z), 1.0);
}
"#;

pub const STAR_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;
in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    if (length(coord) > 0.5) {
        discard;
    }
    fragColor = vec4(v_color, v_alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_version() {
        for src in [
            SURFACE_VERTEX_SHADER,
            SURFACE_FRAGMENT_SHADER,
            STAR_VERTEX_SHADER,
            STAR_FRAGMENT_SHADER,
        ] {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_surface_uniforms_declared() {
        for name in ["u_model", "u_view", "u_projection"] {
            assert!(SURFACE_VERTEX_SHADER.contains(name));
        }
        for name in ["u_color", "u_emissive", "u_opacity", "u_lit", "u_light_position"] {
            assert!(SURFACE_FRAGMENT_SHADER.contains(name));
        }
    }
}
