/// WGSL shader for flat-coloured tiles: position passthrough, one colour per
/// draw.
pub const COLOR_SHADER: &str = r#"
struct Camera {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

struct Draw {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> draw: Draw;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_color(vertex: VertexInput) -> @builtin(position) vec4<f32> {
    return camera.projection * camera.view * draw.model * vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_color() -> @location(0) vec4<f32> {
    return draw.color;
}
"#;

/// WGSL shader for textured block faces: position + texture coordinate
/// passthrough.
pub const TEXTURED_SHADER: &str = r#"
struct Camera {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

struct Draw {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> draw: Draw;

@group(2) @binding(0)
var face_texture: texture_2d<f32>;
@group(2) @binding(1)
var face_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_textured(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.projection * camera.view * draw.model * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_textured(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(face_texture, face_sampler, in.uv) * draw.color;
}
"#;
