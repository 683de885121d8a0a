/// WGSL shader: full-screen triangle plus a DDA raymarch through the voxel grid.
///
/// Bindings: group 0 binding 0 is the camera uniform block, group 1 binding 0
/// is the `GRID_DIM`³ array of packed `0x00RRGGBB` cells.
pub const RAYMARCH_SHADER: &str = r#"
struct Uniforms {
    position: vec3<f32>,
    direction: vec3<f32>,
    screen_size: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var<storage, read> voxels: array<u32>;

const GRID_DIM: i32 = 16;
const MAX_STEPS: i32 = 64;
const WORLD_UP: vec3<f32> = vec3<f32>(0.0, 1.0, 0.0);
const FOCAL_LENGTH: f32 = 1.5;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
};

// Three vertices cover the screen: (-1,-1), (3,-1), (-1,3).
@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VertexOutput;
    out.clip_position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    return out;
}

fn cell(p: vec3<i32>) -> u32 {
    return voxels[u32(p.x + p.y * GRID_DIM + p.z * GRID_DIM * GRID_DIM)];
}

fn unpack_color(c: u32) -> vec3<f32> {
    return vec3<f32>(
        f32((c >> 16u) & 0xffu),
        f32((c >> 8u) & 0xffu),
        f32(c & 0xffu)
    ) / 255.0;
}

fn sky(dir: vec3<f32>) -> vec3<f32> {
    let t = clamp(dir.y * 0.5 + 0.5, 0.0, 1.0);
    return mix(vec3<f32>(0.05, 0.05, 0.08), vec3<f32>(0.35, 0.45, 0.6), t);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let size = max(uniforms.screen_size, vec2<f32>(1.0, 1.0));
    var ndc = in.clip_position.xy / size * 2.0 - 1.0;
    ndc.y = -ndc.y;
    ndc.x = ndc.x * size.x / size.y;

    let forward = normalize(uniforms.direction);
    var right = cross(forward, WORLD_UP);
    if dot(right, right) < 1e-8 {
        right = vec3<f32>(1.0, 0.0, 0.0);
    }
    right = normalize(right);
    let up = cross(right, forward);
    let dir = normalize(forward * FOCAL_LENGTH + right * ndc.x + up * ndc.y);

    let safe_dir = select(dir, vec3<f32>(1e-6), abs(dir) < vec3<f32>(1e-6));
    let inv = 1.0 / safe_dir;

    // Clip the ray against the grid bounds.
    let origin = uniforms.position;
    let t0 = (vec3<f32>(0.0) - origin) * inv;
    let t1 = (vec3<f32>(f32(GRID_DIM)) - origin) * inv;
    let tmin = min(t0, t1);
    let tmax = max(t0, t1);
    let t_enter = max(max(tmin.x, tmin.y), max(tmin.z, 0.0));
    let t_exit = min(min(tmax.x, tmax.y), tmax.z);
    if t_enter >= t_exit {
        return vec4<f32>(sky(dir), 1.0);
    }

    let start = origin + dir * (t_enter + 1e-4);
    var pos = clamp(vec3<i32>(floor(start)), vec3<i32>(0), vec3<i32>(GRID_DIM - 1));
    let dir_step = select(vec3<i32>(-1), vec3<i32>(1), safe_dir > vec3<f32>(0.0));
    let delta = abs(inv);
    var side = (vec3<f32>(pos) + max(vec3<f32>(dir_step), vec3<f32>(0.0)) - start) * inv;

    var normal = vec3<f32>(0.0);
    if t_enter > 0.0 {
        if tmin.x >= tmin.y && tmin.x >= tmin.z {
            normal = vec3<f32>(-f32(dir_step.x), 0.0, 0.0);
        } else if tmin.y >= tmin.z {
            normal = vec3<f32>(0.0, -f32(dir_step.y), 0.0);
        } else {
            normal = vec3<f32>(0.0, 0.0, -f32(dir_step.z));
        }
    }

    let light = normalize(vec3<f32>(0.4, 1.0, 0.3));
    for (var i = 0; i < MAX_STEPS; i++) {
        let c = cell(pos);
        if c != 0u {
            let shade = 0.55 + 0.45 * abs(dot(normal, light));
            return vec4<f32>(unpack_color(c) * shade, 1.0);
        }
        if side.x < side.y && side.x < side.z {
            pos.x += dir_step.x;
            side.x += delta.x;
            normal = vec3<f32>(-f32(dir_step.x), 0.0, 0.0);
        } else if side.y < side.z {
            pos.y += dir_step.y;
            side.y += delta.y;
            normal = vec3<f32>(0.0, -f32(dir_step.y), 0.0);
        } else {
            pos.z += dir_step.z;
            side.z += delta.z;
            normal = vec3<f32>(0.0, 0.0, -f32(dir_step.z));
        }
        if any(pos < vec3<i32>(0)) || any(pos >= vec3<i32>(GRID_DIM)) {
            break;
        }
    }
    return vec4<f32>(sky(dir), 1.0);
}
"#;
