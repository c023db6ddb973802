/// Column-major orthographic projection mapping pixels (top-left origin,
/// +Y down) to GL clip space.
#[rustfmt::skip]
pub fn ortho_projection(width: f32, height: f32) -> [f32; 16] {
    [
        2.0 / width, 0.0, 0.0, 0.0,
        0.0, -2.0 / height, 0.0, 0.0,
        0.0, 0.0, -1.0, 0.0,
        -1.0, 1.0, 0.0, 1.0,
    ]
}
