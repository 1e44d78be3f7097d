pub mod d6;

pub use d6::{create_d6, d6_bevel_radius, d6_face_quads};

/// Texture file for a face value inside the configured textures directory.
pub fn d6_face_texture_path(dir: &str, value: u32) -> String {
    format!("{}/d6_side_{}.jpg", dir.trim_end_matches('/'), value)
}
