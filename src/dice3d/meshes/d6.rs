use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::dice3d::types::D6_FACES;

/// Edge rounding radius as a fraction of the edge length.
const BEVEL_FRACTION: f32 = 0.1;

/// Grid cells across each rounded edge.
const BEVEL_SEGMENTS: u32 = 2;

/// (outward normal, u axis, v axis) per face, with `u x v = normal`.
const FACE_AXES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Rounding radius of a die with edge length `size`.
pub fn d6_bevel_radius(size: f32) -> f32 {
    size * BEVEL_FRACTION
}

/// Body mesh of a cube die with edge length `size` and rounded edges and
/// corners.
pub fn create_d6(size: f32) -> Mesh {
    let half = size * 0.5;
    let radius = d6_bevel_radius(size);
    let inner = half - radius;

    // Grid lines along one face axis: through the bevel, across the flat
    // middle in one cell, then through the far bevel.
    let steps: Vec<f32> = (0..=BEVEL_SEGMENTS)
        .map(|i| -half + radius * i as f32 / BEVEL_SEGMENTS as f32)
        .chain((0..=BEVEL_SEGMENTS).map(|i| inner + radius * i as f32 / BEVEL_SEGMENTS as f32))
        .collect();
    let n = steps.len() as u32;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for (normal, u, v) in FACE_AXES {
        let base = positions.len() as u32;
        for cu in &steps {
            for cv in &steps {
                let flat = normal * half + u * *cu + v * *cv;
                let core = flat.clamp(Vec3::splat(-inner), Vec3::splat(inner));
                let outward = (flat - core).normalize_or(normal);
                positions.push((core + outward * radius).to_array());
                normals.push(outward.to_array());
                uvs.push([(cu + half) / size, 1.0 - (cv + half) / size]);
            }
        }

        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let a = base + i * n + j;
                let b = a + n;
                let c = b + 1;
                let d = a + 1;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// One quad transform per face, sitting just proud of the surface and facing
/// outwards, paired with the face value. Quads are unit squares in XY scaled
/// to the flat part of the face.
pub fn d6_face_quads(size: f32) -> Vec<(Transform, u32)> {
    let flat = size - 2.0 * d6_bevel_radius(size);
    D6_FACES
        .iter()
        .map(|(normal, value)| {
            let transform = Transform::from_translation(*normal * (size * 0.5 + 0.002))
                .with_rotation(Quat::from_rotation_arc(Vec3::Z, *normal))
                .with_scale(Vec3::new(flat, flat, 1.0));
            (transform, *value)
        })
        .collect()
}
