//! Static meshes: the unit cube and the unit quad
//!
//! Faces wind counter-clockwise seen from outside. Built once at startup.

use super::vertex::Vertex;
use crate::scene::MeshKind;
use wgpu::util::DeviceExt;

/// (normal, u axis, v axis) per face, with u × v = normal
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Two triangles over the face's (u, v) corners
const FACE_CORNERS: [(f32, f32); 6] = [
    (-0.5, -0.5),
    (0.5, -0.5),
    (0.5, 0.5),
    (0.5, 0.5),
    (-0.5, 0.5),
    (-0.5, -0.5),
];

fn push_face(
    vertices: &mut Vec<Vertex>,
    center: [f32; 3],
    normal: [f32; 3],
    u: [f32; 3],
    v: [f32; 3],
) {
    for (a, b) in FACE_CORNERS {
        let position = [
            center[0] + u[0] * a + v[0] * b,
            center[1] + u[1] * a + v[1] * b,
            center[2] + u[2] * a + v[2] * b,
        ];
        vertices.push(Vertex {
            position,
            normal,
            uv: [a + 0.5, 0.5 - b],
        });
    }
}

/// 36 vertices of a unit cube centred on the origin
pub fn cube_vertices() -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(36);
    for (normal, u, v) in CUBE_FACES {
        let center = [normal[0] * 0.5, normal[1] * 0.5, normal[2] * 0.5];
        push_face(&mut vertices, center, normal, u, v);
    }
    vertices
}

/// 6 vertices of a unit quad in the XY plane facing +Z
pub fn quad_vertices() -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_face(
        &mut vertices,
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    );
    vertices
}

/// Vertex buffer plus draw count
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

pub struct MeshLibrary {
    pub cube: GpuMesh,
    pub quad: GpuMesh,
}

impl MeshLibrary {
    pub fn get(&self, kind: MeshKind) -> &GpuMesh {
        match kind {
            MeshKind::Cube => &self.cube,
            MeshKind::Quad => &self.quad,
        }
    }
}

fn upload_mesh(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    GpuMesh {
        vertex_buffer,
        vertex_count: vertices.len() as u32,
    }
}

pub fn create_mesh_library(device: &wgpu::Device) -> MeshLibrary {
    MeshLibrary {
        cube: upload_mesh(device, "Cube Vertex Buffer", &cube_vertices()),
        quad: upload_mesh(device, "Quad Vertex Buffer", &quad_vertices()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn winding_normal(tri: &[Vertex]) -> Vector3<f32> {
        let p0 = Vector3::from(tri[0].position);
        let p1 = Vector3::from(tri[1].position);
        let p2 = Vector3::from(tri[2].position);
        (p1 - p0).cross(p2 - p0)
    }

    #[test]
    fn test_cube_has_36_vertices_on_unit_bounds() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            assert!(v.position.iter().all(|c| c.abs() <= 0.5 + 1e-6));
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_cube_faces_wind_counter_clockwise_outward() {
        let vertices = cube_vertices();
        for tri in vertices.chunks(3) {
            let normal = Vector3::from(tri[0].normal);
            let wound = winding_normal(tri);
            assert!(wound.dot(normal) > 0.0, "triangle {:?} winds inward", tri);
            // Every vertex of a face lies on the face plane
            for v in tri {
                assert!((Vector3::from(v.position).dot(normal) - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_quad_faces_positive_z() {
        let vertices = quad_vertices();
        assert_eq!(vertices.len(), 6);
        for tri in vertices.chunks(3) {
            assert!(winding_normal(tri).normalize().z > 0.99);
        }
    }
}
