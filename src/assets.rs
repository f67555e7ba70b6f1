//! Mesh acquisition
//!
//! The backdrop instances a single mesh, fetched once at startup as a
//! flat little-endian binary:
//!
//! ```text
//! magic   u32  "DFM1" (0x31_4d_46_44)
//! verts   u32  vertex count
//! indices u32  index count
//! ...     f32  vertex data, [position xyz, normal xyz] per vertex
//! ...     u32  index data
//! ```
//!
//! There is no retry and no timeout: a failed or stalled load leaves
//! the static fallback visual in place and the core never starts.

use anyhow::{Result, bail};
use bytemuck::{Pod, Zeroable};

/// Mesh vertex: object-space position and normal
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// A parsed geometry/material-ready mesh
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

const MESH_MAGIC: u32 = u32::from_le_bytes(*b"DFM1");
const HEADER_LEN: usize = 12;

/// Parse the flat binary mesh format.
pub fn parse_mesh(bytes: &[u8]) -> Result<MeshData> {
    if bytes.len() < HEADER_LEN {
        bail!("mesh too short for header: {} bytes", bytes.len());
    }

    let word = |i: usize| u32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
    if word(0) != MESH_MAGIC {
        bail!("bad mesh magic: {:#010x}", word(0));
    }
    let vertex_count = word(1) as usize;
    let index_count = word(2) as usize;
    if vertex_count == 0 || index_count == 0 {
        bail!("empty mesh ({vertex_count} vertices, {index_count} indices)");
    }
    if index_count % 3 != 0 {
        bail!("index count {index_count} is not a triangle list");
    }

    let vertex_bytes = vertex_count * std::mem::size_of::<Vertex>();
    let index_bytes = index_count * 4;
    let expected = HEADER_LEN + vertex_bytes + index_bytes;
    if bytes.len() != expected {
        bail!("mesh length mismatch: got {} bytes, want {expected}", bytes.len());
    }

    // from_le_bytes rather than a slice cast; the fetched buffer has no
    // alignment guarantee
    let floats: Vec<f32> = bytes[HEADER_LEN..HEADER_LEN + vertex_bytes]
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes(b.try_into().unwrap()))
        .collect();
    let vertices: Vec<Vertex> = floats
        .chunks_exact(6)
        .map(|v| Vertex {
            position: [v[0], v[1], v[2]],
            normal: [v[3], v[4], v[5]],
        })
        .collect();

    let indices: Vec<u32> = bytes[HEADER_LEN + vertex_bytes..]
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes(b.try_into().unwrap()))
        .collect();

    for &index in &indices {
        if index as usize >= vertex_count {
            bail!("index {index} out of range for {vertex_count} vertices");
        }
    }

    Ok(MeshData { vertices, indices })
}

/// Fetch and parse the instanced mesh. The one suspension point of the
/// whole startup path.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_mesh(url: &str) -> Result<MeshData> {
    use anyhow::{Context, anyhow};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().context("no window")?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch failed: {e:?}"))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| anyhow!("fetch did not return a Response"))?;
    if !response.ok() {
        bail!("fetch {url}: HTTP {}", response.status());
    }

    let buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| anyhow!("array_buffer failed: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow!("body read failed: {e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    parse_mesh(&bytes).with_context(|| format!("parsing {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(vertices: &[Vertex], indices: &[u32]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MESH_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&(vertices.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(indices.len() as u32).to_le_bytes());
        bytes.extend_from_slice(bytemuck::cast_slice(vertices));
        bytes.extend_from_slice(bytemuck::cast_slice(indices));
        bytes
    }

    fn triangle() -> (Vec<Vertex>, Vec<u32>) {
        let n = [0.0, 0.0, 1.0];
        (
            vec![
                Vertex { position: [0.0, 0.0, 0.0], normal: n },
                Vertex { position: [1.0, 0.0, 0.0], normal: n },
                Vertex { position: [0.0, 1.0, 0.0], normal: n },
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_parse_valid_mesh() {
        let (vertices, indices) = triangle();
        let mesh = parse_mesh(&encode(&vertices, &indices)).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, indices);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parse_rejects_bad_magic() {
        let (vertices, indices) = triangle();
        let mut bytes = encode(&vertices, &indices);
        bytes[0] = b'X';
        assert!(parse_mesh(&bytes).is_err());
    }

    #[test]
    fn test_parse_rejects_truncated_buffer() {
        let (vertices, indices) = triangle();
        let bytes = encode(&vertices, &indices);
        assert!(parse_mesh(&bytes[..bytes.len() - 3]).is_err());
        assert!(parse_mesh(&bytes[..8]).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_index() {
        let (vertices, _) = triangle();
        let bytes = encode(&vertices, &[0, 1, 9]);
        assert!(parse_mesh(&bytes).is_err());
    }

    #[test]
    fn test_parse_rejects_non_triangle_list() {
        let (vertices, _) = triangle();
        let bytes = encode(&vertices, &[0, 1]);
        assert!(parse_mesh(&bytes).is_err());
    }
}
