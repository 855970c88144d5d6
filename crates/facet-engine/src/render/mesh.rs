use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};
use glow::HasContext;

/// CPU-side vertex layout: position only, two floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { pos: [x, y] }
    }
}

/// A static indexed mesh uploaded to GPU buffers.
///
/// Buffers are created once with `STATIC_DRAW` and never rewritten.
pub struct Mesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

impl Mesh {
    /// Uploads `vertices` and `indices` into fresh GPU buffers.
    pub fn upload(gl: &glow::Context, vertices: &[Vertex], indices: &[u32]) -> Result<Self> {
        let vao = unsafe { gl.create_vertex_array() }
            .map_err(|e| anyhow!("failed to create vertex array: {e}"))?;
        let vbo = unsafe { gl.create_buffer() }
            .map_err(|e| anyhow!("failed to create vertex buffer: {e}"))?;
        let ibo = unsafe { gl.create_buffer() }
            .map_err(|e| anyhow!("failed to create index buffer: {e}"))?;

        unsafe {
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                std::mem::size_of::<Vertex>() as i32,
                0,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );

            // The element binding is captured by the VAO; unbind the VAO first
            // so later buffer binds cannot disturb it.
            gl.bind_vertex_array(None);
        }

        Ok(Self {
            vao,
            vbo,
            ibo,
            index_count: indices.len() as i32,
        })
    }

    /// Issues one indexed draw of the whole mesh.
    ///
    /// Assumes the desired program is already bound.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
        }
    }

    /// Releases the GPU buffers.
    pub fn delete(self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ibo);
        }
    }
}
