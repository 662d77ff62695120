//! Error types for mesh data validation.

use thiserror::Error;

/// Errors reported by structural validation of vertex data.
///
/// These indicate malformed buffers (typically from asset ingest), not
/// absent ones; absence is modeled as `None` on the accessor side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Position buffer length is not a multiple of 3.
    #[error("position buffer length {0} is not a multiple of 3")]
    PositionLength(usize),

    /// Normal buffer length does not match the position buffer.
    #[error("normal buffer length {got} does not match position buffer length {expected}")]
    NormalLength {
        /// Actual normal buffer length.
        got: usize,
        /// Expected length (same as the position buffer).
        expected: usize,
    },

    /// UV buffer does not hold 2 floats per vertex.
    #[error("uv buffer length {got} does not cover {vertices} vertices")]
    UvLength {
        /// Actual uv buffer length.
        got: usize,
        /// Number of vertices in the position buffer.
        vertices: usize,
    },

    /// Index buffer length is not a multiple of 3.
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexLength(usize),

    /// An index refers past the end of the vertex buffers.
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Number of vertices in the position buffer.
        vertices: usize,
    },
}
