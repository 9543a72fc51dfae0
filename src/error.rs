//! Error types for scene building and resource loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::node::NodeId;

/// Errors raised while assembling a scene graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The child is already attached somewhere else.
    #[error("cannot add node {child:?} to multiple parents (already under {parent:?}), copy first")]
    AlreadyParented { child: NodeId, parent: NodeId },

    /// Attaching the child would make a node its own ancestor.
    #[error("cannot add node {child:?} beneath itself or one of its descendants ({parent:?})")]
    Cycle { child: NodeId, parent: NodeId },
}

/// Error type for resource loading operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Failed to parse an OBJ file.
    #[error("Failed to load OBJ file '{path}': {source}")]
    ObjLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// Failed to parse OBJ data from memory.
    #[error("Failed to parse OBJ data: {0}")]
    ObjParse(#[from] tobj::LoadError),

    /// OBJ file contains no meshes.
    #[error("OBJ data contains no meshes")]
    NoMeshes,

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image loading error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for scene graph operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
