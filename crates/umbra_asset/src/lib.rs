//! Umbra Asset Pipeline
//!
//! Backs the texture and shader lifecycle the script boundary exposes:
//! paths are resolved against an asset root, loaded resources live in a
//! reference-counted registry, and shader uniforms are recorded per program.

mod error;
pub mod registry;

pub use error::AssetError;
pub use registry::{ResourceHandle, ResourceRegistry};

use glam::{Vec3, Vec4};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use umbra_core::handles::{ShaderHandle, TextureHandle};

/// A loaded 2D texture. Pixel decoding belongs to the renderer; the asset
/// layer only tracks where the image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub path: PathBuf,
    pub byte_len: u64,
}

/// Value accepted by a shader uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    IntArray(Vec<i32>),
    Float(f32),
    Float3(Vec3),
    Float4(Vec4),
}

/// A shader program and the uniform values last written to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    pub path: PathBuf,
    pub source: String,
    uniforms: HashMap<String, UniformValue>,
}

impl Shader {
    pub fn set_uniform(&mut self, name: impl Into<String>, value: UniformValue) {
        self.uniforms.insert(name.into(), value);
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }
}

pub type TextureRegistry = ResourceRegistry<TextureHandle, Texture>;
pub type ShaderRegistry = ResourceRegistry<ShaderHandle, Shader>;

/// Resolves asset paths relative to a root directory and loads them.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute paths are used as-is; relative ones are joined onto the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, AssetError> {
        let candidate = Path::new(path);
        let full = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };
        if full.is_file() {
            Ok(full)
        } else {
            Err(AssetError::NotFound {
                path: PathBuf::from(path),
            })
        }
    }

    pub fn load_texture(&self, path: &str) -> Result<Texture, AssetError> {
        let full = self.resolve(path)?;
        let metadata = fs::metadata(&full).map_err(|source| AssetError::Io {
            path: full.clone(),
            source,
        })?;
        tracing::debug!(path = %full.display(), bytes = metadata.len(), "texture loaded");
        Ok(Texture {
            path: full,
            byte_len: metadata.len(),
        })
    }

    pub fn load_shader(&self, path: &str) -> Result<Shader, AssetError> {
        let full = self.resolve(path)?;
        let source = fs::read_to_string(&full).map_err(|source| AssetError::Io {
            path: full.clone(),
            source,
        })?;
        if source.trim().is_empty() {
            return Err(AssetError::EmptyShader { path: full });
        }
        tracing::debug!(path = %full.display(), "shader loaded");
        Ok(Shader {
            path: full,
            source,
            uniforms: HashMap::new(),
        })
    }
}
