//! Owned wrappers over engine textures and shaders
//!
//! A wrapper owns exactly one engine reference. It is deliberately not
//! `Clone`: a second owner comes from `try_clone`, which asks the engine for
//! another reference. Dropping a wrapper gives its reference back.

use crate::call::Engine;
use crate::error::CallResult;
use glam::{Vec3, Vec4};
use std::fmt;
use std::sync::Arc;
use umbra_asset::UniformValue;
use umbra_core::handles::{ShaderHandle, TextureHandle};

pub struct Texture2D {
    handle: TextureHandle,
    engine: Engine,
    live: bool,
}

impl Texture2D {
    pub fn create(engine: &Engine, path: &str) -> CallResult<Self> {
        let handle = engine.texture_create(path)?;
        Ok(Self::owned(engine, handle))
    }

    /// Take a new reference to a texture someone else already owns.
    pub fn retain(engine: &Engine, handle: TextureHandle) -> CallResult<Self> {
        engine.texture_retain(handle)?;
        Ok(Self::owned(engine, handle))
    }

    fn owned(engine: &Engine, handle: TextureHandle) -> Self {
        Self {
            handle,
            engine: Arc::clone(engine),
            live: true,
        }
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn try_clone(&self) -> CallResult<Self> {
        Self::retain(&self.engine, self.handle)
    }

    /// Replace the underlying texture with one loaded from `path`.
    ///
    /// The wrapper stays the same object; only its handle changes. On failure
    /// the old texture is kept.
    pub fn reset(&mut self, path: &str) -> CallResult<()> {
        self.handle = self.engine.texture_reset(self.handle, path)?;
        Ok(())
    }

    pub fn destroy(mut self) -> CallResult<()> {
        self.live = false;
        self.engine.texture_destroy(self.handle)
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        if !self.live {
            return;
        }
        if let Err(err) = self.engine.texture_destroy(self.handle) {
            tracing::warn!(texture = %self.handle, error = %err, "texture release failed");
        }
    }
}

impl fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Texture2D").field(&self.handle).finish()
    }
}

pub struct Shader {
    handle: ShaderHandle,
    engine: Engine,
    live: bool,
}

impl Shader {
    pub fn create(engine: &Engine, path: &str) -> CallResult<Self> {
        let handle = engine.shader_create(path)?;
        Ok(Self {
            handle,
            engine: Arc::clone(engine),
            live: true,
        })
    }

    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    pub fn try_clone(&self) -> CallResult<Self> {
        self.engine.shader_retain(self.handle)?;
        Ok(Self {
            handle: self.handle,
            engine: Arc::clone(&self.engine),
            live: true,
        })
    }

    pub fn reset(&mut self, path: &str) -> CallResult<()> {
        self.handle = self.engine.shader_reset(self.handle, path)?;
        Ok(())
    }

    pub fn destroy(mut self) -> CallResult<()> {
        self.live = false;
        self.engine.shader_destroy(self.handle)
    }

    pub fn set_int(&self, name: &str, value: i32) -> CallResult<()> {
        self.set(name, UniformValue::Int(value))
    }

    pub fn set_int_array(&self, name: &str, values: &[i32]) -> CallResult<()> {
        self.set(name, UniformValue::IntArray(values.to_vec()))
    }

    pub fn set_float(&self, name: &str, value: f32) -> CallResult<()> {
        self.set(name, UniformValue::Float(value))
    }

    pub fn set_float3(&self, name: &str, value: Vec3) -> CallResult<()> {
        self.set(name, UniformValue::Float3(value))
    }

    pub fn set_float4(&self, name: &str, value: Vec4) -> CallResult<()> {
        self.set(name, UniformValue::Float4(value))
    }

    fn set(&self, name: &str, value: UniformValue) -> CallResult<()> {
        self.engine.shader_set_uniform(self.handle, name, value)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        if !self.live {
            return;
        }
        if let Err(err) = self.engine.shader_destroy(self.handle) {
            tracing::warn!(shader = %self.handle, error = %err, "shader release failed");
        }
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shader").field(&self.handle).finish()
    }
}
