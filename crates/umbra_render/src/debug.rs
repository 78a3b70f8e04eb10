//! Immediate-mode debug drawing
//!
//! Scripts queue primitives during a tick; the renderer drains the list once
//! per frame. Nothing here touches the GPU.

use glam::{Vec3, Vec4};
use umbra_core::handles::ShaderHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Quad {
        position: Vec3,
        scale: Vec3,
        colour: Vec4,
    },
    RotatedQuad {
        position: Vec3,
        scale: Vec3,
        /// Euler angles in radians.
        rotation: Vec3,
        colour: Vec4,
    },
    QuadShader {
        position: Vec3,
        scale: Vec3,
        colour: Vec4,
        shader: ShaderHandle,
    },
    Line {
        from: Vec3,
        to: Vec3,
        colour: Vec4,
    },
}

/// Commands queued since the last drain, in submission order.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Hand the queued commands to the renderer and start a fresh frame.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}
