//! Umbra Engine Core
//!
//! Contains the fundamental simulation data:
//! - Entity Component System (ECS)
//! - Built-in component records
//! - Opaque resource handles
//! - Fixed-tick time

pub mod components;
pub mod ecs;
pub mod handles;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
