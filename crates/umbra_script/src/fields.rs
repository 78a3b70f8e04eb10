//! Field selectors for the families of component accessors
//!
//! Each accessor family is one call parameterised by an enum instead of one
//! call per field. The collider scalars also have stable string names so
//! scripts can key them dynamically.

use crate::error::CallError;
use std::fmt;
use std::str::FromStr;
use umbra_core::ecs::ComponentType;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransformField {
    Translation,
    Rotation,
    Scale,
}

/// Which renderer component a shared renderer accessor targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Sprite,
    Circle,
}

impl RendererKind {
    pub fn component(self) -> ComponentType {
        match self {
            RendererKind::Sprite => ComponentType::SpriteRenderer,
            RendererKind::Circle => ComponentType::CircleRenderer,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CircleRendererField {
    Radius,
    Thickness,
    Fade,
}

/// Which collider component a shared collider accessor targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    Box,
    Circle,
}

impl ColliderKind {
    pub fn component(self) -> ComponentType {
        match self {
            ColliderKind::Box => ComponentType::BoxCollider2D,
            ColliderKind::Circle => ComponentType::CircleCollider2D,
        }
    }
}

/// Vector-valued collider fields. For circles `Size` is the radius vector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColliderVec2Field {
    Offset,
    Size,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColliderScalarField {
    Density,
    Friction,
    Restitution,
    RestitutionThreshold,
}

impl ColliderScalarField {
    pub const ALL: [ColliderScalarField; 4] = [
        ColliderScalarField::Density,
        ColliderScalarField::Friction,
        ColliderScalarField::Restitution,
        ColliderScalarField::RestitutionThreshold,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ColliderScalarField::Density => "density",
            ColliderScalarField::Friction => "friction",
            ColliderScalarField::Restitution => "restitution",
            ColliderScalarField::RestitutionThreshold => "restitutionThreshold",
        }
    }
}

impl FromStr for ColliderScalarField {
    type Err = CallError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| CallError::UnknownField {
                family: "collider",
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for ColliderScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of a script log message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_names_round_trip() {
        for field in ColliderScalarField::ALL {
            assert_eq!(field.name().parse::<ColliderScalarField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_scalar_name_is_rejected() {
        let err = "bounciness".parse::<ColliderScalarField>().unwrap_err();
        assert!(matches!(
            err,
            CallError::UnknownField { family: "collider", ref name } if name == "bounciness"
        ));
        // names are case-sensitive
        assert!("Density".parse::<ColliderScalarField>().is_err());
    }

    #[test]
    fn kinds_map_to_descriptors() {
        assert_eq!(RendererKind::Circle.component(), ComponentType::CircleRenderer);
        assert_eq!(ColliderKind::Box.component(), ComponentType::BoxCollider2D);
    }
}
