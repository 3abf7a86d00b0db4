// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entities and their care rating.
//!
//! An [`Entity`] is a transient value the host rebuilds from its own records
//! whenever they change. Nothing in this crate keeps entities between calls.

use alloc::string::String;
use core::fmt;

use kurbo::Point;

/// Stable, opaque identifier of an entity.
///
/// Hosts assign ids; the engine only compares them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntityId(pub u64);

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// How much an entity matters to its owner.
///
/// A small closed ordinal set. Absence of a rating is modeled as
/// `Option<Care>::None` on the entity, not as a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Care {
    /// Strongest negative valence.
    Hate,
    /// Mild negative valence.
    Dislike,
    /// Rated, but neither liked nor disliked.
    Neutral,
    /// Mild positive valence.
    Like,
    /// Strong positive valence.
    Love,
    /// The distinguished maximum, drawn as a star.
    Dream,
}

impl Care {
    /// Every documented care value, lowest first.
    pub const ALL: [Self; 6] = [
        Self::Hate,
        Self::Dislike,
        Self::Neutral,
        Self::Like,
        Self::Love,
        Self::Dream,
    ];

    /// Maps a raw ordinal level (`-2..=3`) to a care value.
    ///
    /// Returns `None` for any level outside the documented domain.
    #[must_use]
    pub const fn from_level(level: i8) -> Option<Self> {
        match level {
            -2 => Some(Self::Hate),
            -1 => Some(Self::Dislike),
            0 => Some(Self::Neutral),
            1 => Some(Self::Like),
            2 => Some(Self::Love),
            3 => Some(Self::Dream),
            _ => None,
        }
    }

    /// Returns the raw ordinal level of this care value.
    #[must_use]
    pub const fn level(self) -> i8 {
        match self {
            Self::Hate => -2,
            Self::Dislike => -1,
            Self::Neutral => 0,
            Self::Like => 1,
            Self::Love => 2,
            Self::Dream => 3,
        }
    }

    /// Returns `true` for the star-styled maximum.
    #[must_use]
    pub const fn is_dream(self) -> bool {
        matches!(self, Self::Dream)
    }
}

/// What kind of content an entity carries.
///
/// Opaque to the renderer; kept so hosts can route overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Plain text.
    #[default]
    Text,
    /// An image reference.
    Image,
    /// An audio reference.
    Audio,
    /// A video reference.
    Video,
    /// A geographic location.
    Location,
    /// Anything else.
    Other,
}

/// A single thing placed on the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Stable identifier.
    pub id: EntityId,
    /// World-space position.
    pub position: Point,
    /// Care rating, if any.
    pub care: Option<Care>,
    /// Content type tag.
    pub kind: ContentKind,
    /// Content or media reference; never drawn by the renderer.
    pub content: String,
    /// Per-render opacity override in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Per-render scale override.
    pub scale: Option<f64>,
}

impl Entity {
    /// Creates an entity at `position` with no care rating and no overrides.
    #[must_use]
    pub fn new(id: EntityId, position: Point) -> Self {
        Self {
            id,
            position,
            care: None,
            kind: ContentKind::default(),
            content: String::new(),
            opacity: None,
            scale: None,
        }
    }

    /// Sets the care rating.
    #[must_use]
    pub fn with_care(mut self, care: Option<Care>) -> Self {
        self.care = care;
        self
    }

    /// Sets the content tag and reference.
    #[must_use]
    pub fn with_content(mut self, kind: ContentKind, content: impl Into<String>) -> Self {
        self.kind = kind;
        self.content = content.into();
        self
    }

    /// Sets the per-render opacity override.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets the per-render scale override.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Effective opacity for this render, clamped to `[0, 1]`.
    ///
    /// Non-finite overrides fall back to fully opaque.
    #[must_use]
    pub fn effective_opacity(&self) -> f64 {
        match self.opacity {
            Some(o) if o.is_finite() => o.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    /// Effective scale for this render.
    ///
    /// Negative or non-finite overrides fall back to `1.0`.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        match self.scale {
            Some(s) if s.is_finite() && s >= 0.0 => s,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trip_covers_domain() {
        for care in Care::ALL {
            assert_eq!(Care::from_level(care.level()), Some(care));
        }
        assert_eq!(Care::from_level(4), None);
        assert_eq!(Care::from_level(-3), None);
    }

    #[test]
    fn only_dream_is_dream() {
        let dreams = Care::ALL.iter().filter(|c| c.is_dream()).count();
        assert_eq!(dreams, 1);
    }

    #[test]
    fn overrides_default_and_sanitize() {
        let e = Entity::new(EntityId(1), Point::ORIGIN);
        assert_eq!(e.effective_opacity(), 1.0);
        assert_eq!(e.effective_scale(), 1.0);

        let e = e.with_opacity(1.7).with_scale(-2.0);
        assert_eq!(e.effective_opacity(), 1.0);
        assert_eq!(e.effective_scale(), 1.0);

        let e = e.with_opacity(0.25).with_scale(2.0);
        assert_eq!(e.effective_opacity(), 0.25);
        assert_eq!(e.effective_scale(), 2.0);
    }
}
