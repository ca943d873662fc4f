//! Character attributes.
//!
//! Each attribute keeps only its inputs (`base` and `modifier`); the total is
//! always computed, so a partial update can never leave a stale total behind.

/// A single attribute score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub base: i32,
    pub modifier: i32,
}

impl Attribute {
    pub const fn new(base: i32) -> Self {
        Self { base, modifier: 0 }
    }

    pub const fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    pub const fn with_base(mut self, base: i32) -> Self {
        self.base = base;
        self
    }

    #[inline]
    pub const fn total(&self) -> i32 {
        self.base + self.modifier
    }
}

/// Names the four attributes in an [`Attributes`] bundle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AttributeKind {
    Grit,
    Speed,
    Technique,
    Ego,
}

/// The four-attribute bundle carried by actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub grit: Attribute,
    pub speed: Attribute,
    pub technique: Attribute,
    pub ego: Attribute,
}

impl Attributes {
    pub const fn new(grit: Attribute, speed: Attribute, technique: Attribute, ego: Attribute) -> Self {
        Self {
            grit,
            speed,
            technique,
            ego,
        }
    }

    pub fn get(&self, kind: AttributeKind) -> Attribute {
        match kind {
            AttributeKind::Grit => self.grit,
            AttributeKind::Speed => self.speed,
            AttributeKind::Technique => self.technique,
            AttributeKind::Ego => self.ego,
        }
    }

    /// Returns a copy with one attribute replaced.
    ///
    /// Components are immutable values, so attribute changes go through this
    /// and a fresh `set` on the store.
    #[must_use]
    pub fn with(mut self, kind: AttributeKind, attribute: Attribute) -> Self {
        match kind {
            AttributeKind::Grit => self.grit = attribute,
            AttributeKind::Speed => self.speed = attribute,
            AttributeKind::Technique => self.technique = attribute,
            AttributeKind::Ego => self.ego = attribute,
        }
        self
    }

    pub fn total(&self, kind: AttributeKind) -> i32 {
        self.get(kind).total()
    }
}
