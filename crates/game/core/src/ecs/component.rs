//! The closed set of component kinds.
//!
//! Every component value is one variant of [`Component`]; its fieldless mirror
//! [`ComponentKind`] indexes the per-kind columns of the store. Typed access
//! goes through [`ComponentType`], implemented for each payload type by the
//! `components!` macro below.

use std::ops::Add;

use super::attributes::Attributes;
use crate::color::{self, Rgb};

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<(i32, i32)> for Position {
    type Output = Position;

    fn add(self, (dx, dy): (i32, i32)) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// Display name of an entity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Flavor text shown when examining an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Description(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlocksMovement(pub bool);

impl Default for BlocksMovement {
    fn default() -> Self {
        Self(true)
    }
}

/// Marks the entity controlled by the human player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsPlayer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsActor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsItem;

/// An entity's icon and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graphic {
    pub ch: char,
    pub fg: Rgb,
}

impl Graphic {
    pub const fn new(ch: char, fg: Rgb) -> Self {
        Self { ch, fg }
    }
}

impl Default for Graphic {
    fn default() -> Self {
        Self::new('!', color::WHITE)
    }
}

/// Draw priority; higher ranks are drawn later and end up on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderOrder {
    #[default]
    Corpse,
    Item,
    Actor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightEmitter {
    pub radius: u32,
}

/// Hit points and combat numbers of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub hp: i32,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub const fn new(max_hp: i32, defense: i32, power: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            defense,
            power,
        }
    }

    /// Returns a copy with `hp` clamped into `0..=max_hp`.
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.clamp(0, self.max_hp);
        self
    }

    #[inline]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Names the behavior that drives a non-player actor.
///
/// The behavior itself is resolved through the engine's
/// [`BehaviorRegistry`](crate::engine::BehaviorRegistry).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ai {
    pub behavior: String,
}

impl Ai {
    pub fn new(behavior: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
        }
    }
}

/// Implemented by every component payload type for typed store access.
pub trait ComponentType: Sized + Into<Component> {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;
}

macro_rules! components {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// A component value of any kind.
        #[derive(Clone, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Component {
            $($variant($ty),)+
        }

        /// Fieldless discriminant of [`Component`].
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            strum::EnumCount,
            strum::EnumIter,
            strum::IntoStaticStr,
            strum::Display,
        )]
        pub enum ComponentKind {
            $($variant,)+
        }

        impl Component {
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(Component::$variant(_) => ComponentKind::$variant,)+
                }
            }
        }

        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$variant(value)
                }
            }

            impl ComponentType for $ty {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn from_component(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

components! {
    Position(Position),
    Name(Name),
    Description(Description),
    BlocksMovement(BlocksMovement),
    IsPlayer(IsPlayer),
    IsActor(IsActor),
    IsItem(IsItem),
    Graphic(Graphic),
    RenderOrder(RenderOrder),
    LightEmitter(LightEmitter),
    Fighter(Fighter),
    Attributes(Attributes),
    Ai(Ai),
}

impl ComponentKind {
    /// Dense column index used by the store.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn kind_indices_are_dense() {
        for (expected, kind) in ComponentKind::iter().enumerate() {
            assert_eq!(kind.index(), expected);
        }
        assert_eq!(ComponentKind::iter().count(), ComponentKind::COUNT);
    }

    #[test]
    fn typed_access_matches_only_its_own_variant() {
        let component = Component::from(Position::new(3, 4));
        assert_eq!(component.kind(), ComponentKind::Position);
        assert_eq!(
            Position::from_component(&component),
            Some(&Position::new(3, 4))
        );
        assert_eq!(Name::from_component(&component), None);
    }

    #[test]
    fn position_adds_direction_vectors() {
        assert_eq!(Position::new(2, 2) + (-1, 3), Position::new(1, 5));
    }

    #[test]
    fn fighter_hp_is_clamped() {
        let fighter = Fighter::new(10, 0, 3);
        assert_eq!(fighter.with_hp(25).hp, 10);
        assert!(!fighter.with_hp(-4).is_alive());
    }

    #[test]
    fn render_order_puts_items_beneath_actors() {
        assert!(RenderOrder::Corpse < RenderOrder::Item);
        assert!(RenderOrder::Item < RenderOrder::Actor);
    }
}
