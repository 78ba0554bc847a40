//! Core [`Component`] trait and runtime type identity.
//!
//! Components are plain data attached to entities. An entity holds at most
//! one component per type, so each component type needs a stable key.
//! [`ComponentTypeId`] hashes the component's declared **string name**
//! rather than relying on compiler-assigned type IDs, which keeps the key
//! identical across builds and usable in `const` contexts.

use std::any::Any;

/// A stable key identifying a component type by its string name.
///
/// The key is a 64-bit FNV-1a hash of the name, so it depends on nothing
/// but the string: the same name yields the same ID in every build, and
/// distinct names yield distinct IDs (barring hash collisions, which are
/// vanishingly unlikely at this scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Hash a component's string name into its type key.
    ///
    /// FNV-1a folds each byte of the UTF-8 name into a 64-bit state (xor
    /// the byte, multiply by the FNV prime). The whole computation is
    /// `const`, so IDs can live in constants.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Shorthand for [`ComponentTypeId::from_name`] over `C::type_name()`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self::from_name(C::type_name())
    }
}

/// Downcast seam for trait objects stored behind core abstractions.
///
/// Blanket-implemented for every `'static` type, so implementors of
/// [`Component`] (and of the world's manager/system traits) get it for
/// free.
pub trait AsAny {
    /// The value as a `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The value as a `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The core component trait.
///
/// A component is a plain data payload attached to exactly one entity per
/// type. Components have no behavior of their own; systems act on them.
///
/// # Examples
///
/// ```rust
/// use pulse_component::Component;
///
/// #[derive(Debug, Clone, Copy)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: AsAny + 'static {
    /// A human-readable name for this component type, unique within the
    /// application. Keys the component inside an entity.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Returns the [`ComponentTypeId`] for this component type.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::from_name(Self::type_name())
    }
}
