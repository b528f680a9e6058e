//! Shareable metadata for `muriel_core::lang` registries.
//!
//! These types are `Copy` so registries can live in `const` tables.

/// Language version a vocabulary item is available since, as `(major, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u16, pub u16);

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Examples
/// ```rust
/// use muriel_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}
