pub mod error;
pub use error::*;

pub mod geometry;
pub use geometry::*;

pub mod table;
pub use table::*;

pub mod index;
pub use index::*;

pub mod join;
pub use join::*;

#[inline]
pub(crate) fn default<T: Default>() -> T {
    T::default()
}

pub type Id = u64;
