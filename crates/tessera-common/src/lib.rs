//! Common utilities for Tessera.
//!
//! This crate provides foundational types shared by the container parsers:
//!
//! - [`BinaryReader`] - Bounds-checked, zero-copy reading from byte slices
//! - [`Extent`] - Texture dimensions in texels
//! - [`MipLevel`] - One level of a mip chain located inside a data span

mod error;
mod extent;
mod reader;

pub use error::{Error, Result};
pub use extent::{Extent, MipLevel};
pub use reader::{u24_from_le, BinaryReader};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};
