//! Precomputed Chebyshev tables: file format, builder and provider.

pub mod builder;
pub mod format;
pub mod provider;
