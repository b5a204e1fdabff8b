//! Owned dense multidimensional arrays with compile-time rank.
//!
//! This crate provides [`DenseArray`], a contiguous N-dimensional container
//! for ranks 1 through 7. Elements are addressed by a tuple of signed
//! coordinates; the mapping to a flat buffer offset goes through a stride
//! table that is precomputed once at construction.
//!
//! # Core Types
//!
//! - [`DenseArray`]: Owned dense array, const-generic over rank
//! - [`Array1`]..[`Array7`]: Rank aliases
//! - [`Layout`]: Addressing convention (row-major vs column-major)
//!
//! # Build-time configuration
//!
//! Two cargo features fix the whole-program behavior at compile time:
//!
//! - `bounds-check` (default): [`DenseArray::at`] and [`DenseArray::at_mut`]
//!   validate every coordinate against its axis extent and panic with a
//!   diagnostic before the buffer is touched. Building with
//!   `--no-default-features` removes the validation entirely.
//! - `col-major`: address elements in column-major (Fortran) order, where
//!   axis 0 varies fastest in memory. The default is row-major (C) order,
//!   where the last axis varies fastest.
//!
//! The always-checked [`DenseArray::get`]/[`DenseArray::get_mut`] and the
//! always-unchecked `unsafe` [`DenseArray::at_unchecked`] variants are
//! available in every build.
//!
//! # Example
//!
//! ```rust
//! use strided_dense::{Array2, DenseArray};
//!
//! let mut a: Array2<f64> = DenseArray::new([2, 3]).unwrap();
//! *a.at_mut([1, 2]) = 42.0;
//! assert_eq!(*a.at([1, 2]), 42.0);
//! assert_eq!(a.extent(0), 2);
//! assert_eq!(a.len(), 6);
//! ```
//!
//! Construction fails, rather than aborting, on a non-positive extent:
//!
//! ```rust
//! use strided_dense::{Array3, DenseError};
//!
//! let err = Array3::<f64>::new([4, 0, 5]).unwrap_err();
//! assert!(matches!(err, DenseError::InvalidExtent { axis: 1, extent: 0 }));
//! ```

mod array;
mod layout;

// ============================================================================
// Array types
// ============================================================================
pub use array::{Array1, Array2, Array3, Array4, Array5, Array6, Array7, DenseArray};

// ============================================================================
// Layout and stride tables
// ============================================================================
pub use layout::{col_major_strides, row_major_strides, Layout};

// ============================================================================
// Error types
// ============================================================================

/// Errors reported by array construction and checked element access.
#[derive(Debug, thiserror::Error)]
pub enum DenseError {
    /// Non-positive extent supplied at construction.
    ///
    /// Axes are validated in order; the first violation is reported.
    #[error("invalid extent {extent} for axis {axis}: extents must be at least 1")]
    InvalidExtent { axis: usize, extent: isize },

    /// Checked access with a coordinate outside its axis extent.
    #[error("index {index} out of range for axis {axis} with extent {extent}")]
    IndexOutOfRange {
        axis: usize,
        index: isize,
        extent: isize,
    },

    /// Extent product exceeds the addressable buffer size.
    #[error("extent product overflows for extents {extents:?}")]
    SizeOverflow { extents: Vec<isize> },
}

/// Result type for dense array operations.
pub type Result<T> = std::result::Result<T, DenseError>;
