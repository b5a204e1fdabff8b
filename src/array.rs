//! The owned dense array container.
//!
//! [`DenseArray`] owns a single contiguous buffer whose length is the
//! product of its per-axis extents. Both stride tables are precomputed at
//! construction; offset computation uses the one selected by the
//! `col-major` feature. The array is deliberately neither `Clone` nor
//! `Copy`: duplicating the buffer is never implicit, and no duplicating
//! operation is provided.

use crate::layout::{col_major_strides, linear_offset, row_major_strides, Layout};
use crate::{DenseError, Result};
use std::ops::{Index, IndexMut};

/// An owned dense N-dimensional array over a single contiguous buffer.
///
/// # Type Parameters
/// - `T`: Element type
/// - `N`: Number of axes (const generic, 1 through 7 by convention)
///
/// Extents and coordinates are signed; construction rejects extents below 1
/// and checked access rejects coordinates outside `[0, extent)`. Element
/// references borrow the array, so they cannot outlive it.
///
/// # Example
/// ```rust
/// use strided_dense::DenseArray;
///
/// let a = DenseArray::from_fn([2, 3], |idx| idx[0] * 10 + idx[1]).unwrap();
/// assert_eq!(*a.at([1, 2]), 12);
/// ```
#[derive(Debug)]
pub struct DenseArray<T, const N: usize> {
    data: Vec<T>,
    extents: [isize; N],
    col_strides: [isize; N],
    row_strides: [isize; N],
}

/// Rank-1 array.
pub type Array1<T> = DenseArray<T, 1>;
/// Rank-2 array.
pub type Array2<T> = DenseArray<T, 2>;
/// Rank-3 array.
pub type Array3<T> = DenseArray<T, 3>;
/// Rank-4 array.
pub type Array4<T> = DenseArray<T, 4>;
/// Rank-5 array.
pub type Array5<T> = DenseArray<T, 5>;
/// Rank-6 array.
pub type Array6<T> = DenseArray<T, 6>;
/// Rank-7 array.
pub type Array7<T> = DenseArray<T, 7>;

/// Validate extents and return the buffer length.
///
/// Axis 0 is checked first and the first non-positive extent wins, so an
/// axis-0 violation masks later ones. The product is computed with checked
/// multiplication and must stay addressable.
fn validate_extents<const N: usize>(extents: &[isize; N]) -> Result<usize> {
    for axis in 0..N {
        let extent = extents[axis];
        if extent <= 0 {
            return Err(DenseError::InvalidExtent { axis, extent });
        }
    }
    let mut len = 1usize;
    for &extent in extents.iter() {
        len = len
            .checked_mul(extent as usize)
            .filter(|&l| l <= isize::MAX as usize)
            .ok_or_else(|| DenseError::SizeOverflow {
                extents: extents.to_vec(),
            })?;
    }
    Ok(len)
}

/// Step `index` to the next coordinate tuple in the active convention's
/// memory order, wrapping to all zeros after the last tuple.
fn advance<const N: usize>(index: &mut [isize; N], extents: &[isize; N]) {
    match Layout::active() {
        Layout::ColMajor => {
            for axis in 0..N {
                index[axis] += 1;
                if index[axis] < extents[axis] {
                    return;
                }
                index[axis] = 0;
            }
        }
        Layout::RowMajor => {
            for axis in (0..N).rev() {
                index[axis] += 1;
                if index[axis] < extents[axis] {
                    return;
                }
                index[axis] = 0;
            }
        }
    }
}

impl<T, const N: usize> DenseArray<T, N> {
    fn with_buffer(data: Vec<T>, extents: [isize; N]) -> Self {
        Self {
            data,
            extents,
            col_strides: col_major_strides(&extents),
            row_strides: row_major_strides(&extents),
        }
    }

    /// Build an array by invoking `f` for every coordinate tuple.
    ///
    /// `f` is called in the active convention's memory order, so the
    /// buffer fills sequentially.
    ///
    /// # Errors
    /// Fails with [`DenseError::InvalidExtent`] before anything is
    /// allocated if an extent is below 1.
    pub fn from_fn(extents: [isize; N], mut f: impl FnMut(&[isize; N]) -> T) -> Result<Self> {
        let len = validate_extents(&extents)?;
        let mut data = Vec::with_capacity(len);
        let mut index = [0isize; N];
        for _ in 0..len {
            data.push(f(&index));
            advance(&mut index, &extents);
        }
        Ok(Self::with_buffer(data, extents))
    }

    /// Extent of `axis`, as supplied at construction.
    #[inline]
    pub fn extent(&self, axis: usize) -> isize {
        self.extents[axis]
    }

    /// Extents of all axes.
    #[inline]
    pub fn extents(&self) -> &[isize; N] {
        &self.extents
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        N
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The stride table used for offset computation in this build.
    #[inline]
    pub fn strides(&self) -> &[isize; N] {
        match Layout::active() {
            Layout::ColMajor => &self.col_strides,
            Layout::RowMajor => &self.row_strides,
        }
    }

    /// The addressing convention compiled into this build.
    #[inline]
    pub fn layout(&self) -> Layout {
        Layout::active()
    }

    /// Compute the flat offset for the given coordinate tuple.
    #[inline]
    fn linear_index(&self, index: &[isize; N]) -> isize {
        linear_offset(index, self.strides())
    }

    /// Validate every coordinate against its axis extent.
    ///
    /// Axes are checked in order; the first violation is reported.
    fn check_index(&self, index: &[isize; N]) -> Result<()> {
        for axis in 0..N {
            let x = index[axis];
            if x < 0 || x >= self.extents[axis] {
                return Err(DenseError::IndexOutOfRange {
                    axis,
                    index: x,
                    extent: self.extents[axis],
                });
            }
        }
        Ok(())
    }

    /// Reference to the element at `index`.
    ///
    /// With the `bounds-check` feature, every coordinate is validated and a
    /// violation panics with an [`DenseError::IndexOutOfRange`] diagnostic
    /// before the buffer is touched. Without it, no validation happens and
    /// an out-of-range coordinate addresses the wrong element.
    #[inline]
    pub fn at(&self, index: [isize; N]) -> &T {
        #[cfg(feature = "bounds-check")]
        {
            if let Err(err) = self.check_index(&index) {
                panic!("{err}");
            }
        }
        &self.data[self.linear_index(&index) as usize]
    }

    /// Mutable reference to the element at `index`.
    ///
    /// Same checking behavior as [`at`](Self::at). Writes through the
    /// returned reference are visible to every subsequent read; there is
    /// exactly one buffer.
    #[inline]
    pub fn at_mut(&mut self, index: [isize; N]) -> &mut T {
        #[cfg(feature = "bounds-check")]
        {
            if let Err(err) = self.check_index(&index) {
                panic!("{err}");
            }
        }
        let idx = self.linear_index(&index) as usize;
        &mut self.data[idx]
    }

    /// Reference to the element at `index`, or an error naming the first
    /// out-of-range axis. Validated in every build mode.
    #[inline]
    pub fn get(&self, index: [isize; N]) -> Result<&T> {
        self.check_index(&index)?;
        Ok(&self.data[self.linear_index(&index) as usize])
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: [isize; N]) -> Result<&mut T> {
        self.check_index(&index)?;
        let idx = self.linear_index(&index) as usize;
        Ok(&mut self.data[idx])
    }

    /// Reference to the element at `index` without any validation.
    ///
    /// # Safety
    /// Every coordinate must lie in `[0, extent(axis))`.
    #[inline]
    pub unsafe fn at_unchecked(&self, index: [isize; N]) -> &T {
        self.data.get_unchecked(self.linear_index(&index) as usize)
    }

    /// Mutable reference to the element at `index` without any validation.
    ///
    /// # Safety
    /// Every coordinate must lie in `[0, extent(axis))`.
    #[inline]
    pub unsafe fn at_unchecked_mut(&mut self, index: [isize; N]) -> &mut T {
        let idx = self.linear_index(&index) as usize;
        self.data.get_unchecked_mut(idx)
    }

    /// Iterate over all elements in memory order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Mutable iteration over all elements in memory order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T: Clone, const N: usize> DenseArray<T, N> {
    /// Create an array with every element set to `elem`.
    ///
    /// # Errors
    /// Fails with [`DenseError::InvalidExtent`] before anything is
    /// allocated if an extent is below 1.
    pub fn from_elem(extents: [isize; N], elem: T) -> Result<Self> {
        let len = validate_extents(&extents)?;
        Ok(Self::with_buffer(vec![elem; len], extents))
    }
}

impl<T: Clone + Default, const N: usize> DenseArray<T, N> {
    /// Create an array filled with `T::default()`.
    ///
    /// # Errors
    /// Fails with [`DenseError::InvalidExtent`] before anything is
    /// allocated if an extent is below 1.
    pub fn new(extents: [isize; N]) -> Result<Self> {
        Self::from_elem(extents, T::default())
    }
}

impl<T, const N: usize> Index<[isize; N]> for DenseArray<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: [isize; N]) -> &T {
        self.at(index)
    }
}

impl<T, const N: usize> IndexMut<[isize; N]> for DenseArray<T, N> {
    #[inline]
    fn index_mut(&mut self, index: [isize; N]) -> &mut T {
        self.at_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reports_extents() {
        let a: Array3<f64> = DenseArray::new([2, 3, 4]).unwrap();
        assert_eq!(a.extent(0), 2);
        assert_eq!(a.extent(1), 3);
        assert_eq!(a.extent(2), 4);
        assert_eq!(a.extents(), &[2, 3, 4]);
        assert_eq!(a.rank(), 3);
        assert_eq!(a.len(), 24);
    }

    #[test]
    fn test_invalid_extent_first_violation_wins() {
        let err = Array2::<f64>::new([0, -3]).unwrap_err();
        assert!(matches!(
            err,
            DenseError::InvalidExtent { axis: 0, extent: 0 }
        ));

        let err = Array2::<f64>::new([2, 0]).unwrap_err();
        assert!(matches!(
            err,
            DenseError::InvalidExtent { axis: 1, extent: 0 }
        ));

        let err = Array3::<f64>::new([2, -1, 0]).unwrap_err();
        assert!(matches!(
            err,
            DenseError::InvalidExtent { axis: 1, extent: -1 }
        ));
    }

    #[test]
    fn test_all_positive_extents_never_fail() {
        assert!(Array1::<u8>::new([1]).is_ok());
        assert!(Array2::<u8>::new([1, 1]).is_ok());
        assert!(Array2::<u8>::new([7, 11]).is_ok());
    }

    #[test]
    fn test_size_overflow() {
        let err = Array2::<u8>::new([isize::MAX, isize::MAX]).unwrap_err();
        assert!(matches!(err, DenseError::SizeOverflow { .. }));
    }

    #[test]
    fn test_offsets_are_a_permutation() {
        let a: Array2<u32> = DenseArray::new([2, 3]).unwrap();
        let strides = a.strides();
        let mut offsets = Vec::new();
        for x1 in 0..2 {
            for x2 in 0..3 {
                offsets.push(x1 * strides[0] + x2 * strides[1]);
            }
        }
        offsets.sort_unstable();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_roundtrip_rank2() {
        let mut a: Array2<isize> = DenseArray::new([4, 5]).unwrap();
        for x1 in 0..4 {
            for x2 in 0..5 {
                *a.at_mut([x1, x2]) = x1 * 100 + x2;
            }
        }
        for x1 in 0..4 {
            for x2 in 0..5 {
                assert_eq!(*a.at([x1, x2]), x1 * 100 + x2);
            }
        }
    }

    #[test]
    fn test_from_fn_matches_coordinates() {
        let a = DenseArray::from_fn([3, 4], |idx| idx[0] * 10 + idx[1]).unwrap();
        for x1 in 0..3 {
            for x2 in 0..4 {
                assert_eq!(*a.at([x1, x2]), x1 * 10 + x2);
            }
        }
    }

    #[test]
    fn test_get_checks_every_build() {
        let a: Array2<f64> = DenseArray::new([2, 3]).unwrap();
        assert!(a.get([1, 2]).is_ok());
        assert!(matches!(
            a.get([2, 0]),
            Err(DenseError::IndexOutOfRange {
                axis: 0,
                index: 2,
                extent: 2
            })
        ));
        assert!(matches!(
            a.get([0, -1]),
            Err(DenseError::IndexOutOfRange {
                axis: 1,
                index: -1,
                extent: 3
            })
        ));
        // An axis-0 violation masks the axis-1 violation.
        assert!(matches!(
            a.get([-1, 99]),
            Err(DenseError::IndexOutOfRange { axis: 0, .. })
        ));
    }

    #[test]
    fn test_get_mut_writes() {
        let mut a: Array1<u8> = DenseArray::new([3]).unwrap();
        *a.get_mut([1]).unwrap() = 7;
        assert_eq!(*a.get([1]).unwrap(), 7);
        assert!(a.get_mut([3]).is_err());
    }

    #[cfg(feature = "bounds-check")]
    #[test]
    #[should_panic(expected = "out of range for axis 1")]
    fn test_at_panics_one_past_end() {
        let a: Array2<f64> = DenseArray::new([2, 3]).unwrap();
        a.at([0, 3]);
    }

    #[cfg(feature = "bounds-check")]
    #[test]
    #[should_panic(expected = "out of range for axis 0")]
    fn test_at_panics_negative() {
        let a: Array2<f64> = DenseArray::new([2, 3]).unwrap();
        a.at([-1, 0]);
    }

    #[test]
    fn test_at_last_valid_index() {
        let a = DenseArray::from_fn([2, 3], |idx| idx[0] * 3 + idx[1]).unwrap();
        assert_eq!(*a.at([1, 2]), 5);
    }

    #[test]
    fn test_unchecked_access() {
        let mut a = DenseArray::from_fn([2, 3], |idx| idx[0] * 3 + idx[1]).unwrap();
        unsafe {
            assert_eq!(*a.at_unchecked([1, 1]), 4);
            *a.at_unchecked_mut([0, 2]) = -9;
        }
        assert_eq!(*a.at([0, 2]), -9);
    }

    #[test]
    fn test_index_sugar() {
        let mut a: Array2<i32> = DenseArray::new([2, 2]).unwrap();
        a[[1, 0]] = 5;
        assert_eq!(a[[1, 0]], 5);
    }

    #[test]
    fn test_strides_match_active_layout() {
        let a: Array2<u8> = DenseArray::new([2, 3]).unwrap();
        assert_eq!(*a.strides(), a.layout().strides(&[2, 3]));
        match a.layout() {
            Layout::RowMajor => assert_eq!(a.strides(), &[3, 1]),
            Layout::ColMajor => assert_eq!(a.strides(), &[1, 2]),
        }
    }

    #[test]
    fn test_mutation_visible_through_iter() {
        let mut a: Array2<u8> = DenseArray::new([2, 2]).unwrap();
        *a.at_mut([0, 0]) = 1;
        *a.at_mut([1, 1]) = 2;
        assert_eq!(a.iter().copied().sum::<u8>(), 3);
        for v in a.iter_mut() {
            *v += 1;
        }
        assert_eq!(*a.at([0, 0]), 2);
    }
}
