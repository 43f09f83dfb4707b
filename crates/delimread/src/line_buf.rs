//! The caller-owned buffer handle threaded through every read.
//!
//! A `LineBuf` behaves like the `(char **lineptr, size_t *n)` pair of
//! `getline`: storage plus capacity, reused across calls and grown as needed.
//! It also records the logical length of the most recent read.
//!
//! Invariant: once allocated, `len < capacity` and the unit at `len` is
//! [`Unit::NUL`]. All units past `len` are NUL as well, so the storage is
//! fully initialized at all times.

use crate::{ReadError, Unit};

/// Growable, reusable, NUL-terminated storage for one line of units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuf<U: Unit> {
    units: Vec<U>,
    len: usize,
}

impl<U: Unit> Default for LineBuf<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> LineBuf<U> {
    /// Creates an unallocated buffer. The first read allocates it.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            units: Vec::new(),
            len: 0,
        }
    }

    /// Creates a buffer that already owns `capacity` units of storage.
    ///
    /// Reads reuse this storage for as long as lines fit. A capacity of zero
    /// yields an unallocated buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: vec![U::NUL; capacity],
            len: 0,
        }
    }

    /// Logical length of the last read, excluding the sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the last read left no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated storage in units, including room for the sentinel.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` once storage has been allocated.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        !self.units.is_empty()
    }

    /// Content of the last read, without the sentinel.
    #[must_use]
    pub fn as_slice(&self) -> &[U] {
        &self.units[..self.len]
    }

    /// Content of the last read followed by the sentinel. Empty while
    /// unallocated.
    #[must_use]
    pub fn as_slice_with_nul(&self) -> &[U] {
        if self.is_allocated() {
            &self.units[..=self.len]
        } else {
            &[]
        }
    }

    /// Pointer to the start of the storage, for identity checks across reads.
    #[must_use]
    pub fn as_ptr(&self) -> *const U {
        self.units.as_ptr()
    }

    /// Last content unit, if any.
    #[must_use]
    pub fn last(&self) -> Option<U> {
        self.as_slice().last().copied()
    }

    /// Consumes the buffer, returning its content without the sentinel.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<U> {
        self.units.truncate(self.len);
        self.units
    }

    /// Allocates `capacity` units, clamped to `max_capacity`, if nothing is
    /// allocated yet.
    pub(crate) fn ensure_allocated(
        &mut self,
        capacity: usize,
        max_capacity: usize,
    ) -> Result<(), ReadError> {
        if self.is_allocated() {
            return Ok(());
        }
        let capacity = capacity.min(capacity_limit::<U>(max_capacity)).max(1);
        self.units = try_filled(capacity).ok_or(ReadError::OutOfMemory)?;
        log::trace!("allocated line buffer of {capacity} units");
        Ok(())
    }

    /// Resets the logical length to zero, keeping the allocation.
    pub(crate) fn reset(&mut self) {
        self.len = 0;
        self.terminate();
    }

    /// Returns `true` if storing one more unit would leave no room for the
    /// sentinel.
    pub(crate) fn is_full(&self) -> bool {
        self.len + 1 == self.capacity()
    }

    /// Doubles the capacity, failing closed before `max_capacity` is exceeded.
    pub(crate) fn grow(&mut self, max_capacity: usize) -> Result<(), ReadError> {
        let capacity = self.capacity();
        let limit = capacity_limit::<U>(max_capacity);
        if capacity > limit / 2 {
            return Err(ReadError::Overflow { max_capacity: limit });
        }
        let doubled = capacity * 2;
        self.units
            .try_reserve_exact(doubled - capacity)
            .map_err(|_| ReadError::OutOfMemory)?;
        self.units.resize(doubled, U::NUL);
        log::trace!("grew line buffer from {capacity} to {doubled} units");
        Ok(())
    }

    /// Appends a unit. The caller guarantees room via [`Self::is_full`] and
    /// [`Self::grow`].
    pub(crate) fn push(&mut self, unit: U) {
        debug_assert!(self.len + 1 < self.capacity());
        self.units[self.len] = unit;
        self.len += 1;
        self.terminate();
    }

    /// Overwrites the last content unit.
    pub(crate) fn set_last(&mut self, unit: U) {
        if let Some(slot) = self.len.checked_sub(1) {
            self.units[slot] = unit;
        }
    }

    /// Drops the last content unit, moving the sentinel back over it.
    pub(crate) fn pop(&mut self) -> Option<U> {
        let unit = self.last()?;
        self.len -= 1;
        self.terminate();
        Some(unit)
    }

    /// Replaces the storage with an exact-fit copy of `len + 1` units.
    ///
    /// If the smaller allocation cannot be made the current storage is kept.
    pub(crate) fn shrink_to_fit(&mut self) {
        let wanted = self.len + 1;
        if !self.is_allocated() || self.capacity() == wanted {
            return;
        }
        let mut shrunk = Vec::new();
        if shrunk.try_reserve_exact(wanted).is_err() {
            log::trace!(
                "keeping {} unit line buffer, could not shrink to {wanted}",
                self.capacity()
            );
            return;
        }
        shrunk.extend_from_slice(&self.units[..wanted]);
        self.units = shrunk;
    }

    fn terminate(&mut self) {
        if let Some(slot) = self.units.get_mut(self.len) {
            *slot = U::NUL;
        }
    }
}

/// Largest capacity, in units, a buffer of `U` may reach under `max_capacity`.
///
/// A `Vec` never spans more than `isize::MAX` bytes, so wide units hit the
/// bound in fewer units.
pub(crate) fn capacity_limit<U>(max_capacity: usize) -> usize {
    max_capacity.min(isize::MAX as usize / size_of::<U>().max(1))
}

/// Allocates `len` NUL units, returning `None` if the allocation fails.
fn try_filled<U: Unit>(len: usize) -> Option<Vec<U>> {
    let mut units = Vec::new();
    units.try_reserve_exact(len).ok()?;
    units.resize(len, U::NUL);
    Some(units)
}
