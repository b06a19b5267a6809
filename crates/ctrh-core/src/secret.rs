//! # Scrubbing Buffer
//!
//! `SecretBuffer` owns bytes that are, or were derived from, caller
//! plaintext. Its release hook zero-fills the entire allocation (length and
//! spare capacity) before the memory goes back to the allocator, so every
//! exit path, early error returns included, scrubs.
//!
//! ## Growth
//!
//! `Vec::reserve` may move the contents with `realloc` and hand the old
//! region back to the allocator unscrubbed. Growth here therefore allocates a
//! fresh region, copies, and zero-fills the old region itself. Capacity
//! doubles from [`SecretBuffer::MIN_CAPACITY`].

use zeroize::Zeroize;

use crate::error::HashError;

/// A growable byte buffer that scrubs its memory on every release path.
///
/// # Invariants
///
/// - Content is never moved by the allocator; all growth goes through
///   an explicit copy followed by a zero-fill of the old allocation.
/// - `Drop` zero-fills the full allocation.
/// - `Debug` never prints content.
pub struct SecretBuffer {
    bytes: Vec<u8>,
}

impl SecretBuffer {
    /// First capacity allocated by an empty buffer on its first append.
    pub const MIN_CAPACITY: usize = 256;

    /// Create an empty buffer. Does not allocate.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Allocate a buffer of `len` zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if the memory cannot be reserved.
    pub fn zeroed(len: usize) -> Result<Self, HashError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| HashError::Allocation { requested: len })?;
        bytes.resize(len, 0);
        Ok(Self { bytes })
    }

    /// Append `chunk`, growing by doubling when the current capacity is
    /// insufficient.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if the required capacity overflows
    /// or cannot be reserved. The existing content is left untouched.
    pub fn extend_from_slice(&mut self, chunk: &[u8]) -> Result<(), HashError> {
        let needed = self
            .bytes
            .len()
            .checked_add(chunk.len())
            .ok_or(HashError::Allocation {
                requested: usize::MAX,
            })?;
        if needed > self.bytes.capacity() {
            self.grow_to(needed)?;
        }
        // Capacity is sufficient, so this cannot reallocate.
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    /// Shorten the buffer to `len` bytes, zero-filling the removed tail.
    /// No-op if `len` is not smaller than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len < self.bytes.len() {
            self.bytes[len..].zeroize();
            self.bytes.truncate(len);
        }
    }

    /// Zero-fill and drop all content, keeping the allocation.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Borrow the content.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrow the content mutably. The length cannot change through this view.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Currently allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    fn grow_to(&mut self, needed: usize) -> Result<(), HashError> {
        let old_capacity = self.bytes.capacity();
        let mut new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(HashError::Allocation { requested: needed })?
            .max(Self::MIN_CAPACITY);
        while new_capacity < needed {
            new_capacity = new_capacity
                .checked_mul(2)
                .ok_or(HashError::Allocation { requested: needed })?;
        }

        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(new_capacity)
            .map_err(|_| HashError::Allocation {
                requested: new_capacity,
            })?;
        fresh.extend_from_slice(&self.bytes);

        let mut old = std::mem::replace(&mut self.bytes, fresh);
        old.zeroize();

        tracing::debug!(old_capacity, new_capacity, "secret buffer grown");
        Ok(())
    }
}

impl Default for SecretBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        // Vec's Zeroize impl also wipes the spare capacity.
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("len", &self.bytes.len())
            .field("capacity", &self.bytes.capacity())
            .finish()
    }
}
