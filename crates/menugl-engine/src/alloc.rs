//! Pluggable allocator used for the large scratch regions (vertex/index
//! budgets, glyph atlas images).
//!
//! The interface mirrors what immediate-mode toolkits expect: an opaque user
//! handle plus an `alloc`/`free` pair with fixed signatures. [`host_alloc`] and
//! [`host_free`] are the default pass-through implementations.

use thiserror::Error;

/// Opaque user value handed back to the allocator callbacks.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Handle(pub usize);

/// Allocation failure. Never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to allocate {size} bytes")]
pub struct AllocError {
    pub size: usize,
}

pub type AllocFn = fn(Handle, usize) -> Result<Vec<u8>, AllocError>;
pub type FreeFn = fn(Handle, Vec<u8>);

/// Allocator callbacks plus the handle passed to them.
#[derive(Debug, Copy, Clone)]
pub struct Allocator {
    pub userdata: Handle,
    pub alloc: AllocFn,
    pub free: FreeFn,
}

impl Allocator {
    /// Allocator backed by the host's global allocator.
    pub const fn host() -> Self {
        Self { userdata: Handle(0), alloc: host_alloc, free: host_free }
    }

    /// Returns a zero-filled buffer of `size` bytes.
    #[inline]
    pub fn alloc(&self, size: usize) -> Result<Vec<u8>, AllocError> {
        (self.alloc)(self.userdata, size)
    }

    #[inline]
    pub fn free(&self, buf: Vec<u8>) {
        (self.free)(self.userdata, buf)
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::host()
    }
}

/// Zeroed allocation from the global allocator. The handle is ignored.
pub fn host_alloc(_handle: Handle, size: usize) -> Result<Vec<u8>, AllocError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size).map_err(|_| AllocError { size })?;
    buf.resize(size, 0);
    Ok(buf)
}

/// Releases a buffer obtained from [`host_alloc`]. The handle is ignored.
pub fn host_free(_handle: Handle, buf: Vec<u8>) {
    drop(buf);
}
