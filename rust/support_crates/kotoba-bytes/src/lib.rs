//! Byte buffers for the Kotoba dictionary data, mutable for building and shared
//! immutable for reading.
//!
//! Dictionary segments are handed to the lookup engine by whichever component owns
//! them (a heap allocation, a static blob linked into the binary, or an external
//! owner such as a memory map). [`Bytes`] erases that difference: it is a cheaply
//! cloneable, sliceable handle that keeps its owner alive for as long as any view
//! into it exists.

use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

/// A mutable buffer of bytes, conceptually similar to a `Vec<u8>`.
///
/// Used by the dictionary writers to assemble a segment before freezing it into
/// an immutable [`Bytes`] instance.
#[derive(Debug, Clone, Default)]
pub struct BytesMut(Vec<u8>);

impl BytesMut {
    /// Creates a new empty `BytesMut`.
    pub fn new() -> BytesMut {
        BytesMut(Vec::new())
    }

    /// Creates a new `BytesMut` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> BytesMut {
        BytesMut(Vec::with_capacity(capacity))
    }

    /// Returns the length of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends the bytes of `extend` to the end of the buffer.
    #[inline]
    pub fn extend_from_slice(&mut self, extend: &[u8]) {
        self.0.extend_from_slice(extend);
    }

    /// Appends a single byte.
    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.0.push(value);
    }

    /// Appends a `u16` in little-endian byte order.
    #[inline]
    pub fn put_u16_le(&mut self, value: u16) {
        self.0.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a `u32` in little-endian byte order.
    #[inline]
    pub fn put_u32_le(&mut self, value: u32) {
        self.0.extend_from_slice(&value.to_le_bytes());
    }

    /// Returns the buffer contents as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Freezes the buffer into an immutable, shareable [`Bytes`].
    pub fn into_bytes(self) -> Bytes {
        Bytes::from_vec(self.0)
    }
}

impl std::ops::Deref for BytesMut {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

/// An owner of externally managed memory that can back a [`Bytes`] instance.
///
/// Implementors must return the same, unchanging slice from every call to
/// `as_ref()` for as long as the owner is alive.
pub trait BytesOwner: AsRef<[u8]> + Send + Sync + 'static {}

impl<T> BytesOwner for T where T: AsRef<[u8]> + Send + Sync + 'static {}

#[derive(Clone)]
enum Owner {
    Static(&'static [u8]),
    Vec(Arc<Vec<u8>>),
    External(Arc<dyn BytesOwner>),
}

impl Owner {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Owner::Static(s) => *s,
            Owner::Vec(v) => v.as_slice(),
            Owner::External(o) => AsRef::<[u8]>::as_ref(&**o),
        }
    }
}

/// A contiguous, immutable memory region that can be shared with other buffers and across
/// thread boundaries.
///
/// `Bytes` can be sliced and cloned without copying the underlying data. Every clone and
/// every slice holds a reference to the original owner, so the memory stays valid for as
/// long as any of them is alive.
#[derive(Clone)]
pub struct Bytes {
    owner: Owner,
    offset: usize,
    len: usize,
}

impl Bytes {
    /// Creates a new empty `Bytes`.
    #[inline]
    pub fn new() -> Self {
        Bytes::from_static(&[])
    }

    /// Creates a `Bytes` over a static slice without copying.
    pub const fn from_static(data: &'static [u8]) -> Bytes {
        Bytes {
            owner: Owner::Static(data),
            offset: 0,
            len: data.len(),
        }
    }

    /// Creates a `Bytes` taking ownership of `vec` without copying.
    pub fn from_vec(vec: Vec<u8>) -> Bytes {
        let len = vec.len();
        Bytes {
            owner: Owner::Vec(Arc::new(vec)),
            offset: 0,
            len,
        }
    }

    /// Creates a `Bytes` over memory held by an external owner, for example a
    /// memory-mapped data file.
    pub fn from_owner(owner: Arc<dyn BytesOwner>) -> Bytes {
        let len = AsRef::<[u8]>::as_ref(&*owner).len();
        Bytes {
            owner: Owner::External(owner),
            offset: 0,
            len,
        }
    }

    /// Creates a new `Bytes` by copying data from a slice.
    pub fn copy_from_slice(data: &[u8]) -> Bytes {
        Bytes::from_vec(data.to_vec())
    }

    /// Returns the length of the `Bytes`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `Bytes` is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bytes as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.owner.as_slice()[self.offset..self.offset + self.len]
    }

    /// Creates a new `Bytes` by slicing the current `Bytes` within the given range.
    ///
    /// This operation is zero-copy; it does not allocate new memory.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Bytes {
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => self.len,
        };
        assert!(
            start <= end && end <= self.len,
            "slice {start}..{end} out of bounds for length {}",
            self.len
        );
        Bytes {
            owner: self.owner.clone(),
            offset: self.offset + start,
            len: end - start,
        }
    }

    /// Returns `true` if both instances view the same memory region of the same owner.
    pub fn ptr_eq(&self, other: &Bytes) -> bool {
        self.len == other.len && std::ptr::eq(self.as_slice().as_ptr(), other.as_slice().as_ptr())
    }
}

impl std::ops::Deref for Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Bytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Default for Bytes {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bytes")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Bytes {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Bytes {}

impl From<BytesMut> for Bytes {
    fn from(bytes: BytesMut) -> Self {
        bytes.into_bytes()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(vec: Vec<u8>) -> Self {
        Bytes::from_vec(vec)
    }
}

impl From<&'static [u8]> for Bytes {
    fn from(s: &'static [u8]) -> Self {
        Bytes::from_static(s)
    }
}
