// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![deny(
  clippy::expect_used,
  clippy::panic,
  clippy::todo,
  clippy::unimplemented,
  clippy::unreachable,
  clippy::unwrap_used
)]

#[cfg(test)]
#[path = "./lib_test.rs"]
mod tests;

use bytes::Bytes;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicI32, Ordering as AtomicOrdering};

// Number of leading bytes shown by the `Debug` implementation.
const DEBUG_PREVIEW_LEN: usize = 50;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("range {begin}..{end} out of bounds for size {size}")]
pub struct RangeError {
  pub begin: usize,
  pub end: usize,
  pub size: usize,
}

//
// ByteString
//

/// An immutable sequence of bytes with value semantics.
///
/// Constructors either copy from a borrowed source ([`ByteString::copy_from`]) or adopt an owned
/// buffer without copying ([`ByteString::wrap`]). Either way the contents can never change once
/// constructed, which is what makes the cached content hash sound. Cloning and slicing share the
/// underlying storage.
pub struct ByteString {
  bytes: Bytes,
  // 0 means "not computed yet". A computed hash of 0 is stored as 1.
  hash: AtomicI32,
}

impl ByteString {
  #[must_use]
  pub const fn empty() -> Self {
    Self::from_bytes(Bytes::new())
  }

  const fn from_bytes(bytes: Bytes) -> Self {
    Self {
      bytes,
      hash: AtomicI32::new(0),
    }
  }

  /// Copies `source` into a new byte string. O(len).
  #[must_use]
  pub fn copy_from(source: &[u8]) -> Self {
    Self::from_bytes(Bytes::copy_from_slice(source))
  }

  /// Copies `len` bytes of `source` starting at `offset`.
  pub fn copy_from_range(source: &[u8], offset: usize, len: usize) -> Result<Self, RangeError> {
    let end = offset.checked_add(len).unwrap_or(usize::MAX);
    source.get(offset .. end).map(Self::copy_from).ok_or(RangeError {
      begin: offset,
      end,
      size: source.len(),
    })
  }

  /// Encodes `text` as UTF-8 and copies it.
  #[must_use]
  pub fn copy_from_utf8(text: &str) -> Self {
    Self::copy_from(text.as_bytes())
  }

  /// Adopts an owned buffer without copying. Ownership moves into the byte string, so the
  /// caller cannot mutate the contents afterwards.
  #[must_use]
  pub fn wrap(bytes: impl Into<Bytes>) -> Self {
    Self::from_bytes(bytes.into())
  }

  #[must_use]
  pub fn size(&self) -> usize {
    self.bytes.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.bytes
  }

  #[must_use]
  pub fn byte_at(&self, index: usize) -> Option<u8> {
    self.bytes.get(index).copied()
  }

  #[must_use]
  pub fn to_vec(&self) -> Vec<u8> {
    self.bytes.to_vec()
  }

  /// Returns the shared underlying buffer.
  #[must_use]
  pub fn to_bytes(&self) -> Bytes {
    self.bytes.clone()
  }

  /// Returns the bytes in `begin..end`, sharing storage with `self`.
  pub fn substring(&self, begin: usize, end: usize) -> Result<Self, RangeError> {
    if begin > end || end > self.size() {
      return Err(RangeError {
        begin,
        end,
        size: self.size(),
      });
    }
    Ok(Self::from_bytes(self.bytes.slice(begin .. end)))
  }

  #[must_use]
  pub fn concat(&self, other: &Self) -> Self {
    if other.is_empty() {
      return self.clone();
    }
    if self.is_empty() {
      return other.clone();
    }
    let mut joined = Vec::with_capacity(self.size() + other.size());
    joined.extend_from_slice(self.as_slice());
    joined.extend_from_slice(other.as_slice());
    Self::wrap(joined)
  }

  #[must_use]
  pub fn starts_with(&self, prefix: &Self) -> bool {
    self.as_slice().starts_with(prefix.as_slice())
  }

  #[must_use]
  pub fn ends_with(&self, suffix: &Self) -> bool {
    self.as_slice().ends_with(suffix.as_slice())
  }

  #[must_use]
  pub fn is_valid_utf8(&self) -> bool {
    std::str::from_utf8(&self.bytes).is_ok()
  }

  /// Decodes the contents as UTF-8, failing on invalid sequences.
  pub fn to_string_utf8(&self) -> Result<String, std::str::Utf8Error> {
    std::str::from_utf8(&self.bytes).map(str::to_string)
  }

  /// Decodes the contents as UTF-8, replacing invalid sequences with U+FFFD.
  #[must_use]
  pub fn to_string_utf8_lossy(&self) -> String {
    String::from_utf8_lossy(&self.bytes).into_owned()
  }

  /// The content hash: `h = h * 31 + byte` over the signed bytes, seeded with the size.
  ///
  /// Computed on first use and cached. Concurrent first calls may each compute it; they all
  /// publish the same value.
  #[must_use]
  pub fn hash_code(&self) -> i32 {
    let cached = self.hash.load(AtomicOrdering::Relaxed);
    if cached != 0 {
      return cached;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let mut h = partial_hash(self.size() as i32, &self.bytes);
    if h == 0 {
      h = 1;
    }
    self.hash.store(h, AtomicOrdering::Relaxed);
    h
  }

  fn cached_hash(&self) -> Option<i32> {
    match self.hash.load(AtomicOrdering::Relaxed) {
      0 => None,
      h => Some(h),
    }
  }
}

/// Folds `bytes` into `h` with the standard byte-array hash recurrence.
#[must_use]
pub fn partial_hash(h: i32, bytes: &[u8]) -> i32 {
  #[allow(clippy::cast_possible_wrap)]
  bytes.iter().fold(h, |h, &b| {
    h.wrapping_mul(31).wrapping_add(i32::from(b as i8))
  })
}

impl Default for ByteString {
  fn default() -> Self {
    Self::empty()
  }
}

impl Clone for ByteString {
  fn clone(&self) -> Self {
    Self {
      bytes: self.bytes.clone(),
      hash: AtomicI32::new(self.hash.load(AtomicOrdering::Relaxed)),
    }
  }
}

impl PartialEq for ByteString {
  fn eq(&self, other: &Self) -> bool {
    if self.size() != other.size() {
      return false;
    }
    if let (Some(a), Some(b)) = (self.cached_hash(), other.cached_hash())
      && a != b
    {
      return false;
    }
    self.bytes == other.bytes
  }
}

impl Eq for ByteString {}

impl Hash for ByteString {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_i32(self.hash_code());
  }
}

impl PartialOrd for ByteString {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

// Unsigned lexicographic order.
impl Ord for ByteString {
  fn cmp(&self, other: &Self) -> Ordering {
    self.as_slice().cmp(other.as_slice())
  }
}

impl AsRef<[u8]> for ByteString {
  fn as_ref(&self) -> &[u8] {
    self.as_slice()
  }
}

impl From<Vec<u8>> for ByteString {
  fn from(bytes: Vec<u8>) -> Self {
    Self::wrap(bytes)
  }
}

impl From<Bytes> for ByteString {
  fn from(bytes: Bytes) -> Self {
    Self::wrap(bytes)
  }
}

impl From<&[u8]> for ByteString {
  fn from(bytes: &[u8]) -> Self {
    Self::copy_from(bytes)
  }
}

impl From<&str> for ByteString {
  fn from(text: &str) -> Self {
    Self::copy_from_utf8(text)
  }
}

impl fmt::Debug for ByteString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let preview_len = self.size().min(DEBUG_PREVIEW_LEN);
    let preview = self.bytes[.. preview_len].escape_ascii();
    if preview_len < self.size() {
      write!(f, "ByteString(size={} \"{preview}...\")", self.size())
    } else {
      write!(f, "ByteString(size={} \"{preview}\")", self.size())
    }
  }
}
