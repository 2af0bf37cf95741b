// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded, NUL-terminated writes into caller buffers.

/// Outcome of a bounded write.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Written {
    /// Text bytes written, not counting the terminator.
    pub len: usize,
    /// Set when some of the text did not fit.
    pub truncated: bool,
}

impl Written {
    pub fn is_complete(&self) -> bool {
        !self.truncated
    }
}

/// `core::fmt::Write` sink over a byte slice.
///
/// The last byte of the slice is kept for the terminator, so at most
/// `buf.len() - 1` text bytes are ever stored, and the text is terminated
/// after every write. Overflowing text is cut on a character boundary and
/// recorded in [Written::truncated] rather than reported as an error.
/// A zero-length slice is never touched.
pub struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    truncated: bool,
}

impl<'a> BoundedWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        if let Some(first) = buf.first_mut() {
            *first = 0;
        }
        Self {
            buf,
            pos: 0,
            truncated: false,
        }
    }

    /// Text bytes this buffer can hold.
    pub fn capacity(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.pos
    }

    /// Appends as much of `s` as fits. Returns false if anything was cut.
    pub fn push_str(&mut self, s: &str) -> bool {
        let mut n = s.len().min(self.remaining());
        while !s.is_char_boundary(n) {
            n -= 1;
        }
        if n < s.len() {
            self.truncated = true;
        }
        if self.buf.is_empty() {
            return n == s.len();
        }
        self.buf[self.pos..self.pos + n].copy_from_slice(&s.as_bytes()[..n]);
        self.pos += n;
        self.buf[self.pos] = 0;
        n == s.len()
    }

    pub fn as_str(&self) -> &str {
        // only whole characters are ever copied in
        core::str::from_utf8(&self.buf[..self.pos]).unwrap_or("")
    }

    pub fn written(&self) -> Written {
        Written {
            len: self.pos,
            truncated: self.truncated,
        }
    }

    /// Consumes the writer, handing back the text with the buffer's lifetime.
    pub fn into_str(self) -> &'a str {
        let buf: &'a [u8] = self.buf;
        core::str::from_utf8(&buf[..self.pos]).unwrap_or("")
    }
}

impl core::fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_str(s);
        Ok(())
    }
}
