//! Bounds-checked read position over one record
//!
//! Offsets are absolute within the record so every emitted item and every
//! diagnostic can be lined up with the raw bytes. A cursor may be narrowed to
//! a window of the record (see [`DecodeCursor::split`]); reads past the window
//! fail with [`DecodeError::TruncatedRecord`] and leave the cursor where it was.

use crate::error::{DecodeError, DecodeResult};

#[derive(Debug, Clone)]
pub struct DecodeCursor<'a> {
    buf: &'a [u8],
    offset: usize,
    end: usize,
}

impl<'a> DecodeCursor<'a> {
    /// Cursor over the whole buffer
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            end: buf.len(),
        }
    }

    /// Absolute offset of the next byte
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute offset one past the last readable byte
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn remaining(&self) -> usize {
        self.end - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.end
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Byte `ahead` positions past the current offset, without consuming
    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        let pos = self.offset.checked_add(ahead)?;
        if pos < self.end {
            Some(self.buf[pos])
        } else {
            None
        }
    }

    /// Fail unless `needed` more bytes are readable
    pub fn ensure(&self, needed: usize) -> DecodeResult<()> {
        if needed > self.remaining() {
            Err(self.truncated(needed))
        } else {
            Ok(())
        }
    }

    /// The error a read of `needed` bytes at the current offset produces
    pub fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::TruncatedRecord {
            offset: self.offset,
            needed,
            available: self.remaining(),
        }
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        self.ensure(1)?;
        let byte = self.buf[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    /// Big-endian 16-bit read
    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Big-endian 32-bit read
    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Consume everything left in the window
    pub fn take_rest(&mut self) -> &'a [u8] {
        let bytes = &self.buf[self.offset..self.end];
        self.offset = self.end;
        bytes
    }

    /// Consume bytes until `stop` returns true for the next byte (or the
    /// window ends). The stopping byte is not consumed.
    pub fn take_until(&mut self, stop: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.offset;
        while let Some(byte) = self.peek_u8() {
            if stop(byte) {
                break;
            }
            self.offset += 1;
        }
        &self.buf[start..self.offset]
    }

    /// Number of bytes before the next occurrence of `byte` (or the window end)
    pub fn distance_to(&self, byte: u8) -> usize {
        self.buf[self.offset..self.end]
            .iter()
            .position(|&b| b == byte)
            .unwrap_or(self.remaining())
    }

    /// Bytes between two absolute offsets, clamped to the window.
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        let end = end.min(self.end);
        let start = start.min(end);
        &self.buf[start..end]
    }

    /// Carve the next `len` bytes off into their own cursor and advance past
    /// them. Nothing is consumed when `len` exceeds the window.
    pub fn split(&mut self, len: usize) -> DecodeResult<DecodeCursor<'a>> {
        self.ensure(len)?;
        let sub = DecodeCursor {
            buf: self.buf,
            offset: self.offset,
            end: self.offset + len,
        };
        self.offset += len;
        Ok(sub)
    }

    /// Like [`split`](Self::split), but a `len` past the window is clamped to
    /// what remains; the truncation is returned alongside.
    pub fn split_clamped(&mut self, len: usize) -> (DecodeCursor<'a>, Option<DecodeError>) {
        let truncation = if len > self.remaining() {
            Some(self.truncated(len))
        } else {
            None
        };
        let take = len.min(self.remaining());
        let sub = DecodeCursor {
            buf: self.buf,
            offset: self.offset,
            end: self.offset + take,
        };
        self.offset += take;
        (sub, truncation)
    }
}
