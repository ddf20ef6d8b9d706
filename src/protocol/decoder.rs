//! Sticky-Error Decoder
//!
//! Membaca value dengan urutan yang sama seperti encoder menulisnya.
//! Setiap field: `Ready -> BoundsChecked -> Done`, atau `Faulted` (sticky).
//! Cursor hanya maju setelah satu field selesai; field yang gagal tidak
//! pernah meninggalkan cursor di tengah field.

use std::ops::Range;

use tracing::{debug, trace};

use super::error::{CodecError, DecodeFault};
use super::marshal::Unmarshal;
use crate::config::{CodecConfig, WindowPolicy};
use crate::core::{unpack_uvarint, zigzag_decode};

/// Length-prefixed varint decoder
#[derive(Debug)]
pub struct Decoder {
    input: Vec<u8>,
    cursor: usize,
    error: Option<CodecError>,
    config: CodecConfig,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<u8>> for Decoder {
    fn from(input: Vec<u8>) -> Self {
        Decoder::new(input)
    }
}

impl From<&[u8]> for Decoder {
    fn from(input: &[u8]) -> Self {
        Decoder::from_slice(input)
    }
}

impl Decoder {
    /// Membuat decoder dari buffer
    pub fn new(input: Vec<u8>) -> Self {
        Self::with_config(input, &CodecConfig::default())
    }

    /// Copy slice ke buffer milik decoder
    pub fn from_slice(input: &[u8]) -> Self {
        Self::new(input.to_vec())
    }

    /// Decoder kosong, biasanya diisi lewat `fill_from`
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_config(input: Vec<u8>, config: &CodecConfig) -> Self {
        Self {
            input,
            cursor: 0,
            error: None,
            config: *config,
        }
    }

    /// Reset decoder ke posisi awal
    ///
    /// Error dihapus dan cursor kembali ke 0, bytes yang sama bisa
    /// di-decode ulang dari awal.
    pub fn reset(&mut self) {
        trace!(pos = self.cursor, faulted = self.error.is_some(), "decoder reset");
        self.error = None;
        self.cursor = 0;
    }

    /// Decode `u64`
    #[inline(always)]
    pub fn read_uint(&mut self) -> u64 {
        if self.error.is_some() {
            return 0;
        }
        match self.scan_uint(self.cursor) {
            Ok((x, end)) => {
                self.cursor = end;
                x
            }
            Err(err) => {
                self.fail(err);
                0
            }
        }
    }

    /// Decode `i64` (zig-zag)
    #[inline(always)]
    pub fn read_int(&mut self) -> i64 {
        if self.error.is_some() {
            return 0;
        }
        match self.scan_uint(self.cursor) {
            Ok((ux, end)) => {
                self.cursor = end;
                zigzag_decode(ux)
            }
            Err(err) => {
                self.fail(err);
                0
            }
        }
    }

    /// Decode `f64` dari bit pattern `u64`
    #[inline(always)]
    pub fn read_float(&mut self) -> f64 {
        if self.error.is_some() {
            return 0.0;
        }
        f64::from_bits(self.read_uint())
    }

    /// Decode byte string (zero-copy view ke buffer decoder)
    ///
    /// Return slice kosong kalau faulted; cek `error()` untuk membedakan
    /// dari byte string kosong yang valid.
    pub fn read_bytes(&mut self) -> &[u8] {
        match self.take_bytes() {
            Some(range) => &self.input[range],
            None => &[],
        }
    }

    /// Decode nested value lewat hook `Unmarshal`.
    ///
    /// Error dari `unmarshal()` disimpan apa adanya.
    pub fn read_marshalable<'u, U>(&mut self, x: impl Into<Option<&'u mut U>>)
    where
        U: Unmarshal + ?Sized + 'u,
    {
        if self.error.is_some() {
            return;
        }
        if self.cursor >= self.input.len() {
            self.fail(CodecError::NoData);
            return;
        }
        let Some(x) = x.into() else {
            self.fail(DecodeFault::AbsentValue.into());
            return;
        };
        let Some(range) = self.take_bytes() else {
            return;
        };
        if let Err(err) = x.unmarshal(&self.input[range]) {
            self.fail(err);
        }
    }

    /// Skip satu field integer/float tanpa parsing varint.
    ///
    /// Hanya length byte yang dibaca. Return `false` kalau gagal.
    pub fn skip(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        match self.window(self.cursor) {
            Ok(window) => {
                self.cursor = window.end;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Skip satu field byte string (panjang + payload)
    pub fn skip_bytes(&mut self) -> bool {
        self.take_bytes().is_some()
    }

    #[inline(always)]
    pub fn error(&self) -> Option<&CodecError> {
        self.error.as_ref()
    }

    /// Sisa bytes yang belum di-decode
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.input.len() - self.cursor
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Posisi decoding saat ini
    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.cursor
    }

    /// View ke bytes yang belum dibaca
    pub fn remaining(&self) -> &[u8] {
        &self.input[self.cursor..]
    }

    /// Consume decoder, surface sticky error
    pub fn finish(self) -> Result<(), CodecError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub(crate) fn input_mut(&mut self) -> &mut Vec<u8> {
        &mut self.input
    }

    /// Set sticky error. Error pertama menang.
    pub(crate) fn fail(&mut self, err: CodecError) {
        if self.error.is_none() {
            debug!(pos = self.cursor, len = self.input.len(), error = %err, "decoder faulted");
            self.error = Some(err);
        }
    }

    /// Baca byte string, return range payload di `input`. Cursor hanya
    /// maju kalau length dan payload dua-duanya valid.
    fn take_bytes(&mut self) -> Option<Range<usize>> {
        if self.error.is_some() {
            return None;
        }
        match self.scan_bytes(self.cursor) {
            Ok(range) => {
                self.cursor = range.end;
                Some(range)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn scan_bytes(&self, at: usize) -> Result<Range<usize>, CodecError> {
        let (len, start) = self.scan_uint(at)?;
        if len == 0 {
            return Ok(start..start);
        }
        let len = usize::try_from(len).map_err(|_| DecodeFault::LengthOverflow)?;
        let end = start.checked_add(len).ok_or(DecodeFault::LengthOverflow)?;
        if end > self.input.len() {
            return Err(CodecError::NotEnoughData {
                needed: len,
                available: self.input.len() - start,
            });
        }
        Ok(start..end)
    }

    /// Unpack integer field di `at`, return `(value, field_end)`
    #[inline(always)]
    fn scan_uint(&self, at: usize) -> Result<(u64, usize), CodecError> {
        let window = self.window(at)?;
        let declared = window.len();
        if declared == 0 {
            return Err(DecodeFault::EmptyWindow.into());
        }

        let (x, consumed) =
            unpack_uvarint(&self.input[window.clone()]).map_err(DecodeFault::from)?;
        if consumed != declared && self.config.window_policy == WindowPolicy::Strict {
            return Err(DecodeFault::TrailingBytes { consumed, declared }.into());
        }

        // Length byte authoritative: cursor lompat ke akhir window
        Ok((x, window.end))
    }

    /// Bounds check: length byte di `at` dan window payload-nya
    #[inline(always)]
    fn window(&self, at: usize) -> Result<Range<usize>, CodecError> {
        if at >= self.input.len() {
            return Err(CodecError::NoData);
        }
        let declared = self.input[at] as usize;
        let start = at + 1;
        let end = start + declared;
        if end > self.input.len() {
            return Err(CodecError::NotEnoughData {
                needed: declared,
                available: self.input.len() - start,
            });
        }
        Ok(start..end)
    }
}
