//! Sticky-Error Encoder
//!
//! Append typed values ke growable buffer. Error pertama disimpan,
//! semua write berikutnya jadi no-op sampai `reset()`.

use tracing::{debug, trace};

use super::error::{CodecError, EncodeFault};
use super::marshal::Marshal;
use crate::config::CodecConfig;
use crate::core::{pack_uvarint, pack_varint, VarintBuf};

/// Length-prefixed varint encoder
///
/// Format setiap value: `[len u8][len bytes payload]`.
#[derive(Debug)]
pub struct Encoder {
    output: Vec<u8>,
    error: Option<CodecError>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Membuat encoder dengan kapasitas default
    pub fn new() -> Self {
        Self::with_config(&CodecConfig::default())
    }

    /// Membuat encoder dengan buffer size tertentu
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            error: None,
        }
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Reset encoder untuk reuse
    ///
    /// Menghapus error dan semua data yang sudah di-encode;
    /// kapasitas buffer dipertahankan.
    pub fn reset(&mut self) {
        trace!(discarded = self.output.len(), faulted = self.error.is_some(), "encoder reset");
        self.error = None;
        self.output.clear();
    }

    /// Encode `u64`, return jumlah byte yang ditambahkan (0 jika faulted)
    #[inline(always)]
    pub fn write_uint(&mut self, x: u64) -> usize {
        if self.error.is_some() {
            return 0;
        }
        let mut scratch = VarintBuf::default();
        let n = pack_uvarint(&mut scratch, x);
        self.push_window(&scratch[..n])
    }

    /// Encode `i64` lewat zig-zag
    #[inline(always)]
    pub fn write_int(&mut self, x: i64) -> usize {
        if self.error.is_some() {
            return 0;
        }
        let mut scratch = VarintBuf::default();
        let n = pack_varint(&mut scratch, x);
        self.push_window(&scratch[..n])
    }

    /// Encode `f64` sebagai bit pattern `u64`
    #[inline(always)]
    pub fn write_float(&mut self, x: f64) -> usize {
        self.write_uint(x.to_bits())
    }

    /// Encode byte string: panjang (sebagai uint) lalu raw bytes.
    ///
    /// `None` berarti value tidak ada, beda dengan slice kosong,
    /// dan membuat encoder faulted.
    pub fn write_bytes<'b>(&mut self, x: impl Into<Option<&'b [u8]>>) -> usize {
        if self.error.is_some() {
            return 0;
        }
        let Some(x) = x.into() else {
            self.fail(EncodeFault::AbsentValue.into());
            return 0;
        };
        let written = self.write_uint(x.len() as u64);
        self.output.extend_from_slice(x);
        written + x.len()
    }

    /// Encode nested value lewat hook `Marshal`.
    ///
    /// Error dari `marshal()` disimpan apa adanya.
    pub fn write_marshalable<'m, M>(&mut self, x: impl Into<Option<&'m M>>) -> usize
    where
        M: Marshal + ?Sized + 'm,
    {
        if self.error.is_some() {
            return 0;
        }
        let Some(x) = x.into() else {
            self.fail(EncodeFault::AbsentValue.into());
            return 0;
        };
        match x.marshal() {
            Ok(buf) => self.write_bytes(buf.as_slice()),
            Err(err) => {
                self.fail(err);
                0
            }
        }
    }

    /// Get encoded data; `None` selama encoder faulted
    #[inline(always)]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self.error {
            Some(_) => None,
            None => Some(&self.output),
        }
    }

    #[inline(always)]
    pub fn error(&self) -> Option<&CodecError> {
        self.error.as_ref()
    }

    /// Panjang data yang sudah di-encode
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Consume encoder: buffer kalau sukses, sticky error kalau tidak
    pub fn finish(self) -> Result<Vec<u8>, CodecError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }

    #[inline(always)]
    fn push_window(&mut self, payload: &[u8]) -> usize {
        // payload varint maksimal 10 byte, selalu muat di satu length byte
        self.output.push(payload.len() as u8);
        self.output.extend_from_slice(payload);
        payload.len() + 1
    }

    /// Set sticky error. Error pertama menang.
    pub(crate) fn fail(&mut self, err: CodecError) {
        if self.error.is_none() {
            debug!(len = self.output.len(), error = %err, "encoder faulted");
            self.error = Some(err);
        }
    }
}
