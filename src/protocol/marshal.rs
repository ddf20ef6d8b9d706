//! Marshal Hook
//!
//! Tipe apa pun yang bisa jadi bytes (dan kembali) bisa di-nest ke stream
//! lewat `Encoder::write_marshalable` / `Decoder::read_marshalable`.
//! Di wire, value nested identik dengan `write_bytes(value.marshal()?)`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::decoder::Decoder;
use super::encoder::Encoder;
use super::error::{CodecError, DecodeFault, EncodeFault};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Capability "marshal to bytes"
pub trait Marshal {
    fn marshal(&self) -> Result<Vec<u8>, CodecError>;
}

/// Capability "unmarshal from bytes"
pub trait Unmarshal {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError>;
}

impl<T: Marshal + ?Sized> Marshal for &T {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        (**self).marshal()
    }
}

impl<T: Marshal + ?Sized> Marshal for Box<T> {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        (**self).marshal()
    }
}

impl<T: Unmarshal + ?Sized> Unmarshal for Box<T> {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        (**self).unmarshal(data)
    }
}

impl Marshal for [u8] {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.to_vec())
    }
}

impl Marshal for Vec<u8> {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.clone())
    }
}

impl Unmarshal for Vec<u8> {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.clear();
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Marshal for str {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Marshal for String {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        self.as_str().marshal()
    }
}

impl Unmarshal for String {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let text = std::str::from_utf8(data).map_err(|_| DecodeFault::InvalidUtf8)?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

/// `[uint secs][uint nanos]`
impl Marshal for Duration {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        let mut enc = Encoder::with_capacity(16);
        enc.write_uint(self.as_secs());
        enc.write_uint(u64::from(self.subsec_nanos()));
        enc.finish()
    }
}

impl Unmarshal for Duration {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let mut dec = Decoder::from_slice(data);
        let secs = dec.read_uint();
        let nanos = dec.read_uint();
        dec.finish()?;

        *self = Duration::new(secs, checked_nanos(nanos)?);
        Ok(())
    }
}

/// `[int secs since epoch][uint nanos]`, secs negatif untuk waktu sebelum 1970.
/// Nanos selalu positif dan ditambahkan ke `secs`.
impl Marshal for SystemTime {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        let (secs, nanos) = match self.duration_since(UNIX_EPOCH) {
            Ok(d) => (
                i64::try_from(d.as_secs()).map_err(|_| EncodeFault::TimeOutOfRange)?,
                d.subsec_nanos(),
            ),
            Err(before) => {
                let d = before.duration();
                let secs = i64::try_from(d.as_secs()).map_err(|_| EncodeFault::TimeOutOfRange)?;
                match d.subsec_nanos() {
                    0 => (-secs, 0),
                    n => (-secs - 1, NANOS_PER_SEC as u32 - n),
                }
            }
        };

        let mut enc = Encoder::with_capacity(16);
        enc.write_int(secs);
        enc.write_uint(u64::from(nanos));
        enc.finish()
    }
}

impl Unmarshal for SystemTime {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let mut dec = Decoder::from_slice(data);
        let secs = dec.read_int();
        let nanos = dec.read_uint();
        dec.finish()?;

        let nanos = Duration::from_nanos(u64::from(checked_nanos(nanos)?));
        let base = if secs >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(secs.unsigned_abs()))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))
        };
        *self = base
            .and_then(|t| t.checked_add(nanos))
            .ok_or(DecodeFault::TimeOutOfRange)?;
        Ok(())
    }
}

fn checked_nanos(nanos: u64) -> Result<u32, DecodeFault> {
    if nanos >= NANOS_PER_SEC {
        return Err(DecodeFault::InvalidNanos);
    }
    Ok(nanos as u32)
}
