//! Codec errors
//!
//! Satu tipe error untuk encoder dan decoder. `kind()` memberi kategori
//! konseptual (encode, decode, no data, not enough data) tanpa harus
//! match semua variant.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::core::VarintError;

/// Boxed error dari hook user
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Kategori error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Generic encode-side failure
    Encode,
    /// Malformed payload or failed unmarshal
    Decode,
    /// Cursor sudah di akhir buffer
    NoData,
    /// Field yang dideklarasikan melewati akhir buffer
    NotEnoughData,
    /// Storage I/O
    Io,
    /// Error dari `Marshal`/`Unmarshal` user
    Custom,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Encode => write!(f, "encode"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::NoData => write!(f, "no data"),
            ErrorKind::NotEnoughData => write!(f, "not enough data"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Custom => write!(f, "custom"),
        }
    }
}

/// Why an encode primitive faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeFault {
    #[error("value is absent")]
    AbsentValue,
    #[error("sink accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    #[error("encoder is faulted")]
    Faulted,
    #[error("time value out of range")]
    TimeOutOfRange,
}

/// Why a decode primitive faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFault {
    #[error("value is absent")]
    AbsentValue,
    #[error("zero-length integer window")]
    EmptyWindow,
    #[error("varint truncated inside its window")]
    Truncated,
    #[error("varint overflows 64 bits")]
    Overflow,
    #[error("varint used {consumed} of {declared} declared bytes")]
    TrailingBytes { consumed: usize, declared: usize },
    #[error("byte string length does not fit in memory")]
    LengthOverflow,
    #[error("byte string is not valid UTF-8")]
    InvalidUtf8,
    #[error("sub-second nanos out of range")]
    InvalidNanos,
    #[error("time value out of range")]
    TimeOutOfRange,
}

impl From<VarintError> for DecodeFault {
    fn from(err: VarintError) -> Self {
        match err {
            VarintError::Truncated => DecodeFault::Truncated,
            VarintError::Overflow => DecodeFault::Overflow,
        }
    }
}

/// Error yang disimpan di sticky slot encoder/decoder
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encdec: encoding error: {0}")]
    Encode(EncodeFault),

    #[error("encdec: encoding error: sink failed")]
    Sink(#[source] io::Error),

    #[error("encdec: decoding error: {0}")]
    Decode(DecodeFault),

    #[error("encdec: decoding error: source failed")]
    Source(#[source] io::Error),

    #[error("encdec: nothing to decode")]
    NoData,

    #[error("encdec: not enough data to decode: need {needed} bytes, {available} available")]
    NotEnoughData { needed: usize, available: usize },

    #[error("encdec: storage error")]
    Storage(#[source] io::Error),

    #[error(transparent)]
    Custom(BoxError),
}

impl CodecError {
    /// Wrap error dari hook user
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        CodecError::Custom(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Encode(_) | CodecError::Sink(_) => ErrorKind::Encode,
            CodecError::Decode(_) | CodecError::Source(_) => ErrorKind::Decode,
            CodecError::NoData => ErrorKind::NoData,
            CodecError::NotEnoughData { .. } => ErrorKind::NotEnoughData,
            CodecError::Storage(_) => ErrorKind::Io,
            CodecError::Custom(_) => ErrorKind::Custom,
        }
    }
}

impl From<EncodeFault> for CodecError {
    fn from(fault: EncodeFault) -> Self {
        CodecError::Encode(fault)
    }
}

impl From<DecodeFault> for CodecError {
    fn from(fault: DecodeFault) -> Self {
        CodecError::Decode(fault)
    }
}
