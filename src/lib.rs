//! encdec - Sticky-Error Binary Encoder/Decoder
//!
//! Arsitektur:
//! - Varint packing: integer kecil = byte sedikit
//! - Length-prefixed fields: `[len][payload]`, bounds-checked tanpa parsing varint
//! - Sticky error: error pertama menang, semua call berikutnya jadi no-op
//! - Marshal hook: tipe user bisa di-nest lewat trait `Marshal`/`Unmarshal`
//!
//! ```
//! use encdec::{Decoder, Encoder};
//!
//! let mut enc = Encoder::new();
//! enc.write_uint(5);
//! enc.write_int(-3);
//! enc.write_bytes(b"encdec".as_slice());
//! let bytes = enc.finish().unwrap();
//!
//! let mut dec = Decoder::new(bytes);
//! assert_eq!(dec.read_uint(), 5);
//! assert_eq!(dec.read_int(), -3);
//! assert_eq!(dec.read_bytes(), b"encdec");
//! assert!(dec.finish().is_ok());
//! ```

pub mod config;
pub mod core;
pub mod protocol;
pub mod storage;
pub mod stream;

pub use crate::config::{CodecConfig, WindowPolicy};
pub use crate::protocol::{
    CodecError, DecodeFault, Decoder, EncodeFault, Encoder, ErrorKind, Marshal, Unmarshal,
};
pub use crate::storage::MappedFile;
