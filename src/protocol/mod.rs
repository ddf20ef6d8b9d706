//! Protocol Layer: Length-Prefixed Varint Encoding
//!
//! Prinsip desain:
//! - Setiap value: `[len u8][len bytes payload]`, tanpa type tag
//! - Schema implisit: decoder memanggil primitive dengan urutan yang sama
//! - Sticky error: cek error cukup sekali di akhir rangkaian call
//! - Zero-copy read: byte string dikembalikan sebagai view ke buffer decoder

mod decoder;
mod encoder;
mod error;
mod marshal;


pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{BoxError, CodecError, DecodeFault, EncodeFault, ErrorKind};
pub use marshal::{Marshal, Unmarshal};
