//! Core module: Varint primitives
//!
//! Prinsip desain:
//! - Fixed-size stack buffer: tidak ada alokasi untuk pack/unpack
//! - Zig-zag untuk signed: -1 sama pendeknya dengan 1
//! - Parser tidak pernah membaca lewat slice yang diberikan

pub mod varint;

pub use varint::{
    pack_uvarint, pack_varint, unpack_uvarint, unpack_varint, uvarint_len, zigzag_decode,
    zigzag_encode, VarintBuf, VarintError, MAX_VARINT_LEN64,
};
