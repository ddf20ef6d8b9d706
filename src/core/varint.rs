//! Varint Packing (LEB128-style)
//!
//! 7 bit data per byte, bit tertinggi = continuation.
//! Semua operasi langsung ke stack buffer, tidak ada alokasi.

/// Maksimum panjang varint untuk 64-bit value
pub const MAX_VARINT_LEN64: usize = 10;

/// Scratch buffer yang cukup untuk satu varint 64-bit
pub type VarintBuf = [u8; MAX_VARINT_LEN64];

/// Failure modes of [`unpack_uvarint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// Buffer habis sebelum byte terakhir (continuation bit masih set)
    Truncated,
    /// Value tidak muat di 64 bit
    Overflow,
}

/// Pack `x` ke `buf`, return jumlah byte yang dipakai (1..=10)
#[inline(always)]
pub fn pack_uvarint(buf: &mut VarintBuf, mut x: u64) -> usize {
    let mut i = 0;
    while x >= 0x80 {
        buf[i] = (x as u8) | 0x80;
        x >>= 7;
        i += 1;
    }
    buf[i] = x as u8;
    i + 1
}

/// Pack signed value lewat zig-zag mapping
#[inline(always)]
pub fn pack_varint(buf: &mut VarintBuf, x: i64) -> usize {
    pack_uvarint(buf, zigzag_encode(x))
}

/// Unpack varint dari awal `buf`.
///
/// Returns `(value, consumed)`. Bytes setelah varint tidak disentuh;
/// caller yang memutuskan apakah sisa itu valid.
#[inline(always)]
pub fn unpack_uvarint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut x: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &b) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN64 {
            return Err(VarintError::Overflow);
        }
        if b < 0x80 {
            // Byte ke-10 hanya boleh membawa 1 bit
            if i == MAX_VARINT_LEN64 - 1 && b > 1 {
                return Err(VarintError::Overflow);
            }
            return Ok((x | (u64::from(b) << shift), i + 1));
        }
        x |= u64::from(b & 0x7f) << shift;
        shift += 7;
    }

    Err(VarintError::Truncated)
}

/// Unpack zig-zag varint
#[inline(always)]
pub fn unpack_varint(buf: &[u8]) -> Result<(i64, usize), VarintError> {
    let (ux, n) = unpack_uvarint(buf)?;
    Ok((zigzag_decode(ux), n))
}

#[inline(always)]
pub fn zigzag_encode(x: i64) -> u64 {
    ((x << 1) ^ (x >> 63)) as u64
}

#[inline(always)]
pub fn zigzag_decode(ux: u64) -> i64 {
    ((ux >> 1) as i64) ^ -((ux & 1) as i64)
}

/// Panjang varint untuk `x` tanpa menulis apa pun
#[inline(always)]
pub fn uvarint_len(x: u64) -> usize {
    let bits = 64 - (x | 1).leading_zeros() as usize;
    (bits + 6) / 7
}
