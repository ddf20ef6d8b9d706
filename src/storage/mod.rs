//! Storage module: On-disk persistence untuk encoded buffer
//!
//! Prinsip desain:
//! - Zero-Copy read: file di-mmap, bukan dibaca chunk per chunk
//! - Format file = format wire, tanpa header tambahan
//! - Encoder/decoder tetap memiliki buffer sendiri

mod mapped_file;

pub use mapped_file::MappedFile;
