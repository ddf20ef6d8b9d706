//! Memory-Mapped File untuk Persistensi Encoded Data
//!
//! Data di-mmap langsung ke virtual memory, memungkinkan:
//! - Zero-copy read: decoder di-seed langsung dari page cache
//! - Persistence: buffer encoder tersimpan ke disk lewat writable map

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use memmap2::{Mmap, MmapMut, MmapOptions};
use tracing::debug;

use crate::protocol::{CodecError, Decoder, EncodeFault, Encoder};

/// Read-only mapping dari file berisi encoded data
///
/// File kosong tidak bisa di-mmap, jadi direpresentasikan tanpa mapping.
#[derive(Debug)]
pub struct MappedFile {
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Membuat (atau truncate) file dan menulis `bytes` lewat writable map
    pub fn create<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;

        // Set file size
        file.set_len(bytes.len() as u64)?;

        if bytes.is_empty() {
            return Ok(Self { mmap: None });
        }

        // SAFETY: file baru saja dibuka read/write dan di-size ke bytes.len();
        // mapping dimiliki eksklusif oleh fungsi ini sampai jadi read-only.
        let mut mmap: MmapMut = unsafe { MmapOptions::new().len(bytes.len()).map_mut(&file)? };
        mmap.copy_from_slice(bytes);
        mmap.flush()?;

        debug!(path = %path.as_ref().display(), bytes = bytes.len(), "mapped file written");
        Ok(Self {
            mmap: Some(mmap.make_read_only()?),
        })
    }

    /// Membuka file yang sudah ada sebagai read-only mapping
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        if file.metadata()?.len() == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: mapping read-only; caller tidak boleh memodifikasi file
        // dari proses lain selama `MappedFile` masih hidup.
        let mmap = unsafe { Mmap::map(&file)? };
        debug!(path = %path.as_ref().display(), bytes = mmap.len(), "mapped file opened");
        Ok(Self { mmap: Some(mmap) })
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decoder baru yang di-seed dengan isi file
    pub fn decoder(&self) -> Decoder {
        Decoder::from_slice(self.as_bytes())
    }
}

impl Encoder {
    /// Simpan encoded data ke file. Encoder yang faulted ditolak.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<MappedFile, CodecError> {
        let Some(bytes) = self.bytes() else {
            return Err(EncodeFault::Faulted.into());
        };
        MappedFile::create(path, bytes).map_err(CodecError::Storage)
    }
}

impl Decoder {
    /// Load file ke decoder baru
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Decoder, CodecError> {
        let mapped = MappedFile::open(path).map_err(CodecError::Storage)?;
        Ok(mapped.decoder())
    }
}
