//! Stream adapters: drain encoder ke sink, fill decoder dari source
//!
//! Sink = `std::io::Write`, source = `std::io::Read` (`Ok(0)` = end-of-input).
//! Error I/O masuk ke sticky slot, sama seperti error primitive lain.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::protocol::{CodecError, Decoder, EncodeFault, Encoder};

impl Encoder {
    /// Tulis seluruh buffer ke sink dalam satu `write` call.
    ///
    /// Sink yang menerima lebih sedikit dari yang ditawarkan membuat encoder
    /// faulted. Buffer tidak dikosongkan; itu tugas `reset()`.
    pub fn drain_to<W: Write>(&mut self, mut sink: W) -> usize {
        let Some(buf) = self.bytes() else {
            return 0;
        };
        let expected = buf.len();

        let written = loop {
            match sink.write(buf) {
                Ok(n) => break n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.fail(CodecError::Sink(e));
                    return 0;
                }
            }
        };

        if written < expected {
            self.fail(EncodeFault::ShortWrite { written, expected }.into());
            return written;
        }
        if let Err(e) = sink.flush() {
            self.fail(CodecError::Sink(e));
            return written;
        }

        debug!(bytes = written, "encoder drained");
        written
    }
}

impl Decoder {
    /// Append chunk dari source sampai end-of-input.
    ///
    /// End-of-input bukan error. Read failure lain menghentikan fill dan
    /// jadi sticky error; bytes yang sudah terbaca tetap di buffer.
    /// Returns jumlah bytes yang ditambahkan.
    pub fn fill_from<R: Read>(&mut self, mut source: R) -> usize {
        if self.error().is_some() {
            return 0;
        }

        let mut chunk = vec![0u8; self.config().fill_chunk_size.max(1)];
        let mut total = 0usize;

        loop {
            match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    self.input_mut().extend_from_slice(&chunk[..n]);
                    total += n;
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.fail(CodecError::Source(e));
                    break;
                }
            }
        }

        debug!(bytes = total, pos = self.pos(), "decoder filled");
        total
    }
}
