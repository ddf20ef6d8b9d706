//! Stream Layer: I/O adapters untuk encoder/decoder
//!
//! Fitur:
//! - `Encoder::drain_to`: kirim buffer ke `Write` apa pun (file, socket, Vec)
//! - `Decoder::fill_from`: kumpulkan bytes dari `Read` sampai EOF
//!
//! Blocking hanya sebatas `read`/`write` milik source/sink;
//! tidak ada thread atau buffering tambahan di sini.

mod adapters;
