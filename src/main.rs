//! encdec - Codec Throughput Report
//!
//! Mengukur latency encode/decode untuk bentuk data yang umum:
//! - Record via marshal hook (int, float, string, timestamp)
//! - Slice string dengan count prefix
//! - Map string -> int dengan count prefix
//!
//! Usage:
//!   RUST_LOG=debug cargo run --release

use std::collections::HashMap;
use std::time::{Instant, SystemTime};

use encdec::{CodecError, Decoder, Encoder, Marshal, Unmarshal};
use tracing::error;
use tracing_subscriber::EnvFilter;

const ITERATIONS: usize = 1_000_000;

/// Record contoh untuk benchmark marshal hook
#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: i64,
    score: f64,
    label: String,
    created: SystemTime,
}

impl Record {
    fn sample() -> Self {
        Self {
            id: 123_456,
            score: 0.123_456,
            label: "abcdefg".to_string(),
            created: SystemTime::now(),
        }
    }
}

impl Marshal for Record {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        let mut enc = Encoder::with_capacity(64);
        enc.write_int(self.id);
        enc.write_float(self.score);
        enc.write_bytes(self.label.as_bytes());
        enc.write_marshalable(&self.created);
        enc.finish()
    }
}

impl Unmarshal for Record {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let mut dec = Decoder::from_slice(data);
        self.id = dec.read_int();
        self.score = dec.read_float();
        self.label.unmarshal(dec.read_bytes())?;
        dec.read_marshalable(&mut self.created);
        dec.finish()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🚀 encdec - Codec Throughput Report");
    println!("===================================\n");

    let results = [
        ("record", benchmark_record()),
        ("slice", benchmark_slice()),
        ("map", benchmark_map()),
    ];

    let mut failed = false;
    for (name, result) in &results {
        if let Err(err) = result {
            error!(benchmark = *name, error = %err, "benchmark failed");
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
    println!("\n✅ All benchmarks complete!");
}

fn report(label: &str, ops: usize, encode_ns: f64, decode_ns: f64, bytes: usize) {
    println!("  {label}");
    println!("  Operations: {}", ops);
    println!("  Encoded size: {} bytes/op", bytes / ops.max(1));
    println!(
        "  Encode latency: {:.2} ns/op ({:.3} μs/op)",
        encode_ns,
        encode_ns / 1000.0
    );
    println!(
        "  Decode latency: {:.2} ns/op ({:.3} μs/op)\n",
        decode_ns,
        decode_ns / 1000.0
    );
}

fn benchmark_record() -> Result<(), CodecError> {
    println!("📊 Record Benchmark (Marshal Hook)");
    println!("----------------------------------");

    let record = Record::sample();

    let mut enc = Encoder::with_capacity(ITERATIONS * 48);
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        enc.write_marshalable(&record);
    }
    let encode_duration = start.elapsed();
    let encoded = enc.finish()?;
    let size = encoded.len();

    let mut out = Record {
        id: 0,
        score: 0.0,
        label: String::new(),
        created: SystemTime::UNIX_EPOCH,
    };
    let mut dec = Decoder::new(encoded);
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        dec.read_marshalable(&mut out);
    }
    let decode_duration = start.elapsed();
    dec.finish()?;

    if out != record {
        error!(?out, "decoded record differs from source");
    }

    report(
        "Record: int + float + string + timestamp",
        ITERATIONS,
        encode_duration.as_nanos() as f64 / ITERATIONS as f64,
        decode_duration.as_nanos() as f64 / ITERATIONS as f64,
        size,
    );
    Ok(())
}

fn benchmark_slice() -> Result<(), CodecError> {
    println!("📊 Slice Benchmark (Count Prefix)");
    println!("---------------------------------");

    let items = ["a", "ab", "abc", "abcd"];

    let mut enc = Encoder::with_capacity(ITERATIONS * 24);
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        enc.write_uint(items.len() as u64);
        for item in &items {
            enc.write_bytes(item.as_bytes());
        }
    }
    let encode_duration = start.elapsed();
    let encoded = enc.finish()?;
    let size = encoded.len();

    let mut dec = Decoder::new(encoded);
    let mut decoded: Vec<String> = Vec::with_capacity(items.len());
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        decoded.clear();
        let count = dec.read_uint() as usize;
        for _ in 0..count {
            decoded.push(String::from_utf8_lossy(dec.read_bytes()).into_owned());
        }
    }
    let decode_duration = start.elapsed();
    dec.finish()?;

    report(
        "Slice: 4 strings",
        ITERATIONS,
        encode_duration.as_nanos() as f64 / ITERATIONS as f64,
        decode_duration.as_nanos() as f64 / ITERATIONS as f64,
        size,
    );
    Ok(())
}

fn benchmark_map() -> Result<(), CodecError> {
    println!("📊 Map Benchmark (Count Prefix)");
    println!("-------------------------------");

    let map: HashMap<&str, u64> = [("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect();

    let mut enc = Encoder::with_capacity(ITERATIONS * 24);
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        enc.write_uint(map.len() as u64);
        for (k, v) in &map {
            enc.write_bytes(k.as_bytes());
            enc.write_uint(*v);
        }
    }
    let encode_duration = start.elapsed();
    let encoded = enc.finish()?;
    let size = encoded.len();

    let mut dec = Decoder::new(encoded);
    let mut decoded: HashMap<String, u64> = HashMap::with_capacity(map.len());
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        decoded.clear();
        let count = dec.read_uint() as usize;
        for _ in 0..count {
            let key = String::from_utf8_lossy(dec.read_bytes()).into_owned();
            decoded.insert(key, dec.read_uint());
        }
    }
    let decode_duration = start.elapsed();
    dec.finish()?;

    report(
        "Map: 4 entries",
        ITERATIONS,
        encode_duration.as_nanos() as f64 / ITERATIONS as f64,
        decode_duration.as_nanos() as f64 / ITERATIONS as f64,
        size,
    );
    Ok(())
}
