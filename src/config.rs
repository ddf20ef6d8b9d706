//! Codec configuration
//!
//! Semua knob punya default yang aman; library tidak membaca environment.

/// Default kapasitas awal buffer encoder
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Default ukuran chunk untuk `Decoder::fill_from`
pub const DEFAULT_FILL_CHUNK_SIZE: usize = 256;

/// How a decoder treats a varint that ends before its declared window does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    /// The varint must fill the declared window exactly; leftovers are a decode error.
    #[default]
    Strict,
    /// The declared length wins; bytes after the varint inside the window are ignored.
    Lenient,
}

/// Encoder/decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bytes preallocated for the encoder output
    pub initial_capacity: usize,
    /// Read chunk size used by `fill_from`
    pub fill_chunk_size: usize,
    /// Length-byte vs varint mismatch handling
    pub window_policy: WindowPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            fill_chunk_size: DEFAULT_FILL_CHUNK_SIZE,
            window_policy: WindowPolicy::Strict,
        }
    }
}

impl CodecConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set chunk size untuk fill; nol dibulatkan ke satu byte
    pub fn with_fill_chunk_size(mut self, size: usize) -> Self {
        self.fill_chunk_size = size.max(1);
        self
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }
}
