// -----------------------------------------------------------------------------
// CodecConfig

/// Limits and buffer sizes of a [`Codec`](crate::Codec).
///
/// ```
/// use tw_codec::CodecConfig;
///
/// let config = CodecConfig::new().with_max_depth(16);
/// assert_eq!(config.max_depth(), 16);
/// assert_eq!(config.buffer_capacity(), CodecConfig::DEFAULT.buffer_capacity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    max_depth: usize,
    buffer_capacity: usize,
    retained_buffer_capacity: usize,
}

impl CodecConfig {
    pub const DEFAULT: Self = Self {
        max_depth: 100,
        buffer_capacity: 512,
        retained_buffer_capacity: 64 * 1024,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets how deeply messages may nest before encoding or decoding fails.
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the capacity reserved for each serialization.
    #[inline]
    pub const fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the largest scratch buffer kept for reuse by a thread.
    ///
    /// Buffers that grew beyond this are freed after use. Zero disables reuse.
    #[inline]
    pub const fn with_retained_buffer_capacity(mut self, capacity: usize) -> Self {
        self.retained_buffer_capacity = capacity;
        self
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    #[inline]
    pub const fn retained_buffer_capacity(&self) -> usize {
        self.retained_buffer_capacity
    }
}

impl Default for CodecConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
