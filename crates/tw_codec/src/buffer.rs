use core::cell::Cell;

use crate::CodecConfig;

thread_local! {
    static SCRATCH: Cell<Option<Vec<u8>>> = const { Cell::new(None) };
}

// -----------------------------------------------------------------------------
// WriteBuffer

/// An output buffer borrowed from the current thread's scratch slot.
///
/// The buffer is cleared and handed back on drop, success or failure, so the
/// next serialization on this thread starts from an empty buffer without
/// reallocating.
pub(crate) struct WriteBuffer {
    buf: Vec<u8>,
    retain: usize,
}

impl WriteBuffer {
    pub(crate) fn acquire(config: &CodecConfig) -> Self {
        let mut buf = SCRATCH
            .try_with(Cell::take)
            .ok()
            .flatten()
            .unwrap_or_default();
        buf.clear();
        buf.reserve(config.buffer_capacity());

        Self {
            buf,
            retain: config.retained_buffer_capacity(),
        }
    }

    #[inline]
    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl Drop for WriteBuffer {
    fn drop(&mut self) {
        if self.buf.capacity() == 0 || self.buf.capacity() > self.retain {
            return;
        }
        let mut buf = core::mem::take(&mut self.buf);
        buf.clear();
        // The slot is gone during thread teardown; dropping is fine then.
        let _ = SCRATCH.try_with(|slot| slot.set(Some(buf)));
    }
}

#[cfg(test)]
mod tests {
    use super::WriteBuffer;
    use crate::CodecConfig;

    #[test]
    fn buffers_come_back_empty() {
        let config = CodecConfig::new();

        let ptr = {
            let mut first = WriteBuffer::acquire(&config);
            first.as_mut_vec().extend_from_slice(b"left over");
            first.as_slice().as_ptr()
        };

        let second = WriteBuffer::acquire(&config);
        assert!(second.as_slice().is_empty());
        assert_eq!(second.buf.as_ptr(), ptr);
    }

    #[test]
    fn oversized_buffers_are_not_kept() {
        let config = CodecConfig::new().with_retained_buffer_capacity(16);

        {
            let mut big = WriteBuffer::acquire(&config);
            big.as_mut_vec().resize(1024, 0);
        }

        let next = WriteBuffer::acquire(&config.with_buffer_capacity(0));
        assert_eq!(next.buf.capacity(), 0);
    }
}
