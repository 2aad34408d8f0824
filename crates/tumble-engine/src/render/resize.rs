use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::SurfaceSize;

const EMPTY: u64 = u64::MAX;

#[inline]
fn pack(size: SurfaceSize) -> u64 {
    (u64::from(size.width) << 32) | u64::from(size.height)
}

#[inline]
fn unpack(bits: u64) -> SurfaceSize {
    SurfaceSize::new((bits >> 32) as u32, bits as u32)
}

/// Single-slot mailbox for viewport size changes.
///
/// Posts from any thread overwrite each other (newest wins); the render thread
/// drains the slot between frames, never while a frame is being encoded.
#[derive(Debug, Clone)]
pub struct ResizeQueue {
    pending: Arc<AtomicU64>,
}

impl ResizeQueue {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(AtomicU64::new(EMPTY)),
        }
    }

    /// Records `size`, replacing any size not yet applied.
    ///
    /// `u32::MAX x u32::MAX` collides with the empty marker and is dropped; no
    /// real surface gets there.
    #[inline]
    pub fn post(&self, size: SurfaceSize) {
        let bits = pack(size);
        if bits != EMPTY {
            self.pending.store(bits, Ordering::Release);
        }
    }

    /// Takes the newest posted size, if any.
    #[inline]
    pub fn take(&self) -> Option<SurfaceSize> {
        match self.pending.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            bits => Some(unpack(bits)),
        }
    }
}

impl Default for ResizeQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_queue_yields_nothing() {
        let q = ResizeQueue::new();
        assert_eq!(q.take(), None);
    }

    #[test]
    fn newest_size_wins() {
        let q = ResizeQueue::new();
        q.post(SurfaceSize::new(640, 480));
        q.post(SurfaceSize::new(1920, 1080));
        assert_eq!(q.take(), Some(SurfaceSize::new(1920, 1080)));
        assert_eq!(q.take(), None);
    }

    #[test]
    fn zero_size_round_trips() {
        let q = ResizeQueue::new();
        q.post(SurfaceSize::new(0, 0));
        assert_eq!(q.take(), Some(SurfaceSize::new(0, 0)));
    }

    #[test]
    fn posts_from_other_threads_are_visible() {
        let q = ResizeQueue::new();
        let remote = q.clone();
        thread::spawn(move || remote.post(SurfaceSize::new(300, 200)))
            .join()
            .unwrap();
        assert_eq!(q.take(), Some(SurfaceSize::new(300, 200)));
    }
}
