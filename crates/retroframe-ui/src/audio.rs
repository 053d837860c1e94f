use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, error, warn};
use std::cell::UnsafeCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free ring of interleaved stereo frames between the core thread and
/// the audio device callback.
///
/// Writes past capacity are dropped; reads from an empty ring return `None`.
struct Ring {
    slots: Box<[UnsafeCell<[i16; 2]>]>,
    write: AtomicUsize,
    read: AtomicUsize,
}

// Only the producer touches `slots[write]` and only the consumer touches
// `slots[read]`; the indices are published with release/acquire.
unsafe impl Sync for Ring {}

impl Ring {
    fn with_capacity(frames: usize) -> Self {
        // One slot stays empty so `write == read` always means empty.
        let slots = (0..frames.saturating_add(1).max(2))
            .map(|_| UnsafeCell::new([0; 2]))
            .collect();
        Self {
            slots,
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
        }
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.slots.len()
    }

    fn queued(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + self.slots.len() - read) % self.slots.len()
    }
}

/// Core side of the ring.
pub struct FrameProducer {
    ring: Arc<Ring>,
}

/// Device side of the ring.
pub struct FrameConsumer {
    ring: Arc<Ring>,
}

pub fn frame_ring(capacity_frames: usize) -> (FrameProducer, FrameConsumer) {
    let ring = Arc::new(Ring::with_capacity(capacity_frames));
    (
        FrameProducer {
            ring: Arc::clone(&ring),
        },
        FrameConsumer { ring },
    )
}

impl FrameProducer {
    /// Queues interleaved samples. Returns how many frames fit.
    pub fn push(&self, samples: &[i16]) -> usize {
        let ring = &self.ring;
        let mut write = ring.write.load(Ordering::Relaxed);
        let read = ring.read.load(Ordering::Acquire);
        let mut pushed = 0;

        for frame in samples.chunks_exact(2) {
            let next = ring.advance(write);
            if next == read {
                break;
            }
            unsafe { *ring.slots[write].get() = [frame[0], frame[1]] };
            write = next;
            pushed += 1;
        }

        ring.write.store(write, Ordering::Release);
        pushed
    }

    pub fn queued(&self) -> usize {
        self.ring.queued()
    }
}

impl FrameConsumer {
    pub fn pop(&self) -> Option<[i16; 2]> {
        let ring = &self.ring;
        let read = ring.read.load(Ordering::Relaxed);
        if read == ring.write.load(Ordering::Acquire) {
            return None;
        }
        let frame = unsafe { *ring.slots[read].get() };
        ring.read.store(ring.advance(read), Ordering::Release);
        Some(frame)
    }
}

/// A playing `cpal` stream fed from a [`FrameProducer`].
pub struct AudioOutput {
    producer: FrameProducer,
    latency_frames: usize,
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device at `sample_rate`. `None` if there is no
    /// device or it refuses the rate.
    pub fn start(sample_rate: u32, latency_frames: usize) -> Option<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let supported = match device.default_output_config() {
            Ok(c) => c,
            Err(e) => {
                warn!("No supported output config: {e}");
                return None;
            }
        };
        let sample_format = supported.sample_format();
        let mut config: cpal::StreamConfig = supported.into();
        config.sample_rate = cpal::SampleRate(sample_rate);
        let channels = config.channels as usize;

        let (producer, consumer) = frame_ring(latency_frames.saturating_mul(2));
        let err_fn = |err| error!("cpal stream error: {err}");

        let stream = match sample_format {
            cpal::SampleFormat::I16 => device.build_output_stream(
                &config,
                move |data: &mut [i16], _| fill(data, channels, &consumer, |s| s),
                err_fn,
                None,
            ),
            cpal::SampleFormat::U16 => device.build_output_stream(
                &config,
                move |data: &mut [u16], _| {
                    fill(data, channels, &consumer, |s| (s as i32 + 32768) as u16)
                },
                err_fn,
                None,
            ),
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config,
                move |data: &mut [f32], _| fill(data, channels, &consumer, |s| s as f32 / 32768.0),
                err_fn,
                None,
            ),
            other => {
                warn!("Unsupported sample format {other:?}");
                return None;
            }
        };

        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to open audio output at {sample_rate} Hz: {e}");
                return None;
            }
        };
        if let Err(e) = stream.play() {
            warn!("Failed to start audio output: {e}");
            return None;
        }
        debug!("Audio output at {sample_rate} Hz, {channels} channel(s)");

        Some(Self {
            producer,
            latency_frames,
            _stream: stream,
        })
    }

    /// Whether less than the configured latency is queued.
    pub fn wants_more(&self) -> bool {
        self.producer.queued() < self.latency_frames
    }

    pub fn queue(&self, samples: &[i16]) {
        let frames = samples.len() / 2;
        let pushed = self.producer.push(samples);
        if pushed < frames {
            debug!("Audio ring full; dropped {} frame(s)", frames - pushed);
        }
    }
}

/// Writes one device buffer, padding with silence when the ring runs dry.
fn fill<T: Copy>(data: &mut [T], channels: usize, consumer: &FrameConsumer, convert: impl Fn(i16) -> T) {
    for frame in data.chunks_mut(channels) {
        let [left, right] = consumer.pop().unwrap_or([0, 0]);
        frame[0] = convert(left);
        if channels > 1 {
            frame[1] = convert(right);
        }
        for extra in frame.iter_mut().skip(2) {
            *extra = convert(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_drops_newest_when_full() {
        let (producer, consumer) = frame_ring(2);
        assert_eq!(producer.push(&[1, 2, 3, 4, 5, 6]), 2);
        assert_eq!(producer.queued(), 2);
        assert_eq!(consumer.pop(), Some([1, 2]));
        assert_eq!(consumer.pop(), Some([3, 4]));
        assert_eq!(consumer.pop(), None);
    }

    #[test]
    fn ring_wraps_around() {
        let (producer, consumer) = frame_ring(3);
        for round in 0..5i16 {
            assert_eq!(producer.push(&[round, -round, round + 1, -round - 1]), 2);
            assert_eq!(consumer.pop(), Some([round, -round]));
            assert_eq!(consumer.pop(), Some([round + 1, -round - 1]));
        }
        assert_eq!(producer.queued(), 0);
    }

    #[test]
    fn silence_pads_an_empty_ring() {
        let (producer, consumer) = frame_ring(4);
        producer.push(&[100, -100]);
        let mut out = [7i16; 6];
        fill(&mut out, 3, &consumer, |s| s);
        assert_eq!(out, [100, -100, 0, 0, 0, 0]);
    }
}
