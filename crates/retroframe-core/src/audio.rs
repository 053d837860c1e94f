use log::{debug, warn};

use crate::host::{AudioStreamId, Host};

/// Cores always deliver interleaved stereo.
pub const AUDIO_CHANNELS: u16 = 2;

/// A host audio stream opened at the core's sample rate.
///
/// Batches are forwarded only while the host says the stream has room; anything
/// else is dropped. Cores keep running at full speed either way.
#[derive(Debug)]
pub struct AudioSink {
    stream: AudioStreamId,
    sample_rate: u32,
    written_frames: u64,
    dropped_frames: u64,
}

impl AudioSink {
    pub(crate) fn open(host: &mut dyn Host, sample_rate: u32) -> Option<Self> {
        let Some(stream) = host.open_audio_stream(sample_rate, AUDIO_CHANNELS) else {
            warn!("Host has no audio output at {sample_rate} Hz; core audio will be discarded");
            return None;
        };
        debug!("Opened audio stream {stream:?} at {sample_rate} Hz");

        Some(Self {
            stream,
            sample_rate,
            written_frames: 0,
            dropped_frames: 0,
        })
    }

    /// Offers interleaved samples to the host. Returns the number of frames
    /// consumed, which is every frame whether or not it was played.
    pub(crate) fn write(&mut self, host: &mut dyn Host, samples: &[i16]) -> usize {
        let frames = samples.len() / AUDIO_CHANNELS as usize;
        if frames == 0 {
            return 0;
        }

        let samples = &samples[..frames * AUDIO_CHANNELS as usize];
        if host.audio_stream_processed(self.stream) {
            host.update_audio_stream(self.stream, samples);
            self.written_frames += frames as u64;
        } else {
            self.dropped_frames += frames as u64;
        }
        frames
    }

    pub(crate) fn close(self, host: &mut dyn Host) {
        debug!(
            "Closing audio stream {:?} ({} frames written, {} dropped)",
            self.stream, self.written_frames, self.dropped_frames
        );
        host.close_audio_stream(self.stream);
    }

    pub fn stream(&self) -> AudioStreamId {
        self.stream
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn written_frames(&self) -> u64 {
        self.written_frames
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }
}
