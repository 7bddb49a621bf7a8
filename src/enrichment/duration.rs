//! Audio duration estimation.
//!
//! The payload is read as a sequence of compressed frames (one symphonia
//! packet per frame) and the per-frame play times are summed. Frames are
//! never decoded to samples; only the container/frame headers are parsed.
//!
//! Supported formats follow the enabled symphonia features:
//! - MP3
//! - FLAC
//! - OGG Vorbis
//! - WAV/PCM
//! - AAC

use std::io::Cursor;
use std::time::Duration;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use super::domain::DecodeError;
use super::traits::DurationEstimator;

/// A stream of audio frames.
pub trait FrameSource {
    /// Play time of the next frame, or `Ok(None)` at a clean end of stream.
    fn next_frame(&mut self) -> Result<Option<Duration>, DecodeError>;
}

/// Sum the play time of every frame in `source`.
///
/// Stops at the end-of-stream marker. Any other error is returned as-is;
/// a partially read stream never yields a duration.
pub fn sum_frame_durations<S: FrameSource + ?Sized>(
    source: &mut S,
) -> Result<Duration, DecodeError> {
    let mut total = Duration::ZERO;
    while let Some(frame) = source.next_frame()? {
        total += frame;
    }
    Ok(total)
}

/// Frame source over a symphonia format reader.
pub struct PacketFrames {
    reader: Box<dyn FormatReader>,
    track_id: u32,
    time_base: Option<TimeBase>,
    sample_rate: Option<u32>,
}

impl PacketFrames {
    /// Detect the container of an in-memory payload and select its first audio track.
    ///
    /// `extension` is a format hint such as "mp3"; format detection still inspects
    /// the bytes when the hint is absent or wrong.
    pub fn open(payload: Vec<u8>, extension: Option<&str>) -> Result<Self, DecodeError> {
        let source = Cursor::new(payload);
        let mss = MediaSourceStream::new(Box::new(source), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        let detected = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

        let reader = detected.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecodeError::NoAudioTrack)?;

        let track_id = track.id;
        let time_base = track.codec_params.time_base;
        let sample_rate = track.codec_params.sample_rate;

        if time_base.is_none() && sample_rate.is_none() {
            return Err(DecodeError::UnsupportedFormat(
                "track has neither a time base nor a sample rate".to_string(),
            ));
        }

        Ok(Self {
            reader,
            track_id,
            time_base,
            sample_rate,
        })
    }

    fn frame_duration(&self, dur: u64) -> Duration {
        if let Some(tb) = self.time_base {
            let time = tb.calc_time(dur);
            Duration::from_secs(time.seconds) + Duration::from_secs_f64(time.frac)
        } else if let Some(rate) = self.sample_rate {
            Duration::from_secs_f64(dur as f64 / rate as f64)
        } else {
            Duration::ZERO
        }
    }
}

impl FrameSource for PacketFrames {
    fn next_frame(&mut self) -> Result<Option<Duration>, DecodeError> {
        loop {
            let packet = match self.reader.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(None);
                }
                Err(e) => return Err(DecodeError::Malformed(e.to_string())),
            };

            // Skip packets from other tracks
            if packet.track_id() != self.track_id {
                continue;
            }

            return Ok(Some(self.frame_duration(packet.dur())));
        }
    }
}

/// Production estimator backed by symphonia.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaEstimator;

impl DurationEstimator for SymphoniaEstimator {
    fn estimate(&self, payload: Vec<u8>, extension: Option<&str>) -> Result<Duration, DecodeError> {
        let mut frames = PacketFrames::open(payload, extension)?;
        sum_frame_durations(&mut frames)
    }
}

/// File extension of a URL's last path segment, lowercased.
///
/// Query strings and fragments are ignored.
pub fn extension_hint(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
