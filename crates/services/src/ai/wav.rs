//! Packaging of raw PCM speech into a WAV container.

use thiserror::Error;

use cosmic_core::model::DataUri;

use crate::error::AiError;

/// Sample rate assumed when the speech model does not state one.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

const BITS_PER_SAMPLE: u16 = 16;
const HEADER_LEN: usize = 44;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WavError {
    #[error("PCM payload is empty")]
    Empty,
    #[error("PCM payload of {len} bytes is not a whole number of {block_align}-byte frames")]
    Misaligned { len: usize, block_align: usize },
    #[error("invalid PCM parameter `{0}`")]
    InvalidParameter(String),
    #[error("PCM payload too large for a WAV container")]
    TooLarge,
    #[error("unsupported audio format `{0}`")]
    Unsupported(String),
}

/// Wrap 16-bit little-endian PCM samples in a RIFF/WAVE header.
///
/// # Errors
///
/// Returns `WavError` for empty or misaligned payloads, zero channels or rate,
/// or payloads that overflow the 32-bit RIFF size fields.
pub fn encode_wav(pcm: &[u8], sample_rate: u32, channels: u16) -> Result<Vec<u8>, WavError> {
    if pcm.is_empty() {
        return Err(WavError::Empty);
    }
    if sample_rate == 0 {
        return Err(WavError::InvalidParameter("rate=0".into()));
    }
    if channels == 0 {
        return Err(WavError::InvalidParameter("channels=0".into()));
    }
    let block_align = channels
        .checked_mul(BITS_PER_SAMPLE / 8)
        .ok_or(WavError::TooLarge)?;
    if pcm.len() % usize::from(block_align) != 0 {
        return Err(WavError::Misaligned {
            len: pcm.len(),
            block_align: usize::from(block_align),
        });
    }
    let data_len = u32::try_from(pcm.len()).map_err(|_| WavError::TooLarge)?;
    let riff_len = data_len.checked_add(36).ok_or(WavError::TooLarge)?;
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or(WavError::TooLarge)?;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16_u32.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    Ok(out)
}

/// Turn speech-model output into audio a player can open.
///
/// Raw PCM (`audio/L16`, `audio/pcm`) is wrapped as `audio/wav`; other audio
/// formats pass through unchanged.
///
/// # Errors
///
/// Returns `AiError::Audio` for non-audio payloads or PCM that cannot be wrapped.
pub fn to_playable(audio: DataUri) -> Result<DataUri, AiError> {
    let essence = audio.essence();
    if essence == "audio/l16" || essence == "audio/pcm" {
        let sample_rate = parse_param(&audio, "rate")?.unwrap_or(DEFAULT_SAMPLE_RATE);
        let channels = match parse_param(&audio, "channels")? {
            Some(channels) => u16::try_from(channels)
                .map_err(|_| WavError::InvalidParameter(format!("channels={channels}")))?,
            None => 1,
        };
        // Gemini labels its output L16 but emits little-endian samples, which is what WAV wants.
        let wav = encode_wav(&audio.decode()?, sample_rate, channels)?;
        return Ok(DataUri::from_bytes("audio/wav", &wav)?);
    }
    if audio.is_audio() {
        return Ok(audio);
    }
    Err(WavError::Unsupported(audio.mime_type().to_string()).into())
}

fn parse_param(audio: &DataUri, key: &str) -> Result<Option<u32>, WavError> {
    audio
        .mime_param(key)
        .map(|raw| {
            raw.parse::<u32>()
                .map_err(|_| WavError::InvalidParameter(format!("{key}={raw}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn writes_canonical_header() {
        let wav = encode_wav(&[1, 0, 2, 0], 24_000, 1).unwrap();
        assert_eq!(wav.len(), 48);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 40);
        assert_eq!(&wav[8..16], b"WAVEfmt ");
        assert_eq!(u32_at(&wav, 24), 24_000);
        assert_eq!(u32_at(&wav, 28), 48_000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 4);
        assert_eq!(&wav[44..], &[1, 0, 2, 0]);
    }

    #[test]
    fn rejects_partial_frames() {
        assert_eq!(
            encode_wav(&[1, 2, 3], 24_000, 1).unwrap_err(),
            WavError::Misaligned {
                len: 3,
                block_align: 2
            }
        );
        assert_eq!(encode_wav(&[], 24_000, 1).unwrap_err(), WavError::Empty);
    }

    #[test]
    fn wraps_pcm_using_declared_rate() {
        let pcm = DataUri::from_bytes("audio/L16;codec=pcm;rate=16000", &[0, 0, 1, 0]).unwrap();
        let wav = to_playable(pcm).unwrap();
        assert_eq!(wav.mime_type(), "audio/wav");
        let bytes = wav.decode().unwrap();
        assert_eq!(u32_at(&bytes, 24), 16_000);
    }

    #[test]
    fn passes_through_container_formats() {
        let mp3 = DataUri::from_bytes("audio/mpeg", &[0xFF, 0xFB]).unwrap();
        assert_eq!(to_playable(mp3.clone()).unwrap(), mp3);
    }

    #[test]
    fn rejects_non_audio() {
        let image = DataUri::from_bytes("image/png", &[1]).unwrap();
        assert!(matches!(
            to_playable(image).unwrap_err(),
            AiError::Audio(WavError::Unsupported(_))
        ));
    }
}
