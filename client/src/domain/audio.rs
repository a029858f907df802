use serde::{Deserialize, Serialize};

/// PCM sample formats the media engine can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Pcm8,
    Pcm16,
    Pcm32,
}

impl AudioFormat {
    pub fn bytes_per_sample(self) -> u32 {
        match self {
            AudioFormat::Pcm8 => 1,
            AudioFormat::Pcm16 => 2,
            AudioFormat::Pcm32 => 4,
        }
    }
}

/// Direction of an audio stream relative to this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioStreamType {
    Output,
    Input,
}

/// Audio format negotiated with the engine before connecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSpec {
    pub format: AudioFormat,
    /// Samples per second
    pub freq: u32,
    pub channels: u32,
}

impl Default for AudioSpec {
    fn default() -> Self {
        Self {
            format: AudioFormat::Pcm16,
            freq: 48_000,
            channels: 2,
        }
    }
}

impl AudioSpec {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.freq == 0 || self.freq % 100 != 0 {
            return Err("Sample rate must be a non-zero multiple of 100");
        }
        if self.channels == 0 {
            return Err("Channel count must be positive");
        }
        Ok(())
    }

    /// Samples per channel in one 10 ms slice (the device callback size)
    pub fn samples_per_slice(&self) -> u32 {
        self.freq / 100
    }

    /// Bytes in one 10 ms slice of interleaved PCM
    pub fn slice_len(&self) -> usize {
        (self.freq / 100) as usize * self.channels as usize * self.format.bytes_per_sample() as usize
    }
}
