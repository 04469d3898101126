//! Synthesized sound cues. Nothing is loaded from disk; each cue is a short
//! run of sine tones rendered to 16-bit mono PCM.
use tracing::warn;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Eat,
    Collide,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tone {
    pub freq_hz: f64,
    pub duration_ms: u32,
}

const fn tone(freq_hz: f64, duration_ms: u32) -> Tone {
    Tone { freq_hz, duration_ms }
}

const EAT_TONES: [Tone; 2] = [tone(880.0, 70), tone(1040.0, 70)];
const COLLIDE_TONES: [Tone; 4] = [tone(520.0, 90), tone(420.0, 90), tone(320.0, 110), tone(240.0, 140)];

impl Cue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Eat => &EAT_TONES,
            Cue::Collide => &COLLIDE_TONES,
        }
    }

    pub fn volume(self) -> f64 {
        match self {
            Cue::Eat => 0.35,
            Cue::Collide => 0.45,
        }
    }

    pub fn render(self) -> Vec<i16> {
        synthesize(self.tones(), SAMPLE_RATE, self.volume())
    }
}

/// Renders tones back to back. Each tone ramps linearly in and out over 12%
/// of its own length so there is no click at the joins.
pub fn synthesize(tones: &[Tone], sample_rate: u32, volume: f64) -> Vec<i16> {
    let sr = sample_rate as f64;
    let total: usize = tones.iter().map(|t| tone_samples(t, sample_rate)).sum();
    let mut pcm = Vec::with_capacity(total);

    for t in tones {
        let samples = tone_samples(t, sample_rate);
        let fade = ((samples as f64 * 0.12) as usize).max(1);

        for n in 0..samples {
            let s = (2.0 * std::f64::consts::PI * t.freq_hz * (n as f64 / sr)).sin();
            let env = if n < fade {
                n as f64 / fade as f64
            } else if n > samples - fade {
                (samples - n) as f64 / fade as f64
            } else {
                1.0
            };
            pcm.push((s * env * volume * i16::MAX as f64) as i16);
        }
    }
    pcm
}

fn tone_samples(t: &Tone, sample_rate: u32) -> usize {
    (sample_rate as u64 * t.duration_ms as u64 / 1000) as usize
}

/// Cue player. Any failure to reach an output device leaves it silent.
pub struct Audio {
    output: Option<device::Output>,
}

impl Audio {
    pub fn silent() -> Self {
        Audio { output: None }
    }

    #[cfg(feature = "audio")]
    pub fn open() -> Self {
        match device::Output::open() {
            Ok(output) => Audio { output: Some(output) },
            Err(err) => {
                warn!(%err, "no audio output, cues are muted");
                Audio::silent()
            }
        }
    }

    #[cfg(not(feature = "audio"))]
    pub fn open() -> Self {
        warn!("built without the audio feature, cues are muted");
        Audio::silent()
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none()
    }

    pub fn play(&mut self, cue: Cue) {
        if let Some(output) = &mut self.output {
            output.play(cue);
        }
    }
}

#[cfg(not(feature = "audio"))]
mod device {
    use super::Cue;

    pub enum Output {}

    impl Output {
        pub fn play(&mut self, _cue: Cue) {
            match *self {}
        }
    }
}

#[cfg(feature = "audio")]
mod device {
    use std::collections::HashMap;

    use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};
    use tracing::debug;

    use super::{Cue, SAMPLE_RATE};

    pub struct Output {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        clips: HashMap<Cue, Vec<i16>>,
        // Restarting a cue cuts off the previous instance of it.
        playing: HashMap<Cue, Sink>,
    }

    impl Output {
        pub fn open() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            let clips = [Cue::Eat, Cue::Collide]
                .into_iter()
                .map(|cue| (cue, cue.render()))
                .collect();
            Ok(Output { _stream: stream, handle, clips, playing: HashMap::new() })
        }

        pub fn play(&mut self, cue: Cue) {
            let Some(clip) = self.clips.get(&cue) else {
                return;
            };
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(err) => {
                    debug!(%err, ?cue, "dropping cue");
                    return;
                }
            };
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, clip.clone()));
            if let Some(old) = self.playing.insert(cue, sink) {
                old.stop();
            }
        }
    }
}
