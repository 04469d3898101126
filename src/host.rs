use crate::audio::Cue;

pub trait Host {
    fn play_cue(&mut self, cue: Cue);
    fn set_fullscreen(&mut self, on: bool);
}

/// Host that ignores everything; for headless runs.
#[derive(Debug, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn play_cue(&mut self, _cue: Cue) {}

    fn set_fullscreen(&mut self, _on: bool) {}
}
