use std::{thread::sleep, time::Instant};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info, warn};

use crate::audio::{Audio, Cue};
use crate::config::GameConfig;
use crate::error::TermError;
use crate::game::Game;
use crate::host::Host;
use crate::input::command_for;
use crate::prefs::ScoreStore;
use crate::raster::Framebuffer;
use crate::term::TermManager;

pub struct TermHost {
    pub term: TermManager,
    audio: Audio,
}

impl TermHost {
    pub fn new(term: TermManager, audio: Audio) -> Self {
        TermHost { term, audio }
    }
}

impl Host for TermHost {
    fn play_cue(&mut self, cue: Cue) {
        self.audio.play(cue);
    }

    fn set_fullscreen(&mut self, on: bool) {
        if let Err(err) = self.term.set_alternate_screen(on) {
            warn!(%err, on, "could not switch screen buffer");
        }
    }
}

pub struct RunOptions {
    pub fullscreen: bool,
    pub mute: bool,
    pub seed: Option<u64>,
}

pub fn run<S: ScoreStore>(config: GameConfig, store: S, opts: RunOptions) -> Result<(), TermError> {
    let mut term = TermManager::new();
    term.setup()?;

    let audio = if opts.mute { Audio::silent() } else { Audio::open() };
    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(config, TermHost::new(term, audio), store, rng, opts.fullscreen);
    info!(best = game.grid().best(), "starting");

    let result = game_loop(&mut game);

    if let Err(err) = game.host_mut().term.restore() {
        error!(%err, "failed to restore terminal");
    }
    result
}

fn game_loop<S: ScoreStore>(game: &mut Game<TermHost, S>) -> Result<(), TermError> {
    let period = game.grid().config().frame_period();
    let (cols, rows) = game.host().term.get_terminal_size()?;
    let mut fb = Framebuffer::new(cols, rows);
    let mut last = Instant::now();

    loop {
        for key_ev in game.host().term.read_key_events_queue()? {
            if let Some(cmd) = command_for(&key_ev) {
                if !game.handle(cmd) {
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        game.frame(now - last);
        last = now;

        let (cols, rows) = game.host().term.get_terminal_size()?;
        fb.resize(cols, rows);
        game.render(&mut fb);
        game.host_mut().term.present(&fb)?;

        sleep(period.saturating_sub(now.elapsed()));
    }
}
