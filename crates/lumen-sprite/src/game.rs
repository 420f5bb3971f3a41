use anyhow::Result;

use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::GpuInit;
use lumen_engine::paint::Color;
use lumen_engine::window::{Runtime, RuntimeConfig};

/// Game lifecycle: [`init`](Game::init), [`run`](Game::run), teardown on drop.
pub struct Game {
    config: RuntimeConfig,
    gpu_init: GpuInit,
}

impl Game {
    /// Prepares the game. Nothing is loaded yet.
    pub fn init() -> Result<Self> {
        let config = RuntimeConfig {
            title: "lumen-sprite".to_string(),
            ..RuntimeConfig::default()
        };
        log::debug!("game initialized");
        Ok(Self { config, gpu_init: GpuInit::default() })
    }

    /// Runs the main loop until the window is closed.
    pub fn run(&mut self) -> Result<()> {
        Runtime::run(self.config.clone(), self.gpu_init.clone(), GameLoop::default())
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        log::debug!("game destroyed");
    }
}

/// Per-frame hooks. No game logic yet; frames are cleared and presented.
#[derive(Default)]
struct GameLoop {
    frames: u64,
}

impl GameLoop {
    fn update(&mut self, _dt: f32) {
        self.frames += 1;
    }
}

impl App for GameLoop {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        self.update(ctx.time.dt);
        ctx.render(Color::from_premul(0.0, 0.0, 0.0, 1.0), |_, _| Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sets_the_window_title() {
        let game = Game::init().unwrap();
        assert_eq!(game.config.title, "lumen-sprite");
        assert!(!game.config.fullscreen);
    }

    #[test]
    fn update_counts_frames() {
        let mut game_loop = GameLoop::default();
        game_loop.update(0.016);
        game_loop.update(0.016);
        assert_eq!(game_loop.frames, 2);
    }
}
