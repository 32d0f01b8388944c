use anyhow::Result;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::{SaveFile, Stopwatch};
use crate::renderer::Display;
use crate::shared::constants::TICK_INTERVAL;
use crate::sync::Clock;
use crate::ui::input::{Action, Dispatcher, InputSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The main loop: owns the stopwatch and everything that reads or drives it.
pub struct Session<C: Clock, I: InputSource, W: Write> {
    stopwatch: Stopwatch<C>,
    dispatcher: Dispatcher,
    input: I,
    display: Display<W>,
    save_file: Option<SaveFile>,
    save_on_exit: bool,
    shutdown: Arc<AtomicBool>,
    finished: bool,
}

impl<C: Clock, I: InputSource, W: Write> Session<C, I, W> {
    pub fn new(
        stopwatch: Stopwatch<C>,
        dispatcher: Dispatcher,
        input: I,
        display: Display<W>,
        save_file: Option<SaveFile>,
        save_on_exit: bool,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            stopwatch,
            dispatcher,
            input,
            display,
            save_file,
            save_on_exit,
            shutdown,
            finished: false,
        }
    }

    /// Loop until quit or signal, then clean up.
    ///
    /// `before_final` runs once right before the final line is drawn; the
    /// launcher uses it to leave raw mode.
    pub fn run(&mut self, before_final: impl FnOnce()) -> Result<()> {
        self.display.render(self.stopwatch.elapsed(), true)?;
        while self.tick()? == Flow::Continue {}
        self.finish(before_final)
    }

    /// One iteration: poll input, apply it, redraw.
    pub fn tick(&mut self) -> Result<Flow> {
        if self.shutdown.load(Ordering::SeqCst) {
            crate::utils::logger::info("shutdown requested");
            return Ok(Flow::Exit);
        }

        let mut force = false;
        if let Some(key) = self.input.poll_key(TICK_INTERVAL)? {
            let was_running = self.stopwatch.is_running();
            match self.dispatcher.dispatch(key, was_running) {
                Action::None => {}
                Action::Toggle => {
                    let running = self.stopwatch.toggle();
                    crate::utils::logger::debug(if running { "resumed" } else { "paused" });
                    force = !running;
                }
                Action::PauseAndQuit => {
                    self.stopwatch.pause();
                    return Ok(Flow::Exit);
                }
                Action::Save => self.save_now()?,
                Action::Reset => {
                    self.stopwatch.reset();
                    force = !was_running;
                }
                Action::NudgeForward => {
                    self.stopwatch.nudge_forward();
                    force = !was_running;
                }
                Action::NudgeBack => {
                    self.stopwatch.nudge_back();
                    force = !was_running;
                }
                Action::Quit => return Ok(Flow::Exit),
            }
        }

        if force || self.stopwatch.is_running() {
            self.display.render(self.stopwatch.elapsed(), force)?;
        }
        Ok(Flow::Continue)
    }

    /// Final line, then save-on-exit. Only the first call does anything.
    pub fn finish(&mut self, before_final: impl FnOnce()) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        before_final();
        let elapsed = self.stopwatch.elapsed();
        self.display.render_final(elapsed)?;

        if self.save_on_exit {
            self.save_now()?;
        }
        Ok(())
    }

    fn save_now(&self) -> Result<()> {
        let Some(save_file) = &self.save_file else {
            anyhow::bail!("no save file location available");
        };
        save_file.store(self.stopwatch.elapsed())
    }

    pub fn stopwatch(&self) -> &Stopwatch<C> {
        &self.stopwatch
    }

    #[cfg(test)]
    pub fn display(&self) -> &Display<W> {
        &self.display
    }
}
