use anyhow::Result;
use std::io::Write;

use crate::core::codec;
use crate::sync::Duration;

/// Single-line elapsed time renderer.
///
/// Running frames end in `\r` so the next frame overwrites them; the final
/// frame starts with `\r` and ends in a newline.
pub struct Display<W: Write> {
    out: W,
    last_line: Option<String>,
    finished: bool,
}

impl<W: Write> Display<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_line: None,
            finished: false,
        }
    }

    /// Draw `elapsed` in place. Skipped when the text has not changed, unless `force`.
    pub fn render(&mut self, elapsed: Duration, force: bool) -> Result<()> {
        let line = codec::encode(elapsed);
        if !force && self.last_line.as_deref() == Some(line.as_str()) {
            return Ok(());
        }

        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\r")?;
        self.out.flush()?;
        self.last_line = Some(line);
        Ok(())
    }

    /// Draw the last line with a newline. Later calls do nothing.
    pub fn render_final(&mut self, elapsed: Duration) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let line = codec::encode(elapsed);
        self.out.write_all(b"\r")?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.last_line = Some(line);
        Ok(())
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}
