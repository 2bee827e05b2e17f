// ============================================================
// Layer 5 — Console Progress Reporter
// ============================================================
// Draws one self-overwriting line per epoch while the inner
// step loop runs, then closes it with the epoch averages:
//
//   13 [==========>....................] loss:0.4213, acc:87.5000
//
// The bar is redrawn every `max(1, batch_size / 30)` steps,
// using a carriage return to rewrite the same line.

use std::io::{self, Stdout, Write};

/// Number of cells in the bar
pub const BAR_WIDTH: usize = 30;

pub struct ProgressReporter<W: Write = Stdout> {
    out: W,
}

impl ProgressReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Steps between redraws. Never zero, even for batches under 30.
    pub fn redraw_divisor(batch_size: usize) -> usize {
        (batch_size / BAR_WIDTH).max(1)
    }

    /// Bar body for `step` of `batch_size`: `q` fill cells, a pointer
    /// while `q < 30`, then `30 - q` empty cells.
    pub fn render_bar(step: usize, batch_size: usize) -> String {
        let q = step / Self::redraw_divisor(batch_size);
        let mut bar = String::with_capacity(q.max(BAR_WIDTH) + 1);
        bar.push_str(&"=".repeat(q));
        if q < BAR_WIDTH {
            bar.push('>');
        }
        bar.push_str(&".".repeat(BAR_WIDTH.saturating_sub(q)));
        bar
    }

    /// Called once per inner step; only draws on redraw steps.
    /// Returns whether anything was written.
    pub fn step(&mut self, epoch: u64, step: usize, batch_size: usize) -> io::Result<bool> {
        if step % Self::redraw_divisor(batch_size) != 0 {
            return Ok(false);
        }
        write!(self.out, "\r{} [{}]", epoch, Self::render_bar(step, batch_size))?;
        self.out.flush()?;
        Ok(true)
    }

    /// Append the epoch averages and end the line.
    /// `accuracy` is expected already scaled to a percentage.
    pub fn finish_epoch(&mut self, mean_loss: f64, accuracy: f64) -> io::Result<()> {
        writeln!(self.out, " loss:{:.4}, acc:{:.4}", mean_loss, accuracy)?;
        self.out.flush()
    }

    pub fn starting_from_scratch(&mut self) -> io::Result<()> {
        writeln!(self.out, "starting from scratch")
    }

    pub fn resuming_from_checkpoint(&mut self) -> io::Result<()> {
        writeln!(self.out, "resuming from checkpoint")
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}
