use super::hue::SharedScheduler;
use crate::color::Rgb;
use std::io::{self, Write};

/// ANSI style reset.
pub(crate) const RESET: &str = "\x1b[0m";

/// 24-bit ANSI background escape for `color`.
fn bg_code(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Wrap one chunk of text in the background color.
///
/// Every reset embedded in the chunk is rewritten to re-assert the background
/// immediately after it, so interior style changes do not drop the tint. The
/// chunk itself is forwarded unchanged otherwise.
pub(crate) fn tint_chunk(chunk: &str, color: Rgb) -> String {
    let bg = bg_code(color);
    let reset_with_bg = format!("{RESET}{bg}");
    let mut tinted = String::with_capacity(chunk.len() + 2 * bg.len() + RESET.len() + 1);
    tinted.push_str(&bg);
    tinted.push_str(&chunk.replace(RESET, &reset_with_bg));
    tinted.push_str(RESET);
    tinted.push('\n');
    tinted
}

/// Writer adapter that tints everything passing through it with the
/// scheduler's current background color.
///
/// Each `write` call is treated as one chunk: it is wrapped in the background
/// escape, terminated with a reset and a newline, and forwarded downstream.
/// The stream only reads the scheduler's latest color; advancing it is the
/// caller's business, once per logical record.
pub struct TintStream<W> {
    inner: W,
    scheduler: SharedScheduler,
}

impl<W: Write> TintStream<W> {
    pub fn new(inner: W, scheduler: SharedScheduler) -> Self {
        Self { inner, scheduler }
    }
}

impl<W: Write> Write for TintStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let color = self.scheduler.lock().unwrap().latest();
        let chunk = String::from_utf8_lossy(buf);
        self.inner.write_all(tint_chunk(&chunk, color).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
