use std::io::{self, Write};

use cityweather_core::{DisplayElement, Notifier};
use tracing::debug;

/// Prints every display update to stdout.
///
/// A `<pre>` block is unwrapped since the terminal is already preformatted.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl DisplayElement for TerminalDisplay {
    fn set_text(&self, text: &str) {
        print_line(text);
    }

    fn set_html(&self, html: &str) {
        print_line(strip_pre(html));
    }
}

/// Alerts go to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn print_line(text: &str) {
    // Hold the lock so concurrent submits don't interleave within a block.
    let mut out = io::stdout().lock();
    if let Err(err) = write_block(&mut out, text) {
        debug!(error = %err, "failed to write to stdout");
    }
}

fn write_block<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")?;
    out.flush()
}

fn strip_pre(html: &str) -> &str {
    html.strip_prefix("<pre>")
        .and_then(|rest| rest.strip_suffix("</pre>"))
        .unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pre_wrapper() {
        assert_eq!(strip_pre("<pre>{\n  \"temp\": 20\n}</pre>"), "{\n  \"temp\": 20\n}");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_block_reports_broken_pipe() {
        let err = write_block(&mut ClosedPipe, "Loading...").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn write_block_appends_newline() {
        let mut buf = Vec::new();
        write_block(&mut buf, "Error: server down").unwrap();
        assert_eq!(buf, b"Error: server down\n");
    }

    #[test]
    fn leaves_other_markup_alone() {
        assert_eq!(strip_pre("<b>hi</b>"), "<b>hi</b>");
        assert_eq!(strip_pre("<pre>unterminated"), "<pre>unterminated");
    }
}
