//! Terminal colour detection and helpers

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

/// Detects whether coloured output should be enabled on `stream`
pub fn supports_color(stream: Stream) -> bool {
    supports_color::on(stream).is_some()
}

/// Extension trait for colourising output
pub trait Colorize {
    /// Colour as success (green, stdout)
    fn success(&self) -> String;
    /// Colour as error (red, stderr)
    fn error(&self) -> String;
    /// Colour as a failed check (red, stdout)
    fn failure(&self) -> String;
    /// Dim the text (stdout)
    fn dim(&self) -> String;
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Error,
    Failure,
    Dim,
}

impl Tone {
    /// The stream text in this tone is written to.
    const fn stream(self) -> Stream {
        match self {
            Self::Error => Stream::Stderr,
            Self::Success | Self::Failure | Self::Dim => Stream::Stdout,
        }
    }

    fn paint(self, text: &str) -> String {
        if !supports_color(self.stream()) {
            return text.to_string();
        }
        match self {
            Self::Success => text.fg::<css::Green>().to_string(),
            Self::Error => text.fg::<css::Red>().bold().to_string(),
            Self::Failure => text.fg::<css::Red>().to_string(),
            Self::Dim => text.dimmed().to_string(),
        }
    }
}

impl Colorize for str {
    fn success(&self) -> String {
        Tone::Success.paint(self)
    }

    fn error(&self) -> String {
        Tone::Error.paint(self)
    }

    fn failure(&self) -> String {
        Tone::Failure.paint(self)
    }

    fn dim(&self) -> String {
        Tone::Dim.paint(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_follows_the_stream_written_to() {
        assert!(matches!(Tone::Error.stream(), Stream::Stderr));
        for tone in [Tone::Success, Tone::Failure, Tone::Dim] {
            assert!(matches!(tone.stream(), Stream::Stdout));
        }
    }

    #[test]
    fn text_survives_painting() {
        for tone in [Tone::Success, Tone::Error, Tone::Failure, Tone::Dim] {
            assert!(tone.paint("no").contains("no"));
        }
    }
}
