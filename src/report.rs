//! Destruction reporting.
//!
//! The engine narrates each destroyed city through this collaborator so the
//! narration stays out of the structural city dump. The CLI writes narration
//! to stdout; tests capture it in a buffer.

use std::io::{self, Write};

use crate::alien::Alien;

/// Consumer of destruction events emitted by the invasion engine.
pub trait Report {
    /// Called once per destroyed city, with the alien that moved in and the
    /// alien that was already there.
    fn city_destroyed(
        &mut self,
        city: &str,
        incoming: &Alien,
        resident: &Alien,
    ) -> io::Result<()>;
}

/// Writes one narration line per destroyed city to an output stream.
pub struct WriteReport<W: Write> {
    out: W,
}

impl<W: Write> WriteReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Report for WriteReport<W> {
    fn city_destroyed(
        &mut self,
        city: &str,
        incoming: &Alien,
        resident: &Alien,
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "{} has been destroyed by agent {} and agent {}!",
            city, incoming, resident
        )
    }
}

/// Routes narration through the logging layer instead of a stream.
pub struct LogReport;

impl Report for LogReport {
    fn city_destroyed(
        &mut self,
        city: &str,
        incoming: &Alien,
        resident: &Alien,
    ) -> io::Result<()> {
        log::info!(
            "{} has been destroyed by agent {} and agent {}!",
            city,
            incoming,
            resident
        );
        Ok(())
    }
}

/// Discards all destruction events.
pub struct NullReport;

impl Report for NullReport {
    fn city_destroyed(&mut self, _: &str, _: &Alien, _: &Alien) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report_narration() {
        let mut report = WriteReport::new(Vec::new());
        report
            .city_destroyed("Foo", &Alien::new("3"), &Alien::new("7"))
            .unwrap();
        let out = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(out, "Foo has been destroyed by agent 3 and agent 7!\n");
    }
}
