//! Plain-text per-match over listings.

use std::io::{self, Write};

use crate::processing::{InningsOverRuns, OverRuns};

/// Write `title`, a `Over\tTotal Runs` header, then one `over\truns` line per over (ascending).
pub fn write_over_listing<W: Write>(out: &mut W, title: &str, runs: &OverRuns) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "Over\tTotal Runs")?;
    for (over, total) in runs.iter() {
        writeln!(out, "{over}\t{total}")?;
    }
    Ok(())
}

/// Same as [`write_over_listing`] with a leading 1-based innings column.
pub fn write_innings_over_listing<W: Write>(out: &mut W, title: &str, runs: &InningsOverRuns) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "Innings\tOver\tTotal Runs")?;
    for ((innings, over), total) in runs.iter() {
        writeln!(out, "{}\t{over}\t{total}", innings + 1)?;
    }
    Ok(())
}
