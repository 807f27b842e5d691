//! CSV export of report rows.

use std::io::Write;
use std::path::Path;

use crate::error::{StatsError, StatsResult};

use super::html::ReportRow;

/// Write `rows` as CSV (with a header row) to `path`.
pub fn write_rows_csv(path: impl AsRef<Path>, rows: &[ReportRow]) -> StatsResult<()> {
    let path = path.as_ref();
    let wtr = csv::Writer::from_path(path)?;
    write_rows(wtr, rows).map_err(|e| match e {
        StatsError::Io(source) => StatsError::output(path, source),
        other => other,
    })
}

/// Write `rows` as CSV to an arbitrary writer.
pub fn write_rows_csv_to<W: Write>(out: W, rows: &[ReportRow]) -> StatsResult<()> {
    write_rows(csv::Writer::from_writer(out), rows)
}

fn write_rows<W: Write>(mut wtr: csv::Writer<W>, rows: &[ReportRow]) -> StatsResult<()> {
    if rows.is_empty() {
        // `serialize` only emits the header alongside the first record.
        wtr.write_record(["Match Winner", "City", "Venue", "Event Name"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_rows_csv_to;
    use crate::report::ReportRow;

    #[test]
    fn rows_serialize_with_header() {
        let rows = vec![ReportRow {
            winner: "India".to_string(),
            city: "Manchester".to_string(),
            venue: "Old Trafford, Manchester".to_string(),
            event_name: "ICC Cricket World Cup".to_string(),
        }];
        let mut out = Vec::<u8>::new();
        write_rows_csv_to(&mut out, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Match Winner,City,Venue,Event Name\nIndia,Manchester,\"Old Trafford, Manchester\",ICC Cricket World Cup\n"
        );
    }

    #[test]
    fn empty_rows_still_write_header() {
        let mut out = Vec::<u8>::new();
        write_rows_csv_to(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Match Winner,City,Venue,Event Name\n");
    }
}
