//! CSV rendering of query results.

use std::io;

use engine::ResultTable;

use crate::error::Result;

pub const NO_DATA: &str = "No data to display.";

/// Write `table` with a header row; `Null` cells are empty fields.
pub fn write_table<W: io::Write>(writer: W, table: &ResultTable) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.columns())?;
    for row in table.rows() {
        csv.write_record(row.iter().map(ToString::to_string))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write a listing with a fixed header.
pub fn write_rows<W, I>(writer: W, header: &[&str], rows: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(header)?;
    for row in rows {
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_cells_render_as_csv_fields() {
        let record = serde_json::from_str(
            r#"{"LedgerName": "EU, Primary", "PeriodActivity": 12.5, "ErrorDetail": null}"#,
        )
        .unwrap();
        let table = ResultTable::from_records(vec![record]).unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &table).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LedgerName,PeriodActivity,ErrorDetail\n\"EU, Primary\",12.5,\n"
        );
    }

    #[test]
    fn listings_have_a_header() {
        let mut out = Vec::new();
        write_rows(
            &mut out,
            &["code", "name"],
            vec![vec!["EUR".to_string(), "Euro".to_string()]],
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "code,name\nEUR,Euro\n");
    }
}
