//! CSV export of the active view
use super::record::{value_text, LeadRecord};

pub const DEFAULT_FILE_PREFIX: &str = "SML_Group_Export";
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

/// Serialize records to CSV text.
///
/// The header is taken from the first record (schema sample) in field order. Every cell
/// is quoted; missing and `null` fields become empty cells. Rows are joined with `\n`
/// without a trailing newline. An empty slice produces an empty string.
pub fn to_csv(records: &[LeadRecord]) -> String {
    let Some(sample) = records.first() else {
        return String::new();
    };

    let headers: Vec<&str> = sample.keys().collect();
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(headers.iter().copied()));

    for record in records {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| record.get(header).and_then(value_text).unwrap_or_default())
            .collect();
        lines.push(join_row(cells.iter().map(String::as_str)));
    }

    lines.join("\n")
}

/// `<prefix>_<epoch-millis>.csv`
pub fn export_file_name(prefix: &str, epoch_millis: i64) -> String {
    format!("{}_{}.csv", prefix, epoch_millis)
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(quote_cell).collect::<Vec<_>>().join(",")
}

fn quote_cell(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_lead_report::record::test_support::records;
    use serde_json::json;

    #[test]
    fn test_empty_view_exports_nothing() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_every_cell_is_quoted() {
        let data = records(vec![
            json!({"branch": "A", "count": 3, "note": null}),
            json!({"branch": "B"}),
        ]);
        assert_eq!(
            to_csv(&data),
            "\"branch\",\"count\",\"note\"\n\"A\",\"3\",\"\"\n\"B\",\"\",\"\""
        );
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let data = records(vec![
            json!({"ownername": "Shah, Ramesh", "remarks": "said \"call later\"", "sector": ""}),
            json!({"ownername": "Line\nbreak", "remarks": "", "sector": "Retail"}),
            json!({"remarks": "only remarks"}),
        ]);
        let text = to_csv(&data);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, vec!["ownername", "remarks", "sector"]);

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|row| row.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["Shah, Ramesh", "said \"call later\"", ""],
                vec!["Line\nbreak", "", "Retail"],
                vec!["", "only remarks", ""],
            ]
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            export_file_name(DEFAULT_FILE_PREFIX, 1_704_412_800_000),
            "SML_Group_Export_1704412800000.csv"
        );
    }
}
