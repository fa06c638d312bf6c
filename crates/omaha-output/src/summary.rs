//! Terminal summary of a ranked screen.

use crate::record::ResultRecord;

const RULE_WIDTH: usize = 100;

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

/// Fixed-width table of the first `limit` records, in the order given.
pub fn render_table(records: &[ResultRecord], limit: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<4} {:<12} {:<28} {:>7} {:>6} {:>6} {:>7} {:>10} {:<16}\n",
        "#", "Ticker", "Name", "B-Score", "PER", "PBR", "ROE", "EPS CAGR", "Momentum"
    ));
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');

    for (rank, record) in records.iter().take(limit).enumerate() {
        output.push_str(&format!(
            "{:<4} {:<12} {:<28} {:>7.1} {:>6} {:>6} {:>7} {:>10} {:<16}\n",
            rank + 1,
            truncate(&record.ticker, 12),
            truncate(&record.name, 28),
            record.score,
            cell(record.trailing_pe),
            cell(record.price_to_book),
            record.roe.as_deref().unwrap_or("-"),
            record.eps_cagr.as_deref().unwrap_or("-"),
            record.momentum,
        ));
    }

    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Showing {} of {} records\n",
        records.len().min(limit),
        records.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests_support::record;

    #[test]
    fn test_render_table_limits_rows() {
        let records = vec![record("AAA", 9.0), record("BBB", 8.0), record("CCC", 7.0)];
        let table = render_table(&records, 2);

        assert!(table.contains("AAA"));
        assert!(table.contains("BBB"));
        assert!(!table.contains("CCC"));
        assert!(table.contains("Showing 2 of 3 records"));
    }

    #[test]
    fn test_render_table_columns() {
        let mut long = record("LONGNAME", 6.25);
        long.name = "An Extremely Long Company Name Holdings".to_string();
        long.trailing_pe = None;
        let table = render_table(&[long], 10);

        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("1    LONGNAME"));
        assert!(row.contains("An Extremely Long Company N~"));
        assert!(row.contains("    6.2 ") || row.contains("    6.3 "));
        assert!(row.contains("     - "));
    }

    #[test]
    fn test_render_empty() {
        let table = render_table(&[], 20);
        assert_eq!(table.lines().count(), 4);
        assert!(table.ends_with("Showing 0 of 0 records\n"));
    }
}
