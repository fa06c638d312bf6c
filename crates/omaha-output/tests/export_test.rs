//! Ranking and export working together on a screened universe.

use chrono::NaiveDate;
use omaha_output::{
    ExportFormat, Exporter, ResultRecord, UniverseLabel, export_file_stem, rank, render_table,
};
use std::env;
use std::fs;

fn record(ticker: &str, score: f64) -> ResultRecord {
    ResultRecord {
        ticker: ticker.to_string(),
        name: format!("{ticker} Corp"),
        industry: None,
        price: "71,300 (-0.42%)".to_string(),
        debt_to_equity: Some(0.12),
        current_ratio: Some(2.1),
        price_to_book: Some(0.9),
        trailing_pe: Some(8.2),
        roe: Some("9.10%".to_string()),
        roa: None,
        icr: None,
        eps_cagr: Some("True".to_string()),
        dividend_cagr: Some("6.50%".to_string()),
        dividend_stable: Some(false),
        book_value_stable: Some(true),
        score,
        analyst_forecast: "none(N/A)".to_string(),
        momentum: "None/None/None".to_string(),
        esg: String::new(),
    }
}

#[test]
fn test_ranked_csv_file() {
    let ranked = rank(vec![
        record("000660.KS", 6.5),
        record("005930.KS", 9.0),
        record("035420.KS", 6.5),
    ]);

    let date = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
    let stem = export_file_stem(&UniverseLabel::Country("KR".to_string()), date);
    assert_eq!(stem, "result_KR_20250606");

    let path = env::temp_dir().join(format!("{stem}_{}.csv", std::process::id()));
    ranked.export_to_file(&path, ExportFormat::Csv).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<ResultRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    fs::remove_file(&path).unwrap();

    let tickers: Vec<_> = rows.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, ["005930.KS", "000660.KS", "035420.KS"]);
    assert_eq!(rows[0].price, "71,300 (-0.42%)");
    assert_eq!(rows[0].roa, None);
    assert_eq!(rows[0].book_value_stable, Some(true));
}

#[test]
fn test_summary_follows_ranking() {
    let ranked = rank(vec![record("LOW", 5.0), record("HIGH", 8.5)]);
    let table = render_table(&ranked, 10);

    let high = table.find("HIGH").unwrap();
    let low = table.find("LOW").unwrap();
    assert!(high < low);
}
