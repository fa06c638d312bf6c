//! NASDAQ-100 constituents from the Wikipedia article.

use super::to_yahoo_symbol;
use crate::error::{DataError, Result};
use crate::http;
use scraper::{ElementRef, Html, Selector};

const CONSTITUENTS_URL: &str = "https://en.wikipedia.org/wiki/NASDAQ-100";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("selector {css}: {e}")))
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse the constituents table of the NASDAQ-100 article.
///
/// The article carries several tables; the constituents one is the first
/// whose header row has a `Ticker` (or `Symbol`) column.
pub fn parse_nasdaq100_html(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let tr_sel = selector("tr")?;
    let th_sel = selector("th")?;
    let cell_sel = selector("td, th")?;

    for table in document.select(&table_sel) {
        let mut rows = table.select(&tr_sel);
        let Some(header) = rows.next() else {
            continue;
        };

        let Some(column) = header
            .select(&th_sel)
            .map(text)
            .position(|h| h == "Ticker" || h == "Symbol")
        else {
            continue;
        };

        let symbols: Vec<String> = rows
            .filter_map(|row| row.select(&cell_sel).nth(column).map(text))
            .filter(|s| !s.is_empty())
            .map(|s| to_yahoo_symbol(&s))
            .collect();

        if !symbols.is_empty() {
            return Ok(symbols);
        }
    }

    Err(DataError::Structure(
        "no NASDAQ-100 constituents table found".to_string(),
    ))
}

/// Download the current NASDAQ-100 constituents.
pub async fn fetch_nasdaq100_symbols() -> Result<Vec<String>> {
    let client = http::browser_client()?;
    let html = http::get_text(&client, CONSTITUENTS_URL).await?;
    parse_nasdaq100_html(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constituents_table() {
        let html = r#"<html><body>
            <table><tr><th>Year</th><th>Change</th></tr><tr><td>2024</td><td>+24%</td></tr></table>
            <table id="constituents">
              <tbody>
                <tr><th>Company</th><th>Ticker</th><th>GICS Sector</th></tr>
                <tr><td>Adobe Inc.</td><td>ADBE</td><td>Information Technology</td></tr>
                <tr><td>Alphabet Inc. (Class A)</td><td>GOOGL</td><td>Communication Services</td></tr>
              </tbody>
            </table>
        </body></html>"#;

        let symbols = parse_nasdaq100_html(html).unwrap();

        assert_eq!(symbols, vec!["ADBE", "GOOGL"]);
    }

    #[test]
    fn test_no_table() {
        let err = parse_nasdaq100_html("<p>nothing</p>").unwrap_err();
        assert!(matches!(err, DataError::Structure(_)));
    }
}
