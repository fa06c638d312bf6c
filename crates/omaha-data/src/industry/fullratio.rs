//! Industry averages scraped from fullratio.com.

use crate::error::{DataError, Result};
use crate::http;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::info;

const PE_URL: &str = "https://fullratio.com/pe-ratio-by-industry";
const ROE_URL: &str = "https://fullratio.com/roe-by-industry";
const ROA_URL: &str = "https://fullratio.com/roa-by-industry";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("selector {css}: {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse `"12.5"`, `"12.5%"` or `"1,024.0"`.
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .trim_end_matches('%')
        .replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// One two-column reference table: industry label to value as published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndustryTable {
    values: HashMap<String, f64>,
}

impl IndustryTable {
    /// Build a table from `(label, value)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            values: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parse the first `<table>` of a page.
    ///
    /// Rows come from `<tbody>` when the table has one, otherwise every
    /// `<tr>` after the header. A row needs at least two `<td>` cells: the
    /// first is the label, the second the value. Rows whose value is not a
    /// number are skipped. A page without any table is a structural failure.
    pub fn parse_html(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let table_sel = selector("table")?;
        let tbody_sel = selector("tbody")?;
        let tr_sel = selector("tr")?;
        let td_sel = selector("td")?;

        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| DataError::Structure("no <table> in industry page".to_string()))?;

        let rows: Vec<ElementRef<'_>> = match table.select(&tbody_sel).next() {
            Some(tbody) => tbody.select(&tr_sel).collect(),
            None => table.select(&tr_sel).skip(1).collect(),
        };

        let mut values = HashMap::new();
        for row in rows {
            let cells: Vec<String> = row.select(&td_sel).map(cell_text).collect();
            if cells.len() < 2 {
                continue;
            }
            if let Some(value) = parse_number(&cells[1]) {
                values.insert(cells[0].clone(), value);
            }
        }

        Ok(Self { values })
    }

    /// Value for an exact industry label.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied()
    }

    /// Number of industries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The three industry tables used for US tickers.
///
/// ROE and ROA are kept in percent as published; callers scale them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndustryTables {
    /// Average trailing P/E by industry.
    pub pe: IndustryTable,
    /// Average return on equity by industry, in percent.
    pub roe: IndustryTable,
    /// Average return on assets by industry, in percent.
    pub roa: IndustryTable,
}

impl IndustryTables {
    /// Scrape all three tables. Any missing table fails the whole fetch.
    pub async fn fetch() -> Result<Self> {
        let client = http::browser_client()?;

        let (pe, roe, roa) = tokio::try_join!(
            http::get_text(&client, PE_URL),
            http::get_text(&client, ROE_URL),
            http::get_text(&client, ROA_URL),
        )?;

        let tables = Self {
            pe: IndustryTable::parse_html(&pe)?,
            roe: IndustryTable::parse_html(&roe)?,
            roa: IndustryTable::parse_html(&roa)?,
        };

        info!(
            pe = tables.pe.len(),
            roe = tables.roe.len(),
            roa = tables.roa.len(),
            "loaded industry reference tables"
        );

        Ok(tables)
    }
}
