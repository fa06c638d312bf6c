//! Same-industry P/E for Korean listings from Naver Finance.

use crate::error::Result;
use crate::http;
use crate::provider::PeerPeLookup;
use scraper::{Html, Selector};
use tokio::runtime::Handle;
use tracing::debug;

const ITEM_URL: &str = "https://finance.naver.com/item/main.nhn";
const PEER_PE_LABEL: &str = "동일업종 PER";

/// Blocking Naver Finance lookup, driven on a tokio runtime handle.
#[derive(Debug)]
pub struct NaverPeerPe {
    client: reqwest::Client,
    handle: Handle,
}

impl NaverPeerPe {
    /// Create the lookup on `handle`.
    pub fn new(handle: Handle) -> Result<Self> {
        Ok(Self {
            client: http::browser_client()?,
            handle,
        })
    }

    /// Read the same-industry P/E from a Naver item page.
    ///
    /// Looks in the `div.aside_invest_info` box for the table row labelled
    /// `동일업종 PER` and parses the number in its `td em`.
    pub fn parse_html(html: &str) -> Option<f64> {
        let document = Html::parse_document(html);
        let aside = Selector::parse("div.aside_invest_info").ok()?;
        let rows = Selector::parse("table tr").ok()?;
        let value = Selector::parse("td em").ok()?;

        let aside = document.select(&aside).next()?;
        aside
            .select(&rows)
            .find(|row| row.text().collect::<String>().contains(PEER_PE_LABEL))
            .and_then(|row| row.select(&value).next())
            .and_then(|em| {
                em.text()
                    .collect::<String>()
                    .trim()
                    .replace(',', "")
                    .parse::<f64>()
                    .ok()
            })
    }
}

impl PeerPeLookup for NaverPeerPe {
    fn same_industry_pe(&self, ticker: &str) -> Option<f64> {
        let code = ticker.get(..6)?;
        let url = format!("{ITEM_URL}?code={code}");

        match self.handle.block_on(http::get_text(&self.client, &url)) {
            Ok(html) => Self::parse_html(&html),
            Err(e) => {
                debug!(ticker = %ticker, error = %e, "Naver peer P/E lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="aside_invest_info">
            <table>
              <tr><th>PER</th><td><em>12.31</em>배</td></tr>
              <tr><th><strong>동일업종 PER</strong></th><td><em>1,015.77</em>배</td></tr>
            </table>
          </div>
        </body></html>"#;

    #[test]
    fn test_parse_peer_pe() {
        assert_eq!(NaverPeerPe::parse_html(PAGE), Some(1015.77));
    }

    #[test]
    fn test_missing_box() {
        assert_eq!(NaverPeerPe::parse_html("<html><body></body></html>"), None);
    }

    #[test]
    fn test_non_numeric_value() {
        let html = r#"<div class="aside_invest_info"><table>
            <tr><th>동일업종 PER</th><td><em>N/A</em></td></tr>
        </table></div>"#;
        assert_eq!(NaverPeerPe::parse_html(html), None);
    }
}
