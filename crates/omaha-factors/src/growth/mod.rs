//! Growth stability indicators.
//!
//! Three families, each judged on its own history:
//! - **Dividends**: ten completed years of annual totals
//! - **Earnings**: annual and quarterly diluted EPS
//! - **Book value**: book value per share from annual balance sheets

pub mod book_value;
pub mod dividend;
pub mod earnings;

pub use book_value::{book_value_per_share, has_stable_book_value_growth, sector_tolerance};
pub use dividend::{
    DividendConfig, annual_totals, dividend_cagr, dividend_cagr_with, dividend_window,
    dividend_window_with, has_stable_dividend_growth, has_stable_dividend_growth_with,
};
pub use earnings::{eps_growth_cagr, has_stable_eps_growth, has_stable_quarterly_eps_growth};
