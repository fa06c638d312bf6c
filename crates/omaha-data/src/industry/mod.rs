//! Industry reference data: scraped averages and live peer P/E.

pub mod fullratio;
pub mod naver;

pub use fullratio::{IndustryTable, IndustryTables};
pub use naver::NaverPeerPe;
