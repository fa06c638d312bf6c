//! Ranking of screened records.

use crate::record::ResultRecord;

/// Sort by composite score, highest first.
///
/// The sort is stable, so tied records keep the order the workers produced.
pub fn rank(mut records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    records.sort_by(|a, b| b.score.total_cmp(&a.score));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests_support::record;

    #[test]
    fn test_rank_descending() {
        let ranked = rank(vec![record("A", 5.5), record("B", 9.0), record("C", 7.0)]);
        let tickers: Vec<_> = ranked.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["B", "C", "A"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranked = rank(vec![
            record("FIRST", 6.0),
            record("TOP", 8.0),
            record("SECOND", 6.0),
            record("THIRD", 6.0),
        ]);
        let tickers: Vec<_> = ranked.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["TOP", "FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
