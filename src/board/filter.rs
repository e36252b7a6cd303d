use crate::market::coin::Coin;

/// Longest search text accepted without the advisory.
pub const MAX_SEARCH_LENGTH: usize = 30;

/// Name filter first, then row limit. Order of `coins` is preserved.
pub fn filter_coins(coins: &[Coin], search: &str, row_limit: Option<usize>) -> Vec<Coin> {
    let needle = search.to_lowercase();

    let matching = coins
        .iter()
        .filter(|coin| needle.is_empty() || coin.name.to_lowercase().contains(&needle));

    match row_limit {
        Some(limit) if limit > 0 => matching.take(limit).cloned().collect(),
        _ => matching.cloned().collect(),
    }
}

pub fn search_exceeds_limit(search: &str) -> bool {
    search.chars().count() > MAX_SEARCH_LENGTH
}

/// Lenient integer parse of the row limit input: leading whitespace, an
/// optional sign, then leading digits. Anything that does not yield a positive
/// number means no limit.
pub fn parse_row_limit(input: &str) -> Option<usize> {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if digits.is_empty() || negative {
        return None;
    }

    // only digits remain, so the parse can fail on overflow alone
    let limit = digits.parse::<usize>().unwrap_or(usize::MAX);
    if limit == 0 {
        None
    } else {
        Some(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn coin(rank: u32, name: &str) -> Coin {
        Coin {
            rank,
            name: name.to_string(),
            symbol: name[..3].to_lowercase(),
            id: name.to_lowercase(),
            icon: format!("https://example.test/{}.png", rank),
            market_cap: BigDecimal::from(rank * 1000),
            price: BigDecimal::from(rank),
        }
    }

    fn snapshot() -> Vec<Coin> {
        vec![
            coin(1, "Bitcoin"),
            coin(2, "Ethereum"),
            coin(3, "Tether"),
            coin(4, "Bitcoin Cash"),
            coin(5, "Ethereum Classic"),
        ]
    }

    fn names(coins: &[Coin]) -> Vec<&str> {
        coins.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let coins = snapshot();
        assert_eq!(coins, filter_coins(&coins, "", None));
        assert_eq!(coins, filter_coins(&coins, "", Some(0)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let coins = snapshot();
        assert_eq!(
            vec!["Ethereum", "Tether", "Ethereum Classic"],
            names(&filter_coins(&coins, "eth", None))
        );
        assert_eq!(
            vec!["Bitcoin", "Bitcoin Cash"],
            names(&filter_coins(&coins, "BITCOIN", None))
        );
    }

    #[test]
    fn test_search_matching_nothing_is_empty() {
        assert!(filter_coins(&snapshot(), "dogecoin", None).is_empty());
        assert!(filter_coins(&[], "", Some(3)).is_empty());
    }

    #[test]
    fn test_row_limit_truncates_preserving_order() {
        let coins = snapshot();
        assert_eq!(
            vec!["Bitcoin", "Ethereum"],
            names(&filter_coins(&coins, "", Some(2)))
        );
        assert_eq!(5, filter_coins(&coins, "", Some(50)).len());
    }

    #[test]
    fn test_row_limit_applies_after_search() {
        let coins = snapshot();
        assert_eq!(
            vec!["Ethereum", "Tether"],
            names(&filter_coins(&coins, "eth", Some(2)))
        );
    }

    #[test]
    fn test_filter_results_are_bounded_ordered_and_matching() {
        let coins = snapshot();
        for search in ["", "e", "ETH", "coin", "x"] {
            for limit in [None, Some(0), Some(1), Some(2), Some(4), Some(10)] {
                let filtered = filter_coins(&coins, search, limit);
                if let Some(n) = limit.filter(|n| *n > 0) {
                    assert!(filtered.len() <= n);
                }
                for c in &filtered {
                    assert!(c.name.to_lowercase().contains(&search.to_lowercase()));
                }
                let ranks: Vec<u32> = filtered.iter().map(|c| c.rank).collect();
                let mut sorted = ranks.clone();
                sorted.sort();
                assert_eq!(sorted, ranks);
            }
        }
    }

    #[test]
    fn test_search_length_limit() {
        assert!(!search_exceeds_limit(""));
        assert!(!search_exceeds_limit(&"a".repeat(30)));
        assert!(search_exceeds_limit(&"a".repeat(31)));
        // counted in chars, not bytes
        assert!(!search_exceeds_limit(&"é".repeat(30)));
    }

    #[test]
    fn test_parse_row_limit() {
        assert_eq!(Some(10), parse_row_limit("10"));
        assert_eq!(Some(10), parse_row_limit("  +10"));
        assert_eq!(Some(3), parse_row_limit("3abc"));
        assert_eq!(None, parse_row_limit("abc"));
        assert_eq!(None, parse_row_limit(""));
        assert_eq!(None, parse_row_limit("0"));
        assert_eq!(None, parse_row_limit("-5"));
        assert_eq!(None, parse_row_limit("-"));
        assert_eq!(Some(usize::MAX), parse_row_limit("99999999999999999999999999"));
    }
}
