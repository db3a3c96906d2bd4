//! Search directive parsing.
//!
//! The search decision call returns free-form model text. A line
//! starting with `SEARCH:` carries the query; anything else is a pass.
//! Pure text parsing, no I/O.

/// Marker that introduces a search query in a decision response.
pub const SEARCH_MARKER: &str = "SEARCH:";

/// Extract a search query from a decision response.
///
/// Scans line by line for the first line beginning with
/// [`SEARCH_MARKER`] and returns the trimmed remainder. Returns `None`
/// for `PASS`, empty queries, or any other output.
pub fn parse_search_directive(response: &str) -> Option<String> {
    for line in response.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(SEARCH_MARKER) {
            let query = rest.trim().trim_matches(['[', ']']).trim();
            if !query.is_empty() {
                return Some(query.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_directive() {
        assert_eq!(
            parse_search_directive("SEARCH: 2024년 한국 경제 성장률 전망"),
            Some("2024년 한국 경제 성장률 전망".to_string())
        );
    }

    #[test]
    fn test_parses_bracketed_query() {
        assert_eq!(
            parse_search_directive("SEARCH: [startup failure rate statistics]"),
            Some("startup failure rate statistics".to_string())
        );
    }

    #[test]
    fn test_pass_yields_none() {
        assert_eq!(parse_search_directive("PASS"), None);
    }

    #[test]
    fn test_chatter_yields_none() {
        assert_eq!(
            parse_search_directive("I don't think a search is needed here."),
            None
        );
    }

    #[test]
    fn test_directive_on_later_line() {
        let response = "Reasoning: the claim needs numbers.\nSEARCH: median seed round size 2024";
        assert_eq!(
            parse_search_directive(response),
            Some("median seed round size 2024".to_string())
        );
    }

    #[test]
    fn test_empty_query_yields_none() {
        assert_eq!(parse_search_directive("SEARCH:"), None);
        assert_eq!(parse_search_directive("SEARCH:   "), None);
    }
}
