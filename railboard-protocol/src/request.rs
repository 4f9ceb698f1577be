//! Request construction

use alloc::string::String;
use core::fmt::Write;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-apikey";

/// Departure board endpoint (with service details)
pub const DEFAULT_BASE_URL: &str =
    "https://api1.raildata.org.uk/1010-live-departure-board-dep/LDBWS/api/20220120/GetDepBoardWithDetails";

/// Departure board query for one journey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardRequest<'a> {
    /// Endpoint base URL, without trailing query
    pub base_url: &'a str,
    /// Origin station CRS code
    pub origin: &'a str,
    /// Destination filter CRS code
    pub destination: &'a str,
    /// Number of services to request
    pub rows: usize,
}

impl<'a> BoardRequest<'a> {
    /// Write the request URL into any formatter
    pub fn write_url<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        write!(
            out,
            "{}/{}?numRows={}&filterCRS={}",
            self.base_url.trim_end_matches('/'),
            self.origin,
            self.rows,
            self.destination
        )
    }

    /// Request URL
    pub fn url(&self) -> String {
        let mut url = String::with_capacity(
            self.base_url.len() + self.origin.len() + self.destination.len() + 24,
        );
        // Writing into a String cannot fail
        let _ = self.write_url(&mut url);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_url() {
        let request = BoardRequest {
            base_url: "https://example.test/board",
            origin: "PAD",
            destination: "RDG",
            rows: 5,
        };
        assert_eq!(
            request.url(),
            "https://example.test/board/PAD?numRows=5&filterCRS=RDG"
        );
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let request = BoardRequest {
            base_url: "https://example.test/board/",
            origin: "PAD",
            destination: "RDG",
            rows: 3,
        };
        assert_eq!(
            request.url(),
            "https://example.test/board/PAD?numRows=3&filterCRS=RDG"
        );
    }

    #[test]
    fn test_default_endpoint() {
        let request = BoardRequest {
            base_url: DEFAULT_BASE_URL,
            origin: "PAD",
            destination: "RDG",
            rows: 5,
        };
        let url = request.url();
        assert!(url.starts_with("https://"));
        assert!(url.ends_with("/GetDepBoardWithDetails/PAD?numRows=5&filterCRS=RDG"));
    }

    proptest! {
        #[test]
        fn prop_url_carries_query(origin in "[A-Z]{3}", destination in "[A-Z]{3}", rows in 1usize..20) {
            let request = BoardRequest { base_url: DEFAULT_BASE_URL, origin: &origin, destination: &destination, rows };
            let url = request.url();
            let expected_query = format!("?numRows={}&filterCRS={}", rows, destination);
            prop_assert!(url.ends_with(&expected_query));
            let expected_origin = format!("/{}?", origin);
            prop_assert!(url.contains(&expected_origin));
        }
    }
}
