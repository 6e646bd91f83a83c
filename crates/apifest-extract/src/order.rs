//! Documentation ordering.

use apifest_core::{ParsedEndpoint, ORDER_LAST};

/// Parses an order tag value, falling back to [`ORDER_LAST`] when absent or
/// not an integer.
#[must_use]
pub fn parse_order(text: Option<&str>) -> i32 {
    text.and_then(|text| text.trim().parse().ok())
        .unwrap_or(ORDER_LAST)
}

/// Sorts endpoints by ascending documentation order.
///
/// The sort is stable: endpoints sharing an order keep their discovery order.
pub fn sort_endpoints(endpoints: &mut [ParsedEndpoint]) {
    endpoints.sort_by_key(ParsedEndpoint::order);
}
