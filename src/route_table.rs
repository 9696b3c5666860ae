//! Declarative mapping from inbound gateway routes to upstream resources.

use axum::http::Method;

/// How a route's upstream answer is turned into the inbound response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Body forwarded as-is, answer relayed verbatim.
    Relay,
    /// Instrument list fetched for a segment and filtered by trading symbol.
    SymbolLookup,
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    /// Short name used in logs and OpenAPI operation ids.
    pub name: &'static str,
    /// Canonical inbound path.
    pub path: &'static str,
    /// Additional inbound paths served by the same entry.
    pub aliases: &'static [&'static str],
    /// Upstream path, relative to the configured base URL.
    pub upstream_path: &'static str,
    /// Method used for the upstream call.
    pub upstream_method: Method,
    /// Handling strategy.
    pub kind: RouteKind,
    /// One-line description for the API docs.
    pub summary: &'static str,
}

impl RouteSpec {
    /// All inbound paths served by this entry.
    pub fn inbound_paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.path).chain(self.aliases.iter().copied())
    }
}

/// Last traded price.
pub static LTP: RouteSpec = RouteSpec {
    name: "ltp",
    path: "/get-ltp",
    aliases: &[],
    upstream_path: "marketfeed/ltp",
    upstream_method: Method::POST,
    kind: RouteKind::Relay,
    summary: "Last traded price for a map of segment to security ids",
};

/// Open/high/low/close snapshot.
pub static OHLC: RouteSpec = RouteSpec {
    name: "ohlc",
    path: "/get-ohlc",
    aliases: &[],
    upstream_path: "marketfeed/ohlc",
    upstream_method: Method::POST,
    kind: RouteKind::Relay,
    summary: "OHLC snapshot for a map of segment to security ids",
};

/// Intraday candles.
pub static INTRADAY: RouteSpec = RouteSpec {
    name: "intraday",
    path: "/get-intraday",
    aliases: &[],
    upstream_path: "charts/intraday",
    upstream_method: Method::POST,
    kind: RouteKind::Relay,
    summary: "Intraday candles for one instrument",
};

/// Option chain for an underlying and expiry.
pub static OPTION_CHAIN: RouteSpec = RouteSpec {
    name: "option_chain",
    path: "/get-option-chain",
    aliases: &["/get-optionchain"],
    upstream_path: "optionchain",
    upstream_method: Method::POST,
    kind: RouteKind::Relay,
    summary: "Option chain for an underlying and expiry",
};

/// Security id lookup by trading symbol.
pub static ID_BY_SYMBOL: RouteSpec = RouteSpec {
    name: "id_by_symbol",
    path: "/get-id-by-symbol",
    aliases: &[],
    upstream_path: "instrument",
    upstream_method: Method::GET,
    kind: RouteKind::SymbolLookup,
    summary: "Instrument record for a trading symbol within a segment",
};

/// The complete route table.
pub static ROUTES: &[&RouteSpec] = &[&LTP, &OHLC, &INTRADAY, &OPTION_CHAIN, &ID_BY_SYMBOL];
