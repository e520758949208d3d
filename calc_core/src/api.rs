//! # Price API
//!
//! The two operations of the price-table endpoint, independent of any
//! transport:
//!
//! - `GET`: read the current record
//! - `PUT`: replace it wholesale and echo the stored record
//!
//! There is no patch semantics and no completeness check on a PUT body; a
//! table with missing entries is stored as sent and lookups fall back to
//! their built-in prices. Store failures are returned as-is, never retried.
//!
//! [`PriceApi::respond`] maps both operations onto a status code and a JSON
//! body for whatever server wraps this.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::errors::{CalcError, CalcResult};
use crate::prices::PriceTable;
use crate::store::{PriceRecord, PriceStore};

/// Request method understood by [`PriceApi::respond`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

/// Status code and JSON body of a handled request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    details: String,
}

/// Read/replace access to the persisted price table.
pub struct PriceApi<S: PriceStore> {
    store: S,
}

impl<S: PriceStore> PriceApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// GET: the current record (built-in table when nothing was saved)
    pub fn get(&self) -> CalcResult<PriceRecord> {
        Ok(PriceRecord::new(self.store.load()?))
    }

    /// PUT: replace the table and return the stored record
    pub fn put(&mut self, prices: PriceTable) -> CalcResult<PriceRecord> {
        let stored = self.store.save(&prices)?;
        info!(
            materials = stored.material_prices.len(),
            labor = stored.labor_rates.len(),
            "price table replaced"
        );
        Ok(PriceRecord::new(stored))
    }

    /// PUT with a JSON body: either a whole record (`{"id", "prices": {...}}`)
    /// or a bare table (`{"rcThicknessPrices": {...}, ...}`).
    pub fn put_json(&mut self, body: &str) -> CalcResult<PriceRecord> {
        let prices = parse_table(body)?;
        self.put(prices)
    }

    /// Handle one request and produce the response the server sends back.
    pub fn respond(&mut self, method: Method, body: Option<&str>) -> ApiResponse {
        let result = match method {
            Method::Get => self.get(),
            Method::Put => self.put_json(body.unwrap_or_default()),
        };

        match result.and_then(|record| to_json(&record)) {
            Ok(body) => ApiResponse { status: 200, body },
            Err(err) => error_response(method, &err),
        }
    }
}

fn parse_table(body: &str) -> CalcResult<PriceTable> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| CalcError::serialization(format!("Invalid price JSON: {}", e)))?;

    if !value.is_object() {
        return Err(CalcError::serialization("price body must be a JSON object"));
    }

    let table = match value.get("prices") {
        Some(prices) => prices.clone(),
        None => value,
    };

    serde_json::from_value(table).map_err(|e| CalcError::serialization(format!("Invalid price table: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string(value).map_err(|e| CalcError::serialization(e.to_string()))
}

fn error_response(method: Method, err: &CalcError) -> ApiResponse {
    let (status, message) = match (method, err) {
        (Method::Put, CalcError::SerializationError { .. }) => (400, "Invalid price configuration"),
        (Method::Get, _) => (500, "Failed to fetch price configuration"),
        (Method::Put, _) => (500, "Failed to update price configuration"),
    };
    error!(code = err.error_code(), "{}: {}", message, err);

    let body = ErrorBody {
        error: message,
        code: err.error_code(),
        details: err.to_string(),
    };
    let body = serde_json::to_string(&body).unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, message));
    ApiResponse { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::{keys, ThicknessFamily};
    use crate::store::{FileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn test_get_returns_default_record() {
        let api = PriceApi::new(MemoryStore::new());
        let record = api.get().unwrap();
        assert_eq!(record.id, "default");
        assert_eq!(record.prices, PriceTable::default());
    }

    #[test]
    fn test_put_replaces_whole_table() {
        let mut api = PriceApi::new(MemoryStore::new());
        let mut prices = PriceTable::default();
        prices.material_prices.clear();
        prices.set_thickness_price(ThicknessFamily::Track, 110, 17_500.0);

        let stored = api.put(prices.clone()).unwrap();
        assert_eq!(stored.prices, prices);

        let fetched = api.get().unwrap().prices;
        assert!(fetched.material_prices.is_empty());
        assert_eq!(fetched.track_thickness_prices[&110], 17_500.0);
        assert_eq!(fetched.material_price(keys::DRILL_BIT), 5_000.0);
    }

    #[test]
    fn test_put_json_accepts_record_or_table() {
        let mut api = PriceApi::new(MemoryStore::new());

        let stored = api
            .put_json(r#"{"id":"default","prices":{"laborRates":{"타일 노무비":24000}}}"#)
            .unwrap();
        assert_eq!(stored.prices.labor_rates.len(), 1);
        assert!(stored.prices.rc_thickness_prices.is_empty());

        let stored = api.put_json(r#"{"rcThicknessPrices":{"100":15000}}"#).unwrap();
        assert_eq!(stored.prices.rc_thickness_prices[&100], 15_000.0);
        assert!(stored.prices.labor_rates.is_empty());
    }

    #[test]
    fn test_put_json_rejects_bad_body() {
        let mut api = PriceApi::new(MemoryStore::new());
        assert_eq!(api.put_json("not json").unwrap_err().error_code(), "SERIALIZATION_ERROR");
        assert_eq!(api.put_json("[1, 2]").unwrap_err().error_code(), "SERIALIZATION_ERROR");
        assert_eq!(api.get().unwrap().prices, PriceTable::default());
    }

    #[test]
    fn test_respond_statuses() {
        let mut api = PriceApi::new(MemoryStore::new());

        let ok = api.respond(Method::Get, None);
        assert_eq!(ok.status, 200);
        assert!(ok.body.contains("\"id\":\"default\""));

        let bad = api.respond(Method::Put, Some("{"));
        assert_eq!(bad.status, 400);
        assert!(bad.body.contains("Invalid price configuration"));
    }

    #[test]
    fn test_respond_store_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();

        let mut api = PriceApi::new(FileStore::new(blocker.join("prices.json"), "tester"));
        let response = api.respond(Method::Put, Some(r#"{"laborRates":{}}"#));
        assert_eq!(response.status, 500);
        assert!(response.body.contains("STORE_UNAVAILABLE"));
    }
}
