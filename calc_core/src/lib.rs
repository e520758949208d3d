//! # calc_core - Facade Insulation Quotation Engine
//!
//! `calc_core` turns a building envelope (system, wall area, insulation
//! thickness and a few options) into a priced bill of materials and labor
//! with quotation totals. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculations are pure functions of their inputs and a
//!   price table passed by reference
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Never fails on prices**: A missing price entry falls back to its
//!   built-in value
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{CalculationParams, QuoteOptions, SystemId};
//! use calc_core::prices::PriceTable;
//! use calc_core::quotation::Quotation;
//!
//! let params = CalculationParams {
//!     system: SystemId::Form,
//!     area: 90.0,
//!     thickness: 60,
//!     ..CalculationParams::default()
//! };
//! let quote = Quotation::build(params, QuoteOptions::default(), &PriceTable::default());
//!
//! let json = serde_json::to_string_pretty(&quote).unwrap();
//! assert!(json.contains("패턴 거푸집 패널 (60T)"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Rule sets, the material engine and the totals stage
//! - [`prices`] - Price table, built-in defaults and lookup fallbacks
//! - [`quotation`] - Computed quotation and its printed rows
//! - [`report`] - Text and CSV rendering
//! - [`words`] - Korean currency words
//! - [`store`] - Price table persistence (memory and file stores)
//! - [`api`] - GET/PUT operations over a price store
//! - [`file_io`] - File operations with atomic saves and locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod api;
pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod prices;
pub mod quotation;
pub mod report;
pub mod store;
pub mod units;
pub mod words;

// Re-export commonly used types at crate root for convenience
pub use api::PriceApi;
pub use calculations::{calculate_materials, compute_totals, CalculationParams, QuoteOptions, SystemId};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_price_record, save_price_record, FileLock};
pub use prices::PriceTable;
pub use quotation::Quotation;
pub use store::{FileStore, MemoryStore, PriceRecord, PriceStore};
