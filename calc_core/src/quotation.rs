//! # Quotation
//!
//! The `Quotation` struct is the root container of one computed estimate:
//! the inputs it was computed from, the priced rows and the totals. It is
//! recomputed from scratch whenever an input changes and is never cached.
//!
//! ## Structure
//!
//! ```text
//! Quotation
//! ├── issued_on: date printed on the quotation
//! ├── header: PrintHeader (recipient, sender, delivery terms)
//! ├── params: CalculationParams (system, area, thickness, options)
//! ├── options: QuoteOptions (design fee, VAT, rounding step)
//! ├── items: Vec<MaterialItem> (rule-set rows, in print order)
//! └── totals: Totals
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{CalculationParams, QuoteOptions};
//! use calc_core::prices::PriceTable;
//! use calc_core::quotation::Quotation;
//!
//! let quote = Quotation::build(CalculationParams::default(), QuoteOptions::default(), &PriceTable::default());
//! assert_eq!(quote.items.len(), 12);
//! assert!(quote.totals.total_rounded <= quote.totals.total);
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::{
    calculate_materials, compute_totals, CalculationParams, ItemKind, MaterialItem, QuoteOptions, Totals,
};
use crate::prices::PriceTable;
use crate::units::ItemUnit;

/// Label of the flat formwork labor line
pub const FLAT_LABOR_LABEL: &str = "시공 인건비";

/// Label of the rounding discount line
pub const DISCOUNT_LABEL: &str = "공제 (버림 단위 적용)";

/// Recipient, sender and delivery details printed around the item table.
///
/// Every field is optional free text; empty fields are left off the sheet.
///
/// ```json
/// {
///   "recipient": "한빛건설",
///   "company_name": "대한단열",
///   "payment_condition": "현금",
///   "bank_account": "국민 000-00-0000"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintHeader {
    pub recipient: String,
    pub recipient_phone: String,
    pub business_number: String,
    pub company_name: String,
    pub phone: String,
    pub representative: String,
    pub address: String,
    pub product_type: String,
    pub delivery_date: String,
    pub payment_condition: String,
    pub delivery_location: String,
    pub bank_account: String,
}

impl PrintHeader {
    /// Whether no field is filled in
    pub fn is_empty(&self) -> bool {
        self.recipient_lines().is_empty() && self.sender_lines().is_empty() && self.terms_lines().is_empty()
    }

    /// Labelled recipient fields that are filled in
    pub fn recipient_lines(&self) -> Vec<(&'static str, &str)> {
        filled(&[("수신", &self.recipient), ("대표전화", &self.recipient_phone)])
    }

    /// Labelled sender fields that are filled in
    pub fn sender_lines(&self) -> Vec<(&'static str, &str)> {
        filled(&[
            ("사업자번호", &self.business_number),
            ("상호", &self.company_name),
            ("전화번호", &self.phone),
            ("대표자", &self.representative),
            ("주소", &self.address),
        ])
    }

    /// Labelled delivery and payment fields that are filled in
    pub fn terms_lines(&self) -> Vec<(&'static str, &str)> {
        filled(&[
            ("제품형식", &self.product_type),
            ("납품일자", &self.delivery_date),
            ("결제조건", &self.payment_condition),
            ("납품장소", &self.delivery_location),
            ("입금계좌", &self.bank_account),
        ])
    }
}

fn filled<'a>(fields: &[(&'static str, &'a String)]) -> Vec<(&'static str, &'a str)> {
    fields
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| (*label, value.as_str()))
        .collect()
}

/// A computed quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    /// Issue date
    pub issued_on: NaiveDate,

    /// Printed header details
    #[serde(default)]
    pub header: PrintHeader,

    /// Engine inputs
    pub params: CalculationParams,

    /// Totals-stage options
    pub options: QuoteOptions,

    /// Rule-set rows in print order
    pub items: Vec<MaterialItem>,

    /// Final figures
    pub totals: Totals,
}

/// A row as printed: design fee applied, plus the synthetic labor and
/// discount lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub name: String,
    pub unit: ItemUnit,
    pub quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
    pub kind: DisplayKind,
}

/// Origin of a printed row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    /// A rule-set row
    Item(ItemKind),
    /// Flat formwork labor
    FlatLabor,
    /// Rounding discount, negative amount
    Discount,
}

impl Quotation {
    /// Compute a quotation dated today.
    pub fn build(params: CalculationParams, options: QuoteOptions, prices: &PriceTable) -> Self {
        Self::build_on(Local::now().date_naive(), params, options, prices)
    }

    /// Compute a quotation with an explicit issue date.
    pub fn build_on(issued_on: NaiveDate, params: CalculationParams, options: QuoteOptions, prices: &PriceTable) -> Self {
        let items = calculate_materials(&params, prices);
        let totals = compute_totals(&items, &params, &options, prices);
        Quotation {
            issued_on,
            header: PrintHeader::default(),
            params,
            options,
            items,
            totals,
        }
    }

    /// Attach printed header details
    pub fn with_header(mut self, header: PrintHeader) -> Self {
        self.header = header;
        self
    }

    /// Whether the quotation has no rows (no thickness selected)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows as printed.
    ///
    /// Rule-set rows carry the design-fee-adjusted unit price and amount.
    /// The flat labor line appears for formwork whenever labor is included,
    /// the discount line only when there is a discount.
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        let multiplier = self.totals.design_fee_multiplier;
        let mut rows: Vec<DisplayRow> = self
            .items
            .iter()
            .map(|item| DisplayRow {
                name: item.name.clone(),
                unit: item.unit,
                quantity: item.quantity,
                unit_price: item.unit_price * multiplier,
                amount: item.extended_price * multiplier,
                kind: DisplayKind::Item(item.kind),
            })
            .collect();

        if self.totals.has_flat_labor() {
            rows.push(DisplayRow {
                name: FLAT_LABOR_LABEL.to_string(),
                unit: ItemUnit::SquareMeter,
                quantity: self.params.area,
                unit_price: self.totals.labor_rate,
                amount: self.totals.labor_supply,
                kind: DisplayKind::FlatLabor,
            });
        }

        if self.totals.has_discount() {
            rows.push(DisplayRow {
                name: DISCOUNT_LABEL.to_string(),
                unit: ItemUnit::Won,
                quantity: 1.0,
                unit_price: self.totals.discount,
                amount: -self.totals.discount,
                kind: DisplayKind::Discount,
            });
        }

        rows
    }
}

impl DisplayRow {
    /// Quantity as printed: board to one decimal, everything else whole.
    pub fn quantity_text(&self) -> String {
        match self.kind {
            DisplayKind::Item(ItemKind::InsulationBoard) => format!("{:.1}", self.quantity),
            _ => group_thousands(self.quantity.round()),
        }
    }
}

/// Format a won amount rounded to whole won with thousands separators.
///
/// ```rust
/// use calc_core::quotation::format_won;
///
/// assert_eq!(format_won(2_073_600.0000000005), "2,073,600");
/// assert_eq!(format_won(-5.0), "-5");
/// ```
pub fn format_won(amount: f64) -> String {
    group_thousands(amount.round())
}

fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
