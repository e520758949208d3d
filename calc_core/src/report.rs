//! # Quotation Rendering
//!
//! Plain-text and CSV renderings of a [`Quotation`]. Both use the printed
//! rows from [`Quotation::display_rows`], so the design fee, the formwork
//! labor line and the discount line appear exactly as on the printed sheet.
//! Filled-in [`PrintHeader`](crate::quotation::PrintHeader) fields frame the
//! table: recipient and sender above, delivery terms below.

use std::fmt;
use std::io;

use crate::errors::{CalcError, CalcResult};
use crate::quotation::{format_won, Quotation};
use crate::words::korean_currency_words_f64;

const HEADER: [&str; 6] = ["No", "품명", "단위", "수량", "단가", "공급가"];

/// Render a quotation as a fixed-layout text sheet.
pub fn render_text(quote: &Quotation) -> String {
    let mut out = String::new();
    // writing into a String does not fail
    write_text(quote, &mut out).map(|()| out).unwrap_or_default()
}

/// Write the text sheet into any formatter sink.
pub fn write_text<W: fmt::Write>(quote: &Quotation, out: &mut W) -> fmt::Result {
    let params = &quote.params;
    let totals = &quote.totals;
    let header = &quote.header;

    writeln!(out, "자재 견적서")?;
    writeln!(out, "발행일: {}", quote.issued_on.format("%Y-%m-%d"))?;
    for (label, value) in header.recipient_lines() {
        writeln!(out, "{}: {}", label, value)?;
    }
    for (label, value) in header.sender_lines() {
        writeln!(out, "{}: {}", label, value)?;
    }
    writeln!(out, "시스템: {} ({})", params.system.label(), params.system.code())?;
    writeln!(out, "면적: {} ㎡   두께: {}mm", params.area, params.thickness)?;
    writeln!(out, "부가세: {}", if quote.options.vat_included { "포함" } else { "별도" })?;
    writeln!(out)?;

    if quote.is_empty() {
        writeln!(out, "(두께가 선택되지 않아 산출된 자재가 없습니다)")?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "{:>3}  {:<28} {:>4} {:>10} {:>12} {:>14}",
        HEADER[0], HEADER[1], HEADER[2], HEADER[3], HEADER[4], HEADER[5]
    )?;
    for (index, row) in quote.display_rows().iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<28} {:>4} {:>10} {:>12} {:>14}",
            index + 1,
            row.name,
            row.unit.symbol(),
            row.quantity_text(),
            format_won(row.unit_price),
            format_won(row.amount)
        )?;
    }

    let terms = header.terms_lines();
    if !terms.is_empty() {
        writeln!(out)?;
        for (label, value) in terms {
            writeln!(out, "{}: {}", label, value)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "소계: {} 원", format_won(totals.subtotal))?;
    if quote.options.vat_included {
        writeln!(out, "부가세 (10%): {} 원", format_won(totals.vat))?;
    }
    writeln!(out, "합계 (버림 전): {} 원", format_won(totals.total))?;
    if totals.has_discount() {
        writeln!(out, "공제: -{} 원", format_won(totals.discount))?;
    }
    writeln!(out, "총액: {} 원", format_won(totals.total_rounded))?;
    writeln!(out, "합계금액: {}", korean_currency_words_f64(totals.total_rounded))
}

/// Write a quotation as CSV: header fields, one header row, one row per
/// printed line, delivery terms, then summary lines.
pub fn write_csv<W: io::Write>(quote: &Quotation, writer: W) -> CalcResult<()> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let header = &quote.header;

    for (label, value) in header.recipient_lines().into_iter().chain(header.sender_lines()) {
        out.write_record([label, value]).map_err(csv_error)?;
    }
    out.write_record(["시스템", quote.params.system.label()]).map_err(csv_error)?;
    out.write_record(HEADER).map_err(csv_error)?;

    for (index, row) in quote.display_rows().iter().enumerate() {
        out.write_record([
            (index + 1).to_string(),
            row.name.clone(),
            row.unit.symbol().to_string(),
            row.quantity_text(),
            format_won(row.unit_price),
            format_won(row.amount),
        ])
        .map_err(csv_error)?;
    }

    for (label, value) in header.terms_lines() {
        out.write_record([label, value]).map_err(csv_error)?;
    }

    let totals = &quote.totals;
    out.write_record(["공급가", format_won(totals.subtotal).as_str()]).map_err(csv_error)?;
    out.write_record(["부가세", format_won(totals.vat).as_str()]).map_err(csv_error)?;
    out.write_record(["합계금액", format_won(totals.total_rounded).as_str()]).map_err(csv_error)?;

    out.flush()
        .map_err(|e| CalcError::file_error("flush csv", "<writer>", e.to_string()))?;
    Ok(())
}

/// Render a quotation to a CSV string.
pub fn to_csv_string(quote: &Quotation) -> CalcResult<String> {
    let mut buffer = Vec::new();
    write_csv(quote, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CalcError::serialization(e.to_string()))
}

fn csv_error(e: csv::Error) -> CalcError {
    CalcError::serialization(format!("CSV write failed: {}", e))
}
