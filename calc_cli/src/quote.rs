//! `estimator quote`: compute and print a quotation.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use calc_core::calculations::{CalculationParams, CornerTileKind, QuoteOptions, SystemId};
use calc_core::prices::PriceTable;
use calc_core::quotation::{PrintHeader, Quotation};
use calc_core::report;
use clap::{Args, ValueEnum};
use tracing::{info, warn};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemArg {
    Rc,
    Lgs,
    Wood,
    Form,
}

impl From<SystemArg> for SystemId {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Rc => SystemId::Rc,
            SystemArg::Lgs => SystemId::Lgs,
            SystemArg::Wood => SystemId::Wood,
            SystemArg::Form => SystemId::Form,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerTileArg {
    LongBrick,
    #[value(alias = "brick")]
    BrickCorner,
}

impl From<CornerTileArg> for CornerTileKind {
    fn from(arg: CornerTileArg) -> Self {
        match arg {
            CornerTileArg::LongBrick => CornerTileKind::LongBrick,
            CornerTileArg::BrickCorner => CornerTileKind::BrickCorner,
        }
    }
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Installation system
    #[clap(short, long, value_enum, ignore_case = true, default_value_t = SystemArg::Rc)]
    system: SystemArg,

    /// Wall area in ㎡
    #[clap(short, long, default_value_t = 120.0)]
    area: f64,

    /// Thickness in mm; the smallest priced thickness when omitted
    #[clap(short, long)]
    thickness: Option<u32>,

    /// Insulation board loss rate (%)
    #[clap(long, default_value_t = 8.0)]
    insulation_loss: f64,

    /// Brick tile loss rate (%)
    #[clap(long, default_value_t = 10.0)]
    tile_loss: f64,

    /// Quote semi-noncombustible insulation
    #[clap(long)]
    fire_resistant: bool,

    /// Corner tile product
    #[clap(long, value_enum, ignore_case = true)]
    corner_tile: Option<CornerTileArg>,

    /// Total corner length in meters
    #[clap(long, default_value_t = 0.0)]
    corner_length: f64,

    /// Leave out labor
    #[clap(long)]
    no_labor: bool,

    /// Add a design fee of this many percent to every row
    #[clap(long)]
    design_fee: Option<f64>,

    /// Add 10% VAT
    #[clap(long)]
    vat: bool,

    /// Floor the final total to a multiple of this many won
    #[clap(long, default_value_t = 10.0)]
    round_step: f64,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// JSON file with the printed header (recipient, sender, delivery terms)
    #[clap(long, value_name = "FILE")]
    header: Option<PathBuf>,

    /// Recipient shown on the sheet; overrides the header file
    #[clap(long)]
    recipient: Option<String>,

    /// Sender company name; overrides the header file
    #[clap(long)]
    company: Option<String>,
}

impl QuoteArgs {
    fn params(&self, prices: &PriceTable) -> Result<CalculationParams> {
        let system = SystemId::from(self.system);
        let family = system.family();
        if !system.uses_tile_options() && (self.fire_resistant || self.corner_tile.is_some()) {
            warn!(system = system.code(), "tile options do not apply to this system and are ignored");
        }

        let thickness = match self.thickness {
            Some(t) => {
                if !prices.thickness_prices(family).contains_key(&t) && !self.fire_resistant {
                    warn!(thickness = t, family = family.code(), "thickness not in price table, using fallback price");
                }
                t
            }
            None => prices.default_thickness(family),
        };

        let params = CalculationParams {
            system,
            area: self.area,
            thickness,
            insulation_loss_rate: self.insulation_loss,
            tile_loss_rate: self.tile_loss,
            is_fire_resistant: self.fire_resistant,
            corner_tile: self.corner_tile.map(CornerTileKind::from),
            corner_tile_length: self.corner_length,
            labor_included: !self.no_labor,
        };
        params.validate()?;
        Ok(params)
    }

    fn options(&self) -> QuoteOptions {
        let defaults = QuoteOptions::default();
        QuoteOptions {
            design_fee_enabled: self.design_fee.is_some(),
            design_fee_rate: self.design_fee.unwrap_or(defaults.design_fee_rate),
            vat_included: self.vat,
            round_step: self.round_step,
        }
    }

    fn header(&self) -> Result<PrintHeader> {
        let mut header = match &self.header {
            Some(path) => {
                let body = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&body).with_context(|| format!("parsing header {}", path.display()))?
            }
            None => PrintHeader::default(),
        };
        if let Some(recipient) = &self.recipient {
            header.recipient = recipient.clone();
        }
        if let Some(company) = &self.company {
            header.company_name = company.clone();
        }
        Ok(header)
    }
}

pub fn exec(args: &QuoteArgs, prices: &PriceTable) -> Result<()> {
    let quote = Quotation::build(args.params(prices)?, args.options(), prices).with_header(args.header()?);
    info!(
        system = quote.params.system.code(),
        rows = quote.items.len(),
        total = quote.totals.total_rounded,
        "quotation computed"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Text => out.write_all(report::render_text(&quote).as_bytes())?,
        Format::Json => {
            let json = serde_json::to_string_pretty(&quote).context("serializing quotation")?;
            writeln!(out, "{}", json)?;
        }
        Format::Csv => report::write_csv(&quote, &mut out)?,
    }
    Ok(())
}
