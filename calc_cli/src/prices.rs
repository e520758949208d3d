//! `estimator prices ...`: view and maintain the saved price table.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use calc_core::api::PriceApi;
use calc_core::prices::ThicknessFamily;
use calc_core::store::PriceStore;
use clap::{Subcommand, ValueEnum};
use tracing::info;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateKind {
    Material,
    Labor,
}

#[derive(Subcommand, Debug)]
pub enum PricesCommand {
    /// Print the saved price table as JSON
    Show,
    /// Replace the whole table with a JSON file (record or bare table)
    Set { file: PathBuf },
    /// Restore the built-in table
    Reset,
    /// List priced thicknesses of a family (rc, track, form)
    Thicknesses { family: String },
    /// Set one material price or labor rate
    SetRate {
        #[clap(value_enum)]
        kind: RateKind,
        name: String,
        price: f64,
    },
    /// Add or replace one thickness price
    SetThickness { family: String, thickness: u32, price: f64 },
    /// Remove one thickness price
    RemoveThickness { family: String, thickness: u32 },
}

fn family(code: &str) -> Result<ThicknessFamily> {
    ThicknessFamily::from_code(code).ok_or_else(|| anyhow!("unknown thickness family '{}': use rc, track or form", code))
}

fn non_negative(price: f64) -> Result<f64> {
    if price >= 0.0 && price.is_finite() {
        Ok(price)
    } else {
        Err(anyhow!("price must be a non-negative number, got {}", price))
    }
}

pub fn exec<S: PriceStore>(command: &PricesCommand, api: &mut PriceApi<S>) -> Result<()> {
    match command {
        PricesCommand::Show => {
            let record = api.get()?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        PricesCommand::Set { file } => {
            let body = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
            api.put_json(&body)?;
            println!("price table replaced from {}", file.display());
        }
        PricesCommand::Reset => {
            let record = api.put(calc_core::PriceTable::reset())?;
            info!(materials = record.prices.material_prices.len(), "price table reset");
            println!("price table reset to built-in values");
        }
        PricesCommand::Thicknesses { family: code } => {
            let family = family(code)?;
            let prices = api.get()?.prices;
            for thickness in prices.available_thicknesses(family) {
                let price = prices.thickness_prices(family)[&thickness];
                println!("{:>4} mm  {:>8}", thickness, calc_core::quotation::format_won(price));
            }
        }
        PricesCommand::SetRate { kind, name, price } => {
            let price = non_negative(*price)?;
            let mut prices = api.get()?.prices;
            match kind {
                RateKind::Material => prices.set_material_price(name.clone(), price),
                RateKind::Labor => prices.set_labor_rate(name.clone(), price),
            }
            api.put(prices)?;
            println!("{} = {}", name, price);
        }
        PricesCommand::SetThickness { family: code, thickness, price } => {
            let family = family(code)?;
            let mut prices = api.get()?.prices;
            prices.set_thickness_price(family, *thickness, non_negative(*price)?);
            api.put(prices)?;
            println!("{} {}mm = {}", family.code(), thickness, price);
        }
        PricesCommand::RemoveThickness { family: code, thickness } => {
            let family = family(code)?;
            let mut prices = api.get()?.prices;
            if prices.remove_thickness_price(family, *thickness).is_none() {
                return Err(anyhow!("{} has no {}mm price", family.code(), thickness));
            }
            api.put(prices)?;
            println!("removed {} {}mm", family.code(), thickness);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::prices::keys;
    use calc_core::store::MemoryStore;

    #[test]
    fn test_set_rate_persists() {
        let mut api = PriceApi::new(MemoryStore::new());
        let command = PricesCommand::SetRate {
            kind: RateKind::Labor,
            name: keys::FORM_LABOR.name.to_string(),
            price: 12_500.0,
        };
        exec(&command, &mut api).unwrap();
        assert_eq!(api.get().unwrap().prices.labor_rate(keys::FORM_LABOR), 12_500.0);
    }

    #[test]
    fn test_thickness_edits() {
        let mut api = PriceApi::new(MemoryStore::new());
        let add = PricesCommand::SetThickness {
            family: "lgs".to_string(),
            thickness: 110,
            price: 17_000.0,
        };
        exec(&add, &mut api).unwrap();
        assert_eq!(api.get().unwrap().prices.track_thickness_prices[&110], 17_000.0);

        let remove = PricesCommand::RemoveThickness {
            family: "track".to_string(),
            thickness: 110,
        };
        exec(&remove, &mut api).unwrap();
        assert!(exec(&remove, &mut api).is_err());
    }

    #[test]
    fn test_rejects_bad_family_and_price() {
        let mut api = PriceApi::new(MemoryStore::new());
        let bad_family = PricesCommand::Thicknesses {
            family: "steel".to_string(),
        };
        assert!(exec(&bad_family, &mut api).is_err());

        let bad_price = PricesCommand::SetRate {
            kind: RateKind::Material,
            name: "박리제".to_string(),
            price: -1.0,
        };
        assert!(exec(&bad_price, &mut api).is_err());
    }

    #[test]
    fn test_set_from_file_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("table.json");
        fs::write(&file, r#"{"materialPrices":{"박리제":60000}}"#).unwrap();

        let mut api = PriceApi::new(MemoryStore::new());
        exec(&PricesCommand::Set { file }, &mut api).unwrap();
        assert!(api.get().unwrap().prices.labor_rates.is_empty());

        exec(&PricesCommand::Reset, &mut api).unwrap();
        assert_eq!(api.get().unwrap().prices, calc_core::PriceTable::default());
    }
}
