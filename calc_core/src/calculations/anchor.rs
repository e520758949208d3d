//! Disk-anchor size selection.
//!
//! Anchors come in four lengths. The band is a step function of the
//! insulation thickness with breakpoints at 120, 160 and 200 mm; each band
//! has its own material-price key.

use serde::{Deserialize, Serialize};

use crate::prices::keys::{self, PriceKey};

/// Disk-anchor length band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnchorBand {
    #[serde(rename = "120mm")]
    Mm120,
    #[serde(rename = "150mm")]
    Mm150,
    #[serde(rename = "200mm")]
    Mm200,
    #[serde(rename = "250mm")]
    Mm250,
}

impl AnchorBand {
    /// Band for a board thickness in mm.
    ///
    /// Zero falls into the first band; thickness is not validated here.
    ///
    /// ```rust
    /// use calc_core::calculations::AnchorBand;
    ///
    /// assert_eq!(AnchorBand::for_thickness(120), AnchorBand::Mm120);
    /// assert_eq!(AnchorBand::for_thickness(121), AnchorBand::Mm150);
    /// ```
    pub fn for_thickness(thickness_mm: u32) -> Self {
        match thickness_mm {
            0..=120 => AnchorBand::Mm120,
            121..=160 => AnchorBand::Mm150,
            161..=200 => AnchorBand::Mm200,
            _ => AnchorBand::Mm250,
        }
    }

    /// Size label, e.g. `"150mm"`
    pub fn size(&self) -> &'static str {
        match self {
            AnchorBand::Mm120 => "120mm",
            AnchorBand::Mm150 => "150mm",
            AnchorBand::Mm200 => "200mm",
            AnchorBand::Mm250 => "250mm",
        }
    }

    /// Material-price key for the band
    pub fn price_key(&self) -> PriceKey {
        match self {
            AnchorBand::Mm120 => keys::DISK_ANCHOR_120,
            AnchorBand::Mm150 => keys::DISK_ANCHOR_150,
            AnchorBand::Mm200 => keys::DISK_ANCHOR_200,
            AnchorBand::Mm250 => keys::DISK_ANCHOR_250,
        }
    }

    /// Row name printed on the quotation
    pub fn item_name(&self) -> String {
        format!("{} {}", keys::DISK_ANCHOR.name, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(AnchorBand::for_thickness(0), AnchorBand::Mm120);
        assert_eq!(AnchorBand::for_thickness(100), AnchorBand::Mm120);
        assert_eq!(AnchorBand::for_thickness(120), AnchorBand::Mm120);
        assert_eq!(AnchorBand::for_thickness(121), AnchorBand::Mm150);
        assert_eq!(AnchorBand::for_thickness(160), AnchorBand::Mm150);
        assert_eq!(AnchorBand::for_thickness(161), AnchorBand::Mm200);
        assert_eq!(AnchorBand::for_thickness(200), AnchorBand::Mm200);
        assert_eq!(AnchorBand::for_thickness(201), AnchorBand::Mm250);
        assert_eq!(AnchorBand::for_thickness(u32::MAX), AnchorBand::Mm250);
    }

    #[test]
    fn test_bands_are_monotonic() {
        let mut previous = AnchorBand::for_thickness(0);
        for t in 1..=400 {
            let band = AnchorBand::for_thickness(t);
            assert!(band >= previous, "band went down at {t} mm");
            previous = band;
        }
    }

    #[test]
    fn test_names_and_keys() {
        let band = AnchorBand::for_thickness(180);
        assert_eq!(band.size(), "200mm");
        assert_eq!(band.item_name(), "디스크 앙카 200mm");
        assert_eq!(band.price_key().name, "디스크 앙카 200mm");
    }
}
