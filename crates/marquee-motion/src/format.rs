//! Display formatting for counter values.
//!
//! A [`StatFormat`] maps a raw numeric counter value to its display string.
//! Formatting is a pure function of the value and the tag: it is recomputed
//! fresh at every tick and accumulates no rounding error across frames.

use serde::{Deserialize, Serialize};

/// Presentation rule for one stat display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatFormat {
    /// Scale to millions with one decimal and append "M+": `2.4M+`.
    ScaledMillionsPlus,
    /// Currency-scaled integer in millions: `$890M`.
    CurrencyMillions,
    /// Round to the nearest thousand and append "K+": `40K+`.
    ScaledThousandsPlus,
    /// Fixed-point percentage with one decimal: `99.9%`.
    FixedPercent,
}

impl StatFormat {
    /// Render a raw counter value as its display string.
    pub fn render(&self, value: f64) -> String {
        match self {
            Self::ScaledMillionsPlus => format!("{:.1}M+", value / 1_000_000.0),
            Self::CurrencyMillions => format!("${}M", value.round() as i64),
            Self::ScaledThousandsPlus => format!("{}K+", (value / 1000.0).round() as i64),
            Self::FixedPercent => format!("{:.1}%", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_millions_plus() {
        assert_eq!(StatFormat::ScaledMillionsPlus.render(2_400_000.0), "2.4M+");
        assert_eq!(StatFormat::ScaledMillionsPlus.render(0.0), "0.0M+");
        assert_eq!(StatFormat::ScaledMillionsPlus.render(1_250_000.0), "1.2M+");
    }

    #[test]
    fn test_currency_millions() {
        assert_eq!(StatFormat::CurrencyMillions.render(890.0), "$890M");
        assert_eq!(StatFormat::CurrencyMillions.render(889.6), "$890M");
        assert_eq!(StatFormat::CurrencyMillions.render(0.0), "$0M");
    }

    #[test]
    fn test_scaled_thousands_plus() {
        assert_eq!(StatFormat::ScaledThousandsPlus.render(40_000.0), "40K+");
        assert_eq!(StatFormat::ScaledThousandsPlus.render(39_600.0), "40K+");
        assert_eq!(StatFormat::ScaledThousandsPlus.render(120.0), "0K+");
    }

    #[test]
    fn test_fixed_percent() {
        assert_eq!(StatFormat::FixedPercent.render(99.9), "99.9%");
        assert_eq!(StatFormat::FixedPercent.render(0.0), "0.0%");
        assert_eq!(StatFormat::FixedPercent.render(96.8), "96.8%");
    }

    #[test]
    fn test_pure_and_repeatable() {
        // Same value in, same string out, at any point in a tick sequence
        let fmt = StatFormat::ScaledMillionsPlus;
        let a = fmt.render(1_732_500.1);
        let b = fmt.render(1_732_500.1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_tag_names() {
        // Tags are the wire names the presentation layer selects by
        assert_eq!(
            serde_json::to_string(&StatFormat::ScaledMillionsPlus).unwrap(),
            "\"scaled-millions-plus\""
        );
        assert_eq!(
            serde_json::to_string(&StatFormat::CurrencyMillions).unwrap(),
            "\"currency-millions\""
        );
        assert_eq!(
            serde_json::to_string(&StatFormat::ScaledThousandsPlus).unwrap(),
            "\"scaled-thousands-plus\""
        );
        assert_eq!(
            serde_json::to_string(&StatFormat::FixedPercent).unwrap(),
            "\"fixed-percent\""
        );
    }
}
