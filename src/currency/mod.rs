//! Money and percentage rendering.

/// Shown in place of any amount while balances are hidden.
pub const MASK: &str = "---";

/// Renders amounts with a fixed currency symbol and two decimals, e.g. `R$ 700.00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    symbol: String,
    visible: bool,
}

impl MoneyFormat {
    pub fn new(symbol: impl Into<String>, visible: bool) -> Self {
        Self {
            symbol: symbol.into(),
            visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn amount(&self, value: f64) -> String {
        if self.visible {
            format_amount(&self.symbol, value)
        } else {
            MASK.to_string()
        }
    }

    /// Amount prefixed with `+` or `-`, as shown in transaction listings.
    pub fn signed(&self, sign: char, value: f64) -> String {
        if self.visible {
            format!("{} {}", sign, format_amount(&self.symbol, value))
        } else {
            format!("{} {}", sign, MASK)
        }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("R$", true)
    }
}

pub fn format_amount(symbol: &str, value: f64) -> String {
    let rendered = format!("{:.2}", round_to(value, 2));
    // `-0.00` reads badly in summaries.
    let rendered = if rendered == "-0.00" { "0.00".to_string() } else { rendered };
    format!("{} {}", symbol, rendered)
}

pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_two_decimals() {
        assert_eq!(format_amount("R$", 700.0), "R$ 700.00");
        assert_eq!(format_amount("R$", 0.125), "R$ 0.13");
        assert_eq!(format_amount("R$", -0.001), "R$ 0.00");
        assert_eq!(format_amount("R$", -12.5), "R$ -12.50");
    }

    #[test]
    fn hidden_balances_are_masked() {
        let mut money = MoneyFormat::default();
        assert_eq!(money.signed('+', 10.0), "+ R$ 10.00");
        money.set_visible(false);
        assert_eq!(money.amount(1234.5), MASK);
        assert_eq!(money.signed('-', 10.0), "- ---");
    }

    #[test]
    fn percents_respect_precision() {
        assert_eq!(format_percent(33.333, 1), "33.3%");
        assert_eq!(format_percent(150.0, 0), "150%");
    }
}
