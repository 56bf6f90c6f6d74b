use std::fmt;

use serde::{Deserialize, Serialize};

use super::compat;

/// The five fixed buckets an allocation can be recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvestmentBucket {
    LiquidityReserve,
    FixedIncome,
    Equities,
    Crypto,
    Vehicles,
}

impl InvestmentBucket {
    pub const ALL: [InvestmentBucket; 5] = [
        InvestmentBucket::LiquidityReserve,
        InvestmentBucket::FixedIncome,
        InvestmentBucket::Equities,
        InvestmentBucket::Crypto,
        InvestmentBucket::Vehicles,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::LiquidityReserve => "liquidity_reserve",
            Self::FixedIncome => "fixed_income",
            Self::Equities => "equities",
            Self::Crypto => "crypto",
            Self::Vehicles => "vehicles",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LiquidityReserve => "Reserva de Emergência",
            Self::FixedIncome => "Renda Fixa",
            Self::Equities => "Ações",
            Self::Crypto => "Criptomoedas",
            Self::Vehicles => "Veículos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "liquidity_reserve" | "reserve" | "reserva" => Some(Self::LiquidityReserve),
            "fixed_income" | "rendafixa" | "renda_fixa" => Some(Self::FixedIncome),
            "equities" | "acoes" | "ações" => Some(Self::Equities),
            "crypto" | "cripto" => Some(Self::Crypto),
            "vehicles" | "veiculos" | "veículos" => Some(Self::Vehicles),
            _ => None,
        }
    }
}

impl fmt::Display for InvestmentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Balances per bucket. The key set is fixed, so this is a struct rather than a map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InvestmentLedger {
    #[serde(default, alias = "reserva", deserialize_with = "compat::balance")]
    pub liquidity_reserve: f64,
    #[serde(default, alias = "rendaFixa", deserialize_with = "compat::balance")]
    pub fixed_income: f64,
    #[serde(default, alias = "acoes", deserialize_with = "compat::balance")]
    pub equities: f64,
    #[serde(default, alias = "cripto", deserialize_with = "compat::balance")]
    pub crypto: f64,
    #[serde(default, alias = "veiculos", deserialize_with = "compat::balance")]
    pub vehicles: f64,
}

impl InvestmentLedger {
    pub fn balance(&self, bucket: InvestmentBucket) -> f64 {
        match bucket {
            InvestmentBucket::LiquidityReserve => self.liquidity_reserve,
            InvestmentBucket::FixedIncome => self.fixed_income,
            InvestmentBucket::Equities => self.equities,
            InvestmentBucket::Crypto => self.crypto,
            InvestmentBucket::Vehicles => self.vehicles,
        }
    }

    /// Returns a copy with one bucket replaced; invalid amounts become zero.
    pub fn with_balance(mut self, bucket: InvestmentBucket, amount: f64) -> Self {
        let amount = compat::sanitize_balance(amount);
        let slot = match bucket {
            InvestmentBucket::LiquidityReserve => &mut self.liquidity_reserve,
            InvestmentBucket::FixedIncome => &mut self.fixed_income,
            InvestmentBucket::Equities => &mut self.equities,
            InvestmentBucket::Crypto => &mut self.crypto,
            InvestmentBucket::Vehicles => &mut self.vehicles,
        };
        *slot = amount;
        self
    }

    pub fn sanitized(self) -> Self {
        InvestmentBucket::ALL
            .iter()
            .fold(self, |ledger, bucket| {
                let current = ledger.balance(*bucket);
                ledger.with_balance(*bucket, current)
            })
    }

    pub fn entries(&self) -> impl Iterator<Item = (InvestmentBucket, f64)> + '_ {
        InvestmentBucket::ALL
            .iter()
            .map(move |bucket| (*bucket, self.balance(*bucket)))
    }

    pub fn total(&self) -> f64 {
        self.entries().map(|(_, value)| value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_all_buckets() {
        let ledger = InvestmentLedger::default()
            .with_balance(InvestmentBucket::LiquidityReserve, 100.0)
            .with_balance(InvestmentBucket::Equities, 50.5)
            .with_balance(InvestmentBucket::Vehicles, 20.0);
        assert_eq!(ledger.total(), 170.5);
        assert_eq!(ledger.entries().count(), 5);
    }

    #[test]
    fn invalid_amounts_coerce_to_zero() {
        let ledger = InvestmentLedger::default()
            .with_balance(InvestmentBucket::Crypto, -5.0)
            .with_balance(InvestmentBucket::FixedIncome, f64::NAN);
        assert_eq!(ledger.crypto, 0.0);
        assert_eq!(ledger.fixed_income, 0.0);
    }

    #[test]
    fn legacy_keys_and_missing_fields_decode() {
        let raw = r#"{"reserva": 1000, "acoes": "250.5", "cripto": null}"#;
        let ledger: InvestmentLedger = serde_json::from_str(raw).expect("legacy ledger");
        assert_eq!(ledger.liquidity_reserve, 1000.0);
        assert_eq!(ledger.equities, 250.5);
        assert_eq!(ledger.crypto, 0.0);
        assert_eq!(ledger.vehicles, 0.0);
    }

    #[test]
    fn bucket_names_parse_in_both_languages() {
        assert_eq!(
            InvestmentBucket::parse("reserva"),
            Some(InvestmentBucket::LiquidityReserve)
        );
        assert_eq!(
            InvestmentBucket::parse("fixed-income"),
            Some(InvestmentBucket::FixedIncome)
        );
        assert_eq!(InvestmentBucket::parse("gold"), None);
    }
}
