use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Calendar time in months (fractional months allowed).
pub type Months = Decimal;

/// Count of rate or compounding periods.
pub type Periods = Decimal;

/// Periodicity of a rate or of compounding.
///
/// Strings outside the canonical nine (English or the extractor's Spanish
/// names) parse to [`Frequency::Unrecognized`], which behaves as annual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    FourMonthly,
    Semiannual,
    #[default]
    Annual,
    Unrecognized,
}

impl Frequency {
    pub const ALL: [Frequency; 9] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Bimonthly,
        Frequency::Quarterly,
        Frequency::FourMonthly,
        Frequency::Semiannual,
        Frequency::Annual,
    ];

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Bimonthly => "bimonthly",
            Frequency::Quarterly => "quarterly",
            Frequency::FourMonthly => "four_monthly",
            Frequency::Semiannual => "semiannual",
            Frequency::Annual => "annual",
            Frequency::Unrecognized => "unrecognized",
        }
    }

    /// Parses a frequency name, falling back to [`Frequency::Unrecognized`].
    pub fn from_name(s: &str) -> Frequency {
        match s.trim().to_lowercase().as_str() {
            "daily" | "diario" | "diaria" => Frequency::Daily,
            "weekly" | "semanal" => Frequency::Weekly,
            "biweekly" | "quincenal" => Frequency::Biweekly,
            "monthly" | "mensual" => Frequency::Monthly,
            "bimonthly" | "bimestral" => Frequency::Bimonthly,
            "quarterly" | "trimestral" => Frequency::Quarterly,
            "four_monthly" | "cuatrimestral" => Frequency::FourMonthly,
            "semiannual" | "semestral" => Frequency::Semiannual,
            "annual" | "anual" => Frequency::Annual,
            other => {
                tracing::warn!(frequency = other, "unrecognized frequency, treating as annual");
                Frequency::Unrecognized
            }
        }
    }
}

impl FromStr for Frequency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Frequency::from_name(s))
    }
}

/// Period names as shown in reports ("Mensual", "Trimestral", ...).
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "Diario",
            Frequency::Weekly => "Semanal",
            Frequency::Biweekly => "Quincenal",
            Frequency::Monthly => "Mensual",
            Frequency::Bimonthly => "Bimestral",
            Frequency::Quarterly => "Trimestral",
            Frequency::FourMonthly => "Cuatrimestral",
            Frequency::Semiannual => "Semestral",
            Frequency::Annual | Frequency::Unrecognized => "Anual",
        };
        write!(f, "{name}")
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Frequency::from_name(&raw))
    }
}

/// An interest rate as supplied by the problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    /// Decimal fraction (0.15 for 15%)
    #[serde(alias = "valor")]
    pub value: Rate,
    /// Period the rate is quoted over
    #[serde(default, alias = "periodo")]
    pub period: Frequency,
    /// True for a nominal annual rate (j) that must be split over compounding periods
    #[serde(default, alias = "es_nominal")]
    pub is_nominal: bool,
    /// Compounding frequency of a nominal rate
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "capitalizacion")]
    pub compounding: Option<Frequency>,
}

impl InterestRate {
    /// An effective rate quoted per `period`.
    pub fn effective(value: Rate, period: Frequency) -> Self {
        Self {
            value,
            period,
            is_nominal: false,
            compounding: None,
        }
    }

    /// A nominal annual rate compounded `compounding` times per year.
    pub fn nominal(value: Rate, compounding: Frequency) -> Self {
        Self {
            value,
            period: Frequency::Annual,
            is_nominal: true,
            compounding: Some(compounding),
        }
    }
}

/// The unknown a problem asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Capital,
    #[serde(alias = "monto")]
    Amount,
    #[serde(alias = "tasa")]
    Rate,
    #[serde(alias = "tiempo")]
    Time,
    #[serde(alias = "interes")]
    Interest,
    #[serde(alias = "descuento")]
    Discount,
    #[serde(alias = "valor_nominal")]
    FaceValue,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Capital => "Capital",
            Target::Amount => "Amount",
            Target::Rate => "Rate",
            Target::Time => "Time",
            Target::Interest => "Interest",
            Target::Discount => "Discount",
            Target::FaceValue => "Face value",
        };
        write!(f, "{name}")
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_frequency_accepts_spanish_and_english_names() {
        assert_eq!("mensual".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("Quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("cuatrimestral".parse::<Frequency>().unwrap(), Frequency::FourMonthly);
        assert_eq!("lunar".parse::<Frequency>().unwrap(), Frequency::Unrecognized);
    }

    #[test]
    fn test_frequency_serde_roundtrip_uses_canonical_name() {
        let json = serde_json::to_string(&Frequency::Semiannual).unwrap();
        assert_eq!(json, "\"semiannual\"");
        let back: Frequency = serde_json::from_str("\"semestral\"").unwrap();
        assert_eq!(back, Frequency::Semiannual);
    }

    #[test]
    fn test_interest_rate_defaults_from_extractor_record() {
        let rate: InterestRate = serde_json::from_str(r#"{"valor": "0.19", "es_nominal": true, "capitalizacion": "mensual"}"#).unwrap();
        assert_eq!(rate, InterestRate::nominal(dec!(0.19), Frequency::Monthly));
    }

    #[test]
    fn test_target_aliases() {
        let t: Target = serde_json::from_str("\"monto\"").unwrap();
        assert_eq!(t, Target::Amount);
        let t: Target = serde_json::from_str("\"valor_nominal\"").unwrap();
        assert_eq!(t, Target::FaceValue);
    }
}
