use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The three fixed membership tiers sold at the front desk and online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "6-month")]
    SixMonth,
    #[serde(rename = "12-month")]
    TwelveMonth,
}

impl Plan {
    /// Membership duration granted by a purchase of this plan.
    /// The 12-month tier includes one bonus month (13 x 30 days).
    pub fn duration_days(&self) -> i64 {
        match self {
            Plan::OneMonth => 30,
            Plan::SixMonth => 180,
            Plan::TwelveMonth => 390,
        }
    }

    pub fn price_cents(&self) -> i64 {
        match self {
            Plan::OneMonth => 3_000,
            Plan::SixMonth => 16_200,
            Plan::TwelveMonth => 30_600,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Plan::OneMonth => "1 Month",
            Plan::SixMonth => "6 Months",
            Plan::TwelveMonth => "12 Months + 1 FREE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Plan::OneMonth => "Monthly membership",
            Plan::SixMonth => "6-month membership (10% off)",
            Plan::TwelveMonth => "12-month membership (15% off + 1 month free)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::OneMonth => "1-month",
            Plan::SixMonth => "6-month",
            Plan::TwelveMonth => "12-month",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1-month" => Ok(Plan::OneMonth),
            "6-month" => Ok(Plan::SixMonth),
            "12-month" => Ok(Plan::TwelveMonth),
            other => Err(AppError::Validation(format!("Unknown membership plan: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_duration_mapping_is_fixed() {
        assert_eq!(Plan::OneMonth.duration_days(), 30);
        assert_eq!(Plan::SixMonth.duration_days(), 180);
        assert_eq!(Plan::TwelveMonth.duration_days(), 390);
    }

    #[test]
    fn plan_parses_wire_names() {
        assert_eq!("1-month".parse::<Plan>().unwrap(), Plan::OneMonth);
        assert_eq!("6-month".parse::<Plan>().unwrap(), Plan::SixMonth);
        assert_eq!("12-month".parse::<Plan>().unwrap(), Plan::TwelveMonth);
        assert!("2-week".parse::<Plan>().is_err());
    }

    #[test]
    fn plan_serde_uses_hyphenated_names() {
        assert_eq!(serde_json::to_string(&Plan::TwelveMonth).unwrap(), "\"12-month\"");
        let p: Plan = serde_json::from_str("\"6-month\"").unwrap();
        assert_eq!(p, Plan::SixMonth);
    }
}
