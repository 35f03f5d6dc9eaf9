use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Premium,
}

impl Plan {
    pub fn monthly_usd(&self) -> f64 {
        match self {
            Plan::Premium => 15.0,
        }
    }

    /// Amount formatted the way payment processors expect it.
    pub fn amount(&self) -> String {
        format!("{:.2}", self.monthly_usd())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Premium => write!(f, "PREMIUM"),
        }
    }
}
