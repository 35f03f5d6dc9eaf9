use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Paypal,
    BinancePay,
    BlockchainPay,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Paypal => write!(f, "paypal"),
            PaymentMethod::BinancePay => write!(f, "binance-pay"),
            PaymentMethod::BlockchainPay => write!(f, "blockchain-pay"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paypal" => Ok(PaymentMethod::Paypal),
            "binance-pay" | "binance" => Ok(PaymentMethod::BinancePay),
            "blockchain-pay" | "blockchain" => Ok(PaymentMethod::BlockchainPay),
            _ => Err(format!("Unknown payment method: {s}")),
        }
    }
}
