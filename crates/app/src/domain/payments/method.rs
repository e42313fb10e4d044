//! Payment Methods

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Convenience store accepting cash payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    Alfamart,
    Indomaret,
}

impl Store {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alfamart => "alfamart",
            Self::Indomaret => "indomaret",
        }
    }
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Gopay,
    Cstore(Store),
}

impl PaymentMethod {
    /// Gateway `payment_type` value.
    #[must_use]
    pub const fn payment_type(self) -> &'static str {
        match self {
            Self::Gopay => "gopay",
            Self::Cstore(_) => "cstore",
        }
    }

    /// Prefix of the order ids generated for this method.
    #[must_use]
    pub const fn order_prefix(self) -> &'static str {
        match self {
            Self::Gopay => "GOPAY",
            Self::Cstore(_) => "CSTORE",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gopay => f.write_str("gopay"),
            Self::Cstore(store) => f.write_str(store.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported payment method {0:?}")]
pub struct InvalidPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = InvalidPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "gopay" => Ok(Self::Gopay),
            "alfamart" => Ok(Self::Cstore(Store::Alfamart)),
            "indomaret" => Ok(Self::Cstore(Store::Indomaret)),
            _ => Err(InvalidPaymentMethod(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_segments() {
        assert_eq!("gopay".parse(), Ok(PaymentMethod::Gopay));
        assert_eq!("alfamart".parse(), Ok(PaymentMethod::Cstore(Store::Alfamart)));
        assert_eq!("Indomaret".parse(), Ok(PaymentMethod::Cstore(Store::Indomaret)));
    }

    #[test]
    fn rejects_unknown_methods() {
        assert_eq!(
            "cstore".parse::<PaymentMethod>(),
            Err(InvalidPaymentMethod("cstore".to_string()))
        );
        assert!("bank_transfer".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn cstore_methods_share_payment_type_and_prefix() {
        let alfamart = PaymentMethod::Cstore(Store::Alfamart);
        let indomaret = PaymentMethod::Cstore(Store::Indomaret);

        assert_eq!(alfamart.payment_type(), "cstore");
        assert_eq!(indomaret.order_prefix(), "CSTORE");
        assert_eq!(PaymentMethod::Gopay.order_prefix(), "GOPAY");
        assert_eq!(alfamart.to_string(), "alfamart");
    }
}
