//! Reply bodies.
//!
//! `factorial` is stored as `RawValue` so the full decimal expansion is written
//! as a JSON number, whatever its size.

use num_bigint::BigUint;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::error::{ClientCode, FactoError, Result};

/// 200 body: `{"number": n, "factorial": n!}`.
#[derive(Debug, Serialize)]
pub struct FactorialBody {
    pub number: u64,
    pub factorial: Box<RawValue>,
}

impl FactorialBody {
    pub fn new(number: u64, factorial: &BigUint) -> Result<Self> {
        let factorial = RawValue::from_string(factorial.to_str_radix(10))
            .map_err(|e| FactoError::Internal(format!("encode factorial failed: {e}")))?;
        Ok(Self { number, factorial })
    }
}

/// 4xx/5xx body: `{"error": msg}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl From<ClientCode> for ErrorBody {
    fn from(code: ClientCode) -> Self {
        Self {
            error: code.message(),
        }
    }
}
