//! Classification result types
//!
//! The endpoint answers with one of two JSON shapes, so the response is an
//! untagged enum: a typed classification or the fixed rejection body.

use hyper::StatusCode;
use serde::Serialize;

use super::predicates::{digit_sum, is_perfect, is_prime, number_properties, Property};

/// Placeholder echoed in the `number` field when the input does not parse
pub const REJECTED_NUMBER_PLACEHOLDER: &str = "alphabet";

/// Successful classification of one integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u32,
    pub fun_fact: String,
}

impl Classification {
    /// Run every predicate against `number`; the fun fact is attached later
    pub fn compute(number: i64) -> Self {
        Self {
            number,
            is_prime: is_prime(number),
            is_perfect: is_perfect(number),
            properties: number_properties(number),
            digit_sum: digit_sum(number),
            fun_fact: String::new(),
        }
    }

    #[must_use]
    pub fn with_fun_fact(mut self, fun_fact: String) -> Self {
        self.fun_fact = fun_fact;
        self
    }
}

/// Body returned for a `number` parameter that is not an integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedNumber {
    pub number: &'static str,
    pub error: bool,
}

impl Default for RejectedNumber {
    fn default() -> Self {
        Self {
            number: REJECTED_NUMBER_PLACEHOLDER,
            error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    Classified(Classification),
    Rejected(RejectedNumber),
}

impl ClassifyResponse {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Classified(_) => StatusCode::OK,
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
        }
    }
}
