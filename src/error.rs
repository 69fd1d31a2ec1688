//! Errors raised while building a problem instance.
//!
//! The search core never fails: once a [`ProblemInstance`](crate::models::ProblemInstance)
//! exists, every solver runs to completion. Malformed data is rejected here,
//! either by the checked constructor or by the text parsers in [`io`](crate::io).

use std::fmt;

/// The error type for instance construction and loading.
#[derive(Debug)]
pub enum InstanceError {
    /// An I/O error occurred while reading the input.
    Io(std::io::Error),
    /// The input ended before the named item could be read.
    UnexpectedEof {
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A token could not be parsed into the expected value.
    Parse {
        /// The offending token.
        token: String,
        /// What the token should have been.
        expected: &'static str,
    },
    /// A customer's allocation-cost row does not have one entry per warehouse.
    CostRowLength {
        /// Customer index.
        customer: usize,
        /// Number of warehouses in the instance.
        expected: usize,
        /// Number of costs supplied for this customer.
        found: usize,
    },
    /// The instance has no candidate warehouses.
    NoWarehouses,
    /// A fixed cost is negative, NaN or infinite.
    InvalidFixedCost {
        /// Warehouse index.
        warehouse: usize,
        /// The rejected value.
        value: f64,
    },
    /// An allocation cost is NaN or infinite.
    InvalidAllocationCost {
        /// Customer index.
        customer: usize,
        /// Warehouse index.
        warehouse: usize,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input while reading {expected}")
            }
            Self::Parse { token, expected } => {
                write!(f, "could not parse token '{token}' as {expected}")
            }
            Self::CostRowLength {
                customer,
                expected,
                found,
            } => write!(
                f,
                "customer {customer} has {found} allocation costs, expected {expected}"
            ),
            Self::NoWarehouses => write!(f, "instance has no warehouses"),
            Self::InvalidFixedCost { warehouse, value } => write!(
                f,
                "warehouse {warehouse} has fixed cost {value}, expected a finite non-negative value"
            ),
            Self::InvalidAllocationCost {
                customer,
                warehouse,
                value,
            } => write!(
                f,
                "customer {customer} has allocation cost {value} for warehouse {warehouse}, expected a finite value"
            ),
        }
    }
}

impl std::error::Error for InstanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
