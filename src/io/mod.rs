//! Instance loaders for the two supported text formats.
//!
//! - [`InstanceFormat::OrLib`]: the OR-Library `cap*` layout. A stream of
//!   whitespace-separated tokens, line breaks are insignificant:
//!   `W C`, then `capacity fixed_cost` per warehouse, then per customer its
//!   `demand` followed by `W` allocation costs.
//! - [`InstanceFormat::LineOriented`]: the same data with fixed lines: a
//!   `W C` header line, one `capacity fixed_cost` line per warehouse, then
//!   per customer a demand line followed by one line holding all `W` costs.
//!
//! Parsing is all-or-nothing: any malformed or missing value fails the whole
//! load with an [`InstanceError`]. Cost tokens must be finite numbers, so
//! `NaN` and `inf` are rejected as parse errors.

use crate::error::InstanceError;
use crate::models::{Customer, ProblemInstance, Warehouse};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

/// Text layout of an instance file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InstanceFormat {
    #[default]
    OrLib,
    LineOriented,
}

impl InstanceFormat {
    /// Parses `text` in this format.
    pub fn parse(self, text: &str) -> Result<ProblemInstance, InstanceError> {
        match self {
            InstanceFormat::OrLib => parse_orlib(text),
            InstanceFormat::LineOriented => parse_lines(text),
        }
    }
}

/// Reads and parses the instance at `path`.
pub fn load_instance(
    path: impl AsRef<Path>,
    format: InstanceFormat,
) -> Result<ProblemInstance, InstanceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let problem = format.parse(&text)?;
    log::info!(
        "loaded {}: {} warehouses, {} customers",
        path.display(),
        problem.num_warehouses(),
        problem.num_customers()
    );
    Ok(problem)
}

/// Parses an OR-Library token stream.
///
/// # Examples
///
/// ```
/// use u_facility::io::parse_orlib;
///
/// let problem = parse_orlib("2 1\n100 10.0\n100 20.0\n1\n5.0 8.0\n").unwrap();
/// assert_eq!(problem.num_warehouses(), 2);
/// assert_eq!(problem.allocation_cost(0, 1), 8.0);
/// ```
pub fn parse_orlib(text: &str) -> Result<ProblemInstance, InstanceError> {
    let mut tokens = Tokens::new(text);
    let num_warehouses: usize = tokens.value("warehouse count")?;
    let num_customers: usize = tokens.value("customer count")?;

    let mut warehouses = Vec::with_capacity(num_warehouses);
    for _ in 0..num_warehouses {
        let capacity = tokens.quantity("warehouse capacity")?;
        let fixed_cost = tokens.cost("warehouse fixed cost")?;
        warehouses.push(Warehouse::new(capacity, fixed_cost));
    }

    let mut customers = Vec::with_capacity(num_customers);
    for _ in 0..num_customers {
        let demand = tokens.quantity("customer demand")?;
        let costs = (0..num_warehouses)
            .map(|_| tokens.cost("allocation cost"))
            .collect::<Result<Vec<f64>, _>>()?;
        customers.push(Customer::new(demand, costs));
    }

    ProblemInstance::new(warehouses, customers)
}

/// Parses the line-oriented format.
///
/// Each line must hold exactly the values its position calls for; a cost
/// line with the wrong number of values is reported as
/// [`InstanceError::CostRowLength`].
pub fn parse_lines(text: &str) -> Result<ProblemInstance, InstanceError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let mut next_line = |expected: &'static str| {
        lines
            .next()
            .map(Tokens::new)
            .ok_or(InstanceError::UnexpectedEof { expected })
    };

    let mut header = next_line("header line")?;
    let num_warehouses: usize = header.value("warehouse count")?;
    let num_customers: usize = header.value("customer count")?;

    let mut warehouses = Vec::with_capacity(num_warehouses);
    for _ in 0..num_warehouses {
        let mut line = next_line("warehouse line")?;
        let capacity = line.quantity("warehouse capacity")?;
        let fixed_cost = line.cost("warehouse fixed cost")?;
        warehouses.push(Warehouse::new(capacity, fixed_cost));
    }

    let mut customers = Vec::with_capacity(num_customers);
    for c in 0..num_customers {
        let demand = next_line("demand line")?.quantity("customer demand")?;
        let costs = next_line("allocation cost line")?
            .map(|t| parse_cost(t, "allocation cost"))
            .collect::<Result<Vec<f64>, _>>()?;
        if costs.len() != num_warehouses {
            return Err(InstanceError::CostRowLength {
                customer: c,
                expected: num_warehouses,
                found: costs.len(),
            });
        }
        customers.push(Customer::new(demand, costs));
    }

    ProblemInstance::new(warehouses, customers)
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn value<T: FromStr>(&mut self, expected: &'static str) -> Result<T, InstanceError> {
        let token = self
            .inner
            .next()
            .ok_or(InstanceError::UnexpectedEof { expected })?;
        parse_token(token, expected)
    }

    fn cost(&mut self, expected: &'static str) -> Result<f64, InstanceError> {
        let token = self
            .inner
            .next()
            .ok_or(InstanceError::UnexpectedEof { expected })?;
        parse_cost(token, expected)
    }

    /// Non-negative integer quantity; accepts integral decimals such as
    /// `"146.000"`.
    fn quantity(&mut self, expected: &'static str) -> Result<u64, InstanceError> {
        let token = self
            .inner
            .next()
            .ok_or(InstanceError::UnexpectedEof { expected })?;
        if let Ok(v) = token.parse::<u64>() {
            return Ok(v);
        }
        match token.parse::<f64>() {
            Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
            _ => Err(InstanceError::Parse {
                token: token.to_owned(),
                expected,
            }),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

fn parse_token<T: FromStr>(token: &str, expected: &'static str) -> Result<T, InstanceError> {
    token.parse::<T>().map_err(|_| InstanceError::Parse {
        token: token.to_owned(),
        expected,
    })
}

fn parse_cost(token: &str, expected: &'static str) -> Result<f64, InstanceError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InstanceError::Parse {
            token: token.to_owned(),
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORLIB: &str = "2 3
        100 10.0
        100 20.0
        1
        5.0 8.0
        1 4.0
        6.0
        1
        6.0 9.0
    ";

    const LINES: &str = "2 3
100 10.0
100 20.0
1
5.0 8.0
1
4.0 6.0
1
6.0 9.0
";

    #[test]
    fn test_orlib_ignores_line_breaks() {
        let problem = parse_orlib(ORLIB).unwrap();
        assert_eq!(problem.num_warehouses(), 2);
        assert_eq!(problem.num_customers(), 3);
        assert_eq!(problem.fixed_cost(1), 20.0);
        assert_eq!(problem.allocation_cost(1, 1), 6.0);
        assert_eq!(problem.allocation_cost(2, 0), 6.0);
    }

    #[test]
    fn test_both_formats_agree() {
        assert_eq!(parse_orlib(ORLIB).unwrap(), parse_lines(LINES).unwrap());
    }

    #[test]
    fn test_orlib_decimal_quantities() {
        let problem = parse_orlib("1 1 5000.000 7500.0 146.000 12.5").unwrap();
        assert_eq!(problem.warehouses()[0].capacity(), 5000);
        assert_eq!(problem.customers()[0].demand(), 146);
    }

    #[test]
    fn test_orlib_truncated() {
        let err = parse_orlib("2 1 100 10.0 100 20.0 1 5.0").unwrap_err();
        assert!(matches!(
            err,
            InstanceError::UnexpectedEof {
                expected: "allocation cost"
            }
        ));
    }

    #[test]
    fn test_orlib_bad_token() {
        let err = parse_orlib("1 1 100 ten 1 5.0").unwrap_err();
        match err {
            InstanceError::Parse { token, expected } => {
                assert_eq!(token, "ten");
                assert_eq!(expected, "warehouse fixed cost");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_costs_rejected() {
        let err = parse_orlib("1 1 100 NaN 1 5.0").unwrap_err();
        match err {
            InstanceError::Parse { token, expected } => {
                assert_eq!(token, "NaN");
                assert_eq!(expected, "warehouse fixed cost");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = parse_orlib("1 1 100 10 1 inf").unwrap_err();
        assert!(matches!(
            err,
            InstanceError::Parse {
                expected: "allocation cost",
                ..
            }
        ));

        let err = parse_lines("1 1\n100 10\n1\n-infinity\n").unwrap_err();
        assert!(matches!(err, InstanceError::Parse { .. }));
    }

    #[test]
    fn test_negative_fixed_cost_rejected() {
        let err = parse_orlib("2 1 100 -5 100 0 1 10 1").unwrap_err();
        assert!(matches!(
            err,
            InstanceError::InvalidFixedCost { warehouse: 0, .. }
        ));
    }

    #[test]
    fn test_orlib_zero_warehouses() {
        assert!(matches!(
            parse_orlib("0 0").unwrap_err(),
            InstanceError::NoWarehouses
        ));
    }

    #[test]
    fn test_lines_short_cost_row() {
        let err = parse_lines("2 1\n100 10\n100 20\n1\n5.0\n").unwrap_err();
        assert!(matches!(
            err,
            InstanceError::CostRowLength {
                customer: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_lines_missing_customer() {
        let err = parse_lines("1 2\n100 10\n1\n5.0\n").unwrap_err();
        assert!(matches!(
            err,
            InstanceError::UnexpectedEof {
                expected: "demand line"
            }
        ));
    }

    #[test]
    fn test_negative_demand_rejected() {
        let err = parse_orlib("1 1 100 10 -3 5.0").unwrap_err();
        assert!(matches!(err, InstanceError::Parse { .. }));
    }

    #[test]
    fn test_load_instance_from_file() {
        let dir = std::env::temp_dir().join(format!("u-facility-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("small.txt");
        std::fs::write(&path, LINES).unwrap();

        let problem = load_instance(&path, InstanceFormat::LineOriented).unwrap();
        assert_eq!(problem.num_customers(), 3);

        let missing = load_instance(dir.join("missing.txt"), InstanceFormat::OrLib);
        assert!(matches!(missing, Err(InstanceError::Io(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
