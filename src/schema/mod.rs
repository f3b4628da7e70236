//! Canonical feature schema shared by both strength models.
//!
//! The models were trained on a 12-column table whose column order is fixed.
//! Incoming requests name their features freely; [`FeatureSchema::order`] turns
//! that mapping into a row laid out exactly the way the models expect.

mod vector;

pub use vector::OrderedFeatureVector;

use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Feature names in training order.
pub const FEATURE_NAMES: [&str; 12] = [
    "Alkaline_Liquid_Ratio",
    "Fly_Ash (kg/m3)",
    "NaOH (kg/m3)(1 part)",
    "Na2SiO3(kg/m3)(2 part)",
    "Copper_Slag (kg/m3)",
    "Total_Coarse_Aggregate (kg/m3)",
    "RCA(Percentage)",
    "RCA(kg/m3)",
    "Natural_Aggregate(kg/m3)",
    "Curing_Method",
    "Curing_Time (Days)",
    "Slump (mm)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    names: &'static [&'static str],
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

impl FeatureSchema {
    pub const fn canonical() -> Self {
        Self {
            names: &FEATURE_NAMES,
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| *candidate == name)
    }

    /// Checks that `names` lists exactly this schema's columns, in order.
    pub fn matches(&self, names: &[String]) -> bool {
        names.len() == self.names.len()
            && names
                .iter()
                .zip(self.names.iter())
                .all(|(given, expected)| given == expected)
    }

    /// Orders the raw `features` value of a request body.
    ///
    /// Absent, null and falsy values (`{}`, `[]`, `""`, `0`, `false`) count as
    /// an empty request. Any other non-object is rejected.
    pub fn order_value(&self, features: Option<&Value>) -> Result<OrderedFeatureVector> {
        match features {
            None => Err(Error::EmptyRequest),
            Some(Value::Object(map)) => self.order(Some(map)),
            Some(value) if is_falsy(value) => Err(Error::EmptyRequest),
            Some(value) => Err(Error::invalid_request(format!(
                "'features' must be an object, got {}",
                describe(value)
            ))),
        }
    }

    /// Arranges a caller-supplied feature mapping into schema order.
    ///
    /// Keys outside the schema are ignored. Every canonical key must be present
    /// and hold a JSON number; values are passed through without range checks.
    pub fn order(&self, features: Option<&Map<String, Value>>) -> Result<OrderedFeatureVector> {
        let features = match features {
            Some(features) if !features.is_empty() => features,
            _ => return Err(Error::EmptyRequest),
        };

        let mut missing = Vec::new();
        let mut values = Vec::with_capacity(self.names.len());
        for name in self.names {
            match features.get(*name) {
                None => missing.push(name.to_string()),
                Some(value) => values.push(value),
            }
        }
        if !missing.is_empty() {
            return Err(Error::missing(missing));
        }

        let values = self
            .names
            .iter()
            .zip(values)
            .map(|(name, value)| {
                value.as_f64().ok_or_else(|| Error::InvalidFeature {
                    name: name.to_string(),
                    found: describe(value).to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let ignored = features.len().saturating_sub(self.names.len());
        if ignored > 0 {
            debug!("Ignoring {} non-canonical feature key(s)", ignored);
        }

        Ok(OrderedFeatureVector::new(*self, values))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
