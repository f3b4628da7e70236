use super::FeatureSchema;

/// One request's features laid out in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedFeatureVector {
    schema: FeatureSchema,
    values: Vec<f64>,
}

impl OrderedFeatureVector {
    pub(crate) fn new(schema: FeatureSchema, values: Vec<f64>) -> Self {
        Self { schema, values }
    }

    /// Builds a row directly from values already in canonical order.
    ///
    /// Returns `None` when the number of values does not match the schema.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        let schema = FeatureSchema::canonical();
        (values.len() == schema.len()).then(|| Self::new(schema, values))
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.schema.names()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema
            .position(column)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// Column label paired with its value, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.columns().iter().copied().zip(self.values.iter().copied())
    }
}
