/// Ordered tuple of label values identifying one series within a metric.
///
/// Equality is positional; ordering is lexicographic over the values, which
/// is the order series are rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet(Box<[String]>);

impl LabelSet {
    pub fn new(values: &[&str]) -> Self {
        Self(values.iter().map(|v| (*v).to_string()).collect())
    }

    /// The empty label set used by unlabeled metrics.
    pub fn empty() -> Self {
        Self(Box::default())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[&str]> for LabelSet {
    fn from(values: &[&str]) -> Self {
        Self::new(values)
    }
}
