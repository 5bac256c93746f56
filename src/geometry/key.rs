/// Orderable wrapper for search priorities and insertion costs.
///
/// Compares with [`f64::total_cmp`], so `NaN` sorts after every number and
/// equality agrees with the ordering.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct F64Key(pub(crate) f64);

impl F64Key {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for F64Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for F64Key {}

impl Ord for F64Key {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for F64Key {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<f64> for F64Key {
    fn from(value: f64) -> Self {
        Self(value)
    }
}
