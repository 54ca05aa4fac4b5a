/// Largest allowed distance between the bounds of a [`Range`]
pub const MAX_SPAN: i64 = 10_000_000;

/// Inclusive bounds for a random draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub low: i64,
    pub high: i64,
}

impl Range {
    /// Build a range, swapping reversed bounds and clamping the span to [`MAX_SPAN`].
    pub fn new(low: i64, high: i64) -> Self {
        let (low, high) = if low > high { (high, low) } else { (low, high) };

        // abs_diff keeps extreme i64 bounds from overflowing
        let high = if high.abs_diff(low) > MAX_SPAN as u64 {
            low + MAX_SPAN
        } else {
            high
        };

        Self { low, high }
    }

    pub fn span(&self) -> u64 {
        self.high.abs_diff(self.low)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { low: 1, high: 100 }
    }
}

/// Candidate strings for `/choice`, guaranteed to hold at least two entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    items: Vec<String>,
}

impl ChoiceSet {
    pub const MIN_ITEMS: usize = 2;

    /// Returns the items back when there are too few of them.
    pub fn new(items: Vec<String>) -> Result<Self, Vec<String>> {
        if items.len() < Self::MIN_ITEMS {
            return Err(items);
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_swaps_reversed_bounds() {
        assert_eq!(Range::new(100, 1), Range { low: 1, high: 100 });
    }

    #[test]
    fn test_range_clamps_span() {
        let range = Range::new(1, 50_000_000);
        assert_eq!(range.low, 1);
        assert_eq!(range.high, 1 + MAX_SPAN);
        assert_eq!(range.span(), MAX_SPAN as u64);
    }

    #[test]
    fn test_range_extreme_bounds_do_not_overflow() {
        let range = Range::new(i64::MAX, i64::MIN);
        assert_eq!(range.low, i64::MIN);
        assert_eq!(range.high, i64::MIN + MAX_SPAN);
    }

    #[test]
    fn test_single_point_range() {
        let range = Range::new(7, 7);
        assert_eq!(range.span(), 0);
    }

    #[test]
    fn test_choice_set_needs_two_items() {
        assert!(ChoiceSet::new(vec![]).is_err());
        assert_eq!(
            ChoiceSet::new(vec!["one".to_string()]),
            Err(vec!["one".to_string()])
        );
        let set = ChoiceSet::new(vec!["a".to_string(), "a".to_string()]).unwrap();
        assert_eq!(set.len(), 2);
    }
}
