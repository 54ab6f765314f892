//! The bar model every algorithm body mutates.

/// One slot in the element sequence being sorted.
///
/// `value` is both the sort key and the rendered magnitude. `comparing` is transient and must be
/// false at rest. `sorted` is monotonic within one run: once set it stays set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisualElement {
    pub value: u32,
    pub comparing: bool,
    pub sorted: bool,
}

impl VisualElement {
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            comparing: false,
            sorted: false,
        }
    }

    /// Same value, all flags cleared.
    pub const fn at_rest(&self) -> Self {
        Self::new(self.value)
    }
}

impl From<u32> for VisualElement {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Builds a fresh sequence with all flags cleared.
pub fn from_values(values: &[u32]) -> Vec<VisualElement> {
    values.iter().copied().map(VisualElement::new).collect()
}

pub fn values(v: &[VisualElement]) -> Vec<u32> {
    v.iter().map(|e| e.value).collect()
}

/// Non-decreasing by value.
pub fn is_ordered(v: &[VisualElement]) -> bool {
    v.windows(2).all(|w| w[0].value <= w[1].value)
}

/// The state every successful run must end in.
pub fn is_finished(v: &[VisualElement]) -> bool {
    v.iter().all(|e| e.sorted && !e.comparing)
}

pub fn clear_comparing(v: &mut [VisualElement]) {
    for e in v {
        e.comparing = false;
    }
}

/// The final sweep every body performs before returning.
pub fn mark_all_sorted(v: &mut [VisualElement]) {
    for e in v {
        e.sorted = true;
        e.comparing = false;
    }
}
