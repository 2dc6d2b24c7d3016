/// Side-by-side spec comparison
///
/// `differs` and `compare` derive the comparison table from the current
/// selection. `ComparisonView` is the open/closed state machine for the
/// comparison panel, including the focused product used by the narrow
/// single-column layout.

use super::data::{Product, SpecKey};

/// Whether the selected products disagree on `key`.
///
/// "N/A" is compared like any other value, so "N/A" next to a real value
/// differs. Only meaningful for two or more products.
pub fn differs(selection: &[Product], key: SpecKey) -> bool {
    let mut values = selection.iter().map(|p| p.spec(key));
    match values.next() {
        Some(first) => values.any(|value| value != first),
        None => false,
    }
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRow<'a> {
    pub key: SpecKey,
    pub label: &'static str,
    /// One value per selected product, in selection order
    pub values: Vec<&'a str>,
    pub differs: bool,
}

/// Build the comparison table for `keys`. Empty for fewer than two products.
pub fn compare<'a>(selection: &'a [Product], keys: &[SpecKey]) -> Vec<SpecRow<'a>> {
    if selection.len() < 2 {
        return Vec::new();
    }

    keys.iter()
        .map(|&key| SpecRow {
            key,
            label: key.label(),
            values: selection.iter().map(|p| p.spec(key)).collect(),
            differs: differs(selection, key),
        })
        .collect()
}

/// Direction for moving the focused product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Closed,
    Open {
        active_index: usize,
    },
}

/// Open/closed state of the comparison panel.
///
/// Every method takes the current selection size so the active index can
/// be kept in `[0, size - 1]`. The panel never stays open with fewer than
/// two products.
#[derive(Debug, Clone, Default)]
pub struct ComparisonView {
    state: ViewState,
}

impl ComparisonView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewState::Open { .. })
    }

    /// Focused product index, `None` while closed
    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            ViewState::Open { active_index } => Some(active_index),
            ViewState::Closed => None,
        }
    }

    /// Open the panel focused on the first product.
    /// Returns false, leaving the view untouched, when `size < 2`.
    pub fn open(&mut self, size: usize) -> bool {
        if size < 2 {
            return false;
        }
        self.state = ViewState::Open { active_index: 0 };
        true
    }

    pub fn close(&mut self) {
        self.state = ViewState::Closed;
    }

    /// Focus product `index`, clamped into range. Ignored while closed.
    pub fn select(&mut self, index: usize, size: usize) {
        if let ViewState::Open { active_index } = &mut self.state {
            *active_index = clamp_index(index, size);
        }
    }

    /// Move focus one product left or right, stopping at either end
    pub fn step(&mut self, step: Step, size: usize) {
        if let ViewState::Open { active_index } = &mut self.state {
            let target = match step {
                Step::Previous => active_index.saturating_sub(1),
                Step::Next => active_index.saturating_add(1),
            };
            *active_index = clamp_index(target, size);
        }
    }

    /// Reconcile with a changed selection size.
    ///
    /// Closes the panel when fewer than two products remain, otherwise
    /// clamps the active index. Returns true if this forced a close.
    pub fn sync(&mut self, size: usize) -> bool {
        if let ViewState::Open { active_index } = self.state {
            if size < 2 {
                self.state = ViewState::Closed;
                return true;
            }
            self.state = ViewState::Open {
                active_index: clamp_index(active_index, size),
            };
        }
        false
    }

    /// The focused product, if open
    pub fn active_product<'a>(&self, selection: &'a [Product]) -> Option<&'a Product> {
        self.active_index().and_then(|index| selection.get(index))
    }
}

fn clamp_index(index: usize, size: usize) -> usize {
    index.min(size.saturating_sub(1))
}
