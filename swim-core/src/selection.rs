//! Region/status checkbox selection.
//!
//! Both sets start empty, which the filter reads as "show all". The "All"
//! checkbox is never stored: it renders as checked when a set holds every
//! member of its enumeration.

use crate::site::{Region, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Checkbox name used by both "select all" boxes.
pub const ALL_NAME: &str = "all";

/// One checkbox in a group: either the "All" box or a single value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Toggle<T> {
    All,
    One(T),
}

impl<T: FromStr<Err = anyhow::Error>> FromStr for Toggle<T> {
    type Err = anyhow::Error;

    /// Parse a checkbox `name` attribute ("all", "LA", "safe", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_NAME {
            Ok(Toggle::All)
        } else {
            s.parse::<T>().map(Toggle::One)
        }
    }
}

/// The complete `{ region, status }` selection emitted on every toggle.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(rename = "region")]
    pub regions: BTreeSet<Region>,
    #[serde(rename = "status")]
    pub statuses: BTreeSet<Status>,
}

impl FilterSelection {
    pub fn toggle_region(&self, toggle: Toggle<Region>, checked: bool) -> FilterSelection {
        FilterSelection {
            regions: toggled(&self.regions, &Region::ALL, toggle, checked),
            statuses: self.statuses.clone(),
        }
    }

    pub fn toggle_status(&self, toggle: Toggle<Status>, checked: bool) -> FilterSelection {
        FilterSelection {
            regions: self.regions.clone(),
            statuses: toggled(&self.statuses, &Status::ALL, toggle, checked),
        }
    }

    pub fn is_region_checked(&self, region: Region) -> bool {
        self.regions.contains(&region)
    }

    pub fn is_status_checked(&self, status: Status) -> bool {
        self.statuses.contains(&status)
    }

    pub fn all_regions_checked(&self) -> bool {
        self.regions.len() == Region::ALL.len()
    }

    pub fn all_statuses_checked(&self) -> bool {
        self.statuses.len() == Status::ALL.len()
    }
}

fn toggled<T: Ord + Copy>(
    current: &BTreeSet<T>,
    every: &[T],
    toggle: Toggle<T>,
    checked: bool,
) -> BTreeSet<T> {
    match (toggle, checked) {
        (Toggle::All, true) => every.iter().copied().collect(),
        (Toggle::All, false) => BTreeSet::new(),
        (Toggle::One(value), true) => {
            let mut next = current.clone();
            next.insert(value);
            next
        }
        (Toggle::One(value), false) => {
            let mut next = current.clone();
            next.remove(&value);
            next
        }
    }
}

/// Owns the current selection and hands every new one to `notify`.
///
/// Each toggle replaces the selection and notifies synchronously with the
/// full `{ region, status }` pair. There is no batching. The controls are the
/// only writer of the selection; any copy the listener keeps is a mirror that
/// is refreshed on every toggle.
pub struct FilterControls<N> {
    selection: FilterSelection,
    notify: N,
}

impl<N: FnMut(&FilterSelection)> FilterControls<N> {
    pub fn new(notify: N) -> Self {
        Self {
            selection: FilterSelection::default(),
            notify,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn toggle_region(&mut self, toggle: Toggle<Region>, checked: bool) {
        self.selection = self.selection.toggle_region(toggle, checked);
        (self.notify)(&self.selection);
    }

    pub fn toggle_status(&mut self, toggle: Toggle<Status>, checked: bool) {
        self.selection = self.selection.toggle_status(toggle, checked);
        (self.notify)(&self.selection);
    }
}
