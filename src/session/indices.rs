use std::collections::BTreeSet;

/// Checkboxes per row in the index checklist.
pub const CHECKBOXES_PER_ROW: usize = 3;

/// Index names known to the service and the subset the user has ticked.
///
/// Selection is tracked explicitly on toggle rather than re-read from the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSelection {
    available: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl IndexSelection {
    /// Replace the discovered index set. Selections of vanished indices are dropped.
    pub fn set_available(&mut self, names: BTreeSet<String>) {
        self.selected.retain(|name| names.contains(name));
        self.available = names;
    }

    pub fn available(&self) -> &BTreeSet<String> {
        &self.available
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Flip the checkbox for `name`. Unknown names are ignored.
    ///
    /// Returns the new checked state.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.available.contains(name) {
            return false;
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
            return true;
        }
        false
    }

    /// Tick every name in `names` that the service actually offers.
    pub fn preselect<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if self.available.contains(name) {
                self.selected.insert(name.to_string());
            }
        }
    }

    /// Available names grouped into checklist rows.
    pub fn rows(&self) -> Vec<Vec<&str>> {
        let names: Vec<&str> = self.available.iter().map(String::as_str).collect();
        names.chunks(CHECKBOXES_PER_ROW).map(<[&str]>::to_vec).collect()
    }
}
