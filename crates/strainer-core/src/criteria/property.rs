use crate::criteria::{OperatorHeader, PropertySlot};

///
/// OperatorProperty
///
/// Operator selector of a criteria group. Holds the headers applicable to
/// the group's field and the current selection; a hidden selector yields
/// no operator, so its dependent slots are hidden too.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorProperty {
    applicable: Vec<OperatorHeader>,
    selected: Option<usize>,
    visible: bool,
}

impl OperatorProperty {
    #[must_use]
    pub const fn new(applicable: Vec<OperatorHeader>) -> Self {
        Self {
            applicable,
            selected: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn applicable(&self) -> &[OperatorHeader] {
        &self.applicable
    }

    /// Position of the applicable header answering to `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.applicable
            .iter()
            .position(|h| h.name.eq_ignore_ascii_case(name))
            .or_else(|| self.applicable.iter().position(|h| h.answers_to(name)))
    }

    /// Select by name; `None` clears the selection. Returns `false` and
    /// leaves the selection untouched when `name` is not applicable.
    pub fn select(&mut self, name: Option<&str>) -> bool {
        match name {
            None => {
                self.selected = None;
                true
            }
            Some(name) => match self.position(name) {
                Some(index) => {
                    self.selected = Some(index);
                    true
                }
                None => false,
            },
        }
    }

    pub fn select_first(&mut self) {
        self.selected = (!self.applicable.is_empty()).then_some(0);
    }

    #[must_use]
    pub fn selected(&self) -> Option<&OperatorHeader> {
        self.selected.and_then(|index| self.applicable.get(index))
    }

    /// Selected header, as seen by the rest of the group.
    #[must_use]
    pub fn effective(&self) -> Option<&OperatorHeader> {
        if self.visible { self.selected() } else { None }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Number of value slots the effective operator reads.
    #[must_use]
    pub fn dependent_count(&self) -> u8 {
        self.effective().map_or(0, |h| h.addl_props)
    }

    pub fn sync_dependents<'a>(
        &self,
        value: Option<&'a mut dyn PropertySlot>,
        value2: Option<&'a mut dyn PropertySlot>,
    ) {
        sync_dependent_slots(self.dependent_count(), value, value2);
    }
}

/// Show and require the first `count` dependent slots; hide and clear the
/// rest. Applying the same count twice changes nothing.
pub fn sync_dependent_slots<'a>(
    count: u8,
    value: Option<&'a mut dyn PropertySlot>,
    value2: Option<&'a mut dyn PropertySlot>,
) {
    for (index, slot) in [value, value2].into_iter().enumerate() {
        let Some(slot) = slot else {
            continue;
        };
        let shown = index < usize::from(count);

        if !shown && !slot.is_null() {
            tracing::debug!(slot = index + 1, "clearing hidden dependent value");
            slot.clear();
        }
        slot.set_visible(shown);
        slot.set_required(shown);
    }
}
