//! # Selection Store
//!
//! Holds the user's current choice for each of the five categories.
//!
//! ## Slot Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Operations                                 │
//! │                                                                         │
//! │  select(cpu, Cpu(5600X))  ──► cpu slot = 5600X   (overwrites, never    │
//! │  select(cpu, Cpu(12400F)) ──► cpu slot = 12400F   merges)              │
//! │  select(gpu, Cpu(..))     ──► TypeMismatch, gpu slot unchanged          │
//! │  clear(cpu)               ──► cpu slot empty                            │
//! │  all()                    ──► { cpu: .., gpu: .., ram: .., ... }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each slot is typed (`Option<Cpu>`, `Option<Gpu>`, ...), so a slot can
//! only ever hold a fully-formed component of its own kind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Component, Cpu, Gpu, Motherboard, Psu, Ram, Watts};

/// Category → optional component, with all five keys present.
pub type SelectionSnapshot = BTreeMap<Category, Option<Component>>;

/// The Selection Store.
///
/// ## Invariants
/// - At most one component per category
/// - A slot holds either nothing or a component of the matching category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    cpu: Option<Cpu>,
    gpu: Option<Gpu>,
    ram: Option<Ram>,
    motherboard: Option<Motherboard>,
    psu: Option<Psu>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `component` in `slot`, replacing whatever was there.
    ///
    /// ## Errors
    /// `TypeMismatch` when the component belongs to another slot. The
    /// selection is left unchanged in that case.
    pub fn select(&mut self, slot: Category, component: Component) -> CoreResult<()> {
        match (slot, component) {
            (Category::Cpu, Component::Cpu(cpu)) => self.cpu = Some(cpu),
            (Category::Gpu, Component::Gpu(gpu)) => self.gpu = Some(gpu),
            (Category::Ram, Component::Ram(ram)) => self.ram = Some(ram),
            (Category::Motherboard, Component::Motherboard(mb)) => self.motherboard = Some(mb),
            (Category::Psu, Component::Psu(psu)) => self.psu = Some(psu),
            (expected, other) => {
                return Err(CoreError::TypeMismatch {
                    id: other.id(),
                    expected,
                    actual: other.category(),
                })
            }
        }
        Ok(())
    }

    /// Returns a copy of the component in `slot`, if any.
    pub fn get(&self, slot: Category) -> Option<Component> {
        match slot {
            Category::Cpu => self.cpu.clone().map(Component::Cpu),
            Category::Gpu => self.gpu.clone().map(Component::Gpu),
            Category::Ram => self.ram.clone().map(Component::Ram),
            Category::Motherboard => self.motherboard.clone().map(Component::Motherboard),
            Category::Psu => self.psu.clone().map(Component::Psu),
        }
    }

    /// Snapshot of every slot, for display.
    pub fn all(&self) -> SelectionSnapshot {
        Category::ALL
            .into_iter()
            .map(|slot| (slot, self.get(slot)))
            .collect()
    }

    /// Empties one slot and returns what it held.
    pub fn clear(&mut self, slot: Category) -> Option<Component> {
        match slot {
            Category::Cpu => self.cpu.take().map(Component::Cpu),
            Category::Gpu => self.gpu.take().map(Component::Gpu),
            Category::Ram => self.ram.take().map(Component::Ram),
            Category::Motherboard => self.motherboard.take().map(Component::Motherboard),
            Category::Psu => self.psu.take().map(Component::Psu),
        }
    }

    /// Empties every slot.
    pub fn reset(&mut self) {
        *self = Selection::default();
    }

    pub fn cpu(&self) -> Option<&Cpu> {
        self.cpu.as_ref()
    }

    pub fn gpu(&self) -> Option<&Gpu> {
        self.gpu.as_ref()
    }

    pub fn ram(&self) -> Option<&Ram> {
        self.ram.as_ref()
    }

    pub fn motherboard(&self) -> Option<&Motherboard> {
        self.motherboard.as_ref()
    }

    pub fn psu(&self) -> Option<&Psu> {
        self.psu.as_ref()
    }

    /// Whether `slot` currently holds a component.
    pub fn is_selected(&self, slot: Category) -> bool {
        match slot {
            Category::Cpu => self.cpu.is_some(),
            Category::Gpu => self.gpu.is_some(),
            Category::Ram => self.ram.is_some(),
            Category::Motherboard => self.motherboard.is_some(),
            Category::Psu => self.psu.is_some(),
        }
    }

    /// Returns the mandatory slots that are still empty, in display order.
    pub fn missing_mandatory(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|slot| slot.is_mandatory() && !self.is_selected(*slot))
            .collect()
    }

    /// Number of populated slots.
    pub fn selected_count(&self) -> usize {
        Category::ALL
            .into_iter()
            .filter(|slot| self.is_selected(*slot))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// Sum of the prices of every populated slot.
    pub fn total_price(&self) -> Money {
        self.all().values().flatten().map(Component::price).sum()
    }

    /// Sum of the draw of every populated slot; missing values count as 0.
    pub fn total_power_draw(&self) -> Watts {
        self.all()
            .values()
            .flatten()
            .map(|c| c.power_draw().unwrap_or_default())
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentRecord;

    fn component(record: ComponentRecord) -> Component {
        Component::from_record(&record).unwrap()
    }

    fn cpu(id: i64, socket: &str) -> Component {
        component(
            ComponentRecord::new(id, "cpu", format!("CPU {}", id))
                .with_socket(socket)
                .with_power(65)
                .with_price_cents(20000),
        )
    }

    fn gpu(id: i64) -> Component {
        component(
            ComponentRecord::new(id, "gpu", format!("GPU {}", id))
                .with_power(170)
                .with_price_cents(33000),
        )
    }

    #[test]
    fn test_new_selection_is_empty() {
        let selection = Selection::new();

        assert!(selection.is_empty());
        let snapshot = selection.all();
        assert_eq!(snapshot.len(), 5);
        assert!(snapshot.values().all(Option::is_none));
        assert_eq!(
            snapshot.keys().copied().collect::<Vec<_>>(),
            Category::ALL.to_vec()
        );
    }

    #[test]
    fn test_select_and_get() {
        let mut selection = Selection::new();
        let chosen = cpu(1, "AM4");

        selection.select(Category::Cpu, chosen.clone()).unwrap();

        assert_eq!(selection.get(Category::Cpu), Some(chosen.clone()));
        assert_eq!(selection.all()[&Category::Cpu], Some(chosen));
        assert_eq!(selection.get(Category::Gpu), None);
        assert_eq!(selection.selected_count(), 1);
    }

    #[test]
    fn test_select_replaces_previous_value() {
        let mut selection = Selection::new();

        selection.select(Category::Cpu, cpu(1, "AM4")).unwrap();
        selection.select(Category::Cpu, cpu(2, "LGA1700")).unwrap();

        let stored = selection.cpu().unwrap();
        assert_eq!(stored.info.id, 2);
        assert_eq!(stored.socket, "LGA1700");
        assert_eq!(selection.selected_count(), 1);
    }

    #[test]
    fn test_type_mismatch_leaves_slot_unchanged() {
        let mut selection = Selection::new();
        selection.select(Category::Gpu, gpu(10)).unwrap();

        let err = selection.select(Category::Gpu, cpu(1, "AM4")).unwrap_err();

        assert!(matches!(
            err,
            CoreError::TypeMismatch {
                id: 1,
                expected: Category::Gpu,
                actual: Category::Cpu
            }
        ));
        assert_eq!(selection.gpu().unwrap().info.id, 10);
        assert!(selection.cpu().is_none());
    }

    #[test]
    fn test_clear_and_reset() {
        let mut selection = Selection::new();
        selection.select(Category::Cpu, cpu(1, "AM4")).unwrap();
        selection.select(Category::Gpu, gpu(2)).unwrap();

        let removed = selection.clear(Category::Gpu);
        assert_eq!(removed.map(|c| c.id()), Some(2));
        assert!(!selection.is_selected(Category::Gpu));
        assert!(selection.clear(Category::Gpu).is_none());

        selection.reset();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_missing_mandatory() {
        let mut selection = Selection::new();
        selection.select(Category::Gpu, gpu(2)).unwrap();
        selection.select(Category::Cpu, cpu(1, "AM4")).unwrap();

        assert_eq!(
            selection.missing_mandatory(),
            vec![Category::Ram, Category::Motherboard, Category::Psu]
        );
    }

    #[test]
    fn test_totals() {
        let mut selection = Selection::new();
        selection.select(Category::Cpu, cpu(1, "AM4")).unwrap();
        selection.select(Category::Gpu, gpu(2)).unwrap();

        assert_eq!(selection.total_price(), Money::from_cents(53000));
        assert_eq!(selection.total_power_draw(), Watts::new(235));
    }
}
