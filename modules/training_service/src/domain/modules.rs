//! Module label reconciliation within a section
//!
//! When any module label repeats inside a section, every video of that
//! section is renumbered `Module 01`, `Module 02`, ... in ascending id order.
//! Sections whose labels are already distinct are left untouched.

use crate::contract::{ModuleRename, ModuleSlot};
use std::collections::HashMap;

/// Render the positional module label for a 1-based index
pub fn module_label(index: usize) -> String {
    format!("Module {index:02}")
}

/// Plan the renames for a section.
///
/// `slots` must be ordered ascending by id. Returns `None` when nothing has
/// to change (empty section or no duplicated label). A missing label counts
/// as the empty string.
pub fn plan_renumbering(slots: &[ModuleSlot]) -> Option<Vec<ModuleRename>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for slot in slots {
        *counts.entry(slot.module.as_deref().unwrap_or("")).or_default() += 1;
    }

    if !counts.values().any(|&count| count > 1) {
        return None;
    }

    Some(
        slots
            .iter()
            .enumerate()
            .map(|(position, slot)| ModuleRename {
                id: slot.id,
                module: module_label(position + 1),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(modules: &[Option<&str>]) -> Vec<ModuleSlot> {
        modules
            .iter()
            .enumerate()
            .map(|(i, m)| ModuleSlot {
                id: (i as i32 + 1) * 10,
                module: m.map(str::to_string),
            })
            .collect()
    }

    #[test]
    fn empty_section_needs_nothing() {
        assert_eq!(plan_renumbering(&[]), None);
    }

    #[test]
    fn distinct_labels_are_preserved() {
        assert_eq!(plan_renumbering(&slots(&[Some("Intro"), Some("Advanced")])), None);
    }

    #[test]
    fn duplicates_renumber_every_video_in_id_order() {
        let plan = plan_renumbering(&slots(&[
            Some("Module 01"),
            Some("Module 01"),
            Some("Module 02"),
            Some("Module 01"),
        ]))
        .unwrap_or_default();

        let labels: Vec<(i32, &str)> = plan.iter().map(|r| (r.id, r.module.as_str())).collect();
        assert_eq!(
            labels,
            vec![
                (10, "Module 01"),
                (20, "Module 02"),
                (30, "Module 03"),
                (40, "Module 04"),
            ]
        );
    }

    #[test]
    fn missing_labels_count_as_empty_string() {
        let plan = plan_renumbering(&slots(&[None, Some(""), Some("Intro")]));
        assert_eq!(plan.map(|p| p.len()), Some(3));

        assert_eq!(plan_renumbering(&slots(&[None, Some("Intro")])), None);
    }

    #[test]
    fn label_width_grows_past_ninety_nine() {
        assert_eq!(module_label(7), "Module 07");
        assert_eq!(module_label(123), "Module 123");
    }
}
