//! Plain-text rendering shared by the menu and the one-shot commands.

use pcbuild_core::{Component, ComponentRecord, SelectionSnapshot, Verdict};
use pcbuild_db::ImportReport;

/// `"{id}. {name} ({manufacturer} {model}) {price}"` for a catalog row.
pub fn record_line(record: &ComponentRecord) -> String {
    format!(
        "{}. {} ({}) {}",
        record.id,
        record.name,
        maker_and_model(&record.manufacturer, &record.model),
        record.price()
    )
}

/// `"{name} ({manufacturer} {model}) {price}"` for a selected component.
pub fn component_line(component: &Component) -> String {
    let info = component.info();
    format!(
        "{} ({}) {}",
        info.name,
        maker_and_model(&info.manufacturer, &info.model),
        info.price
    )
}

fn maker_and_model(manufacturer: &str, model: &str) -> String {
    format!("{manufacturer} {model}").trim().to_string()
}

/// One line per slot in display order, then the totals.
pub fn selection_lines(snapshot: &SelectionSnapshot) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .iter()
        .map(|(slot, component)| match component {
            Some(component) => format!("  {}: {}", slot.label(), component_line(component)),
            None => format!("  {}: -", slot.label()),
        })
        .collect();

    let components = || snapshot.values().flatten();
    let price: pcbuild_core::Money = components().map(Component::price).sum();
    let draw: pcbuild_core::Watts = components()
        .map(|c| c.power_draw().unwrap_or_default())
        .sum();
    lines.push(format!("  Total: {price}, power draw {draw}"));
    lines
}

/// `"Compatibility: OK"` or `"Compatibility: FAILED - {reason}"`.
pub fn verdict_line(verdict: &Verdict) -> String {
    if verdict.is_compatible() {
        "Compatibility: OK".to_string()
    } else {
        format!("Compatibility: FAILED - {}", verdict.reason())
    }
}

/// Summary printed after an import.
pub fn import_summary(report: &ImportReport) -> String {
    let per_category: Vec<String> = report
        .by_category
        .iter()
        .map(|(category, count)| format!("{category}: {count}"))
        .collect();

    if per_category.is_empty() {
        format!("Imported {} components from {}", report.imported, report.source)
    } else {
        format!(
            "Imported {} components from {} ({})",
            report.imported,
            report.source,
            per_category.join(", ")
        )
    }
}
