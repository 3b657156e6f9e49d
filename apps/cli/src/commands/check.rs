//! # Check Command
//!
//! `pcbuild check --cpu 1 --motherboard 3 --ram 4 --psu 5 [--gpu 6] [--json]`
//!
//! Selects each given id into its slot, then evaluates the build.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ids ──► PcBuilder::select_slot ──► evaluate_compatibility              │
//! │              │ unknown id / wrong type          │                        │
//! │              ▼                                  ▼                        │
//! │          AppError (exit 1)          compatible   ──► exit 0              │
//! │                                     incompatible ──► exit 2              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Slots left out stay empty, so a partial build reports the missing
//! mandatory components instead of failing.

use std::io::Write;

use pcbuild_core::{Money, SelectionSnapshot, Verdict, Watts};
use serde::Serialize;

use crate::cli::CheckArgs;
use crate::error::AppResult;
use crate::render;
use crate::{App, Outcome};

/// JSON document printed by `check --json`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub selection: SelectionSnapshot,
    pub verdict: Verdict,
    pub total_price: Money,
    pub total_power_draw: Watts,
}

pub fn run(app: &App, args: &CheckArgs, out: &mut impl Write) -> AppResult<Outcome> {
    let mut builder = app.builder();
    for (slot, id) in args.slots() {
        builder.select_slot(slot, id)?;
    }

    let verdict = builder.evaluate_compatibility();
    let outcome = if verdict.is_compatible() {
        Outcome::Success
    } else {
        Outcome::Incompatible
    };

    if args.json {
        let report = CheckReport {
            selection: builder.snapshot_selection(),
            total_price: builder.selection().total_price(),
            total_power_draw: builder.selection().total_power_draw(),
            verdict,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for line in render::selection_lines(&builder.snapshot_selection()) {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{}", render::verdict_line(&verdict))?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::seeded_app;
    use pcbuild_core::CoreError;

    fn args(cpu: i64, motherboard: i64, ram: i64, psu: i64) -> CheckArgs {
        CheckArgs {
            cpu: Some(cpu),
            gpu: None,
            ram: Some(ram),
            motherboard: Some(motherboard),
            psu: Some(psu),
            json: false,
        }
    }

    fn check(args: &CheckArgs) -> (AppResult<Outcome>, String) {
        let app = seeded_app();
        let mut out = Vec::new();
        let result = run(&app, args, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_compatible_build() {
        let (result, text) = check(&CheckArgs {
            gpu: Some(6),
            ..args(1, 3, 4, 5)
        });

        assert_eq!(result.unwrap(), Outcome::Success);
        assert!(text.contains("  GPU: RTX 3060 (NVIDIA) $329.00"));
        assert!(text.contains("  Total: $667.98, power draw 245W"));
        assert!(text.ends_with("Compatibility: OK\n"));
    }

    #[test]
    fn test_socket_mismatch() {
        let (result, text) = check(&args(2, 3, 4, 5));

        assert_eq!(result.unwrap(), Outcome::Incompatible);
        assert!(text.contains("Compatibility: FAILED - CPU is not compatible with the motherboard: CPU socket LGA1700"));
    }

    #[test]
    fn test_missing_slots_are_incompatible() {
        let (result, text) = check(&CheckArgs {
            cpu: Some(1),
            gpu: None,
            ram: None,
            motherboard: None,
            psu: None,
            json: false,
        });

        assert_eq!(result.unwrap(), Outcome::Incompatible);
        assert!(text.contains("missing: RAM, Motherboard, PSU"), "{text}");
    }

    #[test]
    fn test_unknown_id_is_error() {
        let (result, text) = check(&args(9999, 3, 4, 5));

        assert!(matches!(
            result.unwrap_err(),
            AppError::Core(CoreError::ComponentNotFound(9999))
        ));
        assert!(text.is_empty());
    }

    #[test]
    fn test_json_report() {
        let (result, text) = check(&CheckArgs {
            json: true,
            ..args(1, 3, 4, 5)
        });

        assert_eq!(result.unwrap(), Outcome::Success);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["verdict"]["compatible"], true);
        assert_eq!(value["selection"]["cpu"]["name"], "Ryzen 5 5600X");
        assert!(value["selection"]["gpu"].is_null());
        assert_eq!(value["total_power_draw"], 75.0);
    }
}
