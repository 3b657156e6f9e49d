//! # Compatibility Evaluator
//!
//! Decides whether the selected components can operate together.
//!
//! ## Evaluation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    evaluate(&selection)                                 │
//! │                                                                         │
//! │  0. Mandatory slots: cpu, motherboard, ram, psu                        │
//! │       │  any empty? ──► MissingMandatoryComponent (stop)               │
//! │       ▼                                                                 │
//! │  1. CPU.socket == Motherboard.socket                                   │
//! │       │  no? ──► SocketMismatch (stop)                                 │
//! │       ▼                                                                 │
//! │  2. RAM.memory_type == Motherboard.memory_type                         │
//! │       │  no? ──► MemoryTypeMismatch (stop)                             │
//! │       ▼                                                                 │
//! │  3. draw(CPU + Motherboard + RAM [+ GPU]) <= PSU capacity              │
//! │       │  no? ──► InsufficientPower (stop)                              │
//! │       ▼                                                                 │
//! │  Compatible                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing rule wins and later rules never run. Comparisons are
//! exact: `"DDR4"` and `"ddr4"` do not match. A missing draw counts as 0.
//! Only the four listed components are summed; there is no allowance for
//! other peripherals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::observer::{BuildObserver, NoopObserver};
use crate::selection::Selection;
use crate::types::{Category, Cpu, Motherboard, Psu, Ram, Watts};

// =============================================================================
// Verdict
// =============================================================================

/// Which rule decided the verdict, with the values that were compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerdictKind {
    /// Every rule passed.
    Compatible,

    /// At least one mandatory slot is empty; no rule ran.
    MissingMandatoryComponent { missing: Vec<Category> },

    SocketMismatch {
        cpu_socket: String,
        motherboard_socket: String,
    },

    MemoryTypeMismatch {
        ram_memory_type: String,
        motherboard_memory_type: String,
    },

    InsufficientPower { required: Watts, available: Watts },
}

impl VerdictKind {
    /// Human-readable explanation of this outcome.
    pub fn reason(&self) -> String {
        match self {
            VerdictKind::Compatible => "Components are compatible".to_string(),
            VerdictKind::MissingMandatoryComponent { missing } => {
                let labels: Vec<&str> = missing.iter().map(Category::label).collect();
                format!(
                    "Not all mandatory components are selected (CPU, Motherboard, RAM, PSU); missing: {}",
                    labels.join(", ")
                )
            }
            VerdictKind::SocketMismatch {
                cpu_socket,
                motherboard_socket,
            } => format!(
                "CPU is not compatible with the motherboard: CPU socket {} does not match motherboard socket {}",
                cpu_socket, motherboard_socket
            ),
            VerdictKind::MemoryTypeMismatch {
                ram_memory_type,
                motherboard_memory_type,
            } => format!(
                "RAM is not compatible with the motherboard: {} memory on a {} board",
                ram_memory_type, motherboard_memory_type
            ),
            VerdictKind::InsufficientPower {
                required,
                available,
            } => format!(
                "Power supply is insufficient: components draw {}, PSU provides {}",
                required, available
            ),
        }
    }
}

/// Immutable result of one evaluation.
///
/// Serialize-only: a verdict is rebuilt from its [`VerdictKind`], never
/// from free-standing `compatible`/`reason` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    compatible: bool,
    reason: String,
    #[serde(flatten)]
    kind: VerdictKind,
}

impl Verdict {
    pub fn is_compatible(&self) -> bool {
        self.compatible
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn kind(&self) -> &VerdictKind {
        &self.kind
    }
}

impl From<VerdictKind> for Verdict {
    fn from(kind: VerdictKind) -> Self {
        Verdict {
            compatible: matches!(kind, VerdictKind::Compatible),
            reason: kind.reason(),
            kind,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

// =============================================================================
// Individual Checks
// =============================================================================

/// Result of a single rule, reported to the observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Socket {
        cpu: String,
        motherboard: String,
        compatible: bool,
    },
    MemoryType {
        ram: String,
        motherboard: String,
        compatible: bool,
    },
    Power {
        total: Watts,
        capacity: Watts,
        sufficient: bool,
    },
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        match self {
            CheckOutcome::Socket { compatible, .. } => *compatible,
            CheckOutcome::MemoryType { compatible, .. } => *compatible,
            CheckOutcome::Power { sufficient, .. } => *sufficient,
        }
    }
}

/// CPU and motherboard share the same socket (exact match).
pub fn is_cpu_compatible(cpu: &Cpu, motherboard: &Motherboard) -> bool {
    cpu.socket == motherboard.socket
}

/// RAM and motherboard use the same memory standard (exact match).
pub fn is_ram_compatible(ram: &Ram, motherboard: &Motherboard) -> bool {
    ram.memory_type == motherboard.memory_type
}

/// Sums component draws, treating a missing value as 0.
///
/// ## Example
/// ```rust
/// use pcbuild_core::compatibility::total_power_draw;
/// use pcbuild_core::Watts;
///
/// let total = total_power_draw([Some(Watts::new(65)), None, Some(Watts::new(10))]);
/// assert_eq!(total, Watts::new(75));
/// ```
pub fn total_power_draw(draws: impl IntoIterator<Item = Option<Watts>>) -> Watts {
    draws.into_iter().map(Option::unwrap_or_default).sum()
}

/// The PSU is sufficient when the total draw does not exceed its capacity.
pub fn check_power_supply(total: Watts, psu: &Psu) -> bool {
    total <= psu.capacity
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluates a selection without reporting to any observer.
pub fn evaluate(selection: &Selection) -> Verdict {
    evaluate_with(selection, &NoopObserver)
}

/// Evaluates a selection, reporting each rule and the final verdict.
///
/// Pure with respect to `selection`: identical contents always produce an
/// identical verdict.
pub fn evaluate_with(selection: &Selection, observer: &dyn BuildObserver) -> Verdict {
    let verdict = run_rules(selection, observer);
    observer.evaluated(&verdict);
    verdict
}

fn run_rules(selection: &Selection, observer: &dyn BuildObserver) -> Verdict {
    let (cpu, motherboard, ram, psu) = match (
        selection.cpu(),
        selection.motherboard(),
        selection.ram(),
        selection.psu(),
    ) {
        (Some(cpu), Some(mb), Some(ram), Some(psu)) => (cpu, mb, ram, psu),
        _ => {
            return VerdictKind::MissingMandatoryComponent {
                missing: selection.missing_mandatory(),
            }
            .into()
        }
    };

    // 1. Socket
    let socket_ok = is_cpu_compatible(cpu, motherboard);
    observer.check_performed(&CheckOutcome::Socket {
        cpu: cpu.socket.clone(),
        motherboard: motherboard.socket.clone(),
        compatible: socket_ok,
    });
    if !socket_ok {
        return VerdictKind::SocketMismatch {
            cpu_socket: cpu.socket.clone(),
            motherboard_socket: motherboard.socket.clone(),
        }
        .into();
    }

    // 2. Memory type
    let memory_ok = is_ram_compatible(ram, motherboard);
    observer.check_performed(&CheckOutcome::MemoryType {
        ram: ram.memory_type.clone(),
        motherboard: motherboard.memory_type.clone(),
        compatible: memory_ok,
    });
    if !memory_ok {
        return VerdictKind::MemoryTypeMismatch {
            ram_memory_type: ram.memory_type.clone(),
            motherboard_memory_type: motherboard.memory_type.clone(),
        }
        .into();
    }

    // 3. Power
    let total = total_power_draw([
        cpu.power,
        motherboard.power,
        ram.power,
        selection.gpu().and_then(|gpu| gpu.power),
    ]);
    let power_ok = check_power_supply(total, psu);
    observer.check_performed(&CheckOutcome::Power {
        total,
        capacity: psu.capacity,
        sufficient: power_ok,
    });
    if !power_ok {
        return VerdictKind::InsufficientPower {
            required: total,
            available: psu.capacity,
        }
        .into();
    }

    VerdictKind::Compatible.into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Component, ComponentRecord};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        checks: RefCell<Vec<CheckOutcome>>,
        verdicts: RefCell<Vec<Verdict>>,
    }

    impl BuildObserver for Recorder {
        fn check_performed(&self, outcome: &CheckOutcome) {
            self.checks.borrow_mut().push(outcome.clone());
        }

        fn evaluated(&self, verdict: &Verdict) {
            self.verdicts.borrow_mut().push(verdict.clone());
        }
    }

    fn select(selection: &mut Selection, record: ComponentRecord) {
        let component = Component::from_record(&record).unwrap();
        selection.select(component.category(), component).unwrap();
    }

    fn cpu(socket: &str, power: Option<u32>) -> ComponentRecord {
        let record = ComponentRecord::new(1, "cpu", "Test CPU").with_socket(socket);
        match power {
            Some(w) => record.with_power(w),
            None => record,
        }
    }

    fn motherboard(socket: &str, memory: &str, power: u32) -> ComponentRecord {
        ComponentRecord::new(2, "motherboard", "Test Board")
            .with_socket(socket)
            .with_memory_type(memory)
            .with_power(power)
    }

    fn ram(memory: &str, power: u32) -> ComponentRecord {
        ComponentRecord::new(3, "ram", "Test RAM")
            .with_memory_type(memory)
            .with_power(power)
    }

    fn gpu(power: u32) -> ComponentRecord {
        ComponentRecord::new(4, "gpu", "Test GPU").with_power(power)
    }

    fn psu(capacity: u32) -> ComponentRecord {
        ComponentRecord::new(5, "psu", "Test PSU").with_power(capacity)
    }

    /// AM4 / DDR4 build: CPU=65, MB=0, RAM=10, no GPU, PSU=500.
    fn baseline() -> Selection {
        let mut selection = Selection::new();
        select(&mut selection, cpu("AM4", Some(65)));
        select(&mut selection, motherboard("AM4", "DDR4", 0));
        select(&mut selection, ram("DDR4", 10));
        select(&mut selection, psu(500));
        selection
    }

    /// CPU=150, MB=50, RAM=20, PSU=400.
    fn heavy_build() -> Selection {
        let mut selection = Selection::new();
        select(&mut selection, cpu("AM5", Some(150)));
        select(&mut selection, motherboard("AM5", "DDR5", 50));
        select(&mut selection, ram("DDR5", 20));
        select(&mut selection, psu(400));
        selection
    }

    #[test]
    fn test_compatible_build() {
        let verdict = evaluate(&baseline());

        assert!(verdict.is_compatible());
        assert_eq!(verdict.kind(), &VerdictKind::Compatible);
        assert_eq!(verdict.reason(), "Components are compatible");
    }

    #[test]
    fn test_socket_mismatch_stops_evaluation() {
        let mut selection = baseline();
        select(&mut selection, cpu("LGA1700", Some(65)));
        let recorder = Recorder::default();

        let verdict = evaluate_with(&selection, &recorder);

        assert!(!verdict.is_compatible());
        assert_eq!(
            verdict.kind(),
            &VerdictKind::SocketMismatch {
                cpu_socket: "LGA1700".to_string(),
                motherboard_socket: "AM4".to_string(),
            }
        );
        // Only the socket rule ran
        let checks = recorder.checks.borrow();
        assert_eq!(checks.len(), 1);
        assert!(matches!(checks[0], CheckOutcome::Socket { compatible: false, .. }));
        assert_eq!(recorder.verdicts.borrow().as_slice(), &[verdict]);
    }

    #[test]
    fn test_memory_type_is_case_sensitive() {
        let mut selection = baseline();
        select(&mut selection, ram("ddr4", 10));

        let verdict = evaluate(&selection);

        assert!(matches!(
            verdict.kind(),
            VerdictKind::MemoryTypeMismatch { ram_memory_type, motherboard_memory_type }
                if ram_memory_type == "ddr4" && motherboard_memory_type == "DDR4"
        ));
    }

    #[test]
    fn test_socket_checked_before_memory() {
        let mut selection = baseline();
        select(&mut selection, cpu("AM5", Some(65)));
        select(&mut selection, ram("DDR5", 10));

        assert!(matches!(
            evaluate(&selection).kind(),
            VerdictKind::SocketMismatch { .. }
        ));
    }

    #[test]
    fn test_insufficient_power_with_gpu() {
        let mut selection = heavy_build();
        select(&mut selection, gpu(300));

        let verdict = evaluate(&selection);

        assert_eq!(
            verdict.kind(),
            &VerdictKind::InsufficientPower {
                required: Watts::new(520),
                available: Watts::new(400),
            }
        );
        assert_eq!(
            verdict.reason(),
            "Power supply is insufficient: components draw 520W, PSU provides 400W"
        );
    }

    #[test]
    fn test_fractional_draw_is_not_rounded_away() {
        let mut selection = Selection::new();
        select(&mut selection, cpu("AM4", None).with_power_mw(100_400));
        select(
            &mut selection,
            ComponentRecord::new(2, "motherboard", "Test Board")
                .with_socket("AM4")
                .with_memory_type("DDR4")
                .with_power_mw(100_400),
        );
        select(&mut selection, ram("DDR4", 0));
        select(
            &mut selection,
            ComponentRecord::new(5, "psu", "Test PSU").with_power_mw(200_500),
        );

        let verdict = evaluate(&selection);

        assert_eq!(
            verdict.kind(),
            &VerdictKind::InsufficientPower {
                required: Watts::from_milliwatts(200_800),
                available: Watts::from_milliwatts(200_500),
            }
        );
        assert_eq!(
            verdict.reason(),
            "Power supply is insufficient: components draw 200.8W, PSU provides 200.5W"
        );
    }

    #[test]
    fn test_sufficient_power_without_gpu() {
        assert!(evaluate(&heavy_build()).is_compatible());
    }

    #[test]
    fn test_power_boundary_is_inclusive() {
        let mut selection = heavy_build();
        select(&mut selection, psu(220));
        assert!(evaluate(&selection).is_compatible());

        select(&mut selection, psu(219));
        assert!(!evaluate(&selection).is_compatible());
    }

    #[test]
    fn test_missing_power_counts_as_zero() {
        let mut selection = baseline();
        select(&mut selection, cpu("AM4", None));
        select(&mut selection, psu(10));

        // MB=0 + RAM=10 + CPU=none
        assert!(evaluate(&selection).is_compatible());
    }

    #[test]
    fn test_missing_mandatory_component() {
        for slot in Category::MANDATORY {
            let mut selection = baseline();
            select(&mut selection, gpu(100));
            selection.clear(slot);
            let recorder = Recorder::default();

            let verdict = evaluate_with(&selection, &recorder);

            assert_eq!(
                verdict.kind(),
                &VerdictKind::MissingMandatoryComponent {
                    missing: vec![slot]
                }
            );
            assert!(recorder.checks.borrow().is_empty());
        }
    }

    #[test]
    fn test_missing_slot_wins_over_other_failures() {
        let mut selection = Selection::new();
        select(&mut selection, cpu("LGA1700", Some(150)));
        select(&mut selection, motherboard("AM4", "DDR4", 50));
        select(&mut selection, gpu(300));
        select(&mut selection, psu(100));
        let recorder = Recorder::default();

        let verdict = evaluate_with(&selection, &recorder);

        assert_eq!(
            verdict.kind(),
            &VerdictKind::MissingMandatoryComponent {
                missing: vec![Category::Ram]
            }
        );
        assert!(recorder.checks.borrow().is_empty());
        assert_eq!(recorder.verdicts.borrow().as_slice(), &[verdict]);
    }

    #[test]
    fn test_missing_mandatory_lists_every_slot() {
        let mut selection = Selection::new();
        select(&mut selection, gpu(100));

        let verdict = evaluate(&selection);

        assert_eq!(
            verdict.kind(),
            &VerdictKind::MissingMandatoryComponent {
                missing: vec![
                    Category::Cpu,
                    Category::Ram,
                    Category::Motherboard,
                    Category::Psu
                ]
            }
        );
        assert!(verdict.reason().ends_with("missing: CPU, RAM, Motherboard, PSU"));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let selection = heavy_build();
        assert_eq!(evaluate(&selection), evaluate(&selection.clone()));
    }

    #[test]
    fn test_verdict_serializes_flat() {
        let json = serde_json::to_value(evaluate(&heavy_build())).unwrap();

        assert_eq!(json["compatible"], true);
        assert_eq!(json["kind"], "compatible");
        assert_eq!(json["reason"], "Components are compatible");
    }

    #[test]
    fn test_verdict_rebuilds_from_kind_only() {
        let mut selection = heavy_build();
        select(&mut selection, gpu(300));
        let verdict = evaluate(&selection);
        let mut json = serde_json::to_value(&verdict).unwrap();
        json["compatible"] = serde_json::Value::Bool(true);
        json["reason"] = serde_json::Value::from("tampered");

        let kind: VerdictKind = serde_json::from_value(json).unwrap();
        let rebuilt = Verdict::from(kind);

        assert!(!rebuilt.is_compatible());
        assert_eq!(rebuilt, verdict);
    }
}
