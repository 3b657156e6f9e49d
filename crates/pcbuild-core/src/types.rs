//! # Domain Types
//!
//! Core domain types used throughout PC Build.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ComponentRecord (untyped catalog row)                                  │
//! │  ─────────────────────────────────────                                  │
//! │  id, type, name, manufacturer, model,                                   │
//! │  socket?, memory_type?, power_mw?, price_cents                          │
//! │          │                                                              │
//! │          │  Component::from_record  (per-category constructors)         │
//! │          ▼                                                              │
//! │  Component (tagged, every variant fully formed)                         │
//! │  ┌────────┐ ┌────────┐ ┌────────┐ ┌─────────────┐ ┌────────┐           │
//! │  │  Cpu   │ │  Gpu   │ │  Ram   │ │ Motherboard │ │  Psu   │           │
//! │  │ socket │ │ power? │ │ memory │ │ socket      │ │capacity│           │
//! │  │ power? │ │        │ │ power? │ │ memory      │ │        │           │
//! │  │        │ │        │ │        │ │ power?      │ │        │           │
//! │  └────────┘ └────────┘ └────────┘ └─────────────┘ └────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog rows carry every optional column for every category. A typed
//! `Component` only keeps the fields its category uses; required fields are
//! checked once, when the record is converted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_component_name, validate_label, validate_power_mw, validate_price_cents,
    validate_required_text,
};

/// Catalog identifier of a component.
pub type ComponentId = i64;

// =============================================================================
// Category
// =============================================================================

/// One of the five fixed component slots.
///
/// Ordering follows declaration order, which is also the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cpu,
    Gpu,
    Ram,
    Motherboard,
    Psu,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Cpu,
        Category::Gpu,
        Category::Ram,
        Category::Motherboard,
        Category::Psu,
    ];

    /// Categories that must be populated before a build can be evaluated,
    /// in display order.
    pub const MANDATORY: [Category; 4] = [
        Category::Cpu,
        Category::Ram,
        Category::Motherboard,
        Category::Psu,
    ];

    /// Returns the catalog key (`"cpu"`, `"motherboard"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Gpu => "gpu",
            Category::Ram => "ram",
            Category::Motherboard => "motherboard",
            Category::Psu => "psu",
        }
    }

    /// Returns the human-readable label (`"CPU"`, `"Motherboard"`, ...).
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Ram => "RAM",
            Category::Motherboard => "Motherboard",
            Category::Psu => "PSU",
        }
    }

    /// Whether the slot must be filled for evaluation to run the rules.
    pub const fn is_mandatory(&self) -> bool {
        !matches!(self, Category::Gpu)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a catalog key. Matching is exact: `"CPU"` is rejected.
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::InvalidCategory(s.to_string()))
    }
}

// =============================================================================
// Watts
// =============================================================================

/// Electrical power, held as whole milliwatts.
///
/// Used both for component draw and for PSU capacity. Catalog figures may
/// carry decimals (`100.4`); fixed-point storage keeps them exact so that
/// a draw of 200.8W never passes a 200.5W supply. Serialized as watts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Watts(u64);

impl Watts {
    /// Whole watts.
    #[inline]
    pub const fn new(watts: u32) -> Self {
        Watts(watts as u64 * 1000)
    }

    #[inline]
    pub const fn from_milliwatts(milliwatts: u64) -> Self {
        Watts(milliwatts)
    }

    /// Scales a decimal watt figure, rounding to the nearest milliwatt.
    ///
    /// `None` for negative, non-finite, or out-of-range input.
    pub fn from_watts_f64(watts: f64) -> Option<Self> {
        let scaled = (watts * 1000.0).round();
        if !scaled.is_finite() || scaled < 0.0 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Watts(scaled as u64))
    }

    #[inline]
    pub const fn zero() -> Self {
        Watts(0)
    }

    #[inline]
    pub const fn milliwatts(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

/// `65W`, or `100.4W` when there is a fractional part.
impl fmt::Display for Watts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let frac = self.0 % 1000;
        if frac == 0 {
            return write!(f, "{}W", whole);
        }
        let digits = format!("{:03}", frac);
        write!(f, "{}.{}W", whole, digits.trim_end_matches('0'))
    }
}

impl From<Watts> for f64 {
    fn from(watts: Watts) -> f64 {
        watts.as_f64()
    }
}

impl TryFrom<f64> for Watts {
    type Error = ValidationError;

    fn try_from(watts: f64) -> Result<Self, Self::Error> {
        Watts::from_watts_f64(watts).ok_or_else(|| ValidationError::OutOfRange {
            field: "power".to_string(),
            min: 0,
            max: i64::MAX / 1000,
        })
    }
}

/// Saturates instead of overflowing; a saturated sum still exceeds any PSU.
impl Add for Watts {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Watts(self.0.saturating_add(other.0))
    }
}

impl Sum for Watts {
    fn sum<I: Iterator<Item = Watts>>(iter: I) -> Self {
        iter.fold(Watts::zero(), Add::add)
    }
}

// =============================================================================
// Component Record
// =============================================================================

/// A catalog row as stored, before any category-specific validation.
///
/// The catalog owns these records. `category` is kept as the raw `type`
/// column so that corrupt rows can be reported instead of dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ComponentRecord {
    pub id: ComponentId,

    /// Raw category key (`type` column).
    #[serde(rename = "type")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub category: String,

    pub name: String,
    pub manufacturer: String,
    pub model: String,

    /// CPU / motherboard socket (e.g. "AM4").
    pub socket: Option<String>,

    /// RAM / motherboard memory standard (e.g. "DDR4").
    pub memory_type: Option<String>,

    /// Draw for cpu/gpu/ram/motherboard, capacity for psu, in milliwatts.
    pub power_mw: Option<i64>,

    /// Price in cents.
    pub price_cents: i64,
}

impl ComponentRecord {
    /// Creates a record with the identifying fields set and everything
    /// category-specific empty.
    pub fn new(id: ComponentId, category: impl Into<String>, name: impl Into<String>) -> Self {
        ComponentRecord {
            id,
            category: category.into(),
            name: name.into(),
            manufacturer: String::new(),
            model: String::new(),
            socket: None,
            memory_type: None,
            power_mw: None,
            price_cents: 0,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    pub fn with_memory_type(mut self, memory_type: impl Into<String>) -> Self {
        self.memory_type = Some(memory_type.into());
        self
    }

    /// Whole watts.
    pub fn with_power(mut self, watts: u32) -> Self {
        self.power_mw = Some(i64::from(watts) * 1000);
        self
    }

    pub fn with_power_mw(mut self, milliwatts: i64) -> Self {
        self.power_mw = Some(milliwatts);
        self
    }

    /// The stored power figure, if any.
    pub fn power(&self) -> Result<Option<Watts>, ValidationError> {
        self.power_mw
            .map(|mw| validate_power_mw(mw).map(Watts::from_milliwatts))
            .transpose()
    }

    pub fn with_price_cents(mut self, cents: i64) -> Self {
        self.price_cents = cents;
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Typed Components
// =============================================================================

/// Identifying attributes shared by every component kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub id: ComponentId,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub price: Money,
}

impl ComponentInfo {
    fn from_record(record: &ComponentRecord) -> Result<Self, ValidationError> {
        validate_component_name(&record.name)?;
        validate_label("manufacturer", &record.manufacturer)?;
        validate_label("model", &record.model)?;
        validate_price_cents(record.price_cents)?;

        Ok(ComponentInfo {
            id: record.id,
            name: record.name.clone(),
            manufacturer: record.manufacturer.clone(),
            model: record.model.clone(),
            price: record.price(),
        })
    }
}

/// A processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub socket: String,
    pub power: Option<Watts>,
}

impl Cpu {
    /// Builds a CPU; `socket` is required.
    pub fn from_record(record: &ComponentRecord) -> Result<Self, ValidationError> {
        Ok(Cpu {
            info: ComponentInfo::from_record(record)?,
            socket: validate_required_text("socket", record.socket.as_deref())?,
            power: record.power()?,
        })
    }
}

/// A graphics card. The only optional slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub power: Option<Watts>,
}

impl Gpu {
    pub fn from_record(record: &ComponentRecord) -> Result<Self, ValidationError> {
        Ok(Gpu {
            info: ComponentInfo::from_record(record)?,
            power: record.power()?,
        })
    }
}

/// A memory kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ram {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub memory_type: String,
    pub power: Option<Watts>,
}

impl Ram {
    /// Builds a RAM kit; `memory_type` is required.
    pub fn from_record(record: &ComponentRecord) -> Result<Self, ValidationError> {
        Ok(Ram {
            info: ComponentInfo::from_record(record)?,
            memory_type: validate_required_text("memory_type", record.memory_type.as_deref())?,
            power: record.power()?,
        })
    }
}

/// A motherboard. Anchors both the socket and the memory checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motherboard {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub socket: String,
    pub memory_type: String,
    pub power: Option<Watts>,
}

impl Motherboard {
    /// Builds a motherboard; `socket` and `memory_type` are required.
    pub fn from_record(record: &ComponentRecord) -> Result<Self, ValidationError> {
        Ok(Motherboard {
            info: ComponentInfo::from_record(record)?,
            socket: validate_required_text("socket", record.socket.as_deref())?,
            memory_type: validate_required_text("memory_type", record.memory_type.as_deref())?,
            power: record.power()?,
        })
    }
}

/// A power supply. Its `power` column is a capacity, not a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psu {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub capacity: Watts,
}

impl Psu {
    /// Builds a PSU; `power` (capacity) is required.
    pub fn from_record(record: &ComponentRecord) -> Result<Self, ValidationError> {
        let capacity = record.power()?.ok_or_else(|| ValidationError::Required {
            field: "power".to_string(),
        })?;

        Ok(Psu {
            info: ComponentInfo::from_record(record)?,
            capacity,
        })
    }
}

// =============================================================================
// Component
// =============================================================================

/// A fully-formed component of one of the five kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Component {
    Cpu(Cpu),
    Gpu(Gpu),
    Ram(Ram),
    Motherboard(Motherboard),
    Psu(Psu),
}

impl Component {
    /// Converts a catalog row into a typed component.
    ///
    /// ## Errors
    /// `MalformedComponentRecord` when the `type` column is not a known
    /// category or a field the category needs is missing or invalid.
    pub fn from_record(record: &ComponentRecord) -> CoreResult<Self> {
        let category = record.category.parse::<Category>().map_err(|_| {
            CoreError::malformed(
                record.id,
                ValidationError::NotAllowed {
                    field: "type".to_string(),
                    allowed: Category::ALL.iter().map(|c| c.to_string()).collect(),
                },
            )
        })?;

        let component = match category {
            Category::Cpu => Cpu::from_record(record).map(Component::Cpu),
            Category::Gpu => Gpu::from_record(record).map(Component::Gpu),
            Category::Ram => Ram::from_record(record).map(Component::Ram),
            Category::Motherboard => Motherboard::from_record(record).map(Component::Motherboard),
            Category::Psu => Psu::from_record(record).map(Component::Psu),
        };

        component.map_err(|e| CoreError::malformed(record.id, e))
    }

    pub fn category(&self) -> Category {
        match self {
            Component::Cpu(_) => Category::Cpu,
            Component::Gpu(_) => Category::Gpu,
            Component::Ram(_) => Category::Ram,
            Component::Motherboard(_) => Category::Motherboard,
            Component::Psu(_) => Category::Psu,
        }
    }

    pub fn info(&self) -> &ComponentInfo {
        match self {
            Component::Cpu(c) => &c.info,
            Component::Gpu(c) => &c.info,
            Component::Ram(c) => &c.info,
            Component::Motherboard(c) => &c.info,
            Component::Psu(c) => &c.info,
        }
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.info().id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.info().price
    }

    /// Power this component draws. Always `None` for a PSU.
    pub fn power_draw(&self) -> Option<Watts> {
        match self {
            Component::Cpu(c) => c.power,
            Component::Gpu(c) => c.power,
            Component::Ram(c) => c.power,
            Component::Motherboard(c) => c.power,
            Component::Psu(_) => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_record() -> ComponentRecord {
        ComponentRecord::new(1, "cpu", "Ryzen 5 5600X")
            .with_manufacturer("AMD")
            .with_model("100-100000065BOX")
            .with_socket("AM4")
            .with_power(65)
            .with_price_cents(19999)
    }

    #[test]
    fn test_category_parse_is_exact() {
        assert_eq!("cpu".parse::<Category>().unwrap(), Category::Cpu);
        assert_eq!(
            "motherboard".parse::<Category>().unwrap(),
            Category::Motherboard
        );

        assert!(matches!(
            "CPU".parse::<Category>(),
            Err(CoreError::InvalidCategory(key)) if key == "CPU"
        ));
        assert!("case".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_order_and_mandatory() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);

        assert!(!Category::Gpu.is_mandatory());
        assert!(Category::MANDATORY.iter().all(Category::is_mandatory));
    }

    #[test]
    fn test_watts_sum_saturates() {
        let total: Watts = [Watts::from_milliwatts(u64::MAX), Watts::new(10)]
            .into_iter()
            .sum();
        assert_eq!(total.milliwatts(), u64::MAX);
    }

    #[test]
    fn test_watts_keep_fractions() {
        let draw = Watts::from_watts_f64(100.4).unwrap();
        assert_eq!(draw.milliwatts(), 100_400);
        assert_eq!((draw + draw).to_string(), "200.8W");
        assert!(draw + draw > Watts::from_watts_f64(200.5).unwrap());

        assert_eq!(Watts::new(650).to_string(), "650W");
        assert_eq!(Watts::from_milliwatts(12_050).to_string(), "12.05W");

        assert_eq!(Watts::from_watts_f64(-1.0), None);
        assert_eq!(Watts::from_watts_f64(f64::NAN), None);
    }

    #[test]
    fn test_watts_serialize_as_watts() {
        assert_eq!(serde_json::to_string(&Watts::new(75)).unwrap(), "75.0");
        assert_eq!(
            serde_json::to_string(&Watts::from_milliwatts(200_500)).unwrap(),
            "200.5"
        );
        let parsed: Watts = serde_json::from_str("100.4").unwrap();
        assert_eq!(parsed.milliwatts(), 100_400);
        assert!(serde_json::from_str::<Watts>("-5").is_err());
    }

    #[test]
    fn test_negative_stored_power_is_malformed() {
        let record = cpu_record().with_power_mw(-1);
        assert!(matches!(
            Component::from_record(&record),
            Err(CoreError::MalformedComponentRecord { id: 1, .. })
        ));
    }

    #[test]
    fn test_cpu_from_record() {
        let component = Component::from_record(&cpu_record()).unwrap();

        assert_eq!(component.category(), Category::Cpu);
        assert_eq!(component.id(), 1);
        assert_eq!(component.power_draw(), Some(Watts::new(65)));
        assert_eq!(component.price().cents(), 19999);
        match component {
            Component::Cpu(cpu) => assert_eq!(cpu.socket, "AM4"),
            other => panic!("expected cpu, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_socket_is_malformed() {
        let mut record = cpu_record();
        record.socket = None;

        let err = Component::from_record(&record).unwrap_err();
        match err {
            CoreError::MalformedComponentRecord { id, source } => {
                assert_eq!(id, 1);
                assert_eq!(
                    source,
                    ValidationError::Required {
                        field: "socket".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_memory_type_is_malformed() {
        let record = ComponentRecord::new(4, "motherboard", "B550 Tomahawk")
            .with_socket("AM4")
            .with_memory_type("   ");

        assert!(matches!(
            Component::from_record(&record),
            Err(CoreError::MalformedComponentRecord { id: 4, .. })
        ));
    }

    #[test]
    fn test_psu_requires_capacity() {
        let record = ComponentRecord::new(5, "psu", "RM650x");
        assert!(Component::from_record(&record).is_err());

        let psu = Component::from_record(&record.with_power(650)).unwrap();
        assert_eq!(psu.power_draw(), None);
        match psu {
            Component::Psu(psu) => assert_eq!(psu.capacity, Watts::new(650)),
            other => panic!("expected psu, got {:?}", other),
        }
    }

    #[test]
    fn test_gpu_power_is_optional() {
        let gpu = Component::from_record(&ComponentRecord::new(2, "gpu", "RTX 3060")).unwrap();
        assert_eq!(gpu.power_draw(), None);
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let record = ComponentRecord::new(6, "case", "Meshify C");
        assert!(matches!(
            Component::from_record(&record),
            Err(CoreError::MalformedComponentRecord { id: 6, .. })
        ));
    }

    #[test]
    fn test_component_serializes_with_category_tag() {
        let component = Component::from_record(&cpu_record()).unwrap();
        let json = serde_json::to_value(&component).unwrap();

        assert_eq!(json["category"], "cpu");
        assert_eq!(json["socket"], "AM4");
        assert_eq!(json["name"], "Ryzen 5 5600X");
    }
}
