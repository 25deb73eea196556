//! Placed kitchen module data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a placed kitchen item.
///
/// This is a closed set; the serialized form is the lowercase name
/// (`"cabinet"`, `"counter"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Base, wall, tall or corner cabinet
    Cabinet,
    /// Countertop or peninsula
    Counter,
    /// Refrigerator, range, dishwasher, microwave
    Appliance,
    /// Sink fixture
    Sink,
    /// Freestanding or peninsula island
    Island,
}

impl ModuleKind {
    /// All kinds in catalog order.
    pub const ALL: [ModuleKind; 5] = [
        ModuleKind::Cabinet,
        ModuleKind::Counter,
        ModuleKind::Appliance,
        ModuleKind::Sink,
        ModuleKind::Island,
    ];

    /// Serialized identifier (e.g., "cabinet").
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            ModuleKind::Cabinet => "cabinet",
            ModuleKind::Counter => "counter",
            ModuleKind::Appliance => "appliance",
            ModuleKind::Sink => "sink",
            ModuleKind::Island => "island",
        }
    }

    /// Human-readable label (e.g., "Cabinet").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            ModuleKind::Cabinet => "Cabinet",
            ModuleKind::Counter => "Counter",
            ModuleKind::Appliance => "Appliance",
            ModuleKind::Sink => "Sink",
            ModuleKind::Island => "Island",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for ModuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == needle)
            .ok_or_else(|| {
                format!(
                    "Unknown module kind '{s}'. Expected one of: cabinet, counter, appliance, sink, island"
                )
            })
    }
}

/// Module rotation in quarter turns.
///
/// Serialized as integer degrees. Values other than 0, 90, 180 and 270 are
/// rejected on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// 0°
    #[default]
    Deg0,
    /// 90°
    Deg90,
    /// 180°
    Deg180,
    /// 270°
    Deg270,
}

impl Rotation {
    /// Rotation in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// The next quarter turn clockwise, wrapping 270° back to 0°.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!(
                "rotation must be one of 0, 90, 180 or 270 degrees, got {other}"
            )),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Optional finish details attached to a module.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProperties {
    /// Facade or body material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Finish color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Appliance model family (appliances only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance_type: Option<String>,
    /// Free-form feature list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

/// A rectangular kitchen item placed in a project.
///
/// Position and size share the project's unit (centimeters in practice).
/// `width` and `height` describe the unrotated footprint and are never
/// changed by rotation. Nothing keeps a module inside the room or away from
/// other modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenModule {
    /// Unique id within the project, immutable
    pub id: String,
    /// Module kind
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    /// Display label; defaults to the kind label when absent from a file
    #[serde(default)]
    pub name: String,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Footprint width, > 0
    pub width: f64,
    /// Footprint height, > 0
    pub height: f64,
    /// Current rotation
    #[serde(default)]
    pub rotation: Rotation,
    /// Optional finish details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ModuleProperties>,
}

impl KitchenModule {
    /// Creates a module with a fresh `module-<uuid>` id and no rotation.
    pub fn new(
        kind: ModuleKind,
        name: impl Into<String>,
        (x, y): (f64, f64),
        (width, height): (f64, f64),
    ) -> Self {
        Self {
            id: Self::generate_id(),
            kind,
            name: name.into(),
            x,
            y,
            width,
            height,
            rotation: Rotation::Deg0,
            properties: None,
        }
    }

    /// Generates a new unique module id.
    #[must_use]
    pub fn generate_id() -> String {
        format!("module-{}", uuid::Uuid::new_v4())
    }

    /// Attaches finish details.
    #[must_use]
    pub fn with_properties(mut self, properties: ModuleProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Checks the footprint invariant (`width > 0`, `height > 0`, finite coordinates).
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!(
                "module '{}' has invalid width {} (must be > 0)",
                self.id, self.width
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!(
                "module '{}' has invalid height {} (must be > 0)",
                self.id, self.height
            ));
        }
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(format!("module '{}' has a non-finite position", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_after_four_turns() {
        let mut rotation = Rotation::Deg0;
        for expected in [90, 180, 270, 0] {
            rotation = rotation.next();
            assert_eq!(rotation.degrees(), expected);
        }
    }

    #[test]
    fn test_rotation_rejects_odd_angles() {
        assert!(Rotation::try_from(45).is_err());
        assert!(Rotation::try_from(360).is_err());
        assert_eq!(Rotation::try_from(180), Ok(Rotation::Deg180));
    }

    #[test]
    fn test_module_kind_from_str() {
        assert_eq!("Sink".parse::<ModuleKind>(), Ok(ModuleKind::Sink));
        assert_eq!(" island ".parse::<ModuleKind>(), Ok(ModuleKind::Island));
        assert!("oven".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn test_module_serializes_type_and_rotation() {
        let mut module = KitchenModule::new(
            ModuleKind::Cabinet,
            "Base Cabinet",
            (10.0, 20.0),
            (80.0, 60.0),
        );
        module.rotation = Rotation::Deg270;

        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["type"], "cabinet");
        assert_eq!(json["rotation"], 270);
        assert!(json.get("properties").is_none());
        assert!(json["id"].as_str().unwrap().starts_with("module-"));
    }

    #[test]
    fn test_module_validate() {
        let mut module =
            KitchenModule::new(ModuleKind::Counter, "Counter", (0.0, 0.0), (120.0, 40.0));
        assert!(module.validate().is_ok());

        module.width = 0.0;
        assert!(module.validate().is_err());

        module.width = 120.0;
        module.height = f64::NAN;
        assert!(module.validate().is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(KitchenModule::generate_id(), KitchenModule::generate_id());
    }
}
