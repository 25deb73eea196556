//! Built-in module library.
//!
//! Templates describe what a module looks like before it is placed: kind,
//! label, footprint, and the price and materials shown in the library.

use serde::{Deserialize, Serialize};

use crate::models::ModuleKind;

/// Blueprint for a module that can be added to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTemplate {
    /// Kind of module created from this template
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    /// Display label copied onto the placed module
    pub name: String,
    /// Short description for the library listing
    #[serde(default)]
    pub description: String,
    /// Footprint width
    pub width: f64,
    /// Footprint height
    pub height: f64,
    /// Indicative price in EUR
    #[serde(default)]
    pub price: u32,
    /// Main materials
    #[serde(default)]
    pub materials: Vec<String>,
}

impl ModuleTemplate {
    /// Creates a bare template with no description, price or materials.
    pub fn new(kind: ModuleKind, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            kind,
            name: name.into(),
            description: String::new(),
            width,
            height,
            price: 0,
            materials: Vec::new(),
        }
    }

    fn entry(
        kind: ModuleKind,
        name: &str,
        description: &str,
        (width, height): (f64, f64),
        price: u32,
        materials: &[&str],
    ) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            width,
            height,
            price,
            materials: materials.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Group of templates shown together in the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogCategory {
    /// Category heading (e.g., "Cabinets")
    pub name: String,
    /// Templates in display order
    pub modules: Vec<ModuleTemplate>,
}

/// Returns the full module library grouped by category.
pub fn categories() -> Vec<CatalogCategory> {
    use ModuleKind::{Appliance, Cabinet, Counter, Island, Sink};

    let category = |name: &str, modules: Vec<ModuleTemplate>| CatalogCategory {
        name: name.to_string(),
        modules,
    };

    vec![
        category(
            "Cabinets",
            vec![
                ModuleTemplate::entry(Cabinet, "Base Cabinet", "Standard base cabinet with drawers", (80.0, 60.0), 250, &["Wood", "Hardware"]),
                ModuleTemplate::entry(Cabinet, "Wall Cabinet", "Wall-mounted cabinet with glass doors", (80.0, 40.0), 180, &["Wood", "Glass"]),
                ModuleTemplate::entry(Cabinet, "Tall Cabinet", "Floor-to-ceiling pantry cabinet", (60.0, 120.0), 450, &["Wood", "Shelving"]),
                ModuleTemplate::entry(Cabinet, "Corner Cabinet", "Corner cabinet with lazy susan", (100.0, 60.0), 320, &["Wood", "Lazy Susan"]),
            ],
        ),
        category(
            "Counters",
            vec![
                ModuleTemplate::entry(Counter, "Granite Counter", "Premium granite countertop", (120.0, 40.0), 800, &["Granite", "Sealant"]),
                ModuleTemplate::entry(Counter, "Quartz Counter", "Engineered quartz countertop", (120.0, 40.0), 650, &["Quartz", "Resin"]),
                ModuleTemplate::entry(Counter, "Wood Counter", "Solid wood butcher block", (120.0, 40.0), 400, &["Hardwood", "Oil Finish"]),
                ModuleTemplate::entry(Counter, "Peninsula", "Kitchen peninsula with seating", (160.0, 40.0), 1200, &["Granite", "Wood Base"]),
            ],
        ),
        category(
            "Appliances",
            vec![
                ModuleTemplate::entry(Appliance, "Refrigerator", "French door refrigerator", (70.0, 80.0), 1200, &["Stainless Steel", "Compressor"]),
                ModuleTemplate::entry(Appliance, "Dishwasher", "Built-in dishwasher", (60.0, 60.0), 600, &["Stainless Steel", "Motor"]),
                ModuleTemplate::entry(Appliance, "Gas Range", "Professional gas range", (80.0, 50.0), 1500, &["Stainless Steel", "Gas Burners"]),
                ModuleTemplate::entry(Appliance, "Microwave", "Over-the-range microwave", (50.0, 40.0), 300, &["Stainless Steel", "Magnetron"]),
            ],
        ),
        category(
            "Fixtures",
            vec![
                ModuleTemplate::entry(Sink, "Single Sink", "Single bowl stainless steel sink", (70.0, 50.0), 200, &["Stainless Steel", "Faucet"]),
                ModuleTemplate::entry(Sink, "Double Sink", "Double bowl sink with disposal", (100.0, 50.0), 350, &["Stainless Steel", "Disposal"]),
                ModuleTemplate::entry(Sink, "Farmhouse Sink", "Apron front farmhouse sink", (80.0, 60.0), 500, &["Fireclay", "Faucet"]),
            ],
        ),
        category(
            "Islands",
            vec![
                ModuleTemplate::entry(Island, "Kitchen Island", "Freestanding kitchen island", (120.0, 80.0), 2000, &["Wood", "Granite", "Storage"]),
                ModuleTemplate::entry(Island, "Peninsula Island", "Connected peninsula island", (160.0, 60.0), 1800, &["Wood", "Quartz", "Seating"]),
            ],
        ),
    ]
}

/// All templates in library order.
pub fn templates() -> Vec<ModuleTemplate> {
    categories()
        .into_iter()
        .flat_map(|category| category.modules)
        .collect()
}

/// Templates of one kind, in library order.
pub fn templates_of_kind(kind: ModuleKind) -> Vec<ModuleTemplate> {
    templates().into_iter().filter(|t| t.kind == kind).collect()
}

/// Looks up a template by name, ignoring ASCII case and surrounding whitespace.
pub fn find_template(name: &str) -> Option<ModuleTemplate> {
    let needle = name.trim();
    templates()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(needle))
}
