use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectClass {
    Scratch,
    Dent,
    LampBroken,
    GlassBroken,
    TireFlat,
}

/// Fallback stroke color for classes the table does not know.
pub const DEFAULT_COLOR: &str = "#94a3b8";

// Display names paired with every lowercase spelling the inference backend has been seen to emit.
const SCRATCH: (&str, &[&str]) = ("Scratch", &["scratch"]);
const DENT: (&str, &[&str]) = ("Dent", &["dent"]);
const LAMP_BROKEN: (&str, &[&str]) = ("Lamp Broken", &["lamp broken", "lamp_broken"]);
const GLASS_BROKEN: (&str, &[&str]) = ("Glass Broken", &["glass broken", "glass_broken"]);
const TIRE_FLAT: (&str, &[&str]) = ("Tire Flat", &["tire flat", "tire_flat", "tireflat", "tire", "tire defect"]);

impl DefectClass {
    /// Exact, case-insensitive lookup of a class label.
    pub fn from_label(label: &str) -> Option<Self> {
        let lowered = label.to_lowercase();
        Self::all()
            .into_iter()
            .find(|class| class.aliases().contains(&lowered.as_str()))
    }

    pub fn all() -> [DefectClass; 5] {
        [
            DefectClass::Scratch,
            DefectClass::Dent,
            DefectClass::LampBroken,
            DefectClass::GlassBroken,
            DefectClass::TireFlat,
        ]
    }

    fn entry(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            DefectClass::Scratch => SCRATCH,
            DefectClass::Dent => DENT,
            DefectClass::LampBroken => LAMP_BROKEN,
            DefectClass::GlassBroken => GLASS_BROKEN,
            DefectClass::TireFlat => TIRE_FLAT,
        }
    }

    pub fn str(&self) -> &'static str {
        self.entry().0
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.entry().1
    }

    pub fn color(&self) -> &'static str {
        match self {
            DefectClass::Scratch => "#ef4444",     // red
            DefectClass::Dent => "#ec4899",        // pink
            DefectClass::LampBroken => "#3b82f6",  // blue
            DefectClass::GlassBroken => "#22c55e", // green
            DefectClass::TireFlat => "#a855f7",    // purple
        }
    }
}

/// Resolves the stroke color for a raw class label, falling back to `default_color`.
pub fn color_for_label<'a>(label: &str, default_color: &'a str) -> &'a str {
    match DefectClass::from_label(label) {
        Some(class) => class.color(),
        None => default_color,
    }
}
