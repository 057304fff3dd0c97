/// Every spelling the backend has used for each class, with the color it must render in.
pub(crate) const EXPECTED: &[(&str, &str)] = &[
    ("scratch", "#ef4444"),
    ("dent", "#ec4899"),
    ("lamp broken", "#3b82f6"),
    ("lamp_broken", "#3b82f6"),
    ("Glass Broken", "#22c55e"),
    ("glass_broken", "#22c55e"),
    ("tireflat", "#a855f7"),
    ("tire flat", "#a855f7"),
    ("TIRE_FLAT", "#a855f7"),
    ("tire", "#a855f7"),
    ("tire defect", "#a855f7"),
];
