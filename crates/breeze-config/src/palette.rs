//! Built-in colour palettes.
//!
//! Palettes are plain constant tables. They are only pulled into a document
//! through an explicit `{palette:NAME}` or `{palette:NAME.FAMILY}` reference,
//! or through [`crate::ThemeDefaults::builtin`] for the default colours.

use crate::theme::{TokenMap, TokenValue};

/// Names accepted in `{palette:NAME}` references.
pub const PALETTE_NAMES: &[&str] = &["default", "tailwind"];

const SHADE_KEYS: [&str; 10] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900",
];

type Shades = [&'static str; 10];

const BLUE_GRAY: Shades = [
    "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155",
    "#1e293b", "#0f172a",
];
const COOL_GRAY: Shades = [
    "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151",
    "#1f2937", "#111827",
];
const GRAY: Shades = [
    "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46",
    "#27272a", "#18181b",
];
const TRUE_GRAY: Shades = [
    "#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040",
    "#262626", "#171717",
];
const WARM_GRAY: Shades = [
    "#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e", "#44403c",
    "#292524", "#1c1917",
];
const RED: Shades = [
    "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
    "#991b1b", "#7f1d1d",
];
const ORANGE: Shades = [
    "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c",
    "#9a3412", "#7c2d12",
];
const AMBER: Shades = [
    "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309",
    "#92400e", "#78350f",
];
const YELLOW: Shades = [
    "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207",
    "#854d0e", "#713f12",
];
const LIME: Shades = [
    "#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d", "#4d7c0f",
    "#3f6212", "#365314",
];
const GREEN: Shades = [
    "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
    "#166534", "#14532d",
];
const EMERALD: Shades = [
    "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857",
    "#065f46", "#064e3b",
];
const TEAL: Shades = [
    "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e",
    "#115e59", "#134e4a",
];
const CYAN: Shades = [
    "#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490",
    "#155e75", "#164e63",
];
const LIGHT_BLUE: Shades = [
    "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1",
    "#075985", "#0c4a6e",
];
const BLUE: Shades = [
    "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
    "#1e40af", "#1e3a8a",
];
const INDIGO: Shades = [
    "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
    "#3730a3", "#312e81",
];
const VIOLET: Shades = [
    "#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9",
    "#5b21b6", "#4c1d95",
];
const PURPLE: Shades = [
    "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce",
    "#6b21a8", "#581c87",
];
const FUCHSIA: Shades = [
    "#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef", "#c026d3", "#a21caf",
    "#86198f", "#701a75",
];
const PINK: Shades = [
    "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d",
    "#9d174d", "#831843",
];
const ROSE: Shades = [
    "#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48", "#be123c",
    "#9f1239", "#881337",
];

/// Single-value colours shared by every palette.
const BASE_COLORS: [(&str, &str); 4] = [
    ("transparent", "transparent"),
    ("current", "currentColor"),
    ("black", "#000"),
    ("white", "#fff"),
];

/// Families of the `default` palette. Several names alias a differently
/// named family of the full palette.
const DEFAULT_FAMILIES: [(&str, &Shades); 8] = [
    ("gray", &COOL_GRAY),
    ("red", &RED),
    ("yellow", &AMBER),
    ("green", &EMERALD),
    ("blue", &BLUE),
    ("indigo", &INDIGO),
    ("purple", &VIOLET),
    ("pink", &PINK),
];

const TAILWIND_FAMILIES: [(&str, &Shades); 22] = [
    ("rose", &ROSE),
    ("pink", &PINK),
    ("fuchsia", &FUCHSIA),
    ("purple", &PURPLE),
    ("violet", &VIOLET),
    ("indigo", &INDIGO),
    ("blue", &BLUE),
    ("lightBlue", &LIGHT_BLUE),
    ("cyan", &CYAN),
    ("teal", &TEAL),
    ("emerald", &EMERALD),
    ("green", &GREEN),
    ("lime", &LIME),
    ("yellow", &YELLOW),
    ("amber", &AMBER),
    ("orange", &ORANGE),
    ("red", &RED),
    ("warmGray", &WARM_GRAY),
    ("trueGray", &TRUE_GRAY),
    ("gray", &GRAY),
    ("coolGray", &COOL_GRAY),
    ("blueGray", &BLUE_GRAY),
];

fn families(palette: &str) -> Option<&'static [(&'static str, &'static Shades)]> {
    match palette {
        "default" => Some(&DEFAULT_FAMILIES),
        "tailwind" => Some(&TAILWIND_FAMILIES),
        _ => None,
    }
}

fn shade_map(shades: &Shades) -> TokenValue {
    TokenValue::Nested(
        SHADE_KEYS
            .iter()
            .zip(shades.iter())
            .map(|(k, v)| (k.to_string(), TokenValue::from(*v)))
            .collect(),
    )
}

/// Look up a whole named palette.
pub fn named(name: &str) -> Option<TokenMap> {
    let families = families(name)?;
    let mut map: TokenMap = BASE_COLORS
        .iter()
        .map(|(k, v)| (k.to_string(), TokenValue::from(*v)))
        .collect();
    for (family, shades) in families {
        map.insert(family.to_string(), shade_map(shades));
    }
    Some(map)
}

/// Look up one entry (a shade family or a base colour) of a named palette.
pub fn family(palette: &str, name: &str) -> Option<TokenValue> {
    let families = families(palette)?;
    if let Some((_, shades)) = families.iter().find(|(f, _)| *f == name) {
        return Some(shade_map(shades));
    }
    BASE_COLORS
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| TokenValue::from(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_palette_resolves() {
        for name in PALETTE_NAMES {
            assert!(named(name).is_some(), "palette {name} missing");
        }
        assert!(named("solarized").is_none());
    }

    #[test]
    fn default_palette_aliases_families() {
        let palette = named("default").unwrap();
        assert_eq!(palette.len(), BASE_COLORS.len() + DEFAULT_FAMILIES.len());
        let gray = palette.get("gray").unwrap();
        assert_eq!(gray.get("500"), Some(&TokenValue::from("#6b7280")));
        assert!(palette.get("teal").is_none());
    }

    #[test]
    fn tailwind_palette_has_all_families() {
        let palette = named("tailwind").unwrap();
        assert_eq!(palette.len(), BASE_COLORS.len() + TAILWIND_FAMILIES.len());
        assert_eq!(
            palette.get("current"),
            Some(&TokenValue::from("currentColor"))
        );
    }

    #[test]
    fn family_lookup() {
        let cool = family("tailwind", "coolGray").unwrap();
        assert_eq!(cool.get("900"), Some(&TokenValue::from("#111827")));
        assert_eq!(family("tailwind", "black"), Some(TokenValue::from("#000")));
        assert!(family("tailwind", "chartreuse").is_none());
        assert!(family("nope", "gray").is_none());
    }
}
