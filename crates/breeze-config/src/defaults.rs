//! Built-in default tables.
//!
//! Defaults are ordinary values handed to the resolve functions; nothing
//! here is global state. Callers that ship their own base theme construct a
//! [`ThemeDefaults`] or [`VariantDefaults`] from a table and pass it to
//! [`crate::ConfigDocument::resolve_theme_with`] /
//! [`crate::ConfigDocument::resolve_variants_with`].

use crate::palette;
use crate::theme::{ThemeTable, TokenMap, TokenValue, COLORS};
use crate::variants::{Variant, VariantSet, VariantTable};

/// Base theme tokens that `theme.extend` layers onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDefaults {
    table: ThemeTable,
}

impl ThemeDefaults {
    /// Wrap a custom default table.
    pub fn new(table: ThemeTable) -> Self {
        Self { table }
    }

    /// No default tokens at all.
    pub fn empty() -> Self {
        Self::new(ThemeTable::new())
    }

    /// The generator's stock theme.
    pub fn builtin() -> Self {
        let mut table = ThemeTable::new();

        table.insert(
            "screens".into(),
            tokens(&[
                ("sm", "640px"),
                ("md", "768px"),
                ("lg", "1024px"),
                ("xl", "1280px"),
                ("2xl", "1536px"),
            ]),
        );
        table.insert(COLORS.into(), palette::named("default").unwrap_or_default());
        table.insert(
            "fontFamily".into(),
            lists(&[
                (
                    "sans",
                    &[
                        "ui-sans-serif",
                        "system-ui",
                        "-apple-system",
                        "BlinkMacSystemFont",
                        "\"Segoe UI\"",
                        "Roboto",
                        "\"Helvetica Neue\"",
                        "Arial",
                        "\"Noto Sans\"",
                        "sans-serif",
                        "\"Apple Color Emoji\"",
                        "\"Segoe UI Emoji\"",
                        "\"Segoe UI Symbol\"",
                        "\"Noto Color Emoji\"",
                    ],
                ),
                (
                    "serif",
                    &["ui-serif", "Georgia", "Cambria", "\"Times New Roman\"", "Times", "serif"],
                ),
                (
                    "mono",
                    &[
                        "ui-monospace",
                        "SFMono-Regular",
                        "Menlo",
                        "Monaco",
                        "Consolas",
                        "\"Liberation Mono\"",
                        "\"Courier New\"",
                        "monospace",
                    ],
                ),
            ]),
        );
        table.insert(
            "fontSize".into(),
            font_sizes(&[
                ("xs", "0.75rem", "1rem"),
                ("sm", "0.875rem", "1.25rem"),
                ("base", "1rem", "1.5rem"),
                ("lg", "1.125rem", "1.75rem"),
                ("xl", "1.25rem", "1.75rem"),
                ("2xl", "1.5rem", "2rem"),
                ("3xl", "1.875rem", "2.25rem"),
                ("4xl", "2.25rem", "2.5rem"),
                ("5xl", "3rem", "1"),
                ("6xl", "3.75rem", "1"),
                ("7xl", "4.5rem", "1"),
                ("8xl", "6rem", "1"),
                ("9xl", "8rem", "1"),
            ]),
        );
        table.insert(
            "fontWeight".into(),
            tokens(&[
                ("thin", "100"),
                ("extralight", "200"),
                ("light", "300"),
                ("normal", "400"),
                ("medium", "500"),
                ("semibold", "600"),
                ("bold", "700"),
                ("extrabold", "800"),
                ("black", "900"),
            ]),
        );
        table.insert(
            "spacing".into(),
            tokens(&[
                ("px", "1px"),
                ("0", "0px"),
                ("0.5", "0.125rem"),
                ("1", "0.25rem"),
                ("1.5", "0.375rem"),
                ("2", "0.5rem"),
                ("2.5", "0.625rem"),
                ("3", "0.75rem"),
                ("3.5", "0.875rem"),
                ("4", "1rem"),
                ("5", "1.25rem"),
                ("6", "1.5rem"),
                ("7", "1.75rem"),
                ("8", "2rem"),
                ("9", "2.25rem"),
                ("10", "2.5rem"),
                ("11", "2.75rem"),
                ("12", "3rem"),
                ("14", "3.5rem"),
                ("16", "4rem"),
                ("20", "5rem"),
                ("24", "6rem"),
                ("28", "7rem"),
                ("32", "8rem"),
                ("36", "9rem"),
                ("40", "10rem"),
                ("44", "11rem"),
                ("48", "12rem"),
                ("52", "13rem"),
                ("56", "14rem"),
                ("60", "15rem"),
                ("64", "16rem"),
                ("72", "18rem"),
                ("80", "20rem"),
                ("96", "24rem"),
            ]),
        );
        table.insert(
            "borderRadius".into(),
            tokens(&[
                ("none", "0px"),
                ("sm", "0.125rem"),
                ("DEFAULT", "0.25rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("xl", "0.75rem"),
                ("2xl", "1rem"),
                ("3xl", "1.5rem"),
                ("full", "9999px"),
            ]),
        );
        table.insert(
            "borderWidth".into(),
            tokens(&[
                ("DEFAULT", "1px"),
                ("0", "0px"),
                ("2", "2px"),
                ("4", "4px"),
                ("8", "8px"),
            ]),
        );
        table.insert(
            "ringWidth".into(),
            tokens(&[
                ("DEFAULT", "3px"),
                ("0", "0px"),
                ("1", "1px"),
                ("2", "2px"),
                ("4", "4px"),
                ("8", "8px"),
            ]),
        );
        table.insert(
            "opacity".into(),
            tokens(&[
                ("0", "0"),
                ("5", "0.05"),
                ("10", "0.1"),
                ("20", "0.2"),
                ("25", "0.25"),
                ("30", "0.3"),
                ("40", "0.4"),
                ("50", "0.5"),
                ("60", "0.6"),
                ("70", "0.7"),
                ("75", "0.75"),
                ("80", "0.8"),
                ("90", "0.9"),
                ("95", "0.95"),
                ("100", "1"),
            ]),
        );
        table.insert(
            "boxShadow".into(),
            tokens(&[
                ("sm", "0 1px 2px 0 rgba(0, 0, 0, 0.05)"),
                (
                    "DEFAULT",
                    "0 1px 3px 0 rgba(0, 0, 0, 0.1), 0 1px 2px 0 rgba(0, 0, 0, 0.06)",
                ),
                (
                    "md",
                    "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)",
                ),
                (
                    "lg",
                    "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)",
                ),
                ("inner", "inset 0 2px 4px 0 rgba(0, 0, 0, 0.06)"),
                ("none", "none"),
            ]),
        );
        table.insert(
            "zIndex".into(),
            tokens(&[
                ("auto", "auto"),
                ("0", "0"),
                ("10", "10"),
                ("20", "20"),
                ("30", "30"),
                ("40", "40"),
                ("50", "50"),
            ]),
        );

        Self::new(table)
    }

    /// The underlying table.
    pub fn table(&self) -> &ThemeTable {
        &self.table
    }
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Base per-group variant sets that `variants.extend` unions onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDefaults {
    table: VariantTable,
}

/// Utility groups that only get breakpoint variants by default.
const RESPONSIVE_ONLY: &[&str] = &[
    "alignContent",
    "alignItems",
    "alignSelf",
    "animation",
    "backgroundAttachment",
    "backgroundPosition",
    "backgroundRepeat",
    "backgroundSize",
    "borderCollapse",
    "borderRadius",
    "borderStyle",
    "borderWidth",
    "cursor",
    "display",
    "divideOpacity",
    "divideStyle",
    "divideWidth",
    "flex",
    "flexDirection",
    "flexGrow",
    "flexShrink",
    "flexWrap",
    "float",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "gap",
    "gridColumn",
    "gridTemplateColumns",
    "gridTemplateRows",
    "height",
    "inset",
    "justifyContent",
    "letterSpacing",
    "lineHeight",
    "listStyleType",
    "margin",
    "maxHeight",
    "maxWidth",
    "minHeight",
    "minWidth",
    "objectFit",
    "order",
    "overflow",
    "padding",
    "position",
    "space",
    "textAlign",
    "textTransform",
    "transform",
    "transitionDuration",
    "transitionProperty",
    "userSelect",
    "verticalAlign",
    "visibility",
    "whitespace",
    "width",
    "wordBreak",
];

impl VariantDefaults {
    /// Wrap a custom default table.
    pub fn new(table: VariantTable) -> Self {
        Self { table }
    }

    /// No default variants for any group.
    pub fn empty() -> Self {
        Self::new(VariantTable::new())
    }

    /// The generator's stock variant table.
    pub fn builtin() -> Self {
        use Variant::*;

        let mut table: VariantTable = RESPONSIVE_ONLY
            .iter()
            .map(|group| (group.to_string(), set(&[Responsive])))
            .collect();

        let colour_states = [Responsive, Dark, GroupHover, FocusWithin, Hover, Focus];
        for group in [
            "backgroundColor",
            "backgroundOpacity",
            "borderColor",
            "borderOpacity",
            "textColor",
        ] {
            table.insert(group.into(), set(&colour_states));
        }

        let interactive = [Responsive, GroupHover, FocusWithin, Hover, Focus];
        for group in ["boxShadow", "opacity", "textDecoration", "textOpacity"] {
            table.insert(group.into(), set(&interactive));
        }

        let focus_only = [Responsive, FocusWithin, Focus];
        for group in [
            "accessibility",
            "outline",
            "ringOffsetWidth",
            "ringOpacity",
            "ringWidth",
            "zIndex",
        ] {
            table.insert(group.into(), set(&focus_only));
        }

        let dark_focus = [Responsive, Dark, FocusWithin, Focus];
        for group in ["ringColor", "ringOffsetColor"] {
            table.insert(group.into(), set(&dark_focus));
        }

        table.insert("divideColor".into(), set(&[Responsive, Dark]));
        table.insert(
            "gradientColorStops".into(),
            set(&[Responsive, Dark, Hover, Focus]),
        );
        table.insert("placeholderColor".into(), set(&[Responsive, Dark, Focus]));
        table.insert("scale".into(), set(&[Responsive, Hover, Focus]));

        Self::new(table)
    }

    /// The underlying table.
    pub fn table(&self) -> &VariantTable {
        &self.table
    }

    /// Defaults for one utility group (empty if the group is unknown).
    pub fn group(&self, name: &str) -> VariantSet {
        self.table.get(name).cloned().unwrap_or_default()
    }
}

impl Default for VariantDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

fn set(variants: &[Variant]) -> VariantSet {
    variants.iter().copied().collect()
}

fn tokens(pairs: &[(&str, &str)]) -> TokenMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), TokenValue::from(*v)))
        .collect()
}

fn lists(pairs: &[(&str, &[&str])]) -> TokenMap {
    pairs
        .iter()
        .map(|(k, values)| (k.to_string(), TokenValue::list(values.iter().copied())))
        .collect()
}

fn font_sizes(rows: &[(&str, &str, &str)]) -> TokenMap {
    rows.iter()
        .map(|(name, size, line_height)| {
            let mut extra = TokenMap::new();
            extra.insert("lineHeight".into(), TokenValue::from(*line_height));
            (
                name.to_string(),
                TokenValue::List(vec![TokenValue::from(*size), TokenValue::Nested(extra)]),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_theme_has_core_categories() {
        let defaults = ThemeDefaults::builtin();
        for category in ["screens", "colors", "fontFamily", "spacing", "opacity"] {
            assert!(
                defaults.table().contains_key(category),
                "missing category {category}"
            );
        }
        assert_eq!(defaults.table()["screens"]["md"], TokenValue::from("768px"));
        assert_eq!(defaults.table()[COLORS], palette::named("default").unwrap());
    }

    #[test]
    fn font_size_carries_line_height() {
        let defaults = ThemeDefaults::builtin();
        match &defaults.table()["fontSize"]["sm"] {
            TokenValue::List(items) => {
                assert_eq!(items[0], TokenValue::from("0.875rem"));
                assert_eq!(items[1].get("lineHeight"), Some(&TokenValue::from("1.25rem")));
            }
            other => panic!("unexpected font size shape: {other:?}"),
        }
    }

    #[test]
    fn builtin_ring_width_variants() {
        let defaults = VariantDefaults::builtin();
        let ring: Vec<_> = defaults.group("ringWidth").into_iter().collect();
        assert_eq!(
            ring,
            vec![Variant::Responsive, Variant::FocusWithin, Variant::Focus]
        );
    }

    #[test]
    fn every_builtin_group_is_responsive() {
        let defaults = VariantDefaults::builtin();
        for (group, set) in defaults.table() {
            assert!(
                set.contains(&Variant::Responsive),
                "{group} lacks responsive"
            );
        }
    }

    #[test]
    fn unknown_group_has_no_defaults() {
        assert!(VariantDefaults::builtin().group("wiggle").is_empty());
        assert!(ThemeDefaults::empty().table().is_empty());
    }
}
