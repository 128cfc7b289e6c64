//! State variants and per-group variant tables.
//!
//! [`Variant`] is closed: only modifiers the generator understands can be
//! named. Its declaration order is the order the generator emits variants
//! in, so a [`VariantSet`] always iterates in generator order no matter how
//! the source listed them.
//!
//! `variants.extend.<group>` is unioned onto the defaults for that group.
//! `variants.<group>` replaces the group's defaults outright. When both are
//! present the override is applied first and the extension unioned on top.

use crate::error::{FieldError, FieldResult};
use crate::format::value_kind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A state-conditional modifier the generator can apply to a utility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Breakpoint prefixes (`md:`)
    Responsive,
    /// Dark-mode prefix
    Dark,
    /// `prefers-reduced-motion: no-preference`
    MotionSafe,
    /// `prefers-reduced-motion: reduce`
    MotionReduce,
    /// `:first-child`
    First,
    /// `:last-child`
    Last,
    /// `:nth-child(odd)`
    Odd,
    /// `:nth-child(even)`
    Even,
    /// `:visited`
    Visited,
    /// `:checked`
    Checked,
    /// `:empty`
    Empty,
    /// `:read-only`
    ReadOnly,
    /// Hover on an ancestor marked `group`
    GroupHover,
    /// Focus on an ancestor marked `group`
    GroupFocus,
    /// `:focus-within`
    FocusWithin,
    /// `:hover`
    Hover,
    /// `:focus`
    Focus,
    /// `:focus-visible`
    FocusVisible,
    /// `:active`
    Active,
    /// `:disabled`
    Disabled,
}

impl Variant {
    /// Every variant, in generator order.
    pub const ALL: [Variant; 20] = [
        Variant::Responsive,
        Variant::Dark,
        Variant::MotionSafe,
        Variant::MotionReduce,
        Variant::First,
        Variant::Last,
        Variant::Odd,
        Variant::Even,
        Variant::Visited,
        Variant::Checked,
        Variant::Empty,
        Variant::ReadOnly,
        Variant::GroupHover,
        Variant::GroupFocus,
        Variant::FocusWithin,
        Variant::Hover,
        Variant::Focus,
        Variant::FocusVisible,
        Variant::Active,
        Variant::Disabled,
    ];

    /// Name as written in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Responsive => "responsive",
            Variant::Dark => "dark",
            Variant::MotionSafe => "motion-safe",
            Variant::MotionReduce => "motion-reduce",
            Variant::First => "first",
            Variant::Last => "last",
            Variant::Odd => "odd",
            Variant::Even => "even",
            Variant::Visited => "visited",
            Variant::Checked => "checked",
            Variant::Empty => "empty",
            Variant::ReadOnly => "read-only",
            Variant::GroupHover => "group-hover",
            Variant::GroupFocus => "group-focus",
            Variant::FocusWithin => "focus-within",
            Variant::Hover => "hover",
            Variant::Focus => "focus",
            Variant::FocusVisible => "focus-visible",
            Variant::Active => "active",
            Variant::Disabled => "disabled",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a variant name outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Enabled variants for one utility group.
pub type VariantSet = BTreeSet<Variant>;

/// Utility group name to enabled variants.
pub type VariantTable = BTreeMap<String, VariantSet>;

fn variant_set_from_json(value: &Value, key: &str) -> FieldResult<VariantSet> {
    let items = value.as_array().ok_or_else(|| {
        FieldError::new(key, format!("expected a list of variants, found {}", value_kind(value)))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_key = format!("{}[{}]", key, i);
            let name = item.as_str().ok_or_else(|| {
                FieldError::new(
                    &item_key,
                    format!("expected a variant name, found {}", value_kind(item)),
                )
            })?;
            name.parse::<Variant>()
                .map_err(|e| FieldError::new(&item_key, e.to_string()))
        })
        .collect()
}

fn variant_table_from_json(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    skip: Option<&str>,
) -> FieldResult<VariantTable> {
    obj.iter()
        .filter(|(group, _)| Some(group.as_str()) != skip)
        .map(|(group, v)| {
            let set = variant_set_from_json(v, &format!("{}.{}", key, group))?;
            Ok::<_, FieldError>((group.clone(), set))
        })
        .collect()
}

/// The `variants` section of a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantSettings {
    /// Wholesale per-group replacements from `variants.<group>`.
    pub overrides: VariantTable,
    /// Per-group additions from `variants.extend`.
    pub extend: VariantTable,
}

impl VariantSettings {
    /// Read the `variants` section.
    pub(crate) fn from_json(value: &Value, key: &str) -> FieldResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            FieldError::new(key, format!("expected a table, found {}", value_kind(value)))
        })?;

        let extend = match obj.get("extend") {
            Some(Value::Object(ext)) => {
                variant_table_from_json(ext, &format!("{}.extend", key), None)?
            }
            Some(other) => {
                return Err(FieldError::new(
                    format!("{}.extend", key),
                    format!("expected a table, found {}", value_kind(other)),
                ))
            }
            None => VariantTable::new(),
        };
        let overrides = variant_table_from_json(obj, key, Some("extend"))?;

        Ok(Self { overrides, extend })
    }

    /// Layer these settings onto `defaults`.
    pub fn resolve(&self, defaults: &VariantTable) -> VariantTable {
        let mut resolved = defaults.clone();

        for (group, set) in &self.overrides {
            debug!("Replacing variants for group: {}", group);
            resolved.insert(group.clone(), set.clone());
        }

        for (group, set) in &self.extend {
            if !resolved.contains_key(group) {
                debug!("Variant extension introduces group: {}", group);
            }
            resolved
                .entry(group.clone())
                .or_default()
                .extend(set.iter().copied());
        }

        resolved
    }
}
