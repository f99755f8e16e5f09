//! Typed views over parsed values.
//!
//! The consuming layer reads a few record shapes over and over: item amounts
//! in costs and recipes, RGBA colors, min/max ranges, and lists of engine
//! class paths. [`FromValue`] reads these out of a [`Value`] with field-level
//! errors instead of panicking on a missing key.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::parser::parse_value;
use crate::value::Value;

/// Fluid amounts are stored in thousandths of a cubic metre.
const FLUID_SCALE: f64 = 1000.0;

/// Conversion from a generic [`Value`] into a typed record.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError>;
}

/// Parse `input` and read it as `T` in one step.
///
/// ```
/// use docs_value_core::records::{parse_as, ItemAmount};
///
/// let cost: Vec<ItemAmount> =
///     parse_as("((ItemClass=Desc_IronPlate_C,Amount=5),(ItemClass=Desc_Wire_C,Amount=8))").unwrap();
/// assert_eq!(cost[1].amount, 8);
/// ```
pub fn parse_as<T: FromValue>(input: &str) -> Result<T> {
    let value = parse_value(input)?;
    Ok(T::from_value(&value)?)
}

/// An RGBA color with channels as they appear in the dump (usually 0..=1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// RGB channels rounded to whole numbers, optionally scaled from 0..=1 to 0..=255.
    pub fn to_rgb(&self, scale_to_255: bool) -> [i64; 3] {
        let scale = if scale_to_255 { 255.0 } else { 1.0 };
        [self.r, self.g, self.b].map(|c| (scale * c).round() as i64)
    }
}

impl FromValue for Color {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError> {
        let map = require_map(value)?;
        Ok(Self {
            r: number_field(map, "R")?,
            g: number_field(map, "G")?,
            b: number_field(map, "B")?,
            a: number_field(map, "A")?,
        })
    }
}

/// A quantity of one item class, as in recipe ingredients and schematic costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAmount {
    /// Raw class path, e.g. `BlueprintGeneratedClass'"/Game/.../Desc_Wire.Desc_Wire_C"'`.
    pub item_class: String,
    pub amount: i64,
}

impl ItemAmount {
    /// Short class name of the item, e.g. `Desc_Wire_C`.
    pub fn class_name(&self) -> std::result::Result<&str, FieldError> {
        short_class_name(&self.item_class)
    }

    /// Amount in display units. Fluids are stored in thousandths.
    pub fn quantity(&self, is_fluid: bool) -> f64 {
        if is_fluid {
            self.amount as f64 / FLUID_SCALE
        } else {
            self.amount as f64
        }
    }
}

impl FromValue for ItemAmount {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError> {
        let map = require_map(value)?;
        let amount = field(map, "Amount")?;
        Ok(Self {
            item_class: string_field(map, "ItemClass")?.to_string(),
            amount: amount.as_i64().ok_or_else(|| wrong_type("Amount", "an integer", amount))?,
        })
    }
}

/// A numeric range such as variable power consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl FromValue for Range {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError> {
        let map = require_map(value)?;
        Ok(Self {
            min: number_field(map, "Min")?,
            max: number_field(map, "Max")?,
        })
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| wrong_type("<value>", "a string", value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError> {
        value
            .as_f64()
            .ok_or_else(|| wrong_type("<value>", "a number", value))
    }
}

/// Lists coerce element-wise. An empty property (`Null`) reads as an empty list.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> std::result::Result<Self, FieldError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(FieldError::NotAList(other.type_name())),
        }
    }
}

/// Extract the short class name from an engine object path.
///
/// Takes everything after the first `.` and drops a trailing `"'`:
///
/// ```
/// use docs_value_core::records::short_class_name;
///
/// let path = r#"BlueprintGeneratedClass'"/Game/Parts/Wire/Desc_Wire.Desc_Wire_C"'"#;
/// assert_eq!(short_class_name(path).unwrap(), "Desc_Wire_C");
/// ```
pub fn short_class_name(path: &str) -> std::result::Result<&str, FieldError> {
    let bad = || FieldError::BadClassPath(path.to_string());
    let (_, rest) = path.split_once('.').ok_or_else(bad)?;
    let name = rest.strip_suffix("\"'").unwrap_or(rest);
    if name.is_empty() {
        return Err(bad());
    }
    Ok(name)
}

fn require_map(value: &Value) -> std::result::Result<&[(String, Value)], FieldError> {
    value
        .as_map()
        .ok_or_else(|| FieldError::NotAMap(value.type_name()))
}

fn field<'v>(map: &'v [(String, Value)], name: &str) -> std::result::Result<&'v Value, FieldError> {
    map.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
        .ok_or_else(|| FieldError::MissingField(name.to_string()))
}

fn number_field(map: &[(String, Value)], name: &str) -> std::result::Result<f64, FieldError> {
    let value = field(map, name)?;
    value.as_f64().ok_or_else(|| wrong_type(name, "a number", value))
}

fn string_field<'v>(map: &'v [(String, Value)], name: &str) -> std::result::Result<&'v str, FieldError> {
    let value = field(map, name)?;
    value.as_str().ok_or_else(|| wrong_type(name, "a string", value))
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> FieldError {
    FieldError::WrongType {
        field: field.to_string(),
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_without_quotes() {
        assert_eq!(
            short_class_name("/Game/Parts/Wire/Desc_Wire.Desc_Wire_C").unwrap(),
            "Desc_Wire_C"
        );
    }

    #[test]
    fn class_name_requires_dot() {
        assert_eq!(
            short_class_name("Desc_Wire_C"),
            Err(FieldError::BadClassPath("Desc_Wire_C".into()))
        );
        assert!(short_class_name("Foo.\"'").is_err());
    }

    #[test]
    fn color_rounds_channels() {
        let color = Color {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(color.to_rgb(true), [255, 128, 0]);
        assert_eq!(color.to_rgb(false), [1, 1, 0]);
    }
}
