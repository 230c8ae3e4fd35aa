//! Indent parameters: the tunable business multipliers.
//!
//! All parameters are plain `f64` values constrained to `[0.0, 20.0]`.
//! Seven of them multiply raw demand; `closing_stock` is subtracted and
//! `shortfall` added afterwards:
//!
//! ```text
//! total_indent = quantity * weekend_multiplier * marketing_spend_variable
//!              * retention_projection * festival_offer * offer_on_product
//!              * market_closure * buffer
//!              - closing_stock + shortfall
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IndentError;
use crate::Result;

/// Lowest accepted parameter value.
pub const PARAM_MIN: f64 = 0.0;
/// Highest accepted parameter value.
pub const PARAM_MAX: f64 = 20.0;

/// The parameter set for an indent computation.
///
/// Missing values always fall back to the defaults below, never to an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndentParams {
    /// Demand uplift factor for weekends (default 1.2)
    pub weekend_multiplier: f64,
    /// Marketing-driven demand uplift (default 1.08)
    pub marketing_spend_variable: f64,
    /// Customer retention factor (default 1.0)
    pub retention_projection: f64,
    /// Seasonal promotion factor (default 1.0)
    pub festival_offer: f64,
    /// Product-specific promotion factor (default 1.0)
    pub offer_on_product: f64,
    /// Market availability factor (default 1.0)
    pub market_closure: f64,
    /// Safety stock multiplier (default 1.05)
    pub buffer: f64,
    /// Additive correction (default 4.0)
    pub shortfall: f64,
    /// Inventory on hand, subtracted (default 0.0)
    pub closing_stock: f64,
}

impl Default for IndentParams {
    fn default() -> Self {
        Self {
            weekend_multiplier: 1.2,
            marketing_spend_variable: 1.08,
            retention_projection: 1.0,
            festival_offer: 1.0,
            offer_on_product: 1.0,
            market_closure: 1.0,
            buffer: 1.05,
            shortfall: 4.0,
            closing_stock: 0.0,
        }
    }
}

impl IndentParams {
    /// Recognized parameter names, in canonical order.
    pub const NAMES: [&'static str; 9] = [
        "weekend_multiplier",
        "marketing_spend_variable",
        "retention_projection",
        "festival_offer",
        "offer_on_product",
        "market_closure",
        "buffer",
        "shortfall",
        "closing_stock",
    ];

    /// Create the default parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a name → value map.
    ///
    /// Absent names keep their defaults. Unknown names and out-of-range
    /// values are rejected.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        let mut params = Self::default();
        for (name, &value) in map {
            params.set(name, value)?;
        }
        Ok(params)
    }

    /// Parse a JSON object of name → number.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: HashMap<String, f64> =
            serde_json::from_str(json).map_err(|e| IndentError::ParamsFormat(e.to_string()))?;
        Self::from_map(&map)
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "weekend_multiplier" => self.weekend_multiplier,
            "marketing_spend_variable" => self.marketing_spend_variable,
            "retention_projection" => self.retention_projection,
            "festival_offer" => self.festival_offer,
            "offer_on_product" => self.offer_on_product,
            "market_closure" => self.market_closure,
            "buffer" => self.buffer,
            "shortfall" => self.shortfall,
            "closing_stock" => self.closing_stock,
            _ => return None,
        };
        Some(value)
    }

    /// Set a parameter by name, validating its range.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let slot = match name {
            "weekend_multiplier" => &mut self.weekend_multiplier,
            "marketing_spend_variable" => &mut self.marketing_spend_variable,
            "retention_projection" => &mut self.retention_projection,
            "festival_offer" => &mut self.festival_offer,
            "offer_on_product" => &mut self.offer_on_product,
            "market_closure" => &mut self.market_closure,
            "buffer" => &mut self.buffer,
            "shortfall" => &mut self.shortfall,
            "closing_stock" => &mut self.closing_stock,
            _ => return Err(IndentError::UnknownParameter(name.to_string())),
        };
        check_range(name, value)?;
        *slot = value;
        Ok(())
    }

    /// Iterate `(name, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::NAMES
            .iter()
            .filter_map(move |&name| self.get(name).map(|v| (name, v)))
    }

    /// Check every value lies in `[PARAM_MIN, PARAM_MAX]`.
    ///
    /// Setters validate on the way in; this catches values written directly
    /// to the public fields or deserialized from elsewhere.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.iter() {
            check_range(name, value)?;
        }
        Ok(())
    }

    /// Product of the seven demand multipliers, left to right.
    pub fn demand_multiplier(&self) -> f64 {
        self.weekend_multiplier
            * self.marketing_spend_variable
            * self.retention_projection
            * self.festival_offer
            * self.offer_on_product
            * self.market_closure
            * self.buffer
    }

    /// Apply the indent formula to an aggregated quantity.
    ///
    /// Multiplication starts from `quantity` so rounding matches a strict
    /// left-to-right evaluation of the full formula.
    pub fn indent_for(&self, quantity: f64) -> f64 {
        (quantity
            * self.weekend_multiplier
            * self.marketing_spend_variable
            * self.retention_projection
            * self.festival_offer
            * self.offer_on_product
            * self.market_closure
            * self.buffer)
            - self.closing_stock
            + self.shortfall
    }

    /// Builder: set weekend_multiplier
    pub fn weekend_multiplier(mut self, value: f64) -> Self {
        self.weekend_multiplier = value;
        self
    }

    /// Builder: set marketing_spend_variable
    pub fn marketing_spend_variable(mut self, value: f64) -> Self {
        self.marketing_spend_variable = value;
        self
    }

    /// Builder: set retention_projection
    pub fn retention_projection(mut self, value: f64) -> Self {
        self.retention_projection = value;
        self
    }

    /// Builder: set festival_offer
    pub fn festival_offer(mut self, value: f64) -> Self {
        self.festival_offer = value;
        self
    }

    /// Builder: set offer_on_product
    pub fn offer_on_product(mut self, value: f64) -> Self {
        self.offer_on_product = value;
        self
    }

    /// Builder: set market_closure
    pub fn market_closure(mut self, value: f64) -> Self {
        self.market_closure = value;
        self
    }

    /// Builder: set buffer
    pub fn buffer(mut self, value: f64) -> Self {
        self.buffer = value;
        self
    }

    /// Builder: set shortfall
    pub fn shortfall(mut self, value: f64) -> Self {
        self.shortfall = value;
        self
    }

    /// Builder: set closing_stock
    pub fn closing_stock(mut self, value: f64) -> Self {
        self.closing_stock = value;
        self
    }
}

/// Load parameters from a JSON file.
pub fn load_params_file(path: impl AsRef<Path>) -> Result<IndentParams> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| IndentError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    IndentParams::from_json_str(&content)
}

fn check_range(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(PARAM_MIN..=PARAM_MAX).contains(&value) {
        return Err(IndentError::InvalidParameter {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let p = IndentParams::default();
        assert_eq!(p.weekend_multiplier, 1.2);
        assert_eq!(p.marketing_spend_variable, 1.08);
        assert_eq!(p.retention_projection, 1.0);
        assert_eq!(p.festival_offer, 1.0);
        assert_eq!(p.offer_on_product, 1.0);
        assert_eq!(p.market_closure, 1.0);
        assert_eq!(p.buffer, 1.05);
        assert_eq!(p.shortfall, 4.0);
        assert_eq!(p.closing_stock, 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_from_map_missing_keys_use_defaults() {
        let mut map = HashMap::new();
        map.insert("buffer".to_string(), 2.0);
        let p = IndentParams::from_map(&map).unwrap();
        assert_eq!(p.buffer, 2.0);
        assert_eq!(p.weekend_multiplier, 1.2);
        assert_eq!(p.shortfall, 4.0);
    }

    #[test]
    fn test_from_map_empty_is_default() {
        let p = IndentParams::from_map(&HashMap::new()).unwrap();
        assert_eq!(p, IndentParams::default());
    }

    #[test]
    fn test_from_map_unknown_key() {
        let mut map = HashMap::new();
        map.insert("bogus".to_string(), 1.0);
        let err = IndentParams::from_map(&map).unwrap_err();
        assert!(matches!(err, IndentError::UnknownParameter(name) if name == "bogus"));
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut p = IndentParams::default();
        assert!(p.set("buffer", 20.0).is_ok());
        assert!(p.set("buffer", 0.0).is_ok());
        assert!(matches!(
            p.set("buffer", 20.01),
            Err(IndentError::InvalidParameter { .. })
        ));
        assert!(matches!(
            p.set("shortfall", -1.0),
            Err(IndentError::InvalidParameter { .. })
        ));
        assert!(p.set("closing_stock", f64::NAN).is_err());
        assert!(p.set("closing_stock", f64::INFINITY).is_err());
        assert_eq!(p.buffer, 0.0);
    }

    #[test]
    fn test_validate_catches_direct_field_writes() {
        let p = IndentParams::default().closing_stock(25.0);
        let err = p.validate().unwrap_err();
        assert!(
            matches!(err, IndentError::InvalidParameter { ref name, .. } if name == "closing_stock")
        );
    }

    #[test]
    fn test_get_and_iter_order() {
        let p = IndentParams::default();
        let names: Vec<&str> = p.iter().map(|(n, _)| n).collect();
        assert_eq!(names, IndentParams::NAMES);
        assert_eq!(p.get("buffer"), Some(1.05));
        assert_eq!(p.get("nope"), None);
    }

    #[test]
    fn test_indent_for_default_example() {
        let p = IndentParams::default();
        let expected = 15.0 * 1.2 * 1.08 * 1.0 * 1.0 * 1.0 * 1.0 * 1.05 - 0.0 + 4.0;
        assert_eq!(p.indent_for(15.0), expected);
        assert!((p.indent_for(15.0) - 24.4392).abs() < 1e-9);
    }

    #[test]
    fn test_indent_for_subtracts_closing_stock() {
        let p = IndentParams::default()
            .weekend_multiplier(1.0)
            .marketing_spend_variable(1.0)
            .buffer(1.0)
            .closing_stock(3.0)
            .shortfall(1.0);
        assert_eq!(p.indent_for(10.0), 8.0);
    }

    #[test]
    fn test_demand_multiplier() {
        let p = IndentParams::default().festival_offer(2.0);
        assert!((p.demand_multiplier() - 1.2 * 1.08 * 2.0 * 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_from_json_str() {
        let p = IndentParams::from_json_str(r#"{"buffer": 1.5, "shortfall": 0}"#).unwrap();
        assert_eq!(p.buffer, 1.5);
        assert_eq!(p.shortfall, 0.0);
        assert_eq!(p.weekend_multiplier, 1.2);
    }

    #[test]
    fn test_from_json_str_rejects_non_numbers() {
        let err = IndentParams::from_json_str(r#"{"buffer": "high"}"#).unwrap_err();
        assert!(matches!(err, IndentError::ParamsFormat(_)));
    }

    #[test]
    fn test_load_params_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{"closing_stock": 12.5}"#).unwrap();
        let p = load_params_file(&path).unwrap();
        assert_eq!(p.closing_stock, 12.5);
    }

    #[test]
    fn test_load_params_file_missing() {
        let err = load_params_file("/nonexistent/params.json").unwrap_err();
        assert!(matches!(err, IndentError::FileRead { .. }));
    }

    #[test]
    fn test_serde_partial_object_uses_defaults() {
        let p: IndentParams = serde_json::from_str(r#"{"buffer": 1.1}"#).unwrap();
        assert_eq!(p.buffer, 1.1);
        assert_eq!(p.marketing_spend_variable, 1.08);
    }
}
