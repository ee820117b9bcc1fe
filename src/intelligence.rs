// src/intelligence.rs
//! # Intelligence tables
//!
//! Four immutable lookup tables that let the scorers find indirect matches:
//! - industry      → supply-chain / regulatory / geopolitical keywords
//! - region        → related regions / supply-chain / geopolitical keywords
//! - business unit → related categories / geographic / regulatory keywords
//! - risk category → related risks / impacted industries
//!
//! The defaults are compiled into the binary from `config/intelligence/*.json`.
//! A directory with the same four files can replace them at start-up.
//! Keys and keyword lists are lower-cased at load, so lookups are case-insensitive.
//! Tables are never mutated after construction; reloading builds a new set.

use once_cell::sync::Lazy;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::ConfigError;

pub const INDUSTRY_FILE: &str = "industry.json";
pub const GEOGRAPHIC_FILE: &str = "geographic.json";
pub const BUSINESS_UNITS_FILE: &str = "business_units.json";
pub const RISK_CORRELATIONS_FILE: &str = "risk_correlations.json";

static BUILTIN: Lazy<Arc<IntelligenceTables>> = Lazy::new(|| {
    let tables = IntelligenceTables::from_json_strs(
        include_str!("../config/intelligence/industry.json"),
        include_str!("../config/intelligence/geographic.json"),
        include_str!("../config/intelligence/business_units.json"),
        include_str!("../config/intelligence/risk_correlations.json"),
    )
    .expect("valid built-in intelligence tables");
    Arc::new(tables)
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndustryIntel {
    pub supply_chain_risks: Vec<String>,
    pub regulatory_risks: Vec<String>,
    pub geopolitical_risks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionIntel {
    pub related_regions: Vec<String>,
    pub supply_chain_risks: Vec<String>,
    pub geopolitical_risks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessUnitIntel {
    pub related_categories: Vec<String>,
    pub geographic_risks: Vec<String>,
    pub regulatory_risks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskCorrelation {
    pub related_risks: Vec<String>,
    pub industry_impact: Vec<String>,
}

/// Lower-case every keyword list of a table entry in place.
trait Normalize {
    fn normalize(&mut self);
}

fn lower_all(list: &mut [String]) {
    for s in list.iter_mut() {
        *s = s.trim().to_lowercase();
    }
}

impl Normalize for IndustryIntel {
    fn normalize(&mut self) {
        lower_all(&mut self.supply_chain_risks);
        lower_all(&mut self.regulatory_risks);
        lower_all(&mut self.geopolitical_risks);
    }
}

impl Normalize for RegionIntel {
    fn normalize(&mut self) {
        lower_all(&mut self.related_regions);
        lower_all(&mut self.supply_chain_risks);
        lower_all(&mut self.geopolitical_risks);
    }
}

impl Normalize for BusinessUnitIntel {
    fn normalize(&mut self) {
        lower_all(&mut self.related_categories);
        lower_all(&mut self.geographic_risks);
        lower_all(&mut self.regulatory_risks);
    }
}

impl Normalize for RiskCorrelation {
    fn normalize(&mut self) {
        lower_all(&mut self.related_risks);
        lower_all(&mut self.industry_impact);
    }
}

fn parse_table<T: DeserializeOwned + Normalize>(
    table: &'static str,
    json: &str,
) -> Result<HashMap<String, T>, ConfigError> {
    let raw: HashMap<String, T> =
        serde_json::from_str(json).map_err(|source| ConfigError::Table { table, source })?;
    Ok(raw
        .into_iter()
        .map(|(k, mut v)| {
            v.normalize();
            (normalize_key(&k), v)
        })
        .collect())
}

fn normalize_key(k: &str) -> String {
    k.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntelligenceTables {
    industries: HashMap<String, IndustryIntel>,
    regions: HashMap<String, RegionIntel>,
    business_units: HashMap<String, BusinessUnitIntel>,
    correlations: HashMap<String, RiskCorrelation>,
}

impl IntelligenceTables {
    /// Shared reference to the tables compiled into the binary.
    pub fn builtin() -> Arc<Self> {
        BUILTIN.clone()
    }

    pub fn from_json_strs(
        industry: &str,
        geographic: &str,
        business_units: &str,
        risk_correlations: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            industries: parse_table("industry", industry)?,
            regions: parse_table("geographic", geographic)?,
            business_units: parse_table("business_units", business_units)?,
            correlations: parse_table("risk_correlations", risk_correlations)?,
        })
    }

    /// Load all four tables from `dir`. Every file must be present.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })
        };
        Self::from_json_strs(
            &read(INDUSTRY_FILE)?,
            &read(GEOGRAPHIC_FILE)?,
            &read(BUSINESS_UNITS_FILE)?,
            &read(RISK_CORRELATIONS_FILE)?,
        )
    }

    /// Builder-style insertion, mainly for tests and programmatic setups.
    pub fn with_industry(mut self, key: &str, mut intel: IndustryIntel) -> Self {
        intel.normalize();
        self.industries.insert(normalize_key(key), intel);
        self
    }

    pub fn with_region(mut self, key: &str, mut intel: RegionIntel) -> Self {
        intel.normalize();
        self.regions.insert(normalize_key(key), intel);
        self
    }

    pub fn with_business_unit(mut self, key: &str, mut intel: BusinessUnitIntel) -> Self {
        intel.normalize();
        self.business_units.insert(normalize_key(key), intel);
        self
    }

    pub fn with_correlation(mut self, key: &str, mut intel: RiskCorrelation) -> Self {
        intel.normalize();
        self.correlations.insert(normalize_key(key), intel);
        self
    }

    pub fn industry(&self, name: &str) -> Option<&IndustryIntel> {
        self.industries.get(&normalize_key(name))
    }

    pub fn region(&self, name: &str) -> Option<&RegionIntel> {
        self.regions.get(&normalize_key(name))
    }

    pub fn business_unit(&self, name: &str) -> Option<&BusinessUnitIntel> {
        self.business_units.get(&normalize_key(name))
    }

    pub fn correlation(&self, category: &str) -> Option<&RiskCorrelation> {
        self.correlations.get(&normalize_key(category))
    }

    /// Entry counts `(industries, regions, business_units, correlations)` for diagnostics.
    pub fn sizes(&self) -> (usize, usize, usize, usize) {
        (
            self.industries.len(),
            self.regions.len(),
            self.business_units.len(),
            self.correlations.len(),
        )
    }
}
