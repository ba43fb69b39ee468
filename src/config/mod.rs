use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{domain::TenantId, errors::CoreError};

const SETTINGS_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

pub const DEFAULT_TAX_RATE: f64 = 15.0;

/// Per-tenant policy knobs consumed by the aggregation layer.
///
/// Every field has a documented default; a missing settings file falls back
/// to `TenantSettings::default()` rather than failing, since these drive
/// non-critical display computations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenantSettings {
    /// Percent applied to expense-side input VAT, which carries no
    /// per-record rate.
    pub default_tax_rate: f64,
    #[serde(default)]
    pub health_policy: HealthPolicy,
    #[serde(default)]
    pub fleet_policy: FleetPolicy,
    #[serde(default)]
    pub currency: String,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            default_tax_rate: DEFAULT_TAX_RATE,
            health_policy: HealthPolicy::default(),
            fleet_policy: FleetPolicy::default(),
            currency: "USD".into(),
        }
    }
}

/// Deal-health scoring policy. Illustrative defaults, tunable per tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthPolicy {
    /// Stage age beyond this many days draws a warning-level penalty.
    pub stage_warn_days: i64,
    /// Stage age beyond this many days draws a critical-level penalty.
    pub stage_critical_days: i64,
    /// Days without logged activity before a staleness penalty applies.
    pub activity_stale_days: i64,
    /// Scores at or above this classify as healthy.
    pub healthy_floor: f64,
    /// Scores at or above this (but below `healthy_floor`) classify as
    /// warning; anything lower is critical.
    pub warning_floor: f64,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            stage_warn_days: 14,
            stage_critical_days: 30,
            activity_stale_days: 21,
            healthy_floor: 70.0,
            warning_floor: 30.0,
        }
    }
}

/// Fleet scoring and alerting policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetPolicy {
    /// Vehicles scoring below this are replacement candidates.
    pub health_critical: f64,
    /// Lifetime cost above this fraction of purchase price escalates the
    /// replacement recommendation.
    pub cost_ratio_threshold: f64,
    /// Days ahead at which expiring licenses/insurance/documents warn.
    pub expiry_window_days: i64,
}

impl Default for FleetPolicy {
    fn default() -> Self {
        Self {
            health_critical: 40.0,
            cost_ratio_threshold: 0.5,
            expiry_window_days: 30,
        }
    }
}

/// Loads and saves per-tenant settings files.
pub struct SettingsManager {
    base_dir: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Result<Self, CoreError> {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("insight_core")
            .join("settings");
        Self::from_base(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CoreError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, CoreError> {
        ensure_dir(&base)?;
        Ok(Self { base_dir: base })
    }

    /// Loads settings for a tenant, falling back to defaults when the file
    /// does not exist.
    pub fn load(&self, tenant: TenantId) -> Result<TenantSettings, CoreError> {
        let path = self.settings_path(tenant);
        if path.exists() {
            let data = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(tenant = %tenant.0, "no settings file, using defaults");
            Ok(TenantSettings::default())
        }
    }

    pub fn save(&self, tenant: TenantId, settings: &TenantSettings) -> Result<(), CoreError> {
        let path = self.settings_path(tenant);
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn settings_path(&self, tenant: TenantId) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", tenant.0, SETTINGS_EXTENSION))
    }
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let settings = TenantSettings::default();
        assert_eq!(settings.default_tax_rate, 15.0);
        assert_eq!(settings.health_policy.stage_warn_days, 14);
        assert_eq!(settings.health_policy.stage_critical_days, 30);
        assert_eq!(settings.health_policy.healthy_floor, 70.0);
        assert_eq!(settings.health_policy.warning_floor, 30.0);
        assert_eq!(settings.fleet_policy.health_critical, 40.0);
        assert_eq!(settings.fleet_policy.cost_ratio_threshold, 0.5);
        assert_eq!(settings.fleet_policy.expiry_window_days, 30);
    }
}
