use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, TenantId, TenantScoped};

/// A vehicle tracked by the fleet vertical.
///
/// `health_score` is a persisted cache of the scorer output, refreshed by the
/// external write path; the formula in `report::fleet` stays the single
/// source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetVehicle {
    pub id: Uuid,
    pub tenant_id: TenantId,
    /// Registration plate or other human-facing identifier.
    pub label: String,
    pub odometer_km: f64,
    /// In [0, 100].
    pub health_score: f64,
    pub purchase_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_expiry: Option<NaiveDate>,
}

impl FleetVehicle {
    pub fn new(tenant_id: TenantId, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            label: label.into(),
            odometer_km: 0.0,
            health_score: 100.0,
            purchase_price: 0.0,
            license_expiry: None,
            insurance_expiry: None,
        }
    }
}

impl Identifiable for FleetVehicle {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for FleetVehicle {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl Displayable for FleetVehicle {
    fn display_label(&self) -> String {
        self.label.clone()
    }
}

/// Ad-hoc cost attributed to a vehicle (tolls, fines, accessories, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostEntry {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
}

/// A completed service/maintenance job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub cost: f64,
    pub description: String,
}

/// An accident or damage event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incident {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub cost: f64,
    pub description: String,
}

/// A refuelling entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub cost: f64,
    pub litres: f64,
}

/// A planned maintenance item with a due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceSchedule {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub due_date: NaiveDate,
    pub description: String,
}

/// Tyre condition tracked per axle position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TyreRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub position: String,
    pub needs_replacement: bool,
}

/// A driver's license tracked for expiry alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverLicense {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub driver_name: String,
    pub expiry: NaiveDate,
}

impl TenantScoped for DriverLicense {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// A vehicle document (roadworthy certificate, permit, ...) with an expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleDocument {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub name: String,
    pub expiry: NaiveDate,
}
