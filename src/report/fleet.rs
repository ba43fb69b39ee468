use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::FleetPolicy,
    domain::{
        CostEntry, DriverLicense, FleetVehicle, FuelLog, Incident, MaintenanceSchedule,
        ServiceLog, TyreRecord, VehicleDocument,
    },
    errors::CoreError,
};

/// Incidents within this window count against the health score.
pub const INCIDENT_LOOKBACK_DAYS: i64 = 365;
/// Health penalty per recent incident.
pub const INCIDENT_PENALTY: f64 = 15.0;
/// Ceiling on the combined incident penalty.
pub const INCIDENT_PENALTY_CAP: f64 = 45.0;
/// Health penalty per overdue maintenance item.
pub const OVERDUE_SERVICE_PENALTY: f64 = 10.0;
/// Ceiling on the combined overdue-maintenance penalty.
pub const OVERDUE_SERVICE_PENALTY_CAP: f64 = 30.0;
/// Health penalty when lifetime cost crosses the policy cost ratio.
pub const COST_RATIO_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Danger,
    Warning,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertCategory {
    License,
    Insurance,
    Health,
    Maintenance,
    Tyres,
    Driver,
    Document,
}

/// A single row of the fleet overview alert feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetAlert {
    pub vehicle_label: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
}

/// Replace-or-keep recommendation for a vehicle below the health cutoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub message: String,
    /// True when lifetime cost also crossed the policy cost ratio.
    pub escalated: bool,
}

/// Lifetime spend attributed to a vehicle: services, incidents, fuel, and
/// ad-hoc cost entries.
pub fn total_cost_of_ownership(
    vehicle_id: Uuid,
    costs: &[CostEntry],
    services: &[ServiceLog],
    incidents: &[Incident],
    fuel_logs: &[FuelLog],
) -> f64 {
    let costs: f64 = costs
        .iter()
        .filter(|c| c.vehicle_id == vehicle_id)
        .map(|c| c.amount)
        .sum();
    let services: f64 = services
        .iter()
        .filter(|s| s.vehicle_id == vehicle_id)
        .map(|s| s.cost)
        .sum();
    let incidents: f64 = incidents
        .iter()
        .filter(|i| i.vehicle_id == vehicle_id)
        .map(|i| i.cost)
        .sum();
    let fuel: f64 = fuel_logs
        .iter()
        .filter(|f| f.vehicle_id == vehicle_id)
        .map(|f| f.cost)
        .sum();
    costs + services + incidents + fuel
}

/// Cost per kilometre driven. `None` when the odometer reads zero; a
/// negative or non-finite odometer fails fast.
pub fn cost_per_km(total_cost: f64, odometer_km: f64) -> Result<Option<f64>, CoreError> {
    if !odometer_km.is_finite() || odometer_km < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "odometer reading {odometer_km} is not a non-negative distance"
        )));
    }
    if odometer_km == 0.0 {
        return Ok(None);
    }
    Ok(Some(total_cost / odometer_km))
}

/// Recomputes a vehicle's health score from its records.
///
/// This formula is the single source of truth; the `health_score` persisted
/// on the vehicle is a cache the external write path refreshes from it.
pub fn vehicle_health_score(
    vehicle: &FleetVehicle,
    incidents: &[Incident],
    schedules: &[MaintenanceSchedule],
    total_cost: f64,
    today: NaiveDate,
    policy: &FleetPolicy,
) -> f64 {
    let lookback_start = today - Duration::days(INCIDENT_LOOKBACK_DAYS);
    let recent_incidents = incidents
        .iter()
        .filter(|i| i.vehicle_id == vehicle.id && i.date >= lookback_start)
        .count();
    let incident_penalty =
        (recent_incidents as f64 * INCIDENT_PENALTY).min(INCIDENT_PENALTY_CAP);

    let overdue = schedules
        .iter()
        .filter(|s| s.vehicle_id == vehicle.id && s.due_date < today)
        .count();
    let service_penalty =
        (overdue as f64 * OVERDUE_SERVICE_PENALTY).min(OVERDUE_SERVICE_PENALTY_CAP);

    let cost_penalty = if vehicle.purchase_price > 0.0
        && total_cost > policy.cost_ratio_threshold * vehicle.purchase_price
    {
        COST_RATIO_PENALTY
    } else {
        0.0
    };

    (100.0 - incident_penalty - service_penalty - cost_penalty).clamp(0.0, 100.0)
}

/// Binary replace-or-keep decision, triggered only below the health cutoff.
///
/// Wording escalates when lifetime cost exceeds the policy fraction of the
/// purchase price; otherwise the vehicle is flagged for closer monitoring.
pub fn replacement_recommendation(
    vehicle: &FleetVehicle,
    total_cost: f64,
    policy: &FleetPolicy,
) -> Option<Recommendation> {
    if vehicle.health_score >= policy.health_critical {
        return None;
    }
    let escalated = total_cost > policy.cost_ratio_threshold * vehicle.purchase_price;
    let message = if escalated {
        format!(
            "{}: strongly consider replacement; lifetime costs exceed {:.0}% of purchase price",
            vehicle.label,
            policy.cost_ratio_threshold * 100.0
        )
    } else {
        format!("{}: monitor closely", vehicle.label)
    };
    Some(Recommendation { message, escalated })
}

/// Inputs to the fleet overview alert feed beyond the vehicles themselves.
#[derive(Debug, Clone, Default)]
pub struct FleetRecords<'a> {
    pub schedules: &'a [MaintenanceSchedule],
    pub tyres: &'a [TyreRecord],
    pub driver_licenses: &'a [DriverLicense],
    pub documents: &'a [VehicleDocument],
}

/// Generates the fleet overview alert feed from independent rules.
///
/// Danger alerts sort before warnings; within a severity the generation
/// order is preserved.
pub fn fleet_alerts(
    vehicles: &[FleetVehicle],
    records: &FleetRecords<'_>,
    today: NaiveDate,
    policy: &FleetPolicy,
) -> Vec<FleetAlert> {
    let window_end = today + Duration::days(policy.expiry_window_days);
    let mut alerts = Vec::new();

    for vehicle in vehicles {
        push_expiry_alert(
            &mut alerts,
            &vehicle.label,
            vehicle.license_expiry,
            today,
            window_end,
            AlertCategory::License,
            "License",
        );
        push_expiry_alert(
            &mut alerts,
            &vehicle.label,
            vehicle.insurance_expiry,
            today,
            window_end,
            AlertCategory::Insurance,
            "Insurance",
        );
        if vehicle.health_score < policy.health_critical {
            alerts.push(FleetAlert {
                vehicle_label: vehicle.label.clone(),
                message: format!("Health score {:.0} is below {:.0}", vehicle.health_score, policy.health_critical),
                severity: AlertSeverity::Danger,
                category: AlertCategory::Health,
            });
        }
        for schedule in records
            .schedules
            .iter()
            .filter(|s| s.vehicle_id == vehicle.id && s.due_date < today)
        {
            alerts.push(FleetAlert {
                vehicle_label: vehicle.label.clone(),
                message: format!("Maintenance overdue: {}", schedule.description),
                severity: AlertSeverity::Danger,
                category: AlertCategory::Maintenance,
            });
        }
        for tyre in records
            .tyres
            .iter()
            .filter(|t| t.vehicle_id == vehicle.id && t.needs_replacement)
        {
            alerts.push(FleetAlert {
                vehicle_label: vehicle.label.clone(),
                message: format!("Tyre needs replacement ({})", tyre.position),
                severity: AlertSeverity::Warning,
                category: AlertCategory::Tyres,
            });
        }
        for document in records
            .documents
            .iter()
            .filter(|d| d.vehicle_id == vehicle.id && d.expiry <= window_end)
        {
            alerts.push(FleetAlert {
                vehicle_label: vehicle.label.clone(),
                message: format!("Document expiring: {}", document.name),
                severity: AlertSeverity::Warning,
                category: AlertCategory::Document,
            });
        }
    }

    for license in records
        .driver_licenses
        .iter()
        .filter(|l| l.expiry <= window_end)
    {
        alerts.push(FleetAlert {
            vehicle_label: license.driver_name.clone(),
            message: format!("Driver license expires {}", license.expiry),
            severity: AlertSeverity::Warning,
            category: AlertCategory::Driver,
        });
    }

    // Vec::sort_by_key is stable, so generation order survives within a
    // severity tier.
    alerts.sort_by_key(|alert| alert.severity);
    alerts
}

fn push_expiry_alert(
    alerts: &mut Vec<FleetAlert>,
    vehicle_label: &str,
    expiry: Option<NaiveDate>,
    today: NaiveDate,
    window_end: NaiveDate,
    category: AlertCategory,
    label: &str,
) {
    let Some(expiry) = expiry else {
        return;
    };
    if expiry < today {
        alerts.push(FleetAlert {
            vehicle_label: vehicle_label.to_string(),
            message: format!("{label} expired on {expiry}"),
            severity: AlertSeverity::Danger,
            category,
        });
    } else if expiry <= window_end {
        alerts.push(FleetAlert {
            vehicle_label: vehicle_label.to_string(),
            message: format!("{label} expires on {expiry}"),
            severity: AlertSeverity::Warning,
            category,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TenantId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    fn vehicle(label: &str) -> FleetVehicle {
        FleetVehicle::new(TenantId::new(), label)
    }

    #[test]
    fn total_cost_sums_all_four_record_kinds() {
        let v = vehicle("CA 123-456");
        let other = Uuid::new_v4();
        let costs = vec![CostEntry {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            date: today(),
            amount: 100.0,
            category: "Tolls".into(),
        }];
        let services = vec![ServiceLog {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            date: today(),
            cost: 250.0,
            description: "Brakes".into(),
        }];
        let incidents = vec![Incident {
            id: Uuid::new_v4(),
            vehicle_id: other,
            date: today(),
            cost: 999.0,
            description: "Other vehicle".into(),
        }];
        let fuel = vec![FuelLog {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            date: today(),
            cost: 75.5,
            litres: 40.0,
        }];

        let total = total_cost_of_ownership(v.id, &costs, &services, &incidents, &fuel);
        assert_eq!(total, 425.5);
    }

    #[test]
    fn zero_odometer_yields_none_not_a_crash() {
        assert_eq!(cost_per_km(5000.0, 0.0).unwrap(), None);
        assert_eq!(cost_per_km(0.0, 0.0).unwrap(), None);
    }

    #[test]
    fn negative_odometer_fails_fast() {
        let err = cost_per_km(100.0, -5.0).expect_err("negative odometer");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn cost_per_km_divides_when_odometer_is_positive() {
        assert_eq!(cost_per_km(500.0, 1000.0).unwrap(), Some(0.5));
    }

    #[test]
    fn health_score_penalizes_incidents_and_overdue_services() {
        let v = vehicle("GP 77-XY");
        let policy = FleetPolicy::default();
        let incidents = vec![Incident {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            date: today() - Duration::days(30),
            cost: 400.0,
            description: "Fender".into(),
        }];
        let schedules = vec![MaintenanceSchedule {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            due_date: today() - Duration::days(10),
            description: "Oil change".into(),
        }];

        let score = vehicle_health_score(&v, &incidents, &schedules, 0.0, today(), &policy);
        assert_eq!(score, 100.0 - INCIDENT_PENALTY - OVERDUE_SERVICE_PENALTY);
    }

    #[test]
    fn old_incidents_fall_out_of_the_lookback() {
        let v = vehicle("GP 77-XY");
        let incidents = vec![Incident {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            date: today() - Duration::days(INCIDENT_LOOKBACK_DAYS + 30),
            cost: 400.0,
            description: "Ancient".into(),
        }];
        let score =
            vehicle_health_score(&v, &incidents, &[], 0.0, today(), &FleetPolicy::default());
        assert_eq!(score, 100.0);
    }

    #[test]
    fn no_recommendation_at_or_above_the_cutoff() {
        let mut v = vehicle("CA 1");
        v.health_score = 40.0;
        assert!(replacement_recommendation(&v, 0.0, &FleetPolicy::default()).is_none());
    }

    #[test]
    fn recommendation_escalates_on_cost_ratio() {
        let policy = FleetPolicy::default();
        let mut v = vehicle("CA 2");
        v.health_score = 35.0;
        v.purchase_price = 200_000.0;

        let soft = replacement_recommendation(&v, 50_000.0, &policy).unwrap();
        assert!(!soft.escalated);
        assert!(soft.message.contains("monitor closely"));

        let hard = replacement_recommendation(&v, 120_000.0, &policy).unwrap();
        assert!(hard.escalated);
        assert!(hard.message.contains("strongly consider replacement"));
    }

    #[test]
    fn danger_alerts_sort_before_warnings_and_stay_stable() {
        let policy = FleetPolicy::default();
        let mut healthy = vehicle("Bakkie");
        healthy.license_expiry = Some(today() + Duration::days(10));
        let mut broken = vehicle("Van");
        broken.health_score = 20.0;
        broken.insurance_expiry = Some(today() - Duration::days(1));

        let alerts = fleet_alerts(
            &[healthy, broken],
            &FleetRecords::default(),
            today(),
            &policy,
        );
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].severity, AlertSeverity::Danger);
        assert_eq!(alerts[0].category, AlertCategory::Insurance);
        assert_eq!(alerts[1].category, AlertCategory::Health);
        assert_eq!(alerts[2].severity, AlertSeverity::Warning);
        assert_eq!(alerts[2].category, AlertCategory::License);
    }

    #[test]
    fn tyres_drivers_and_documents_raise_warnings() {
        let policy = FleetPolicy::default();
        let v = vehicle("Truck");
        let tyres = vec![TyreRecord {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            position: "front-left".into(),
            needs_replacement: true,
        }];
        let licenses = vec![DriverLicense {
            id: Uuid::new_v4(),
            tenant_id: v.tenant_id,
            driver_name: "S. Dlamini".into(),
            expiry: today() + Duration::days(14),
        }];
        let documents = vec![VehicleDocument {
            id: Uuid::new_v4(),
            vehicle_id: v.id,
            name: "Roadworthy certificate".into(),
            expiry: today() + Duration::days(7),
        }];
        let records = FleetRecords {
            tyres: &tyres,
            driver_licenses: &licenses,
            documents: &documents,
            ..Default::default()
        };

        let alerts = fleet_alerts(&[v], &records, today(), &policy);
        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| a.severity == AlertSeverity::Warning));
    }
}
