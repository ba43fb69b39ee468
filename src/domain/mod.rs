pub mod category;
pub mod common;
pub mod deal;
pub mod fleet;
pub mod money;

pub use category::{Category, CategoryRef};
pub use common::{
    DateRange, Displayable, Identifiable, NamedEntity, TenantContext, TenantId, TenantScoped,
};
pub use deal::{Deal, DealStage};
pub use fleet::{
    CostEntry, DriverLicense, FleetVehicle, FuelLog, Incident, MaintenanceSchedule, ServiceLog,
    TyreRecord, VehicleDocument,
};
pub use money::{BankAccount, MonetaryRecord, Payslip, RecordKind, RecordStatus};
