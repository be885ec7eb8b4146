//! Resource assignment field table

use p6_common::EntityKind;

use super::schema::{Coercion as C, FieldSpec, Requirement, Schema, Source};

pub(crate) fn schema() -> Schema {
    let direct = |name: &'static str, coercion| FieldSpec::direct(name, name, coercion);

    let fields = vec![
        direct("ObjectId", C::Int),
        direct("GUID", C::BracedGuid),
        direct("ProjectObjectId", C::Int),
        direct("WBSObjectId", C::Int),
        direct("ResourceObjectId", C::Int),
        direct("ActivityObjectId", C::Int),
        direct("CostAccountObjectId", C::Int),
        direct("ResourceCurveObjectId", C::Int),
        direct("RoleObjectId", C::Int),
        direct("ActualCost", C::Float),
        direct("ActualCurve", C::Text),
        direct("ActualFinishDate", C::Instant),
        direct("ActualOvertimeCost", C::Float),
        direct("ActualOvertimeUnits", C::Float),
        direct("ActualRegularCost", C::Float),
        direct("ActualRegularUnits", C::Float),
        direct("ActualStartDate", C::Instant),
        direct("ActualThisPeriodCost", C::Float),
        direct("ActualThisPeriodUnits", C::Float),
        direct("ActualUnits", C::Float),
        direct("AtCompletionCost", C::Float),
        direct("AtCompletionUnits", C::Float),
        direct("DrivingActivityDatesFlag", C::Bool),
        direct("IsCostUnitsLinked", C::Bool),
        direct("IsPrimaryResource", C::Bool),
        direct("FinishDate", C::Instant),
        direct("StartDate", C::Instant),
        direct("PlannedCost", C::Float),
        direct("PlannedCurve", C::Text),
        direct("PlannedFinishDate", C::Instant),
        direct("PlannedLag", C::Int),
        direct("PlannedStartDate", C::Instant),
        direct("PlannedUnits", C::Float),
        direct("PlannedUnitsPerTime", C::Float),
        direct("RemainingCost", C::Float),
        direct("RemainingCurve", C::Text),
        direct("RemainingDuration", C::Float),
        direct("RemainingFinishDate", C::Instant),
        direct("RemainingLag", C::Int),
        direct("RemainingStartDate", C::Instant),
        direct("RemainingUnits", C::Float),
        direct("RemainingUnitsPerTime", C::Float),
        direct("OvertimeFactor", C::Float),
        direct("PricePerUnit", C::Float),
        direct("Proficiency", C::Text),
        direct("RateSource", C::Text),
        direct("RateType", C::Text),
        direct("UnitsPercentComplete", C::Float),
        direct("ResourceType", C::Text),
        FieldSpec::new("UploadDate", Source::UploadDate, C::Date),
    ];

    Schema::new(EntityKind::ResourceAssignment, fields, vec![Requirement::NonNull("ObjectId")])
}
