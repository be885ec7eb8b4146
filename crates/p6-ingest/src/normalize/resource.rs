//! Resource field table

use p6_common::EntityKind;

use super::schema::{Coercion as C, FieldSpec, Requirement, Schema, Source};

pub(crate) fn schema() -> Schema {
    let field = FieldSpec::direct;

    let fields = vec![
        field("objectId", "ObjectId", C::Int),
        field("autoComputeActuals", "AutoComputeActuals", C::Bool),
        field("calculateCostFromUnits", "CalculateCostFromUnits", C::Bool),
        field("calendarObjectId", "CalendarObjectId", C::Int),
        field("currencyObjectId", "CurrencyObjectId", C::Int),
        field("defaultUnitsPerTime", "DefaultUnitsPerTime", C::Float),
        field("emailAddress", "EmailAddress", C::Unwrap("address")),
        field("employeeId", "EmployeeId", C::Unwrap("id")),
        field("GUID", "GUID", C::BracedGuid),
        field("id", "Id", C::OptionalText),
        field("isActive", "IsActive", C::Bool),
        field("isOverTimeAllowed", "IsOverTimeAllowed", C::Bool),
        field("name", "Name", C::TrimmedText),
        field("officePhone", "OfficePhone", C::Unwrap("number")),
        field("otherPhone", "OtherPhone", C::Unwrap("number")),
        field("overtimeFactor", "OvertimeFactor", C::Float),
        field("parentObjectId", "ParentObjectId", C::Int),
        field("primaryRoleObjectId", "PrimaryRoleObjectId", C::Int),
        field("resourceNotes", "ResourceNotes", C::Scalar),
        field("resourceType", "ResourceType", C::OptionalText),
        field("sequenceNumber", "SequenceNumber", C::Int),
        field("shiftObjectId", "ShiftObjectId", C::Int),
        field("timesheetApprMngrObjectId", "TimesheetApprMngrObjectId", C::Int),
        field("title", "Title", C::Scalar),
        field("unitOfMeasureObjectId", "UnitOfMeasureObjectId", C::Int),
        FieldSpec::new("uploadDate", Source::UploadDate, C::Date),
        field("useTimesheets", "UseTimesheets", C::Bool),
        field("userObjectId", "UserObjectId", C::Int),
    ];

    Schema::new(EntityKind::Resource, fields, vec![Requirement::NonNull("objectId")])
}
