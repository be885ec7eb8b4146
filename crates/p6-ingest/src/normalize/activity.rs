//! Activity field table

use p6_common::EntityKind;

use super::schema::{Coercion as C, FieldSpec, Requirement, Schema, Source};

const CODE_SLOTS: usize = 9;

const CODE_TYPE_FIELDS: [&str; CODE_SLOTS] = [
    "codeTypeObjectId1",
    "codeTypeObjectId2",
    "codeTypeObjectId3",
    "codeTypeObjectId4",
    "codeTypeObjectId5",
    "codeTypeObjectId6",
    "codeTypeObjectId7",
    "codeTypeObjectId8",
    "codeTypeObjectId9",
];

const CODE_VALUE_FIELDS: [&str; CODE_SLOTS] = [
    "codeValueObjectId1",
    "codeValueObjectId2",
    "codeValueObjectId3",
    "codeValueObjectId4",
    "codeValueObjectId5",
    "codeValueObjectId6",
    "codeValueObjectId7",
    "codeValueObjectId8",
    "codeValueObjectId9",
];

const INSTANT_FIELDS: [(&str, &str); 15] = [
    ("startDate", "StartDate"),
    ("finishDate", "FinishDate"),
    ("plannedStartDate", "PlannedStartDate"),
    ("plannedFinishDate", "PlannedFinishDate"),
    ("remainingEarlyStartDate", "RemainingEarlyStartDate"),
    ("remainingEarlyFinishDate", "RemainingEarlyFinishDate"),
    ("remainingLateStartDate", "RemainingLateStartDate"),
    ("remainingLateFinishDate", "RemainingLateFinishDate"),
    ("actualStartDate", "ActualStartDate"),
    ("actualFinishDate", "ActualFinishDate"),
    ("expectedFinishDate", "ExpectedFinishDate"),
    ("primaryConstraintDate", "PrimaryConstraintDate"),
    ("secondaryConstraintDate", "SecondaryConstraintDate"),
    ("suspendDate", "SuspendDate"),
    ("resumeDate", "ResumeDate"),
];

const TEXT_FIELDS: [(&str, &str); 7] = [
    ("durationType", "DurationType"),
    ("primaryConstraintType", "PrimaryConstraintType"),
    ("secondaryConstraintType", "SecondaryConstraintType"),
    ("percentCompleteType", "PercentCompleteType"),
    ("levelingPriority", "LevelingPriority"),
    ("notesToResources", "NotesToResources"),
    ("feedback", "Feedback"),
];

const BOOL_FIELDS: [(&str, &str); 3] = [
    ("isNewFeedback", "IsNewFeedback"),
    ("reviewRequired", "ReviewRequired"),
    ("autoComputeActuals", "AutoComputeActuals"),
];

const FLOAT_FIELDS: [(&str, &str); 32] = [
    ("estimatedWeight", "EstimatedWeight"),
    ("durationPercentComplete", "DurationPercentComplete"),
    ("scopePercentComplete", "ScopePercentComplete"),
    ("unitsPercentComplete", "UnitsPercentComplete"),
    ("nonLaborUnitsPerComplete", "NonLaborUnitsPercentComplete"),
    ("percentComplete", "PercentComplete"),
    ("physicalPercentComplete", "PhysicalPercentComplete"),
    ("actualDuration", "ActualDuration"),
    ("plannedDuration", "PlannedDuration"),
    ("remainingDuration", "RemainingDuration"),
    ("atCompletionDuration", "AtCompletionDuration"),
    ("plannedLaborUnits", "PlannedLaborUnits"),
    ("remainingLaborUnits", "RemainingLaborUnits"),
    ("atCompletionLaborUnits", "AtCompletionLaborUnits"),
    ("actualLaborUnits", "ActualLaborUnits"),
    ("actualThisPeriodLaborUnits", "ActualThisPeriodLaborUnits"),
    ("plannedNonLaborUnits", "PlannedNonLaborUnits"),
    ("remainingNonLaborUnits", "RemainingNonLaborUnits"),
    ("atCompletionNonLaborUnits", "AtCompletionNonLaborUnits"),
    ("actualNonLaborUnits", "ActualNonLaborUnits"),
    ("actThisPeriodNonLaborUnits", "ActualThisPeriodNonLaborUnits"),
    ("plannedLaborCost", "PlannedLaborCost"),
    ("remainingLaborCost", "RemainingLaborCost"),
    ("atCompletionLaborCost", "AtCompletionLaborCost"),
    ("actualLaborCost", "ActualLaborCost"),
    ("actualThisPeriodLaborCost", "ActualThisPeriodLaborCost"),
    ("plannedNonLaborCost", "PlannedNonLaborCost"),
    ("remainingNonLaborCost", "RemainingNonLaborCost"),
    ("atCompletionNonLaborCost", "AtCompletionNonLaborCost"),
    ("actualNonLaborCost", "ActualNonLaborCost"),
    ("actThisPeriodNonLaborCost", "ActualThisPeriodNonLaborCost"),
    ("atCompletionExpenseCost", "AtCompletionExpenseCost"),
];

pub(crate) fn schema() -> Schema {
    let mut fields = vec![
        FieldSpec::direct("objectId", "ObjectId", C::Int),
        FieldSpec::direct("guid", "GUID", C::Text),
        FieldSpec::direct("id", "Id", C::Text),
        FieldSpec::direct("name", "Name", C::Text),
        FieldSpec::direct("status", "Status", C::Text),
        FieldSpec::direct("type", "Type", C::Text),
        FieldSpec::direct("calendarObjectId", "CalendarObjectId", C::Int),
        FieldSpec::direct("projectObjectId", "ProjectObjectId", C::Int),
        FieldSpec::direct("wbsObjectId", "WBSObjectId", C::Int),
    ];

    fields.extend(INSTANT_FIELDS.iter().map(|&(name, src)| FieldSpec::direct(name, src, C::Instant)));
    fields.extend(TEXT_FIELDS.iter().map(|&(name, src)| FieldSpec::direct(name, src, C::Text)));
    fields.extend(BOOL_FIELDS.iter().map(|&(name, src)| FieldSpec::direct(name, src, C::Bool)));
    fields.extend(FLOAT_FIELDS.iter().map(|&(name, src)| FieldSpec::direct(name, src, C::Float)));
    fields.push(FieldSpec::direct("primaryResourceObjectId", "PrimaryResourceObjectId", C::Int));

    fields.push(FieldSpec::new("udfTypeObjectId", Source::Nested("UDF", "TypeObjectId"), C::Int));
    fields.push(FieldSpec::new("udfTextValue", Source::Nested("UDF", "TextValue"), C::Text));

    for index in 0..CODE_SLOTS {
        fields.push(FieldSpec::new(
            CODE_TYPE_FIELDS[index],
            Source::Indexed {
                group: "Code",
                index,
                property: "TypeObjectId",
            },
            C::Int,
        ));
        fields.push(FieldSpec::new(
            CODE_VALUE_FIELDS[index],
            Source::Indexed {
                group: "Code",
                index,
                property: "ValueObjectId",
            },
            C::Int,
        ));
    }

    fields.push(FieldSpec::new("uploadDate", Source::UploadDate, C::Date));
    fields.push(FieldSpec::new("recordSource", Source::Snapshot, C::Text));

    Schema::new(EntityKind::Activity, fields, vec![Requirement::NonNull("objectId")])
}
