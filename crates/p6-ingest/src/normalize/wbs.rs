//! WBS field table

use p6_common::EntityKind;

use super::schema::{Coercion as C, FieldSpec, Requirement, Schema, Source};

pub(crate) fn schema() -> Schema {
    let direct = |name: &'static str, coercion| FieldSpec::direct(name, name, coercion);

    let fields = vec![
        direct("ProjectObjectId", C::OptionalText),
        direct("ObjectId", C::OptionalText),
        direct("ParentObjectId", C::Int),
        direct("AnticipatedFinishDate", C::Date),
        direct("AnticipatedStartDate", C::Date),
        direct("Code", C::Text),
        direct("EarnedValueComputeType", C::Text),
        direct("EarnedValueETCComputeType", C::Text),
        direct("EarnedValueETCUserValue", C::Float),
        direct("EarnedValueUserPercent", C::Float),
        direct("IndependentETCLaborUnits", C::Float),
        direct("IndependentETCTotalCost", C::Float),
        direct("Name", C::Text),
        direct("OBSObjectId", C::OptionalText),
        direct("OriginalBudget", C::Float),
        direct("SequenceNumber", C::Int),
        direct("Status", C::OptionalText),
        FieldSpec::new("UploadDate", Source::UploadDate, C::Date),
        direct("WBSCategoryObjectId", C::Int),
    ];

    Schema::new(
        EntityKind::Wbs,
        fields,
        vec![Requirement::NonNull("ObjectId"), Requirement::NonBlank("Code")],
    )
}
