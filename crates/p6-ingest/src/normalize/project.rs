//! Project field table, shared by current and baseline projects

use p6_common::EntityKind;

use super::schema::{Coercion as C, FieldSpec, Requirement, Schema, Source};

pub(crate) fn schema() -> Schema {
    let field = FieldSpec::direct;

    let fields = vec![
        field("objectId", "ObjectId", C::Int),
        field("wbsObjectId", "WBSObjectId", C::Int),
        field("actDefCalendarObjectId", "ActivityDefaultCalendarObjectId", C::Int),
        field("actDefCostAccountObjectId", "ActivityDefaultCostAccountObjectId", C::Int),
        field("actDefPercentCompleteType", "ActivityDefaultPercentCompleteType", C::Text),
        field("actDefaultPricePerUnit", "ActivityDefaultPricePerUnit", C::Float),
        field("actIdBasedOnSelectedAct", "ActivityIdBasedOnSelectedActivity", C::Bool),
        field(
            "actPerComplBaseOnActStep",
            "ActivityPercentCompleteBasedOnActivitySteps",
            C::Bool,
        ),
        field("activityDefaultActivityType", "ActivityDefaultActivityType", C::Text),
        field("activityDefaultDurationType", "ActivityDefaultDurationType", C::Text),
        field("activityIdIncrement", "ActivityIdIncrement", C::Int),
        field("activityIdPrefix", "ActivityIdPrefix", C::Text),
        field("activityIdSuffix", "ActivityIdSuffix", C::Text),
        field("addActualToRemaining", "AddActualToRemaining", C::Bool),
        field("addedBy", "AddedBy", C::Text),
        field("allowNegActualUnitsFlag", "AllowNegativeActualUnitsFlag", C::Bool),
        field("allowStatusReview", "AllowStatusReview", C::Bool),
        field("annualDiscountRate", "AnnualDiscountRate", C::Float),
        field("anticipatedFinishDate", "AnticipatedFinishDate", C::Date),
        field("anticipatedStartDate", "AnticipatedStartDate", C::Date),
        field("assigDefaultDrivingFlag", "AssignmentDefaultDrivingFlag", C::Bool),
        field("assignmentDefaultRateType", "AssignmentDefaultRateType", C::Text),
        field("checkOutStatus", "CheckOutStatus", C::Bool),
        field("costQuantityRecalculateFlag", "CostQuantityRecalculateFlag", C::Bool),
        field("criticalActivityFloatLimit", "CriticalActivityFloatLimit", C::Int),
        field("criticalActivityPathType", "CriticalActivityPathType", C::Text),
        field("currBLProjectObjectId", "CurrentBaselineProjectObjectId", C::Int),
        field("dataDate", "DataDate", C::Date),
        field("dateAdded", "DateAdded", C::Date),
        field("defaultPriceTimeUnits", "DefaultPriceTimeUnits", C::Text),
        field("discountApplicationPeriod", "DiscountApplicationPeriod", C::Text),
        field("earnedValueComputeType", "EarnedValueComputeType", C::Text),
        field("earnedValueETCComputeType", "EarnedValueETCComputeType", C::Text),
        field("earnedValueETCUserValue", "EarnedValueETCUserValue", C::Float),
        field("earnedValueUserPercent", "EarnedValueUserPercent", C::Float),
        field("enableSummarization", "EnableSummarization", C::Bool),
        field("financialPeriodTemplateId", "FinancialPeriodTemplateId", C::Int),
        field("fiscalYearStartMonth", "FiscalYearStartMonth", C::Int),
        field("guid", "GUID", C::GuidOrNil),
        field("id", "Id", C::Text),
        field("independentETCLaborUnits", "IndependentETCLaborUnits", C::Float),
        field("independentETCTotalCost", "IndependentETCTotalCost", C::Float),
        field("lastFinPeriodObjectId", "LastFinancialPeriodObjectId", C::Int),
        field("levelingPriority", "LevelingPriority", C::Int),
        field("linkActualToActThisPeriod", "LinkActualToActualThisPeriod", C::Bool),
        field("linkPerCompleteWithActual", "LinkPercentCompleteWithActual", C::Bool),
        field("linkPlannedAndAtComplFlag", "LinkPlannedAndAtCompletionFlag", C::Bool),
        field("mustFinishByDate", "MustFinishByDate", C::Date),
        field("name", "Name", C::Text),
        field("obsObjectId", "OBSObjectId", C::Int),
        field("originalBudget", "OriginalBudget", C::Float),
        field("parentEPSObjectId", "ParentEPSObjectId", C::Int),
        field("plannedStartDate", "PlannedStartDate", C::Date),
        field(
            "primResCanMarkActAsCompl",
            "PrimaryResourcesCanMarkActivitiesAsCompleted",
            C::Bool,
        ),
        field("projectForecastStartDate", "ProjectForecastStartDate", C::Date),
        field(
            "resCanAssignThemselToAct",
            "ResourcesCanAssignThemselvesToActivities",
            C::Bool,
        ),
        field(
            "resCanBeAssToSameActMoreOnce",
            "ResourceCanBeAssignedToSameActivityMoreThanOnce",
            C::Bool,
        ),
        field("resetPlannToRemainingFlag", "ResetPlannedToRemainingFlag", C::Bool),
        field("scheduledFinishDate", "ScheduledFinishDate", C::Date),
        field("status", "Status", C::Text),
        field("strategicPriority", "StrategicPriority", C::Int),
        field("summarizeToWBSLevel", "SummarizeToWBSLevel", C::Int),
        field("summaryLevel", "SummaryLevel", C::Int),
        FieldSpec::new("uploadDate", Source::UploadDate, C::Date),
        field("useProjBLForEarnedValue", "UseProjectBaselineForEarnedValue", C::Bool),
        field("wbsCodeSeparator", "WBSCodeSeparator", C::Text),
        field("webSiteRootDirectory", "WebSiteRootDirectory", C::UnwrapOrEmpty("Path")),
        field("webSiteURL", "WebSiteURL", C::UnwrapOrEmpty("Url")),
    ];

    Schema::new(EntityKind::Project, fields, vec![Requirement::NonNull("objectId")])
}
