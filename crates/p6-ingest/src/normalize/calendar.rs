//! Calendar expansion into flat day rules
//!
//! A calendar node describes a standard work week plus holiday/exception
//! dates, each with zero or more work-time intervals. Every
//! (day-or-date, interval) pair becomes one rule record; a day without
//! intervals still yields one rule with empty times.

use p6_common::{EntityKind, FieldValue, NormalizedRecord};

use super::schema::{Coercion as C, NormalizeContext, Requirement, ValidationDrop};
use crate::tree::{RawNode, RawValue};

/// Output fields of a calendar rule, in record order
pub const RULE_FIELDS: [&str; 11] = [
    "Type",
    "CalendarName",
    "ObjectId",
    "HoursPerDay",
    "HoursPerWeek",
    "HoursPerMonth",
    "HoursPerYear",
    "DayOrDate",
    "StartTime",
    "FinishTime",
    "UploadDate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    Work,
    Holiday,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Work => "Work",
            RuleType::Holiday => "Holiday",
        }
    }
}

/// Calendar-level values repeated on every rule
struct Header {
    name: FieldValue,
    object_id: FieldValue,
    hours: [FieldValue; 4],
}

impl Header {
    fn read(node: &RawNode) -> Self {
        Self {
            name: C::Text.apply(node.get("Name")),
            object_id: C::Int.apply(node.get("ObjectId")),
            hours: ["HoursPerDay", "HoursPerWeek", "HoursPerMonth", "HoursPerYear"]
                .map(|key| C::Float.apply(node.get(key))),
        }
    }
}

/// Repeated child `group/entry` of a node, empty when absent
fn entries<'a>(node: &'a RawNode, group: &str, entry: &str) -> &'a [RawValue] {
    node.get(group)
        .and_then(|value| value.property(entry))
        .map(RawValue::items)
        .unwrap_or_default()
}

fn scalar_text(value: &RawValue, property: &str) -> String {
    value
        .property(property)
        .and_then(RawValue::scalar)
        .unwrap_or_default()
        .to_string()
}

/// Expand one calendar into its day rules
pub fn expand(
    node: &RawNode,
    ctx: &NormalizeContext,
) -> Result<Vec<NormalizedRecord>, ValidationDrop> {
    let header = Header::read(node);
    if header.object_id.is_null() {
        return Err(ValidationDrop {
            kind: EntityKind::Calendar,
            field: "ObjectId",
            requirement: Requirement::NonNull("ObjectId"),
        });
    }

    let days = entries(node, "StandardWorkWeek", "StandardWorkHours")
        .iter()
        .map(|day| (RuleType::Work, scalar_text(day, "DayOfWeek"), day));
    let exceptions = entries(node, "HolidayOrExceptions", "HolidayOrException")
        .iter()
        .map(|exception| (RuleType::Holiday, scalar_text(exception, "Date"), exception));

    let mut rules = Vec::new();
    for (rule_type, day_or_date, entry) in days.chain(exceptions) {
        let work_times = entry.property("WorkTime").map(RawValue::items).unwrap_or_default();

        if work_times.is_empty() {
            rules.push(rule(&header, ctx, rule_type, &day_or_date, String::new(), String::new()));
            continue;
        }
        for work_time in work_times {
            rules.push(rule(
                &header,
                ctx,
                rule_type,
                &day_or_date,
                scalar_text(work_time, "Start"),
                scalar_text(work_time, "Finish"),
            ));
        }
    }

    Ok(rules)
}

fn rule(
    header: &Header,
    ctx: &NormalizeContext,
    rule_type: RuleType,
    day_or_date: &str,
    start: String,
    finish: String,
) -> NormalizedRecord {
    let [per_day, per_week, per_month, per_year] = header.hours.clone();
    let values = [
        FieldValue::Text(rule_type.as_str().to_string()),
        header.name.clone(),
        header.object_id.clone(),
        per_day,
        per_week,
        per_month,
        per_year,
        FieldValue::Text(day_or_date.to_string()),
        FieldValue::Text(start),
        FieldValue::Text(finish),
        FieldValue::Date(ctx.upload_date.date()),
    ];
    NormalizedRecord::new(EntityKind::Calendar, RULE_FIELDS.into_iter().zip(values).collect())
}
