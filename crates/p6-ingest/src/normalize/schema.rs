//! Declarative field tables
//!
//! A [`Schema`] lists, per output field, where the value comes from in the
//! raw node and which coercion applies. Normalizing is a pure walk over the
//! table, so every record of a kind has exactly the same keys in the same
//! order.

use p6_common::{EntityKind, FieldValue, NormalizedRecord, Snapshot, UploadDate};

use super::coerce::{self, NIL_GUID};
use crate::tree::{RawNode, RawValue};

/// Run-scoped inputs threaded into every normalizer call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeContext {
    pub upload_date: UploadDate,
    pub snapshot: Snapshot,
}

impl NormalizeContext {
    pub fn new(upload_date: UploadDate, snapshot: Snapshot) -> Self {
        Self {
            upload_date,
            snapshot,
        }
    }
}

/// Where a field's raw value is found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Attribute or child element of the entity
    Field(&'static str),
    /// Sub-property of a child record, first occurrence when repeated
    Nested(&'static str, &'static str),
    /// Sub-property of the n-th occurrence of a repeated child (zero-based)
    Indexed {
        group: &'static str,
        index: usize,
        property: &'static str,
    },
    /// The run's upload date
    UploadDate,
    /// `Current` or `Baseline`
    Snapshot,
}

/// Coercion applied to a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Int,
    Float,
    Bool,
    Instant,
    Date,
    /// Canonical GUID or null
    Guid,
    /// Canonical GUID after brace stripping, or null
    BracedGuid,
    /// Canonical GUID, nil GUID when absent or invalid
    GuidOrNil,
    /// String, empty when absent
    Text,
    /// String, null when absent or empty
    OptionalText,
    /// Trimmed string, null when blank
    TrimmedText,
    /// Sub-property of a wrapper record, or the scalar itself
    Unwrap(&'static str),
    /// As [`Coercion::Unwrap`] but empty instead of null on a miss
    UnwrapOrEmpty(&'static str),
    /// Scalar text or null
    Scalar,
}

impl Coercion {
    pub fn apply(&self, value: Option<&RawValue>) -> FieldValue {
        let scalar = value.and_then(RawValue::scalar);

        match self {
            Coercion::Int => scalar.and_then(|text| coerce::int_or_null(text)).into(),
            Coercion::Float => scalar.and_then(|text| coerce::float_or_null(text)).into(),
            Coercion::Bool => scalar.and_then(|text| coerce::bool_or_null(text)).into(),
            Coercion::Instant => scalar.and_then(coerce::instant_or_null).into(),
            Coercion::Date => scalar.and_then(coerce::date_or_null).into(),
            Coercion::Guid => scalar.and_then(coerce::guid_or_null).into(),
            Coercion::BracedGuid => scalar.and_then(coerce::braced_guid_or_null).into(),
            Coercion::GuidOrNil => FieldValue::Text(
                scalar
                    .and_then(coerce::guid_or_null)
                    .unwrap_or_else(|| NIL_GUID.to_string()),
            ),
            Coercion::Text => FieldValue::Text(scalar.unwrap_or_default().to_string()),
            Coercion::OptionalText => non_empty(scalar),
            Coercion::TrimmedText => non_empty(scalar.map(str::trim)),
            Coercion::Unwrap(property) => non_empty(unwrap(value, property)),
            Coercion::UnwrapOrEmpty(property) => {
                FieldValue::Text(unwrap(value, property).unwrap_or_default().to_string())
            },
            Coercion::Scalar => non_empty(scalar),
        }
    }
}

fn non_empty(text: Option<&str>) -> FieldValue {
    match text {
        Some(text) if !text.is_empty() => FieldValue::Text(text.to_string()),
        _ => FieldValue::Null,
    }
}

fn unwrap<'a>(value: Option<&'a RawValue>, property: &str) -> Option<&'a str> {
    let value = value?;
    match value {
        RawValue::Text(text) => Some(text),
        _ => value.property(property).and_then(RawValue::scalar),
    }
}

/// One output field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: Source,
    pub coercion: Coercion,
}

impl FieldSpec {
    pub const fn new(name: &'static str, source: Source, coercion: Coercion) -> Self {
        Self {
            name,
            source,
            coercion,
        }
    }

    /// Field read from the same-named source with `coercion`
    pub const fn direct(name: &'static str, source: &'static str, coercion: Coercion) -> Self {
        Self::new(name, Source::Field(source), coercion)
    }

    pub fn resolve(&self, node: &RawNode, ctx: &NormalizeContext) -> FieldValue {
        match self.source {
            Source::UploadDate => FieldValue::Date(ctx.upload_date.date()),
            Source::Snapshot => FieldValue::Text(ctx.snapshot.as_str().to_string()),
            Source::Field(key) => self.coercion.apply(node.get(key)),
            Source::Nested(key, property) => self
                .coercion
                .apply(node.get(key).and_then(|value| value.property(property))),
            Source::Indexed {
                group,
                index,
                property,
            } => self.coercion.apply(
                node.get(group)
                    .and_then(|value| value.items().get(index))
                    .and_then(|item| item.property(property)),
            ),
        }
    }
}

/// Precondition a normalized record must meet to be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    NonNull(&'static str),
    /// Text that is non-empty after trimming
    NonBlank(&'static str),
}

impl Requirement {
    fn check(&self, record: &NormalizedRecord) -> Result<(), ValidationDrop> {
        let (field, ok) = match self {
            Requirement::NonNull(field) => (*field, record.get(field).is_some_and(|v| !v.is_null())),
            Requirement::NonBlank(field) => (
                *field,
                record
                    .get(field)
                    .and_then(FieldValue::as_str)
                    .is_some_and(|text| !text.trim().is_empty()),
            ),
        };
        if ok {
            Ok(())
        } else {
            Err(ValidationDrop {
                kind: record.kind(),
                field,
                requirement: *self,
            })
        }
    }
}

/// A record excluded for failing a required-field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDrop {
    pub kind: EntityKind,
    pub field: &'static str,
    pub requirement: Requirement,
}

impl std::fmt::Display for ValidationDrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.requirement {
            Requirement::NonNull(_) => write!(f, "{} record has no {}", self.kind, self.field),
            Requirement::NonBlank(_) => write!(f, "{} record has a blank {}", self.kind, self.field),
        }
    }
}

/// Field table plus required-field checks for one entity kind
#[derive(Debug, Clone)]
pub struct Schema {
    kind: EntityKind,
    fields: Vec<FieldSpec>,
    required: Vec<Requirement>,
}

impl Schema {
    pub fn new(kind: EntityKind, fields: Vec<FieldSpec>, required: Vec<Requirement>) -> Self {
        Self {
            kind,
            fields,
            required,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|spec| spec.name)
    }

    /// Build the record without running required-field checks
    pub fn project(&self, node: &RawNode, ctx: &NormalizeContext) -> NormalizedRecord {
        let fields = self
            .fields
            .iter()
            .map(|spec| (spec.name, spec.resolve(node, ctx)))
            .collect();
        NormalizedRecord::new(self.kind, fields)
    }

    pub fn validate(&self, record: &NormalizedRecord) -> Result<(), ValidationDrop> {
        self.required.iter().try_for_each(|req| req.check(record))
    }

    pub fn normalize(
        &self,
        node: &RawNode,
        ctx: &NormalizeContext,
    ) -> Result<NormalizedRecord, ValidationDrop> {
        let record = self.project(node, ctx);
        self.validate(&record)?;
        Ok(record)
    }
}
