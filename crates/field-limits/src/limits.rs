//! Constraint tables and the field limit check
//!
//! A [`FieldLimits`] table lists the fields of one record type in declared
//! order. Each entry knows its bounds, its unit and how to measure the field,
//! so checking a record never needs to inspect the value's type at runtime.

use crate::bounds::{Bound, FieldBounds};
use crate::error::{MetadataError, Result, Violation};
use crate::measure::{Measure, Unit};
use std::fmt;
use tracing::{debug, trace, warn};

type LengthFn<R> = Box<dyn Fn(&R) -> usize + Send + Sync>;

/// One declared field of a record type
pub struct FieldRule<R> {
    name: String,
    bounds: FieldBounds,
    unit: Unit,
    length: LengthFn<R>,
}

impl<R> FieldRule<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Current length of this field in `record`
    pub fn length(&self, record: &R) -> usize {
        (self.length)(record)
    }

    /// Minimum is checked before maximum; the length is only measured when
    /// the field declares a bound.
    fn check(&self, record: &R) -> Option<Violation> {
        if self.bounds.is_unconstrained() {
            return None;
        }

        let actual = self.length(record);
        trace!(field = %self.name, actual, unit = %self.unit, "Checking field length");

        if let Some(min) = self.bounds.min {
            if actual < min {
                return Some(self.violation(Bound::Minimum, min, actual));
            }
        }
        if let Some(max) = self.bounds.max {
            if actual > max {
                return Some(self.violation(Bound::Maximum, max, actual));
            }
        }
        None
    }

    fn violation(&self, bound: Bound, limit: usize, actual: usize) -> Violation {
        Violation {
            field: self.name.clone(),
            bound,
            limit,
            actual,
            unit: self.unit,
        }
    }
}

impl<R> fmt::Debug for FieldRule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

/// Length constraints for every field of a record type, in declared order
pub struct FieldLimits<R> {
    rules: Vec<FieldRule<R>>,
}

impl<R> FieldLimits<R> {
    pub fn builder() -> FieldLimitsBuilder<R> {
        FieldLimitsBuilder::new()
    }

    /// Check `record` against the table, returning the first violation found.
    ///
    /// Fields are visited in declared order and the first offending field
    /// ends the check. A table without fields always passes.
    pub fn check(&self, record: &R) -> Result<()> {
        for rule in &self.rules {
            if let Some(violation) = rule.check(record) {
                debug!(
                    field = %violation.field,
                    bound = %violation.bound,
                    limit = violation.limit,
                    actual = violation.actual,
                    "Field length out of bounds"
                );
                return Err(violation);
            }
        }
        Ok(())
    }

    /// Every violation in `record`, at most one per field, in declared order
    pub fn violations(&self, record: &R) -> Vec<Violation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(record))
            .collect()
    }

    pub fn fields(&self) -> &[FieldRule<R>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<R> Default for FieldLimits<R> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<R> fmt::Debug for FieldLimits<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldLimits")
            .field("rules", &self.rules)
            .finish()
    }
}

/// Bounds as declared, before validation
enum DeclaredBounds {
    Parsed(FieldBounds),
    Text {
        min: Option<String>,
        max: Option<String>,
    },
    Tag(String),
}

impl DeclaredBounds {
    fn resolve(&self) -> std::result::Result<FieldBounds, MetadataError> {
        match self {
            DeclaredBounds::Parsed(bounds) => Ok(*bounds),
            DeclaredBounds::Text { min, max } => {
                FieldBounds::parse(min.as_deref(), max.as_deref())
            }
            DeclaredBounds::Tag(tag) => FieldBounds::from_tag(tag),
        }
    }
}

struct DeclaredField<R> {
    name: String,
    declared: DeclaredBounds,
    unit: Unit,
    length: LengthFn<R>,
}

/// Registers the fields of a record type one at a time
pub struct FieldLimitsBuilder<R> {
    fields: Vec<DeclaredField<R>>,
}

impl<R> FieldLimitsBuilder<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a field with numeric bounds. `project` borrows the field out of
    /// the record; its type decides whether length counts characters or elements.
    pub fn field<M, F>(self, name: impl Into<String>, project: F, bounds: FieldBounds) -> Self
    where
        M: Measure + ?Sized,
        F: for<'r> Fn(&'r R) -> &'r M + Send + Sync + 'static,
    {
        self.declare(name.into(), project, DeclaredBounds::Parsed(bounds))
    }

    /// Declare a field with bounds written as text, e.g. `Some("12")`.
    /// The text is validated by [`try_build`](Self::try_build).
    pub fn field_text<M, F>(
        self,
        name: impl Into<String>,
        project: F,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Self
    where
        M: Measure + ?Sized,
        F: for<'r> Fn(&'r R) -> &'r M + Send + Sync + 'static,
    {
        let declared = DeclaredBounds::Text {
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        };
        self.declare(name.into(), project, declared)
    }

    /// Declare a field with a struct-tag string, e.g. `json:"email" max:"64"`
    pub fn field_tagged<M, F>(self, name: impl Into<String>, project: F, tag: &str) -> Self
    where
        M: Measure + ?Sized,
        F: for<'r> Fn(&'r R) -> &'r M + Send + Sync + 'static,
    {
        self.declare(name.into(), project, DeclaredBounds::Tag(tag.to_string()))
    }

    fn declare<M, F>(mut self, name: String, project: F, declared: DeclaredBounds) -> Self
    where
        M: Measure + ?Sized,
        F: for<'r> Fn(&'r R) -> &'r M + Send + Sync + 'static,
    {
        self.fields.push(DeclaredField {
            name,
            declared,
            unit: M::UNIT,
            length: Box::new(move |record: &R| project(record).measure()),
        });
        self
    }

    /// Validate all declared metadata and produce the table
    pub fn try_build(self) -> std::result::Result<FieldLimits<R>, MetadataError> {
        let mut rules = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            let bounds = match field.declared.resolve() {
                Ok(bounds) => bounds,
                Err(e) => {
                    let e = e.for_field(&field.name);
                    warn!(field = %field.name, error = %e, "Malformed field limit metadata");
                    return Err(e);
                }
            };
            rules.push(FieldRule {
                name: field.name,
                bounds,
                unit: field.unit,
                length: field.length,
            });
        }
        Ok(FieldLimits { rules })
    }

    /// Like [`try_build`](Self::try_build), for tables declared in code.
    ///
    /// # Panics
    ///
    /// Panics if any declared bound or tag is malformed. That is a defect in
    /// the record type's declaration, not in the data being checked.
    pub fn build(self) -> FieldLimits<R> {
        self.try_build()
            .unwrap_or_else(|e| panic!("Invalid field limits: {e}"))
    }
}

impl<R> Default for FieldLimitsBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
