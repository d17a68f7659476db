//! # Property Validation
//!
//! Declarative rules for create/update bodies, list query parameters and the
//! `:id` path parameter.
//!
//! Every validator is exhaustive: all violations are collected, in field
//! declaration order, and reported together. Unknown fields come last,
//! sorted by name. Success yields the typed, defaulted value.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::errors::ValidationError;
use super::model::{ListFilter, NewProperty, PropertyId, PropertyStatus, PropertyUpdate};

/// Result type for validators
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for the `limit` query parameter
pub const MAX_LIMIT: usize = 100;

const STATUS_CHOICES: &str = "available, rented, maintenance";

// ==================
// Rules
// ==================

/// Whether a body must be complete (create) or may be partial (update)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// String field constraints
struct TextRule {
    field: &'static str,
    label: &'static str,
    max_chars: usize,
    /// Required on create and never empty
    required: bool,
}

const TITLE: TextRule = TextRule {
    field: "title",
    label: "Title",
    max_chars: 255,
    required: true,
};

const DESCRIPTION: TextRule = TextRule {
    field: "description",
    label: "Description",
    max_chars: 1000,
    required: false,
};

const ADDRESS: TextRule = TextRule {
    field: "address",
    label: "Address",
    max_chars: 500,
    required: true,
};

const PRICE_FIELD: &str = "price";
const STATUS_FIELD: &str = "status";

const BODY_FIELDS: [&str; 5] = [TITLE.field, DESCRIPTION.field, ADDRESS.field, PRICE_FIELD, STATUS_FIELD];

/// Integer query parameter constraints
struct IntRule {
    field: &'static str,
    label: &'static str,
    min: f64,
    max: Option<f64>,
    too_small: &'static str,
    too_large: &'static str,
}

const LIMIT: IntRule = IntRule {
    field: "limit",
    label: "Limit",
    min: 1.0,
    max: Some(MAX_LIMIT as f64),
    too_small: "Limit must be at least 1",
    too_large: "Limit must be no more than 100",
};

const OFFSET: IntRule = IntRule {
    field: "offset",
    label: "Offset",
    min: 0.0,
    max: None,
    too_small: "Offset must be 0 or greater",
    too_large: "",
};

const QUERY_FIELDS: [&str; 3] = [STATUS_FIELD, LIMIT.field, OFFSET.field];

/// Collects violation messages for one input
#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Reject every key not in `allowed`
    fn reject_unknown<'a>(&mut self, keys: impl Iterator<Item = &'a String>, allowed: &[&str]) {
        let mut unknown: Vec<&String> = keys.filter(|k| !allowed.contains(&k.as_str())).collect();
        unknown.sort();
        for key in unknown {
            self.push(format!("\"{}\" is not allowed", key));
        }
    }

    /// Error for an input already known to be invalid
    fn into_error(self) -> ValidationError {
        ValidationError::from_details(self.0)
            .unwrap_or_else(|| ValidationError::single("Request body is invalid"))
    }

    fn finish<T>(self, value: T) -> ValidationResult<T> {
        match ValidationError::from_details(self.0) {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

// ==================
// Public validators
// ==================

/// Validate a create body. `status` defaults to `available`.
pub fn validate_create(body: &Value) -> ValidationResult<NewProperty> {
    let obj = as_object(body)?;
    let mut violations = Violations::default();

    let title = check_text(obj, &TITLE, Mode::Create, &mut violations);
    let description = check_text(obj, &DESCRIPTION, Mode::Create, &mut violations);
    let address = check_text(obj, &ADDRESS, Mode::Create, &mut violations);
    let price = check_price(obj, Mode::Create, &mut violations);
    let status = check_status(obj, &mut violations);
    violations.reject_unknown(obj.keys(), &BODY_FIELDS);

    match (title, address, price) {
        (Some(title), Some(address), Some(price)) => violations.finish(NewProperty {
            title,
            description,
            address,
            price,
            status: status.unwrap_or_default(),
        }),
        _ => Err(violations.into_error()),
    }
}

/// Validate a partial update body. At least one field must be present.
pub fn validate_update(body: &Value) -> ValidationResult<PropertyUpdate> {
    let obj = as_object(body)?;
    let mut violations = Violations::default();

    if obj.is_empty() {
        violations.push("At least one field must be provided for update");
    }

    let update = PropertyUpdate {
        title: check_text(obj, &TITLE, Mode::Update, &mut violations),
        description: check_text(obj, &DESCRIPTION, Mode::Update, &mut violations),
        address: check_text(obj, &ADDRESS, Mode::Update, &mut violations),
        price: check_price(obj, Mode::Update, &mut violations),
        status: check_status(obj, &mut violations),
    };
    violations.reject_unknown(obj.keys(), &BODY_FIELDS);

    violations.finish(update)
}

/// Validate list query parameters
pub fn validate_query(params: &HashMap<String, String>) -> ValidationResult<ListFilter> {
    let mut violations = Violations::default();

    let status = params.get(STATUS_FIELD).and_then(|raw| {
        let parsed = PropertyStatus::parse(raw);
        if parsed.is_none() {
            violations.push(format!("Status filter must be one of: {}", STATUS_CHOICES));
        }
        parsed
    });
    let limit = params
        .get(LIMIT.field)
        .and_then(|raw| check_int(raw, &LIMIT, &mut violations));
    let offset = params
        .get(OFFSET.field)
        .and_then(|raw| check_int(raw, &OFFSET, &mut violations));
    violations.reject_unknown(params.keys(), &QUERY_FIELDS);

    violations.finish(ListFilter {
        status,
        limit,
        offset,
    })
}

/// Validate the `:id` path segment
pub fn validate_id(raw: &str) -> ValidationResult<PropertyId> {
    if let Ok(id) = raw.parse::<u64>() {
        return PropertyId::new(id)
            .ok_or_else(|| ValidationError::single("Property ID must be a positive number"));
    }

    let number = parse_number(raw)
        .ok_or_else(|| ValidationError::single("Property ID must be a valid number"))?;
    if number.fract() != 0.0 {
        return Err(ValidationError::single("Property ID must be an integer"));
    }
    if number <= 0.0 {
        return Err(ValidationError::single("Property ID must be a positive number"));
    }

    // Integral but outside u64 syntax, e.g. "1e3"; saturates for huge values.
    PropertyId::new(number as u64)
        .ok_or_else(|| ValidationError::single("Property ID must be a positive number"))
}

// ==================
// Field checks
// ==================

fn as_object(body: &Value) -> ValidationResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ValidationError::single("Request body must be a JSON object"))
}

fn check_text(
    obj: &Map<String, Value>,
    rule: &TextRule,
    mode: Mode,
    violations: &mut Violations,
) -> Option<String> {
    match obj.get(rule.field) {
        None => {
            if rule.required && mode == Mode::Create {
                violations.push(format!("{} is required", rule.label));
            }
            None
        }
        Some(Value::String(s)) if s.is_empty() && rule.required => {
            match mode {
                Mode::Create => violations.push(format!("{} is required", rule.label)),
                Mode::Update => violations.push(format!("{} cannot be empty", rule.label)),
            }
            None
        }
        Some(Value::String(s)) => {
            if s.chars().count() > rule.max_chars {
                violations.push(format!(
                    "{} must be no more than {} characters long",
                    rule.label, rule.max_chars
                ));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(_) => {
            violations.push(format!("\"{}\" must be a string", rule.field));
            None
        }
    }
}

fn check_price(obj: &Map<String, Value>, mode: Mode, violations: &mut Violations) -> Option<f64> {
    let value = match obj.get(PRICE_FIELD) {
        None => {
            if mode == Mode::Create {
                violations.push("Price is required");
            }
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        // Numeric strings are accepted and converted.
        Some(Value::String(s)) => parse_number(s),
        Some(_) => None,
    };

    match value {
        None => {
            violations.push("Price must be a valid number");
            None
        }
        Some(price) if price <= 0.0 => {
            violations.push("Price must be a positive number");
            None
        }
        Some(price) => Some(price),
    }
}

fn check_status(obj: &Map<String, Value>, violations: &mut Violations) -> Option<PropertyStatus> {
    let raw = obj.get(STATUS_FIELD)?;
    let parsed = raw.as_str().and_then(PropertyStatus::parse);
    if parsed.is_none() {
        violations.push(format!("Status must be one of: {}", STATUS_CHOICES));
    }
    parsed
}

fn check_int(raw: &str, rule: &IntRule, violations: &mut Violations) -> Option<usize> {
    let Some(number) = parse_number(raw) else {
        violations.push(format!("\"{}\" must be a number", rule.field));
        return None;
    };
    if number.fract() != 0.0 {
        violations.push(format!("{} must be an integer", rule.label));
        return None;
    }
    if number < rule.min {
        violations.push(rule.too_small);
        return None;
    }
    if rule.max.is_some_and(|max| number > max) {
        violations.push(rule.too_large);
        return None;
    }
    Some(number as usize)
}

/// Finite decimal number, surrounding whitespace ignored
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
