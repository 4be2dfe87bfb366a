//! Declarative client-side validation for form view models.
//!
//! Validation runs before any request is built; a failing model never
//! reaches the network.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, Utc};
use serde_json::Value;

/// Implemented by every view model that is submitted to the API.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Field-keyed validation messages. Field names use the wire (camelCase)
/// spelling so a form can place each message next to its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The first message in field order, for single-line display.
    pub fn first_message(&self) -> Option<&str> {
        self.fields
            .values()
            .flat_map(|messages| messages.iter())
            .map(String::as_str)
            .next()
    }

    /// `{ field: [messages] }`.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| {
                    let messages = v.iter().cloned().map(Value::String).collect();
                    (k.clone(), Value::Array(messages))
                })
                .collect(),
        )
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates rule failures for one model.
///
/// ```
/// use campus_core::resources::Rules;
///
/// let mut rules = Rules::new();
/// rules.required("roomNumber", "").range("capacity", 0, 1, 20);
/// let errors = rules.finish().unwrap_err();
/// assert_eq!(errors.field("roomNumber"), ["Room number is required"]);
/// ```
#[derive(Debug, Default)]
pub struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors
                .add(field, format!("{} is required", humanize(field)));
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors.add(
                field,
                format!("{} must be at most {max} characters", humanize(field)),
            );
        }
        self
    }

    /// Checks format only when a non-empty value is present.
    pub fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = present(value)
            && !is_email(value)
        {
            self.errors.add(field, "Enter a valid email address");
        }
        self
    }

    /// Checks format only when a non-empty value is present.
    pub fn phone(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = present(value)
            && !is_phone(value)
        {
            self.errors.add(field, "Enter a valid phone number");
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value <= 0.0 {
            self.errors.add(
                field,
                format!("{} must be greater than zero", humanize(field)),
            );
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value < 0.0 {
            self.errors
                .add(field, format!("{} must not be negative", humanize(field)));
        }
        self
    }

    pub fn range(&mut self, field: &str, value: u32, min: u32, max: u32) -> &mut Self {
        if !(min..=max).contains(&value) {
            self.errors.add(
                field,
                format!("{} must be between {min} and {max}", humanize(field)),
            );
        }
        self
    }

    pub fn not_future(&mut self, field: &str, value: Option<NaiveDate>) -> &mut Self {
        if let Some(date) = value
            && date > Utc::now().date_naive()
        {
            self.errors.add(
                field,
                format!("{} cannot be in the future", humanize(field)),
            );
        }
        self
    }

    pub fn not_empty<T>(&mut self, field: &str, values: &[T]) -> &mut Self {
        if values.is_empty() {
            self.errors
                .add(field, format!("Select at least one {}", singular(field)));
        }
        self
    }

    /// Records `message` against `field` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.add(field, message);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .collect::<Vec<_>>()
            .split_last()
            .is_some_and(|(tld, rest)| {
                tld.len() >= 2 && !rest.is_empty() && rest.iter().all(|p| !p.is_empty())
            })
}

fn is_phone(value: &str) -> bool {
    let body = value.strip_prefix('+').unwrap_or(value);
    let digits = body.chars().filter(char::is_ascii_digit).count();
    body.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
        && (7..=15).contains(&digits)
}

/// `roomNumber` → `Room number`.
fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    if let Some(stripped) = out.strip_suffix(" ids").or_else(|| out.strip_suffix(" id")) {
        return stripped.to_string();
    }
    out
}

/// `mealIds` → `meal`.
fn singular(field: &str) -> String {
    let human = humanize(field).to_lowercase();
    human.strip_suffix('s').unwrap_or(&human).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_field_names() {
        assert_eq!(humanize("roomNumber"), "Room number");
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("guardianId"), "Guardian");
        assert_eq!(singular("mealIds"), "meal");
    }

    #[test]
    fn email_format() {
        assert!(is_email("warden@example.edu"));
        assert!(is_email("a.b+c@mail.example.co"));
        assert!(!is_email("warden"));
        assert!(!is_email("warden@localhost"));
        assert!(!is_email("war den@example.edu"));
        assert!(!is_email("@example.edu"));
        assert!(!is_email("a@@example.edu"));
    }

    #[test]
    fn phone_format() {
        assert!(is_phone("+880 1712-345678"));
        assert!(is_phone("(555) 123-4567"));
        assert!(!is_phone("12345"));
        assert!(!is_phone("call me"));
    }

    #[test]
    fn optional_fields_skip_format_checks() {
        let mut rules = Rules::new();
        rules.email("email", None).phone("phone", Some("  "));
        assert!(rules.finish().is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut rules = Rules::new();
        rules
            .required("name", " ")
            .positive("price", 0.0)
            .range("durationDays", 400, 1, 366)
            .not_empty::<String>("mealIds", &[]);
        let errors = rules.finish().unwrap_err();
        assert_eq!(errors.fields().count(), 4);
        assert_eq!(errors.field("price"), ["Price must be greater than zero"]);
        assert_eq!(errors.field("mealIds"), ["Select at least one meal"]);
        assert_eq!(errors.first_message(), Some("Duration days must be between 1 and 366"));
    }

    #[test]
    fn future_dates_are_rejected() {
        let tomorrow = Utc::now().date_naive().succ_opt();
        let mut rules = Rules::new();
        rules.not_future("dateOfBirth", tomorrow);
        let errors = rules.finish().unwrap_err();
        assert_eq!(
            errors.field("dateOfBirth"),
            ["Date of birth cannot be in the future"]
        );
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "Name is required");
        errors.add("email", "Enter a valid email address");
        assert_eq!(
            errors.to_string(),
            "email: Enter a valid email address; name: Name is required"
        );
    }
}
