//! Field validators.
//!
//! Every validator is a total predicate over the raw input: malformed input
//! returns `false`, never an error. Blank input (empty or whitespace only)
//! fails every validator; callers report it as a missing value before
//! running format checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::{Field, NewClient};
use crate::error::{Error, Result};

/// A compiled validation pattern for one field.
#[derive(Debug)]
pub struct FieldPattern {
    /// The field this pattern validates.
    pub field: Field,

    /// Description of the accepted format.
    pub description: &'static str,

    regex: Regex,
}

impl FieldPattern {
    fn new(field: Field, description: &'static str, pattern: &str) -> Self {
        Self {
            field,
            description,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the whole input matches this pattern.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        !is_blank(input) && self.regex.is_match(input)
    }
}

static NAME: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        Field::Name,
        "Latin letters and spaces only",
        r"^[a-zA-Z\s]+$",
    )
});

static EMAIL: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        Field::Email,
        "local@domain.tld with a 2 to 6 letter top-level domain",
        r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$",
    )
});

// Optional Spanish prefix, then 6 or 7 and eight more digits. Spaces and
// hyphens may appear between any of the digits.
static PHONE: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        Field::Phone,
        "nine digits starting with 6 or 7, optional +34/0034/34 prefix",
        r"^(\+34|0034|34)?[ -]*(6|7)[ -]*([0-9][ -]*){8}$",
    )
});

static COMPANY_CODE: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(Field::CompanyCode, "exactly 6 digits", r"^[0-9]{6}$")
});

/// Returns `true` if the input is empty or only whitespace.
#[must_use]
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Get the pattern used for a field.
#[must_use]
pub fn pattern_for(field: Field) -> &'static FieldPattern {
    match field {
        Field::Name => &*NAME,
        Field::Email => &*EMAIL,
        Field::Phone => &*PHONE,
        Field::CompanyCode => &*COMPANY_CODE,
    }
}

/// Validate a name: Latin letters and whitespace, nothing else.
#[must_use]
pub fn validate_name(input: &str) -> bool {
    NAME.matches(input)
}

/// Validate an email address.
#[must_use]
pub fn validate_email(input: &str) -> bool {
    EMAIL.matches(input)
}

/// Validate a mobile phone number.
#[must_use]
pub fn validate_phone(input: &str) -> bool {
    PHONE.matches(input)
}

/// Validate a company code.
#[must_use]
pub fn validate_company_code(input: &str) -> bool {
    COMPANY_CODE.matches(input)
}

/// Validate the value of any field.
#[must_use]
pub fn validate_field(field: Field, input: &str) -> bool {
    pattern_for(field).matches(input)
}

/// Check every field of a client, reporting the first rejected one.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first field that is blank or
/// malformed.
pub fn check_client(client: &NewClient) -> Result<()> {
    for field in Field::ALL {
        let value = client.get(field);
        if is_blank(value) {
            return Err(Error::validation(field, "value is required"));
        }
        if !validate_field(field, value) {
            return Err(Error::validation(field, pattern_for(field).description));
        }
    }
    Ok(())
}
