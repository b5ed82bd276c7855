use crate::error::{ApiError, FieldErrors};

/// Collects per-field validation failures for one request body.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.entry(field.to_string()).or_default().push(message.into());
        }
        self
    }

    pub fn required(&mut self, value: &str, field: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, format!("The {} field is required.", pascal(field)))
    }

    pub fn max_length(&mut self, value: &str, max: usize, field: &str) -> &mut Self {
        self.check(
            value.chars().count() <= max,
            field,
            format!("{} has to be a maximum of {} characters", pascal(field), max),
        )
    }

    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "One or more validation errors occurred.",
                Some(std::mem::take(&mut self.errors)),
            ))
        }
    }
}

fn pascal(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
