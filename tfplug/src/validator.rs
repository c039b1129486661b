//! Attribute validators run during `validate`

use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

/// Validator performs validation on attribute values during planning
pub trait Validator: Send + Sync {
    /// Human-readable description
    fn description(&self) -> String;

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse;

    /// Validators live in schemas, which are cloned freely
    fn boxed_clone(&self) -> Box<dyn Validator>;
}

/// Request for validators
pub struct ValidatorRequest {
    pub config_value: DynamicValue,
    pub path: AttributePath,
}

/// Response from validators
pub struct ValidatorResponse {
    pub diagnostics: Vec<Diagnostic>,
}

/// Accepts whole numbers from a fixed list
#[derive(Debug, Clone)]
pub struct IntOneOf {
    allowed: Vec<i64>,
}

impl IntOneOf {
    pub fn new(allowed: &[i64]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }
}

impl Validator for IntOneOf {
    fn description(&self) -> String {
        format!("value must be one of: {:?}", self.allowed)
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = vec![];

        if let Dynamic::Number(n) = request.config_value.value {
            let whole = n.fract() == 0.0;
            if !whole || !self.allowed.contains(&(n as i64)) {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {} {}, got: {}",
                            request.path,
                            self.description(),
                            n
                        ),
                    )
                    .with_attribute(request.path),
                );
            }
        }

        ValidatorResponse { diagnostics }
    }

    fn boxed_clone(&self) -> Box<dyn Validator> {
        Box::new(self.clone())
    }
}

/// Accepts strings from a fixed list
#[derive(Debug, Clone)]
pub struct StringOneOf {
    allowed: Vec<String>,
}

impl StringOneOf {
    pub fn new(allowed: &[&str]) -> Self {
        Self {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Validator for StringOneOf {
    fn description(&self) -> String {
        format!("value must be one of: {:?}", self.allowed)
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = vec![];

        if let Dynamic::String(s) = &request.config_value.value {
            if !self.allowed.contains(s) {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {} {}, got: {:?}",
                            request.path,
                            self.description(),
                            s
                        ),
                    )
                    .with_attribute(request.path.clone()),
                );
            }
        }

        ValidatorResponse { diagnostics }
    }

    fn boxed_clone(&self) -> Box<dyn Validator> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(value: Dynamic) -> ValidatorRequest {
        ValidatorRequest {
            config_value: DynamicValue::new(value),
            path: AttributePath::new("field"),
        }
    }

    #[test]
    fn int_one_of_accepts_listed_values() {
        let validator = IntOneOf::new(&[0, 1]);

        let response = validator.validate(request(Dynamic::Number(1.0)));
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn int_one_of_rejects_other_values() {
        let validator = IntOneOf::new(&[0, 1]);

        let response = validator.validate(request(Dynamic::Number(2.0)));
        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].detail.contains("got: 2"));

        let response = validator.validate(request(Dynamic::Number(0.5)));
        assert_eq!(response.diagnostics.len(), 1);
    }

    #[test]
    fn string_one_of_rejects_other_values() {
        let validator = StringOneOf::new(&["addOnly", "disabled", "fullSync"]);

        let ok = validator.validate(request(Dynamic::String("fullSync".to_string())));
        assert!(ok.diagnostics.is_empty());

        let bad = validator.validate(request(Dynamic::String("sometimes".to_string())));
        assert_eq!(bad.diagnostics.len(), 1);
        assert_eq!(bad.diagnostics[0].summary, "Invalid Attribute Value Match");
    }

    #[test]
    fn validators_ignore_other_types() {
        let validator = IntOneOf::new(&[0, 1]);

        let response = validator.validate(request(Dynamic::String("2".to_string())));
        assert!(response.diagnostics.is_empty());
    }
}
