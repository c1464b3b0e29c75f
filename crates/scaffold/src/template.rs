//! Parameterized file templates.
//!
//! Placeholders are written `{{name}}` and replaced verbatim on render.

use crate::error::{Result, ScaffoldError};
use std::collections::HashMap;

/// A template parameter.
#[derive(Debug, Clone)]
pub struct TemplateParameter {
    /// Parameter name
    pub name: String,

    /// Description
    pub description: String,

    /// Default value
    pub default_value: Option<String>,

    /// Whether this parameter is required
    pub required: bool,
}

/// Template validation result.
#[derive(Debug, Clone)]
pub struct TemplateValidation {
    /// Whether validation passed
    pub valid: bool,

    /// Missing required parameters
    pub missing_required: Vec<String>,
}

impl TemplateValidation {
    /// Create a successful validation.
    pub fn success() -> Self {
        Self {
            valid: true,
            missing_required: Vec::new(),
        }
    }

    /// Create a failed validation.
    pub fn failure(missing_required: Vec<String>) -> Self {
        Self {
            valid: false,
            missing_required,
        }
    }
}

/// A named text template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    body: String,
    parameters: Vec<TemplateParameter>,
}

impl Template {
    /// Create a template with no declared parameters.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            parameters: Vec::new(),
        }
    }

    /// Declare a required parameter.
    pub fn required_parameter(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.parameters.push(TemplateParameter {
            name: name.into(),
            description: description.into(),
            default_value: None,
            required: true,
        });
        self
    }

    /// Declare an optional parameter with a default.
    pub fn optional_parameter(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        self.parameters.push(TemplateParameter {
            name: name.into(),
            description: description.into(),
            default_value: Some(default.into()),
            required: false,
        });
        self
    }

    /// Get the template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared parameters.
    pub fn parameters(&self) -> &[TemplateParameter] {
        &self.parameters
    }

    /// Validate that all required parameters are provided.
    pub fn validate(&self, params: &HashMap<String, String>) -> TemplateValidation {
        let missing_required: Vec<String> = self
            .parameters
            .iter()
            .filter(|p| p.required && !params.contains_key(&p.name))
            .map(|p| p.name.clone())
            .collect();

        if missing_required.is_empty() {
            TemplateValidation::success()
        } else {
            TemplateValidation::failure(missing_required)
        }
    }

    /// Render the template with the given parameters.
    pub fn render(&self, params: &HashMap<String, String>) -> Result<String> {
        let validation = self.validate(params);
        if !validation.valid {
            return Err(ScaffoldError::MissingParameters {
                template: self.name.clone(),
                missing: validation.missing_required,
            });
        }

        let mut output = self.body.clone();
        for param in &self.parameters {
            let value = params
                .get(&param.name)
                .or(param.default_value.as_ref());
            if let Some(value) = value {
                let placeholder = format!("{{{{{}}}}}", param.name);
                output = output.replace(&placeholder, value);
            }
        }

        Ok(output)
    }
}

/// Build a parameter map from pairs.
pub fn params<'a>(pairs: impl IntoIterator<Item = (&'a str, String)>) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
