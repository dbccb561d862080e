use crate::domain::{
    entities::{ScaffoldPlan, Template, template::TemplateBody},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_plan(plan: &ScaffoldPlan) -> Result<(), DomainError> {
        plan.validate()
    }

    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        match &template.body {
            TemplateBody::Json(_) if !template.id.is_json() => Err(DomainError::InvalidTemplate {
                id: template.id.to_string(),
                reason: "JSON body under a non-.json path".into(),
            }),
            TemplateBody::Text(_) if template.id.is_json() => Err(DomainError::InvalidTemplate {
                id: template.id.to_string(),
                reason: ".json blueprint must hold a JSON object".into(),
            }),
            _ => Ok(()),
        }
    }
}
