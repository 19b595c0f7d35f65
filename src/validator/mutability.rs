use super::ValidatorPolicy;
use crate::operation::MutabilityCategory;
use crate::schema::{ElementValidator, SchemaRuleValidator, ValidatorContext};

/// Runs the schema-declared rules of every element, then rejects elements
/// present at a ReadOnly or CreateOnly path.
pub(super) struct MutabilityRuleValidator<'p> {
    policy: &'p ValidatorPolicy,
}

impl<'p> MutabilityRuleValidator<'p> {
    pub(super) fn new(policy: &'p ValidatorPolicy) -> Self {
        Self { policy }
    }
}

impl ElementValidator for MutabilityRuleValidator<'_> {
    fn validate(&self, context: &mut ValidatorContext<'_, '_>) {
        SchemaRuleValidator.validate(context);

        let path = context.element().path.components();
        let violated: Vec<MutabilityCategory> = [
            (MutabilityCategory::ReadOnly, self.policy.read_only()),
            (MutabilityCategory::CreateOnly, self.policy.create_only()),
        ]
        .into_iter()
        .filter(|(_, predicate)| predicate.matches(path))
        .map(|(category, _)| category)
        .collect();

        for category in violated {
            context.add_message(format!(
                "{} field present in a {} request",
                category,
                self.policy.operation()
            ));
        }
    }
}
