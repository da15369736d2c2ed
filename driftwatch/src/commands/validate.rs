// driftwatch/src/commands/validate.rs
//
// USE CASE: Validate a rules file before it is shipped. Every violation
// is reported, not just the first, so authors fix the file in one pass.

use std::path::Path;

use driftwatch_core::domain::dq::registry::FunctionRegistry;
use driftwatch_core::domain::dq::validator::ConditionValidator;
use driftwatch_core::infrastructure::config::load_rules;

pub fn execute(rules_path: &Path) -> anyhow::Result<()> {
    println!("⚙️  Validating rules from {}...", rules_path.display());

    let file = load_rules(rules_path)?;
    let registry = FunctionRegistry::builtin();
    let validator = ConditionValidator::new(&registry);

    let mut invalid = 0usize;
    let mut total = 0usize;
    for ((rule, condition), draft) in file.drafts() {
        total += 1;
        let violations = validator.validate(&draft);
        if violations.is_empty() {
            continue;
        }
        invalid += 1;
        eprintln!(
            "   ❌ Rule {}, condition {} ({}: {}):",
            rule, condition, draft.column_name, draft.expression
        );
        for violation in violations {
            eprintln!("      - {}", violation);
        }
    }

    if invalid > 0 {
        anyhow::bail!("{} of {} condition(s) invalid", invalid, total);
    }

    println!("✨ {} condition(s) valid.", total);
    Ok(())
}
