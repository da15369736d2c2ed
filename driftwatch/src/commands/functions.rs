// driftwatch/src/commands/functions.rs
//
// USE CASE: Print the catalogue of built-in check functions, the same
// descriptors the validator enforces and an authoring UI would pre-fill.

use comfy_table::{Table, presets::UTF8_FULL};
use driftwatch_core::domain::dq::registry::FunctionRegistry;

pub fn execute(json: bool) -> anyhow::Result<()> {
    let registry = FunctionRegistry::builtin();

    if json {
        let descriptors: Vec<_> = registry.descriptors().collect();
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Function", "Arguments", "Description"]);

    for descriptor in registry.descriptors() {
        let arguments: Vec<String> = descriptor
            .arguments
            .iter()
            .map(|a| {
                if a.fixed_values.is_empty() {
                    a.name.to_string()
                } else {
                    format!("{} ∈ [{}]", a.name, a.fixed_values.join(", "))
                }
            })
            .collect();
        table.add_row(vec![
            descriptor.name.to_string(),
            arguments.join("\n"),
            descriptor.description.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
