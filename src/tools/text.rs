//! Built-in text utility tools
//!
//! Small local functions exposed to agents for the assistant scenario:
//! string concatenation, upper-casing, and a toy tax calculator. Parameter
//! shapes stick to primitives and arrays of primitives.

use crate::core::{Result, ToolDefinition, TroupeError};
use crate::tools::registry::ToolRegistry;

/// Register the built-in text tools on a registry
pub fn register_text_tools(registry: &mut ToolRegistry) {
    registry.register_fn(
        ToolDefinition::function(
            "concat_string",
            "Concatenate a list of strings with single spaces",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "strings": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Strings to concatenate, in order"
                    }
                },
                "required": ["strings"]
            }),
        ),
        concat_string,
    );

    registry.register_fn(
        ToolDefinition::function(
            "upper_case",
            "Convert text to upper case",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string", "description": "Text to convert"}
                },
                "required": ["input"]
            }),
        ),
        upper_case,
    );

    registry.register_fn(
        ToolDefinition::function(
            "calculate_tax",
            "Calculate tax for a price and tax rate",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "price": {"type": "number", "description": "Price before tax"},
                    "tax_rate": {"type": "number", "description": "Tax rate, e.g. 0.1 for 10%"}
                },
                "required": ["price", "tax_rate"]
            }),
        ),
        calculate_tax,
    );
}

fn concat_string(args: serde_json::Value) -> Result<String> {
    let strings = args["strings"]
        .as_array()
        .ok_or_else(|| TroupeError::dispatch("concat_string: 'strings' must be an array"))?;

    let parts: Vec<&str> = strings.iter().filter_map(|v| v.as_str()).collect();
    Ok(parts.join(" "))
}

fn upper_case(args: serde_json::Value) -> Result<String> {
    let input = args["input"]
        .as_str()
        .ok_or_else(|| TroupeError::dispatch("upper_case: 'input' must be a string"))?;
    Ok(input.to_uppercase())
}

fn calculate_tax(args: serde_json::Value) -> Result<String> {
    let price = args["price"]
        .as_f64()
        .ok_or_else(|| TroupeError::dispatch("calculate_tax: 'price' must be a number"))?;
    let rate = args["tax_rate"]
        .as_f64()
        .ok_or_else(|| TroupeError::dispatch("calculate_tax: 'tax_rate' must be a number"))?;

    let tax = price * rate;
    // Whole amounts print without a fractional part
    if (tax - tax.round()).abs() < 1e-9 {
        Ok(format!("tax is {}", tax.round() as i64))
    } else {
        Ok(format!("tax is {}", tax))
    }
}
