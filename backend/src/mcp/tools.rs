//! The tool registry: one static tool, `get_top_pizzas`.
//!
//! The registry is immutable for the process lifetime. The tool takes no
//! input and renders a fixed text block from the static pizza records, so an
//! invocation cannot fail.

use pizzeria_types::pizza::TOP_PIZZAS;
use serde_json::{json, Value};

/// Name of the single registered tool.
pub const TOOL_NAME: &str = "get_top_pizzas";

/// Human-readable description of the tool.
pub const TOOL_DESCRIPTION: &str = "Get information about the top 5 pizzas in the world";

/// The tool descriptor advertised by `tools/list`.
pub fn descriptor() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": TOOL_DESCRIPTION,
        "inputSchema": {
            "type": "object",
            "properties": {},
            "required": []
        }
    })
}

/// Render the fixed tool response text: the 5 records in rank order, one
/// paragraph per record with name, origin, description, year, and the
/// ingredient list joined by `", "`.
pub fn render_top_pizzas() -> String {
    let entries: Vec<String> = TOP_PIZZAS
        .iter()
        .map(|pizza| {
            format!(
                "{}. {} ({})\n   Description: {}\n   Year Created: {}\n   Key Ingredients: {}\n",
                pizza.rank,
                pizza.name,
                pizza.origin,
                pizza.description,
                pizza.year_created,
                pizza.key_ingredients.join(", ")
            )
        })
        .collect();

    format!("Top 5 Pizzas in the World:\n\n{}", entries.join("\n"))
}
