//! Prompt construction for the recommendation request.

use catalog::Product;

/// Build the instruction prompt for the model.
///
/// The query is quoted verbatim and every candidate is embedded with all of
/// its fields so the model can reason about category and price itself.
pub fn build_prompt(query: &str, candidates: &[Product]) -> serde_json::Result<String> {
    let products_context = serde_json::to_string_pretty(candidates)?;

    Ok(format!(
        r#"
You are a product recommendation assistant.
User Query: "{query}"

Retrieved Products:
{products_context}

Your Tasks:
1. Filter the products based on the query (intent, category, price).
2. If the user's specific request isn't found, explain that we don't have it and suggest the best alternatives from the list.
3. Return STRICTLY valid JSON according to the schema below.
4. Do not include any explanations or chatter outside the JSON.

SCHEMA:
{{
  "productIds": [number],
  "summary": "string"
}}
"#
    ))
}
