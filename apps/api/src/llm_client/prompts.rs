// Cross-cutting prompt fragments and prompt-building utilities.
// Each feature that calls the model keeps its own prompts.rs alongside it.

/// Closing instruction for every prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON, no additional text.";

/// Fills `{name}` placeholders in a single left-to-right pass, then appends
/// the JSON-only instruction.
///
/// Substituted values are never rescanned, so user text containing something
/// like `{text}` is embedded verbatim.
pub fn render_json_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + JSON_ONLY_INSTRUCTION.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out.push('\n');
    out.push_str(JSON_ONLY_INSTRUCTION);
    out.push('\n');
    out
}
