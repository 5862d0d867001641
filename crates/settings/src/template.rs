/// Replaces every `{name}` placeholder in `template` with its value.
///
/// Placeholders without a value are left untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}
