//! Case conversions for deriving setting ids and labels from property names.

/// Convert a camel-case property name to kebab case: `fontSize` becomes
/// `font-size`.
pub fn camel_to_kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase();
        out.extend(c.to_lowercase());
    }
    out
}

/// Convert a camel-case property name to title case: `fontSize` becomes
/// `Font Size`.
pub fn camel_to_title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for (i, c) in input.chars().enumerate() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push(' ');
        }
        if i == 0 || out.ends_with(' ') {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_lower = c.is_ascii_lowercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_kebab_case() {
        assert_eq!(camel_to_kebab_case("camelCaseString"), "camel-case-string");
        assert_eq!(camel_to_kebab_case("text"), "text");
        assert_eq!(camel_to_kebab_case("fontSize"), "font-size");
        assert_eq!(camel_to_kebab_case(""), "");
    }

    #[test]
    fn test_camel_to_title_case() {
        assert_eq!(camel_to_title_case("camelCaseString"), "Camel Case String");
        assert_eq!(camel_to_title_case("text"), "Text");
        assert_eq!(camel_to_title_case("displayValue"), "Display Value");
        assert_eq!(camel_to_title_case(""), "");
    }
}
