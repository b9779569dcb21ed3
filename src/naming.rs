//! Identifier derivation for generated types and fields.
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("static regex"));

/// Abbreviations upper-cased when a name ends with them.
const ACRONYM_SUFFIXES: [&str; 4] = ["Id", "Url", "Json", "Xml"];
/// Abbreviations upper-cased when a name starts with them.
const ACRONYM_PREFIXES: [&str; 3] = ["Url", "Json", "Xml"];

/// Turn a free-form label into a type/field identifier.
///
/// Everything but ASCII letters and digits splits words; each word gets its
/// first letter upper-cased (the rest is left alone) and the words are joined.
/// A trailing acronym wins over a leading one; at most one is applied.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in NON_ALNUM.split(name) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }

    for suffix in ACRONYM_SUFFIXES {
        if let Some(stem) = out.strip_suffix(suffix) {
            return format!("{stem}{}", suffix.to_ascii_uppercase());
        }
    }
    for prefix in ACRONYM_PREFIXES {
        if let Some(rest) = out.strip_prefix(prefix) {
            return format!("{}{rest}", prefix.to_ascii_uppercase());
        }
    }
    out
}

/// Name for a sequence of `name`.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_words_and_drops_punctuation() {
        assert_eq!(camel_case("thing"), "Thing");
        assert_eq!(camel_case("mailing address"), "MailingAddress");
        assert_eq!(camel_case("first-name"), "FirstName");
        assert_eq!(camel_case("already camelCase"), "AlreadyCamelCase");
        assert_eq!(camel_case("#/definitions/über"), "DefinitionsBer");
        assert_eq!(camel_case("2nd place"), "2ndPlace");
        assert_eq!(camel_case(""), "");
        assert_eq!(camel_case("!!"), "");
    }

    #[test]
    fn acronym_suffixes() {
        assert_eq!(camel_case("user id"), "UserID");
        assert_eq!(camel_case("home_url"), "HomeURL");
        assert_eq!(camel_case("raw json"), "RawJSON");
        assert_eq!(camel_case("config xml"), "ConfigXML");
        assert_eq!(camel_case("id"), "ID");
        // only the exact casing after title-casing counts
        assert_eq!(camel_case("valid"), "Valid");
    }

    #[test]
    fn acronym_prefixes_only_without_suffix() {
        assert_eq!(camel_case("url path"), "URLPath");
        assert_eq!(camel_case("json schema"), "JSONSchema");
        assert_eq!(camel_case("xml node id"), "XmlNodeID");
    }

    #[test]
    fn plurals() {
        assert_eq!(pluralize("Thing"), "Things");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Status"), "Statuses");
    }
}
