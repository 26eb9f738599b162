//! Document type names derived from model names.

use convert_case::{Case, Casing};

/// Words whose plural is the same word.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Irregular singular/plural pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("shelf", "shelves"),
    ("tooth", "teeth"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

/// Document type label for a model: its name decamelized and pluralized.
///
/// Any module path is dropped first, so `app::models::ElasticUser` and
/// `ElasticUser` both give `elastic_users`.
pub fn doc_type_name(model_name: &str) -> String {
    let short = model_name
        .rsplit(|c| c == ':' || c == '\\')
        .next()
        .unwrap_or(model_name);
    let snake = short.to_case(Case::Snake);

    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, pluralize(last)),
        None => pluralize(&snake),
    }
}

/// Plural form of a lowercase English word.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return plural.to_string();
    }

    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{}ies", stem);
        }
    }

    if word.ends_with("ss")
        || word.ends_with("sh")
        || word.ends_with("ch")
        || word.ends_with('x')
        || word.ends_with('z')
    {
        return format!("{}es", word);
    }

    if word.ends_with("us") {
        return format!("{}es", word);
    }

    if word.ends_with('s') {
        return word.to_string();
    }

    format!("{}s", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_name() {
        assert_eq!(doc_type_name("ElasticUser"), "elastic_users");
        assert_eq!(doc_type_name("User"), "users");
        assert_eq!(doc_type_name("BlogCategory"), "blog_categories");
        assert_eq!(doc_type_name("OrderItem"), "order_items");
    }

    #[test]
    fn test_doc_type_name_drops_module_path() {
        assert_eq!(doc_type_name("app::models::ElasticUser"), "elastic_users");
        assert_eq!(doc_type_name("TORM\\Person"), "people");
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("safe"), "safes");
    }

    #[test]
    fn test_pluralize_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("shelf"), "shelves");
        assert_eq!(pluralize("news"), "news");
        assert_eq!(pluralize("sheep"), "sheep");
    }
}
