//! Translation of logical field names into physical index field names.
//!
//! The physical name depends on the value's type and, for text, on the
//! culture of the indexable: `Title` holding text on a Danish record becomes
//! `title_t_da`. Culture-qualified names can be stripped back to a
//! culture-neutral alias (`title_t`).

use regex::Regex;

use crate::document::field_value::{ListKind, ValueKind};
use crate::indexable::Culture;

/// How the physical type of a field is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType<'a> {
    /// Inferred from the runtime kind of the value.
    Kind(ValueKind),
    /// Declared explicitly, e.g. by a computed field's return type.
    ReturnType(&'a str),
}

/// Maps logical field names to physical field names.
pub trait FieldNameTranslator: Send + Sync {
    /// Physical name of `field_name` for a value of `field_type` in `culture`.
    fn index_field_name(
        &self,
        field_name: &str,
        field_type: FieldType<'_>,
        culture: &Culture,
    ) -> String;

    /// Whether a physical name carries a culture qualifier.
    fn has_culture(&self, field_name: &str) -> bool;

    /// The physical name with its culture qualifier removed.
    fn strip_known_cultures(&self, field_name: &str) -> String;
}

const DEFAULT_KNOWN_CULTURES: &[&str] = &[
    "ar", "cs", "da", "de", "en", "es", "fi", "fr", "it", "ja", "ko", "nb", "nl", "pl", "pt",
    "ru", "sv", "tr", "zh",
];

/// Suffix-based translator in the dynamic-field style of Solr schemas.
///
/// # Examples
///
/// ```
/// use docweaver::document::field_value::ValueKind;
/// use docweaver::indexable::Culture;
/// use docweaver::schema::translator::{FieldNameTranslator, FieldType, SuffixFieldNameTranslator};
///
/// let translator = SuffixFieldNameTranslator::new();
/// let danish = Culture::new("da-DK");
///
/// let name = translator.index_field_name("Title", FieldType::Kind(ValueKind::Text), &danish);
/// assert_eq!(name, "title_t_da");
/// assert!(translator.has_culture(&name));
/// assert_eq!(translator.strip_known_cultures(&name), "title_t");
///
/// let name = translator.index_field_name("Page Count", FieldType::ReturnType("int"), &danish);
/// assert_eq!(name, "page_count_tl");
/// ```
#[derive(Debug, Clone)]
pub struct SuffixFieldNameTranslator {
    culture_suffix: Option<Regex>,
}

impl SuffixFieldNameTranslator {
    /// Create a translator recognising the default set of languages.
    pub fn new() -> Self {
        Self::with_known_cultures(DEFAULT_KNOWN_CULTURES.iter().copied())
    }

    /// Create a translator recognising the given two-letter languages.
    pub fn with_known_cultures<I, S>(cultures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = cultures
            .into_iter()
            .map(|c| regex::escape(&c.as_ref().to_ascii_lowercase()))
            .filter(|c| !c.is_empty())
            .collect();
        // Alternatives are escaped, so the pattern always compiles.
        let culture_suffix = (!alternatives.is_empty())
            .then(|| Regex::new(&format!("_(?:{})$", alternatives.join("|"))).ok())
            .flatten();
        SuffixFieldNameTranslator { culture_suffix }
    }

    fn normalize(field_name: &str) -> String {
        field_name.trim().to_lowercase().replace(' ', "_")
    }

    /// Type suffix and whether the type is culture-qualified.
    fn kind_suffix(kind: ValueKind) -> (&'static str, bool) {
        match kind {
            ValueKind::Text => ("_t", true),
            ValueKind::Integer => ("_tl", false),
            ValueKind::Float => ("_tf", false),
            ValueKind::Boolean => ("_b", false),
            ValueKind::DateTime => ("_tdt", false),
            ValueKind::Binary => ("_s", false),
            ValueKind::List(Some(ListKind::Integer)) => ("_im", false),
            ValueKind::List(Some(ListKind::Float)) => ("_fm", false),
            ValueKind::List(Some(ListKind::DateTime)) => ("_dtm", false),
            ValueKind::List(Some(ListKind::Boolean)) => ("_bm", false),
            ValueKind::List(_) => ("_sm", false),
        }
    }

    fn return_type_suffix(return_type: &str) -> Option<(&'static str, bool)> {
        let suffix = match return_type.trim().to_ascii_lowercase().as_str() {
            "text" => ("_t", true),
            "textcollection" => ("_txm", true),
            "string" | "guid" => ("_s", false),
            "stringcollection" | "guidcollection" => ("_sm", false),
            "int" | "long" => ("_tl", false),
            "intcollection" => ("_im", false),
            "float" | "double" => ("_tf", false),
            "bool" | "boolean" => ("_b", false),
            "datetime" => ("_tdt", false),
            "datetimecollection" => ("_dtm", false),
            _ => return None,
        };
        Some(suffix)
    }
}

impl Default for SuffixFieldNameTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldNameTranslator for SuffixFieldNameTranslator {
    fn index_field_name(
        &self,
        field_name: &str,
        field_type: FieldType<'_>,
        culture: &Culture,
    ) -> String {
        let name = Self::normalize(field_name);
        // Reserved fields keep their name.
        if name.starts_with('_') {
            return name;
        }

        let suffix = match field_type {
            FieldType::Kind(kind) => Some(Self::kind_suffix(kind)),
            FieldType::ReturnType(return_type) => Self::return_type_suffix(return_type),
        };

        match suffix {
            Some((suffix, true)) => {
                let language = culture.two_letter_language();
                if language.is_empty() {
                    format!("{name}{suffix}")
                } else {
                    format!("{name}{suffix}_{language}")
                }
            }
            Some((suffix, false)) => format!("{name}{suffix}"),
            None => name,
        }
    }

    fn has_culture(&self, field_name: &str) -> bool {
        self.culture_suffix
            .as_ref()
            .is_some_and(|re| re.is_match(field_name))
    }

    fn strip_known_cultures(&self, field_name: &str) -> String {
        match &self.culture_suffix {
            Some(re) => re.replace(field_name, "").into_owned(),
            None => field_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Culture {
        Culture::new("en")
    }

    #[test]
    fn test_kind_suffixes() {
        let t = SuffixFieldNameTranslator::new();
        let name = |field: &str, kind: ValueKind| {
            t.index_field_name(field, FieldType::Kind(kind), &english())
        };
        assert_eq!(name("Count", ValueKind::Integer), "count_tl");
        assert_eq!(name("Price", ValueKind::Float), "price_tf");
        assert_eq!(name("Active", ValueKind::Boolean), "active_b");
        assert_eq!(name("Tags", ValueKind::List(Some(ListKind::Text))), "tags_sm");
        assert_eq!(name("Title", ValueKind::Text), "title_t_en");
    }

    #[test]
    fn test_return_type_suffixes() {
        let t = SuffixFieldNameTranslator::new();
        assert_eq!(
            t.index_field_name("Url", FieldType::ReturnType("string"), &english()),
            "url_s"
        );
        assert_eq!(
            t.index_field_name("Body", FieldType::ReturnType("text"), &Culture::new("de-DE")),
            "body_t_de"
        );
        assert_eq!(
            t.index_field_name("Custom", FieldType::ReturnType("shape"), &english()),
            "custom"
        );
    }

    #[test]
    fn test_reserved_names_are_untouched() {
        let t = SuffixFieldNameTranslator::new();
        assert_eq!(
            t.index_field_name("_content", FieldType::Kind(ValueKind::Text), &english()),
            "_content"
        );
    }

    #[test]
    fn test_culture_detection_and_stripping() {
        let t = SuffixFieldNameTranslator::with_known_cultures(["da", "en"]);
        assert!(t.has_culture("title_t_da"));
        assert!(!t.has_culture("title_t_fr"));
        assert!(!t.has_culture("count_tl"));
        assert_eq!(t.strip_known_cultures("title_t_da"), "title_t");
        assert_eq!(t.strip_known_cultures("count_tl"), "count_tl");
    }

    #[test]
    fn test_no_known_cultures() {
        let t = SuffixFieldNameTranslator::with_known_cultures(Vec::<String>::new());
        assert!(!t.has_culture("title_t_da"));
        assert_eq!(t.strip_known_cultures("title_t_da"), "title_t_da");
    }
}
