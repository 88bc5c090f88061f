use serde::{Deserialize, Serialize};

/// One dictionary word result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub slug: String,
    pub is_common: bool,
    pub tags: Vec<String>,
    pub jlpt: Vec<String>,
    pub japanese: Vec<JapaneseForm>,
    pub senses: Vec<Sense>,
}

/// Written form and reading; kana-only words have no written form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JapaneseForm {
    pub word: Option<String>,
    pub reading: String,
}

/// One meaning grouping within an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sense {
    pub english_definitions: Vec<String>,
    pub parts_of_speech: Vec<String>,
    pub tags: Vec<String>,
    pub see_also: Vec<String>,
    pub info: Vec<String>,
}

impl Entry {
    /// Main form shown for the entry
    pub fn headword(&self) -> &str {
        self.japanese
            .first()
            .map(|form| form.word.as_deref().unwrap_or(&form.reading))
            .unwrap_or_default()
    }

    /// Reading shown above the headword, only when it differs from it
    pub fn furigana(&self) -> Option<&str> {
        self.japanese
            .first()
            .filter(|form| form.word.is_some())
            .map(|form| form.reading.as_str())
    }

    /// "jlpt-n5" -> "JLPT N5"
    pub fn jlpt_label(&self) -> Option<String> {
        self.jlpt
            .first()
            .map(|level| level.replace('-', " ").to_uppercase())
    }

    /// Level number from a "wanikaniN" tag
    pub fn wanikani_level(&self) -> Option<u32> {
        self.tags
            .iter()
            .find_map(|tag| tag.strip_prefix("wanikani")?.parse().ok())
    }
}

impl Sense {
    /// Query to run when the cross-reference is followed
    pub fn see_also_target(&self) -> Option<&str> {
        self.see_also.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nihongo() -> Entry {
        Entry {
            slug: "日本語".to_string(),
            is_common: true,
            tags: vec!["wanikani5".to_string()],
            jlpt: vec!["jlpt-n5".to_string()],
            japanese: vec![JapaneseForm {
                word: Some("日本語".to_string()),
                reading: "にほんご".to_string(),
            }],
            senses: vec![],
        }
    }

    #[test]
    fn missing_fields_default() {
        let entry: Entry = serde_json::from_str(
            r#"{"slug":"kara","japanese":[{"reading":"から"}],"attribution":{"jmdict":true}}"#,
        )
        .unwrap();

        assert_eq!(entry.slug, "kara");
        assert!(!entry.is_common);
        assert!(entry.senses.is_empty());
        assert_eq!(entry.japanese[0].word, None);
        assert_eq!(entry.headword(), "から");
        assert_eq!(entry.furigana(), None);
    }

    #[test]
    fn display_helpers() {
        let entry = nihongo();
        assert_eq!(entry.headword(), "日本語");
        assert_eq!(entry.furigana(), Some("にほんご"));
        assert_eq!(entry.jlpt_label().as_deref(), Some("JLPT N5"));
        assert_eq!(entry.wanikani_level(), Some(5));
    }

    #[test]
    fn empty_entry_has_no_headword() {
        let entry = Entry::default();
        assert_eq!(entry.headword(), "");
        assert_eq!(entry.jlpt_label(), None);
        assert_eq!(entry.wanikani_level(), None);
    }

    #[test]
    fn see_also_uses_first_reference() {
        let sense: Sense =
            serde_json::from_str(r#"{"see_also":["から 【空】","殻"]}"#).unwrap();
        assert_eq!(sense.see_also_target(), Some("から 【空】"));
        assert_eq!(Sense::default().see_also_target(), None);
    }
}
