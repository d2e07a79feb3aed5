//! Keyword-based skill detection.
//!
//! A [`SkillVocabulary`] is an ordered list of canonical skill keys, each with
//! one or more lower-case keywords. Matching is case-insensitive substring
//! search over a record's free text and reports each skill at most once.

/// Keywords this short only match as standalone tokens (`"r"` must not hit "power").
const SHORT_KEYWORD_LEN: usize = 2;

/// A single recognised skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    /// Internal key, e.g. `power_bi`.
    pub key: String,
    /// Display name derived from the key, e.g. `Power Bi`.
    pub display: String,
    /// Lower-case match keywords, e.g. `["power bi", "powerbi"]`.
    pub keywords: Vec<String>,
}

impl SkillEntry {
    pub fn new(key: &str, keywords: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            display: display_name(key),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, lower_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| contains_keyword(lower_text, keyword))
    }
}

/// Ordered, immutable skill vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    entries: Vec<SkillEntry>,
}

impl SkillVocabulary {
    pub fn new(entries: Vec<SkillEntry>) -> Self {
        Self { entries }
    }

    /// The data analyst vocabulary used by default.
    pub fn data_analyst() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("python", &["python"]),
            ("r", &["r"]),
            ("sql", &["sql"]),
            ("excel", &["excel"]),
            ("tableau", &["tableau"]),
            ("power_bi", &["power bi", "powerbi"]),
            ("pandas", &["pandas"]),
            ("numpy", &["numpy"]),
            ("matplotlib", &["matplotlib"]),
            ("seaborn", &["seaborn"]),
            ("plotly", &["plotly"]),
            ("machine_learning", &["machine learning"]),
            ("data_visualization", &["data visualization"]),
            ("statistics", &["statistics"]),
            ("business_intelligence", &["business intelligence"]),
            ("etl", &["etl"]),
            ("data_mining", &["data mining"]),
            ("analytics", &["analytics"]),
            ("jupyter", &["jupyter"]),
            ("git", &["git"]),
            ("hadoop", &["hadoop"]),
            ("spark", &["spark"]),
            ("aws", &["aws"]),
            ("azure", &["azure"]),
            ("mysql", &["mysql"]),
            ("postgresql", &["postgresql"]),
            ("mongodb", &["mongodb"]),
            ("looker", &["looker"]),
            ("qlik", &["qlik"]),
        ];

        Self::new(
            table
                .iter()
                .map(|(key, keywords)| SkillEntry::new(key, keywords))
                .collect(),
        )
    }

    /// Return the display names of every skill mentioned in `text`,
    /// in vocabulary order.
    pub fn match_text(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&lower))
            .map(|entry| entry.display.clone())
            .collect()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::data_analyst()
    }
}

/// Title-case an underscore-separated key: `power_bi` -> `Power Bi`.
pub fn display_name(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn contains_keyword(lower_text: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    if keyword.chars().count() > SHORT_KEYWORD_LEN {
        return lower_text.contains(keyword);
    }

    lower_text.match_indices(keyword).any(|(start, _)| {
        let before = lower_text[..start].chars().next_back();
        let after = lower_text[start + keyword.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_title_cased() {
        assert_eq!(display_name("power_bi"), "Power Bi");
        assert_eq!(display_name("sql"), "Sql");
        assert_eq!(display_name("machine_learning"), "Machine Learning");
        assert_eq!(display_name("r"), "R");
    }

    #[test]
    fn matching_ignores_case() {
        let vocab = SkillVocabulary::data_analyst();
        let upper = vocab.match_text("PYTHON developer");
        let title = vocab.match_text("Python developer");
        let lower = vocab.match_text("python developer");
        assert_eq!(upper, vec!["Python"]);
        assert_eq!(upper, title);
        assert_eq!(title, lower);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let vocab = SkillVocabulary::data_analyst();
        let skills = vocab.match_text("SQL, advanced SQL, sql tuning");
        assert_eq!(skills, vec!["Sql"]);
    }

    #[test]
    fn results_follow_vocabulary_order() {
        let vocab = SkillVocabulary::data_analyst();
        let skills = vocab.match_text("Tableau, Excel, SQL and some Python");
        assert_eq!(skills, vec!["Python", "Sql", "Excel", "Tableau"]);
    }

    #[test]
    fn alternate_keywords_map_to_one_skill() {
        let vocab = SkillVocabulary::data_analyst();
        assert_eq!(vocab.match_text("PowerBI dashboards"), vec!["Power Bi"]);
        assert_eq!(vocab.match_text("Power BI dashboards"), vec!["Power Bi"]);
        assert_eq!(
            vocab.match_text("power bi and powerbi"),
            vec!["Power Bi"]
        );
    }

    #[test]
    fn single_letter_keyword_needs_token_boundary() {
        let vocab = SkillVocabulary::data_analyst();
        assert!(vocab.match_text("reporting, power users").is_empty());
        assert_eq!(vocab.match_text("R, statistics"), vec!["R", "Statistics"]);
        assert_eq!(vocab.match_text("experience with r"), vec!["R"]);
    }

    #[test]
    fn substring_keywords_match_inside_words() {
        let vocab = SkillVocabulary::data_analyst();
        // "mysql" contains "sql": both entries are reported.
        assert_eq!(vocab.match_text("MySQL admin"), vec!["Sql", "Mysql"]);
    }

    #[test]
    fn empty_text_matches_nothing() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.match_text("").is_empty());
        assert_eq!(vocab.entries.len(), 29);
    }
}
