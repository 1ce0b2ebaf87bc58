//! Greedy longest-phrase tokenizer.
//!
//! Phrases are scanned once, longest first. Each phrase found in the
//! remaining span contributes its token (once) and has its first occurrence
//! cut out of the span, so a shorter phrase cannot match text already
//! claimed by a longer compound ("三级机构" before "机构").

use std::collections::BTreeMap;

/// Outcome of tokenizing one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenization {
    pub tokens: Vec<String>,
    /// Text left after every matched phrase was removed.
    pub remaining: String,
}

impl Tokenization {
    /// Tokens joined with `_`, or `None` when nothing matched.
    pub fn joined(&self) -> Option<String> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(self.tokens.join("_"))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Sorted by descending character count, dictionary order on ties.
    phrases: Vec<(String, String)>,
}

impl Tokenizer {
    pub fn new(dictionary: &BTreeMap<String, String>) -> Self {
        Self::from_pairs(
            dictionary
                .iter()
                .map(|(phrase, token)| (phrase.clone(), token.clone())),
        )
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut phrases: Vec<(String, String)> = pairs
            .into_iter()
            .filter(|(phrase, _)| !phrase.is_empty())
            .collect();
        phrases.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.chars().count()));
        Self { phrases }
    }

    pub fn tokenize(&self, name: &str) -> Tokenization {
        let mut remaining = name.to_string();
        let mut tokens: Vec<String> = Vec::new();
        for (phrase, token) in &self.phrases {
            let Some(start) = remaining.find(phrase.as_str()) else {
                continue;
            };
            if !tokens.iter().any(|existing| existing == token) {
                tokens.push(token.clone());
            }
            remaining.replace_range(start..start + phrase.len(), "");
        }
        Tokenization { tokens, remaining }
    }

    /// Phrases in scan order.
    pub fn phrases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases
            .iter()
            .map(|(phrase, token)| (phrase.as_str(), token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_model::RuleSet;
    use proptest::prelude::*;

    fn builtin() -> Tokenizer {
        Tokenizer::new(&RuleSet::default().phrases)
    }

    #[test]
    fn longer_compound_shadows_its_parts() {
        let result = builtin().tokenize("三级机构");
        assert_eq!(result.tokens, vec!["level_3_organization"]);
        assert_eq!(result.remaining, "");
    }

    #[test]
    fn only_first_occurrence_is_removed() {
        let tokenizer = Tokenizer::from_pairs([("费".to_string(), "fee".to_string())]);
        let result = tokenizer.tokenize("费费");
        assert_eq!(result.tokens, vec!["fee"]);
        assert_eq!(result.remaining, "费");
    }

    #[test]
    fn tokens_are_not_repeated() {
        let result = builtin().tokenize("出险索赔");
        assert_eq!(result.tokens, vec!["claim"]);
    }

    #[test]
    fn unknown_text_yields_no_name() {
        let result = builtin().tokenize("备注");
        assert!(result.tokens.is_empty());
        assert_eq!(result.joined(), None);
        assert_eq!(result.remaining, "备注");
    }

    #[test]
    fn original_name_is_untouched() {
        let name = String::from("客户满意度评分");
        let result = builtin().tokenize(&name);
        assert_eq!(name, "客户满意度评分");
        assert_eq!(
            result.joined().as_deref(),
            Some("satisfaction_customer_score")
        );
    }

    proptest! {
        #[test]
        fn first_applicable_phrase_is_always_kept(picks in prop::collection::vec(0usize..200, 1..5)) {
            let tokenizer = builtin();
            let phrases: Vec<(&str, &str)> = tokenizer.phrases().collect();
            let name: String = picks
                .iter()
                .map(|index| phrases[index % phrases.len()].0)
                .collect();
            let result = tokenizer.tokenize(&name);

            let (_, first_token) = phrases
                .iter()
                .find(|(phrase, _)| name.contains(phrase))
                .expect("name is built from phrases");
            prop_assert!(result.tokens.iter().any(|token| token == first_token));

            let mut unique = result.tokens.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), result.tokens.len());
        }
    }
}
