// src/sheet/column.rs

use crate::{config::ColumnRules, error::ResolveError};

/// Which header rule picked the party column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    ExactLabel,
    YearToken,
    PartyWord,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChoice {
    pub index: usize,
    pub header: String,
    pub rule: MatchRule,
}

/// Pick the party column from a header row.
///
/// Rules are tried in priority order, each over every header left to right:
/// exact label, year token, party word, then the fallback index.
pub fn select_party_column<S: AsRef<str>>(
    headers: &[S],
    rules: &ColumnRules,
) -> Result<ColumnChoice, ResolveError> {
    let cleaned: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();
    for rule in [MatchRule::ExactLabel, MatchRule::YearToken, MatchRule::PartyWord] {
        if let Some(index) = cleaned.iter().position(|h| header_matches(rule, h, rules)) {
            return Ok(ColumnChoice {
                index,
                header: headers[index].as_ref().to_string(),
                rule,
            });
        }
    }

    if headers.len() > rules.fallback_index {
        let index = rules.fallback_index;
        return Ok(ColumnChoice {
            index,
            header: headers[index].as_ref().to_string(),
            rule: MatchRule::Fallback,
        });
    }

    Err(ResolveError::ColumnNotFound {
        headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
    })
}

fn header_matches(rule: MatchRule, header: &str, rules: &ColumnRules) -> bool {
    let contains = |token: &str| {
        let token = token.trim().to_lowercase();
        !token.is_empty() && header.contains(token.as_str())
    };
    match rule {
        MatchRule::ExactLabel => rules
            .exact_labels
            .iter()
            .any(|l| l.trim().to_lowercase() == header),
        MatchRule::YearToken => contains(&rules.year_token),
        MatchRule::PartyWord => contains(&rules.party_word),
        MatchRule::Fallback => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(headers: &[&str]) -> Result<ColumnChoice, ResolveError> {
        select_party_column(headers, &ColumnRules::default())
    }

    #[test]
    fn exact_party_word_wins_regardless_of_position() {
        for pos in 0..4 {
            let mut headers = vec!["a", "b", "c"];
            headers.insert(pos, "พรรค");
            let choice = pick(&headers).unwrap();
            assert_eq!(choice.index, pos);
            assert_eq!(choice.rule, MatchRule::ExactLabel);
        }
    }

    #[test]
    fn exact_match_ignores_case_and_padding() {
        let choice = pick(&["id", " Party "]).unwrap();
        assert_eq!(choice.index, 1);
        assert_eq!(choice.header, " Party ");
        assert_eq!(choice.rule, MatchRule::ExactLabel);
    }

    #[test]
    fn exact_label_beats_earlier_substring_match() {
        // "คะแนน 2569" would match the year rule, but an exact label exists.
        let choice = pick(&["คะแนน 2569", "party"]).unwrap();
        assert_eq!(choice.index, 1);
        assert_eq!(choice.rule, MatchRule::ExactLabel);
    }

    #[test]
    fn year_token_beats_party_word() {
        let choice = pick(&["ชื่อพรรคเดิม", "สังกัด 2569"]).unwrap();
        assert_eq!(choice.index, 1);
        assert_eq!(choice.rule, MatchRule::YearToken);
    }

    #[test]
    fn party_word_substring() {
        let choice = pick(&["เขต", "ชื่อพรรค"]).unwrap();
        assert_eq!(choice.index, 1);
        assert_eq!(choice.rule, MatchRule::PartyWord);
    }

    #[test]
    fn falls_back_to_fifth_column() {
        let choice = pick(&["a", "b", "c", "d", "e", "f"]).unwrap();
        assert_eq!(choice.index, 4);
        assert_eq!(choice.header, "e");
        assert_eq!(choice.rule, MatchRule::Fallback);
    }

    #[test]
    fn too_few_columns_names_every_header() {
        match pick(&["a", "b", "c", "d"]) {
            Err(ResolveError::ColumnNotFound { headers }) => {
                assert_eq!(headers, vec!["a", "b", "c", "d"]);
            }
            other => panic!("expected ColumnNotFound, got {:?}", other),
        }
    }
}
