use super::types::{PromptSegment, Question, QuestionBank, Track};
use crate::core::constants::FALLBACK_QUESTION_LEVEL;
use crate::core::error::GameError;
use rand::Rng;

/// The pool a question for `level` is drawn from: the level's own pool, or the
/// fallback level's pool of the same track when the requested one is empty.
pub fn resolve_pool(bank: &QuestionBank, track: Track, level: u32) -> Result<&[Question], GameError> {
    let pool = bank.pool(track, level);
    if !pool.is_empty() {
        return Ok(pool);
    }
    let fallback = bank.pool(track, FALLBACK_QUESTION_LEVEL);
    if fallback.is_empty() {
        tracing::error!(%track, level, "no questions for level or fallback level");
        return Err(GameError::NoQuestionAvailable { track, level });
    }
    tracing::warn!(%track, level, "no questions for level, using level {}", FALLBACK_QUESTION_LEVEL);
    Ok(fallback)
}

/// Pick a question uniformly at random from the resolved pool.
pub fn select_question<'a, R: Rng>(
    bank: &'a QuestionBank,
    track: Track,
    level: u32,
    rng: &mut R,
) -> Result<&'a Question, GameError> {
    let pool = resolve_pool(bank, track, level)?;
    Ok(&pool[rng.gen_range(0..pool.len())])
}

/// Exact match against the canonical answer. A missing submission (timeout) is
/// always wrong.
pub fn adjudicate(question: &Question, submitted: Option<&str>) -> bool {
    submitted.is_some_and(|answer| answer == question.answer)
}

/// Split a prompt into plain text and ``` fenced code segments.
/// An unterminated fence is treated as plain text.
pub fn format_prompt(text: &str) -> Vec<PromptSegment> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("```") {
        let after_open = &rest[start + 3..];
        let Some(end) = after_open.find("```") else {
            break;
        };
        if start > 0 {
            segments.push(PromptSegment::Text(rest[..start].to_string()));
        }
        let code = &after_open[..end];
        // Drop a language tag on the opening fence line ("```python").
        let code = match code.split_once('\n') {
            Some((tag, body))
                if !tag.is_empty()
                    && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '+') =>
            {
                body
            }
            _ => code,
        };
        segments.push(PromptSegment::Code(code.trim_matches('\n').to_string()));
        rest = &after_open[end + 3..];
    }
    if !rest.is_empty() {
        segments.push(PromptSegment::Text(rest.to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::types::LevelPool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn question(text: &str, answer: &str) -> Question {
        Question {
            question: text.to_string(),
            options: vec![],
            answer: answer.to_string(),
        }
    }

    fn bank_with(levels: &[(u32, &[&str])]) -> QuestionBank {
        let mut pool = LevelPool::new();
        for (level, prompts) in levels {
            pool.insert(*level, prompts.iter().map(|p| question(p, "A")).collect());
        }
        let mut bank = QuestionBank::new();
        bank.insert_track(Track::Python, pool);
        bank
    }

    #[test]
    fn test_select_from_requested_level() {
        let bank = bank_with(&[(1, &["one"]), (3, &["three"])]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let q = select_question(&bank, Track::Python, 3, &mut rng).unwrap();
        assert_eq!(q.question, "three");
    }

    #[test]
    fn test_falls_back_to_level_one() {
        let bank = bank_with(&[(1, &["one"]), (2, &[])]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(select_question(&bank, Track::Python, 2, &mut rng).unwrap().question, "one");
        assert_eq!(select_question(&bank, Track::Python, 5, &mut rng).unwrap().question, "one");
    }

    #[test]
    fn test_fails_when_fallback_empty() {
        let bank = bank_with(&[(4, &["four"])]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = select_question(&bank, Track::Python, 2, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::NoQuestionAvailable { level: 2, .. }));
        assert!(select_question(&bank, Track::Cpp, 1, &mut rng).is_err());
    }

    #[test]
    fn test_selection_covers_whole_pool() {
        let bank = bank_with(&[(1, &["a", "b", "c"])]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(select_question(&bank, Track::Python, 1, &mut rng).unwrap().question.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_adjudicate_exact_match_only() {
        let q = question("?", "B");
        assert!(adjudicate(&q, Some("B")));
        assert!(!adjudicate(&q, Some("b")));
        assert!(!adjudicate(&q, Some("B ")));
        assert!(!adjudicate(&q, None));
    }

    #[test]
    fn test_format_prompt_splits_code() {
        let segments = format_prompt("What prints?\n```python\nprint(1)\n```\nPick one.");
        assert_eq!(
            segments,
            vec![
                PromptSegment::Text("What prints?\n".to_string()),
                PromptSegment::Code("print(1)".to_string()),
                PromptSegment::Text("\nPick one.".to_string()),
            ]
        );
    }

    #[test]
    fn test_format_prompt_unterminated_fence() {
        let segments = format_prompt("broken ``` fence");
        assert_eq!(segments, vec![PromptSegment::Text("broken ``` fence".to_string())]);
    }
}
