#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::domain::{Question, Quiz, QuizResult};

    /// Three questions with answer key `[0, 2, 1]`.
    pub fn sample_quiz() -> Quiz {
        let mut quiz = Quiz::new(
            "Trivia",
            vec![
                Question::new(1, "First?", ["a", "b", "c", "d"], 0),
                Question::new(2, "Second?", ["a", "b", "c", "d"], 2),
                Question::new(3, "Third?", ["a", "b", "c", "d"], 1),
            ],
            Some("creator-1".to_string()),
        );
        quiz.id = "quiz-1".to_string();
        quiz
    }

    pub fn minutes_after_epoch(minutes: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + minutes * 60, 0)
            .single()
            .expect("valid timestamp")
    }

    /// Result on `quiz-1` out of three questions.
    pub fn make_result(
        id: &str,
        player_name: &str,
        score: u32,
        completed_at: DateTime<Utc>,
    ) -> QuizResult {
        QuizResult {
            id: id.to_string(),
            quiz_id: "quiz-1".to_string(),
            user_id: None,
            topic: "Trivia".to_string(),
            player_name: player_name.to_string(),
            score,
            total_questions: 3,
            answers: vec![None, None, None],
            completed_at,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_quiz_is_valid() {
        let quiz = sample_quiz();
        assert_eq!(quiz.id, "quiz-1");
        assert!(quiz.validate_structure().is_ok());
    }

    #[test]
    fn test_fixtures_minutes_are_ordered() {
        assert!(minutes_after_epoch(1) < minutes_after_epoch(2));
    }
}
