use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::question::Answer;

/// Persisted record of one completed attempt. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub topic: String,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<Answer>,
    // Stored as epoch millis so store-side sorting is numeric.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn percentage(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        ((self.score as f64 / self.total_questions as f64) * 100.0).round() as u32
    }

    pub fn share_message(&self) -> String {
        format!(
            "I just completed a quiz about {} and scored {}/{}!",
            self.topic, self.score, self.total_questions
        )
    }

    /// Identity used to spot the viewer's own row in a leaderboard snapshot.
    pub fn same_standing(&self, other: &QuizResult) -> bool {
        self.player_name == other.player_name && self.score == other.score
    }
}

/// An attempt that reached `Completed` and has been scored, but may not be
/// durably saved yet. Kept by the caller so a failed submission can be retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedAttempt {
    pub attempt_id: String,
    pub quiz_id: String,
    pub topic: String,
    pub user_id: Option<String>,
    pub player_name: String,
    pub answers: Vec<Answer>,
    pub score: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
}

impl CompletedAttempt {
    pub fn to_result(&self) -> QuizResult {
        QuizResult {
            id: self.attempt_id.clone(),
            quiz_id: self.quiz_id.clone(),
            user_id: self.user_id.clone(),
            topic: self.topic.clone(),
            player_name: self.player_name.clone(),
            score: self.score,
            total_questions: self.total_questions,
            answers: self.answers.clone(),
            completed_at: self.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_result(score: u32, total: u32) -> QuizResult {
        QuizResult {
            id: "result-1".to_string(),
            quiz_id: "quiz-1".to_string(),
            user_id: None,
            topic: "Astronomy".to_string(),
            player_name: "Alex".to_string(),
            score,
            total_questions: total,
            answers: vec![Some(0), Some(2), None],
            completed_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn percentage_rounds_to_nearest_whole() {
        assert_eq!(make_result(2, 3).percentage(), 67);
        assert_eq!(make_result(3, 3).percentage(), 100);
        assert_eq!(make_result(0, 0).percentage(), 0);
    }

    #[test]
    fn share_message_mentions_topic_and_score() {
        assert_eq!(
            make_result(2, 3).share_message(),
            "I just completed a quiz about Astronomy and scored 2/3!"
        );
    }

    #[test]
    fn completed_at_is_stored_as_epoch_millis() {
        let result = make_result(1, 3);
        let value = serde_json::to_value(&result).expect("result should serialize");

        assert_eq!(
            value["completed_at"].as_i64(),
            Some(result.completed_at.timestamp_millis())
        );
        assert!(value.get("user_id").is_none());
        assert!(value["answers"][2].is_null());
    }

    #[test]
    fn attempt_converts_to_result_with_attempt_id() {
        let attempt = CompletedAttempt {
            attempt_id: "attempt-9".to_string(),
            quiz_id: "quiz-1".to_string(),
            topic: "Astronomy".to_string(),
            user_id: Some("user-1".to_string()),
            player_name: "Sam".to_string(),
            answers: vec![Some(1)],
            score: 1,
            total_questions: 1,
            completed_at: Utc::now(),
        };

        let result = attempt.to_result();
        assert_eq!(result.id, "attempt-9");
        assert_eq!(result.user_id.as_deref(), Some("user-1"));
        assert!(result.same_standing(&attempt.to_result()));
    }
}
