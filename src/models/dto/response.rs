use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Answer, AnswerIndex, Question, Quiz, QuizResult};
use crate::services::leaderboard::{LeaderboardEntry, LeaderboardStats, RankedLeaderboard};

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer_index: AnswerIndex,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id,
            prompt: question.prompt,
            options: question.options,
            correct_answer_index: question.correct_answer_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: String,
    pub topic: String,
    pub questions: Vec<QuestionDto>,
    pub participants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id,
            topic: quiz.topic,
            questions: quiz.questions.into_iter().map(QuestionDto::from).collect(),
            participants: quiz.participants,
            created_by: quiz.created_by,
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResultDto {
    pub id: String,
    pub quiz_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub topic: String,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<Answer>,
    pub completed_at: DateTime<Utc>,
    pub percentage: u32,
    pub share_text: String,
}

impl From<QuizResult> for ResultDto {
    fn from(result: QuizResult) -> Self {
        let percentage = result.percentage();
        let share_text = result.share_message();
        ResultDto {
            id: result.id,
            quiz_id: result.quiz_id,
            user_id: result.user_id,
            topic: result.topic,
            player_name: result.player_name,
            score: result.score,
            total_questions: result.total_questions,
            answers: result.answers,
            completed_at: result.completed_at,
            percentage,
            share_text,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub rank: usize,
    pub is_viewer: bool,
    pub result: ResultDto,
}

impl From<LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        LeaderboardEntryDto {
            rank: entry.rank,
            is_viewer: entry.is_viewer,
            result: entry.result.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStatsDto {
    pub participant_count: usize,
    pub mean_score: f64,
    pub max_score: u32,
}

impl From<LeaderboardStats> for LeaderboardStatsDto {
    fn from(stats: LeaderboardStats) -> Self {
        LeaderboardStatsDto {
            participant_count: stats.participant_count,
            mean_score: stats.mean_score,
            max_score: stats.max_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardDto {
    pub entries: Vec<LeaderboardEntryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_rank: Option<usize>,
    pub stats: LeaderboardStatsDto,
    pub degraded: bool,
}

impl From<RankedLeaderboard> for LeaderboardDto {
    fn from(board: RankedLeaderboard) -> Self {
        LeaderboardDto {
            entries: board.entries.into_iter().map(LeaderboardEntryDto::from).collect(),
            viewer_rank: board.viewer_rank,
            stats: board.stats.into(),
            degraded: board.degraded,
        }
    }
}
