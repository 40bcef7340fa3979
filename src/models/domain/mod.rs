pub mod question;
pub mod quiz;
pub mod quiz_result;
pub use question::{Answer, AnswerIndex, Question};
pub use quiz::Quiz;
pub use quiz_result::{CompletedAttempt, QuizResult};
