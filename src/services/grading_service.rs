use crate::dto::quiz_dto::{AnswerSubmission, GradeResult, QuestionResult};
use crate::models::quiz::Quiz;

pub struct GradingService;

impl GradingService {
    /// An answer is correct when the selected option equals `answer` verbatim.
    /// Questions without a submission count as wrong.
    pub fn grade(quiz: &Quiz, answers: &[AnswerSubmission]) -> GradeResult {
        let mut score = 0;
        let mut results = Vec::with_capacity(quiz.questions.len());

        for q in &quiz.questions {
            let selected = answers
                .iter()
                .find(|a| a.question_id == q.id)
                .and_then(|a| a.selected.clone());

            let correct = selected.as_deref() == Some(q.answer.as_str());
            if correct {
                score += 1;
            }

            results.push(QuestionResult {
                question_id: q.id,
                text: q.text.clone(),
                selected,
                answer: q.answer.clone(),
                correct,
                explanation: q.explanation.clone(),
            });
        }

        GradeResult {
            total: quiz.questions.len(),
            score,
            results,
        }
    }
}
