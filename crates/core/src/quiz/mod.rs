mod banks;
mod session;

pub use banks::{bank_for, english_bank, math_bank};
pub use session::{AnswerVerdict, QuizError, QuizPhase, QuizSession};
