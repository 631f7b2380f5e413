use crate::model::{Question, QuestionBank, QuestionKind, SubjectKind};

/// Built-in practice bank for a subject.
#[must_use]
pub fn bank_for(subject: SubjectKind) -> QuestionBank {
    match subject {
        SubjectKind::English => english_bank(),
        SubjectKind::Math => math_bank(),
    }
}

#[must_use]
pub fn english_bank() -> QuestionBank {
    QuestionBank::from_trusted(
        "English Practice",
        vec![
            Question::new(
                "1",
                QuestionKind::MultipleChoice,
                "Which word is a synonym for \"happy\"?",
                "Joyful",
                "Joyful means feeling great pleasure and happiness.",
            )
            .with_options(["Sad", "Joyful", "Angry", "Tired"])
            .with_hint("Think about words that mean the same as feeling good!"),
            Question::new(
                "2",
                QuestionKind::FillBlank,
                "Complete the sentence: The cat _____ on the mat.",
                "sat",
                "Past tense of \"sit\" is \"sat\".",
            )
            .with_hint("What did the cat do in the past?"),
            Question::new(
                "3",
                QuestionKind::MultipleChoice,
                "What is the plural form of \"child\"?",
                "Children",
                "Children is the irregular plural form of child.",
            )
            .with_options(["Childs", "Children", "Childes", "Child"])
            .with_hint("This is an irregular plural - it doesn't follow normal rules!"),
        ],
    )
}

#[must_use]
pub fn math_bank() -> QuestionBank {
    QuestionBank::from_trusted(
        "Math Practice",
        vec![
            Question::new(
                "1",
                QuestionKind::MultipleChoice,
                "What is 3/4 + 1/4?",
                "1",
                "When adding fractions with the same denominator, add the numerators: 3 + 1 = 4, so 4/4 = 1",
            )
            .with_options(["1/2", "4/8", "1", "2/4"])
            .with_hint("Add the top numbers (numerators) when the bottom numbers are the same!")
            .with_topic("Fractions"),
            Question::new(
                "2",
                QuestionKind::FillBlank,
                "Convert 0.75 to a fraction in its simplest form:",
                "3/4",
                "0.75 = 75/100 = 3/4 (dividing both by 25)",
            )
            .with_hint("0.75 means 75 hundredths. Can you simplify 75/100?")
            .with_topic("Decimals & Fractions"),
            Question::new(
                "3",
                QuestionKind::WordProblem,
                "Sarah has 24 stickers. She wants to share them equally among 6 friends. How many stickers will each friend get?",
                "4",
                "24 ÷ 6 = 4 stickers per friend",
            )
            .with_hint("This is a division problem. How many groups of 6 can you make from 24?")
            .with_topic("Division"),
            Question::new(
                "4",
                QuestionKind::MultipleChoice,
                "What is 35% of 200?",
                "70",
                "35% = 35/100 = 0.35, so 0.35 × 200 = 70",
            )
            .with_options(["35", "70", "105", "140"])
            .with_hint("To find a percentage, multiply the decimal form by the number!")
            .with_topic("Percentages"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_banks_pass_validation() {
        for subject in SubjectKind::ALL {
            let bank = bank_for(subject);
            let checked = QuestionBank::new(bank.title(), bank.questions().to_vec());
            assert_eq!(checked.as_ref(), Ok(&bank), "{subject:?} bank is invalid");
        }
    }

    #[test]
    fn bank_sizes() {
        assert_eq!(english_bank().len(), 3);
        assert_eq!(math_bank().len(), 4);
    }

    #[test]
    fn math_questions_carry_topics() {
        assert!(math_bank().questions().iter().all(|q| q.topic.is_some()));
    }
}
