mod achievement;
mod credentials;
mod ids;
mod profile;
mod progress;
mod question;
mod subject;

pub use ids::{
    AchievementId, ExerciseId, ParseIdError, ProgressId, QuestionId, SubjectId, TopicId, UserId,
};

pub use achievement::{Achievement, EarnedAchievement};
pub use credentials::{Credentials, CredentialsError, MIN_PASSWORD_LEN, normalize_display_name};
pub use profile::{UserProfile, UserStats};
pub use progress::{ProgressRecord, ProgressUpsert};
pub use question::{Question, QuestionBank, QuestionBankError, QuestionKind, answers_match};
pub use subject::{Exercise, Subject, SubjectKind, Topic};
