mod auth_vm;
mod dashboard_vm;
mod quiz_vm;
mod time_fmt;

pub use auth_vm::{
    AuthMode, AuthNext, AuthNotice, CONFIRM_EMAIL_NOTICE, UNEXPECTED_ERROR, auth_error_notice,
    sign_up_next,
};
pub use dashboard_vm::{
    AchievementVm, ActivityVm, DashboardVm, StatTileVm, SubjectCardVm, map_dashboard,
};
pub use quiz_vm::{
    CompletionVm, OptionVm, QuizIntent, QuizScreenVm, QuizVm, ResultVm, SubjectCopy,
    option_letter,
};
pub use time_fmt::{format_attempt_date, format_date};
