mod analytics_vm;
mod catalog_vm;
mod markdown_vm;
mod practice_vm;
mod progress_vm;
mod time_fmt;

pub use analytics_vm::{
    DashboardVm, DueChipVm, ProblemRowVm, StatCardVm, Tone, display_problem_name, due_chip,
    map_dashboard,
};
pub use catalog_vm::{
    DemoVm, NO_SUSPENDED_MESSAGE, ProblemEntryVm, map_demo, map_problem_entries,
    map_problem_entry,
};
pub use markdown_vm::{inline_markdown_to_html, markdown_to_html, sanitize_html};
pub use practice_vm::{
    CORRECT_MESSAGE, EMPTY_MESSAGE, OptionTone, OptionVm, PracticeIntent, PracticeScreenVm,
    ResultVm, SuspendDialogVm, map_practice_screen, result_message, score_line,
};
pub use progress_vm::{NO_REVIEWS_MESSAGE, ReviewRowVm, map_review_rows};
pub use time_fmt::{format_date, format_datetime};
