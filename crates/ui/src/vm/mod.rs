mod markup;
mod quiz_vm;

pub use markup::sanitize_text;
pub use quiz_vm::{
    FAILED_MESSAGE, OptionVm, PASSED_MESSAGE, QuestionVm, QuizIntent, QuizScreen, QuizVm,
    ResultsVm, ReviewOptionVm, ReviewRowVm,
};
