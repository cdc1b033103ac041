#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidAction,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::InvalidAction => "That action is not available right now.",
        }
    }
}
