/// Host-driven lifecycle transitions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transition {
    Activate,
    Deactivate,
}

impl Transition {
    pub const fn label(self) -> &'static str {
        match self {
            Transition::Activate => "activate",
            Transition::Deactivate => "deactivate",
        }
    }
}
