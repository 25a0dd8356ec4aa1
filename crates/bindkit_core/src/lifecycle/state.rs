/// Component lifecycle states.
///
/// The lifecycle is a re-enterable two-state toggle: a component starts
/// `Inactive`, becomes `Active` on activation and returns to `Inactive` on
/// deactivation. There are no intermediate states; every transition completes
/// synchronously on the calling thread.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum State {
    #[default]
    Inactive,
    Active,
}

impl State {
    /// Stable, human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            State::Inactive => "Inactive",
            State::Active => "Active",
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, State::Active)
    }
}
