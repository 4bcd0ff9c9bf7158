/// Debounce deadline for jump completion.
///
/// Each scroll report during a jump replaces the token with a later deadline. The generation ties
/// a token to the jump that armed it, so a token left over from a superseded jump never fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CompletionToken {
    generation: u64,
    deadline_ms: u64,
}

impl CompletionToken {
    pub(crate) fn arm(generation: u64, now_ms: u64, delay_ms: u64) -> Self {
        Self {
            generation,
            deadline_ms: now_ms.saturating_add(delay_ms),
        }
    }

    pub(crate) fn is_due(&self, generation: u64, now_ms: u64) -> bool {
        self.generation == generation && now_ms >= self.deadline_ms
    }
}

/// Attempt counter for actions that wait one frame for an element to mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Retry {
    attempt: u8,
}

impl Retry {
    const MAX_RETRIES: u8 = 1;

    pub(crate) const FIRST: Self = Self { attempt: 0 };

    /// The next attempt, or `None` once the retry has been used up.
    pub(crate) fn next(self) -> Option<Self> {
        (self.attempt < Self::MAX_RETRIES).then_some(Self {
            attempt: self.attempt + 1,
        })
    }
}
