/// How many times a [`CommandRecipe`](crate::recipe::command::CommandRecipe) may run its command
///
/// `Unbounded` keeps retrying for as long as the recovery hook allows, which
/// suits tools that wait on a human (an unlock prompt, a hardware key).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    #[default]
    Unbounded,
    /// Run the command at most `max_attempts` times in total
    Limited { max_attempts: usize },
}

impl RetryPolicy {
    pub fn limited(max_attempts: usize) -> Self {
        RetryPolicy::Limited { max_attempts }
    }

    /// Whether another run is allowed after `attempts` runs.
    pub fn allows_retry(&self, attempts: usize) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Limited { max_attempts } => attempts < *max_attempts,
        }
    }
}
