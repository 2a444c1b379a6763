use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    #[error("Decade must contain at least one step")]
    EmptyDecade,
    #[error("The last step of the decade must be smaller than the first step multiplied by the base")]
    SegmentOverlap,
    #[error("step {index} of the decade must be positive")]
    NonPositiveStep { index: usize },
    #[error("step {index} of the decade must be larger than the step before it")]
    NotAscending { index: usize },
    #[error("the base of the ladder must be positive")]
    NonPositiveBase,
    #[error("decade steps and base must be finite numbers")]
    NonFinite,
}
