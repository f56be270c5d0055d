//! Value types shared across the extraction pipeline.

mod outline;
mod span;

pub use outline::{DocumentOutline, HeadingCandidate, HeadingLevel};
pub use span::FormattedSpan;
