/// Completion state of one encode or decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    /// The whole input was processed
    Done,
    /// The destination cannot hold the next whole group; retry with a larger
    /// buffer or drain and continue from the reported counts
    DestinationTooSmall,
    /// A non-final call ended on a partial group; hand the unconsumed bytes
    /// back together with the next chunk
    NeedMoreData,
    /// Decode only: unrecognized symbol, misplaced padding, or a ragged
    /// final length
    InvalidData,
}

/// What one call actually did: the status plus exact element counts into
/// the caller-owned source and destination.
///
/// Counts are in source/destination elements (bytes, or UTF-16 units for
/// the wide surfaces) and always stop on a group boundary, so a caller can
/// resume from `consumed`/`written` no matter which status came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Operation {
    pub status: OperationStatus,
    /// Source elements consumed
    pub consumed: usize,
    /// Destination elements written
    pub written: usize,
}

impl Operation {
    pub(crate) const fn new(status: OperationStatus, consumed: usize, written: usize) -> Self {
        Operation {
            status,
            consumed,
            written,
        }
    }

    /// True when the call finished everything it was given.
    pub fn is_done(&self) -> bool {
        self.status == OperationStatus::Done
    }
}
