use bitflags::bitflags;

bitflags! {
    /// Tracks which fields of a [`StatusCondition`](crate::StatusCondition) changed
    /// between two snapshots of the same set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InstanceFields: u8 {
        const STACKS   = 1 << 0;
        const DURATION = 1 << 1;
        const SOURCE   = 1 << 2;
    }
}
