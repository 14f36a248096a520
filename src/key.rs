use crate::new_types::twobit::TwoBit;
use std::fmt::Debug;

/// What the sorted graph needs from its keys: a total order and the
/// neighbouring keys one symbol shift away.
pub trait GraphKey: Copy + Ord + Debug {
    /// key with `b2` prepended and the last symbol shifted out.
    fn predecessor(&self, b2: TwoBit) -> Self;
    /// key with `b2` appended and the first symbol shifted out.
    fn successor(&self, b2: TwoBit) -> Self;
    fn last_symbol(&self) -> TwoBit;
}
