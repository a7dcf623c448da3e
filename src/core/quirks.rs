/// Behaviours on which historical interpreters disagree.
///
/// The defaults reproduce the reference machine: shifts operate on Vx alone
/// and bulk register load/store leaves the index register untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` copy Vy into Vx before shifting.
    pub shift_uses_vy: bool,
    /// `FX55`/`FX65` leave I pointing one past the last register transferred.
    pub load_store_increments_index: bool,
}
