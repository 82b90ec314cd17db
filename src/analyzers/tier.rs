/// Signal strength tier of a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTier {
    Strong,
    Good,
    Weak,
}

/// Classifies a signal strength into its tier.
///
/// | Range        | Tier   |
/// |--------------|--------|
/// | -49 ..= 0    | Strong |
/// | -64 ..= -50  | Good   |
/// | -99 ..= -65  | Weak   |
/// | otherwise    | none   |
pub fn tier(rssi: i64) -> Option<SignalTier> {
    match rssi {
        -49..=0 => Some(SignalTier::Strong),
        -64..=-50 => Some(SignalTier::Good),
        -99..=-65 => Some(SignalTier::Weak),
        _ => None,
    }
}
