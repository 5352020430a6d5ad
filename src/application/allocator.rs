use crate::domain::money::Amount;
use crate::domain::split::SplitEntry;
use rust_decimal::Decimal;

/// Partitions `gross` across `entries`, in order.
///
/// Each share is `floor(gross * percentage / 100)` in whole major units.
/// Percentages are clamped to `0..=100`, and a share never exceeds what is
/// left of the gross amount, so the shares always sum to at most `gross`.
/// Zero shares are kept; any residual stays undistributed.
pub fn allocate<'a>(gross: Amount, entries: &'a [SplitEntry]) -> Vec<(&'a SplitEntry, Amount)> {
    let hundred = Decimal::ONE_HUNDRED;
    let mut remaining = gross;

    entries
        .iter()
        .map(|entry| {
            let percentage = entry.percentage.value().clamp(Decimal::ZERO, hundred);
            let raw = gross
                .value()
                .checked_mul(percentage)
                .map(|scaled| scaled / hundred)
                .unwrap_or_else(|| gross.value() / hundred * percentage);
            let share = Amount::new(raw.floor())
                .unwrap_or(Amount::ZERO)
                .min(remaining);
            remaining = remaining - share;
            (entry, share)
        })
        .collect()
}
