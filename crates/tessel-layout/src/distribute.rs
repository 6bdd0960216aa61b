// crates/tessel-layout/src/distribute.rs
//! Integer space distribution shared by every container kind.

/// Splits a non-negative `amount` across slots in ratio of `weights`.
///
/// Slots with a non-positive weight get nothing. Shares are rounded down and
/// the earliest weighted slot absorbs the rounding remainder, so the shares
/// always sum to `amount` when at least one weight is positive.
pub fn split_by_weight(amount: i32, weights: &[i32]) -> Vec<i32> {
    let mut shares = vec![0; weights.len()];
    let total: i64 = weights.iter().filter(|w| **w > 0).map(|w| i64::from(*w)).sum();
    if amount <= 0 || total == 0 {
        return shares;
    }

    let mut given = 0;
    let mut first = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight > 0 {
            let share = (i64::from(amount) * i64::from(weight) / total) as i32;
            shares[index] = share;
            given += share;
            first.get_or_insert(index);
        }
    }
    if let Some(first) = first {
        shares[first] += amount - given;
    }
    shares
}

/// Applies a signed `delta` to `sizes`.
///
/// Growth goes to weighted slots only. A deficit is taken from weighted slots
/// first and, when they bottom out at zero, from every slot in ratio of its
/// remaining size. Sizes never go below zero, so a deficit larger than the sum
/// of sizes leaves everything at zero.
pub fn apply_delta(sizes: &mut [i32], weights: &[i32], delta: i32) {
    if delta >= 0 {
        for (size, share) in sizes.iter_mut().zip(split_by_weight(delta, weights)) {
            *size += share;
        }
        return;
    }

    let leftover = shrink(sizes, weights, -delta);
    if leftover > 0 {
        let by_size = sizes.to_vec();
        shrink(sizes, &by_size, leftover);
    }
}

fn shrink(sizes: &mut [i32], weights: &[i32], mut deficit: i32) -> i32 {
    while deficit > 0 {
        let eligible: Vec<i32> = weights
            .iter()
            .zip(sizes.iter())
            .map(|(&weight, &size)| if size > 0 { weight.max(0) } else { 0 })
            .collect();
        if eligible.iter().all(|&weight| weight == 0) {
            break;
        }

        for (size, share) in sizes.iter_mut().zip(split_by_weight(deficit, &eligible)) {
            let taken = share.min(*size);
            *size -= taken;
            deficit -= taken;
        }
    }
    deficit
}
