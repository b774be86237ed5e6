use crate::model::CrossoverState;

/// Classifies the last step of two aligned moving averages.
///
/// Compares the ordering of `short` vs `long` at the second-to-last and last
/// positions. Too little history, or equality at either step, is `NoCross`.
pub fn detect(short: &[Option<f64>], long: &[Option<f64>]) -> CrossoverState {
    let (Some((prev_short, cur_short)), Some((prev_long, cur_long))) = (tail(short), tail(long))
    else {
        return CrossoverState::NoCross;
    };

    if prev_short < prev_long && cur_short > cur_long {
        CrossoverState::BullishCross
    } else if prev_short > prev_long && cur_short < cur_long {
        CrossoverState::BearishCross
    } else {
        CrossoverState::NoCross
    }
}

/// Last two values of a smoothed column, if both are defined.
fn tail(values: &[Option<f64>]) -> Option<(f64, f64)> {
    match values {
        [.., Some(prev), Some(cur)] => Some((*prev, *cur)),
        _ => None,
    }
}
