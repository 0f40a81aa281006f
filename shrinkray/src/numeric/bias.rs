use super::Integral;
use crate::rng::Random;

/// Inclusive sub-range favoured by biased generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BiasedRange<N> {
    pub min: N,
    pub max: N,
}

/// Ranges close to zero, `min` and `max`, sized by `log_like` of the bounds
///
/// The first range is picked twice as often as each of the others.
pub(crate) fn biased_ranges<N: Integral>(min: &N, max: &N) -> Vec<BiasedRange<N>> {
    if min == max {
        return vec![BiasedRange {
            min: min.clone(),
            max: max.clone(),
        }];
    }

    let zero = N::zero();
    if *min < zero && *max > zero {
        let log_min = (-min.clone()).log_like();
        let log_max = max.log_like();
        return vec![
            BiasedRange {
                min: -log_min.clone(),
                max: log_max.clone(),
            },
            BiasedRange {
                min: max.clone() - log_max,
                max: max.clone(),
            },
            BiasedRange {
                min: min.clone(),
                max: min.clone() + log_min,
            },
        ];
    }

    let log_gap = (max.clone() - min.clone()).log_like();
    let close_to_min = BiasedRange {
        min: min.clone(),
        max: min.clone() + log_gap.clone(),
    };
    let close_to_max = BiasedRange {
        min: max.clone() - log_gap,
        max: max.clone(),
    };
    if *min < zero {
        vec![close_to_max, close_to_min]
    } else {
        vec![close_to_min, close_to_max]
    }
}

/// Pick the range a draw should come from
///
/// Returns `None` for the unbiased full range, which is used unless
/// `bias_factor` is set and the `1 / bias_factor` coin lands.
pub(crate) fn pick_biased<'a, N>(
    rng: &mut Random,
    bias_factor: Option<u32>,
    ranges: &'a [BiasedRange<N>],
) -> Option<&'a BiasedRange<N>> {
    let factor = bias_factor?;
    let factor = i32::try_from(factor.max(1)).unwrap_or(i32::MAX);
    if rng.next_int(1, factor) != 1 {
        return None;
    }
    if ranges.len() == 1 {
        return ranges.first();
    }
    let id = rng.next_int(-2, ranges.len() as i32 - 2);
    if id < 0 {
        ranges.first()
    } else {
        ranges.get(id as usize + 1)
    }
}
