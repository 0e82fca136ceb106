//! Summing raw columns into plot groups.

use fluxrec_flux::{RawSeries, SeriesBlock};
use fluxrec_stats::{Quadrature, absolute_error};
use ndarray::Array2;

use crate::group::PlotGroup;
use crate::leakage::LeakageTable;

/// Aggregates one raw series onto `groups`, producing a `[year, group]`
/// block.
///
/// Values, mins and maxes are summed over each group's codes; a NaN in any
/// member makes the group NaN for that year. Percentage errors are combined
/// in quadrature against the summed value when the series propagates
/// errors, and left NaN otherwise. A code the series does not carry counts
/// as all-NaN. Groups the leakage table excludes stay NaN.
#[tracing::instrument(skip(raw, groups, leakage), fields(series = raw.name()))]
pub fn group_input(raw: &RawSeries, groups: &[PlotGroup], leakage: &LeakageTable) -> SeriesBlock {
    let block = raw.block();
    let (n_years, _) = block.dim();
    let mut out = SeriesBlock::nan(n_years, groups.len());

    for (g, group) in groups.iter().enumerate() {
        if !leakage.allows(raw.name(), group.name()) {
            tracing::debug!(group = group.name(), "excluded by leakage rule");
            continue;
        }

        let columns: Vec<usize> = match group
            .codes()
            .iter()
            .map(|code| raw.column_of(code))
            .collect::<Option<Vec<_>>>()
        {
            Some(c) => c,
            None => {
                tracing::debug!(group = group.name(), "series lacks a member code");
                continue;
            }
        };

        for y in 0..n_years {
            let value = column_sum(block.value(), y, &columns);
            out.value_mut()[[y, g]] = value;
            out.min_mut()[[y, g]] = column_sum(block.min(), y, &columns);
            out.max_mut()[[y, g]] = column_sum(block.max(), y, &columns);

            if raw.propagate_error() {
                let mut acc = Quadrature::new();
                for &c in &columns {
                    acc.add(absolute_error(block.error()[[y, c]], block.value()[[y, c]]));
                }
                out.error_mut()[[y, g]] = acc.finish(value);
            }
        }
    }

    out
}

fn column_sum(arr: &Array2<f64>, year: usize, columns: &[usize]) -> f64 {
    columns.iter().map(|&c| arr[[year, c]]).sum()
}
