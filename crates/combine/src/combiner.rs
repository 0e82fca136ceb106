//! Applies combination rules to the tensor.

use fluxrec_flux::{FluxTensor, SeriesRegistry};
use fluxrec_reconcile::{bounds_from_percent, percent_from_bounds};
use fluxrec_stats::{Quadrature, absolute_error, strict_max, strict_mean, strict_min};
use ndarray::{Array2, Array3, Axis, Zip};

use crate::error::CombineError;
use crate::rule::{CombinationRule, CombineOp};

struct Resolved {
    target: usize,
    sources: Vec<usize>,
}

fn resolve(rule: &CombinationRule, registry: &SeriesRegistry) -> Result<Resolved, CombineError> {
    rule.validate()?;
    let lookup = |name: &str| {
        registry
            .index_of(name)
            .map_err(|_| CombineError::UnknownSeries {
                rule: rule.target().to_string(),
                name: name.to_string(),
            })
    };
    let target = lookup(rule.target())?;
    let sources = rule
        .sources()
        .iter()
        .map(|s| lookup(s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Resolved { target, sources })
}

/// Applies `rules` in order, overwriting each target series.
///
/// Every rule is resolved against `registry` before the tensor is touched,
/// so an unknown name leaves the tensor unchanged.
///
/// # Errors
///
/// Returns [`CombineError`] for an unknown target or source, or a malformed
/// rule.
#[tracing::instrument(skip_all, fields(n_rules = rules.len()))]
pub fn combine_simulations(
    tensor: &mut FluxTensor,
    registry: &SeriesRegistry,
    rules: &[CombinationRule],
) -> Result<(), CombineError> {
    let resolved = rules
        .iter()
        .map(|r| resolve(r, registry))
        .collect::<Result<Vec<_>, _>>()?;

    for (rule, idx) in rules.iter().zip(&resolved) {
        match rule.op() {
            CombineOp::Sum { coefficients } => {
                apply_sum(tensor, idx.target, &idx.sources, coefficients)
            }
            CombineOp::Mean => apply_mean(tensor, idx.target, &idx.sources),
        }
        let zeroed = tensor.remap_zero_values(Some(idx.target));
        tracing::debug!(
            target = rule.target(),
            op = rule.op().as_str(),
            n_sources = idx.sources.len(),
            zeroed,
            "combined series"
        );
    }

    tracing::info!(n_rules = rules.len(), "combinations applied");
    Ok(())
}

fn series_copy(arr: &Array3<f64>, s: usize) -> Array2<f64> {
    arr.index_axis(Axis(0), s).to_owned()
}

fn apply_sum(tensor: &mut FluxTensor, target: usize, sources: &[usize], coefficients: &[f64]) {
    let inputs: Vec<(Array2<f64>, Array2<f64>, f64)> = sources
        .iter()
        .zip(coefficients)
        .map(|(&s, &c)| (series_copy(tensor.value(), s), series_copy(tensor.error(), s), c))
        .collect();

    let (value, error, min, max) = tensor.parts_mut();
    let mut t_value = value.index_axis_mut(Axis(0), target);
    let mut t_error = error.index_axis_mut(Axis(0), target);
    t_value.fill(0.0);
    t_error.fill(0.0);

    // Accumulate values and squared absolute errors; normalise once below.
    for (v, e, c) in &inputs {
        Zip::from(&mut t_value)
            .and(&mut t_error)
            .and(v)
            .and(e)
            .for_each(|tv, te, &sv, &se| {
                *tv += c * sv;
                let mut q = Quadrature::from_sum_sq(*te);
                q.add(c * absolute_error(se, sv));
                *te = q.sum_sq();
            });
    }

    Zip::from(&mut t_error)
        .and(&t_value)
        .for_each(|te, &tv| *te = Quadrature::from_sum_sq(*te).finish(tv));

    Zip::from(min.index_axis_mut(Axis(0), target))
        .and(max.index_axis_mut(Axis(0), target))
        .and(&t_value)
        .and(&t_error)
        .for_each(|lo, hi, &v, &e| {
            (*lo, *hi) = bounds_from_percent(v, e);
        });
}

fn apply_mean(tensor: &mut FluxTensor, target: usize, sources: &[usize]) {
    let inputs: Vec<Array2<f64>> = sources
        .iter()
        .map(|&s| series_copy(tensor.value(), s))
        .collect();

    let (value, error, min, max) = tensor.parts_mut();
    let mut cell = Vec::with_capacity(inputs.len());
    Zip::indexed(value.index_axis_mut(Axis(0), target))
        .and(error.index_axis_mut(Axis(0), target))
        .and(min.index_axis_mut(Axis(0), target))
        .and(max.index_axis_mut(Axis(0), target))
        .for_each(|(y, g), v, e, lo, hi| {
            cell.clear();
            cell.extend(inputs.iter().map(|a| a[[y, g]]));
            *v = strict_mean(&cell);
            *lo = strict_min(&cell);
            *hi = strict_max(&cell);
            *e = percent_from_bounds(*v, *lo, *hi);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fluxrec_calendar::YearRange;
    use fluxrec_flux::{SeriesKind, SeriesMeta};

    fn setup(values: &[f64]) -> (FluxTensor, SeriesRegistry) {
        let mut metas: Vec<SeriesMeta> = (0..values.len())
            .map(|i| SeriesMeta::new(format!("S{i}"), SeriesKind::Other))
            .collect();
        metas.push(SeriesMeta::new("T", SeriesKind::Other));
        let registry = SeriesRegistry::new(metas).unwrap();
        let mut tensor = FluxTensor::new(
            registry.len(),
            YearRange::new(2000, 2000).unwrap(),
            vec!["G".to_string()],
        );
        for (i, v) in values.iter().enumerate() {
            tensor.value_mut()[[i, 0, 0]] = *v;
        }
        (tensor, registry)
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    #[test]
    fn mean_is_strict_about_nan() {
        let (mut t, reg) = setup(&[2.0, 3.0, f64::NAN]);
        combine_simulations(&mut t, &reg, &[CombinationRule::mean("T", names(3))]).unwrap();
        assert!(t.value()[[3, 0, 0]].is_nan());
        assert!(t.min()[[3, 0, 0]].is_nan());
    }

    #[test]
    fn mean_takes_spread_as_bounds() {
        let (mut t, reg) = setup(&[2.0, 3.0, 4.0]);
        combine_simulations(&mut t, &reg, &[CombinationRule::mean("T", names(3))]).unwrap();
        assert_relative_eq!(t.value()[[3, 0, 0]], 3.0, epsilon = 1e-12);
        assert_eq!(t.min()[[3, 0, 0]], 2.0);
        assert_eq!(t.max()[[3, 0, 0]], 4.0);
        assert_relative_eq!(t.error()[[3, 0, 0]], 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn weighted_sum_propagates_error() {
        let (mut t, reg) = setup(&[4.0, 1.0]);
        t.error_mut()[[0, 0, 0]] = 10.0;
        t.error_mut()[[1, 0, 0]] = 20.0;
        let rule = CombinationRule::sum("T", names(2), vec![1.0, -2.0]);
        combine_simulations(&mut t, &reg, &[rule]).unwrap();

        assert_relative_eq!(t.value()[[2, 0, 0]], 2.0, epsilon = 1e-12);
        // sqrt((10 * 4)^2 + (-2 * 20 * 1)^2) / 2
        let expected = (1600.0f64 + 1600.0).sqrt() / 2.0;
        assert_relative_eq!(t.error()[[2, 0, 0]], expected, epsilon = 1e-9);
        let (lo, hi) = bounds_from_percent(2.0, expected);
        assert_relative_eq!(t.min()[[2, 0, 0]], lo, epsilon = 1e-9);
        assert_relative_eq!(t.max()[[2, 0, 0]], hi, epsilon = 1e-9);
    }

    #[test]
    fn zero_result_becomes_nan() {
        let (mut t, reg) = setup(&[1.5, 1.5]);
        t.error_mut()[[0, 0, 0]] = 10.0;
        t.error_mut()[[1, 0, 0]] = 10.0;
        let rule = CombinationRule::sum("T", names(2), vec![1.0, -1.0]);
        combine_simulations(&mut t, &reg, &[rule]).unwrap();
        assert!(t.value()[[2, 0, 0]].is_nan());
        assert!(t.error()[[2, 0, 0]].is_nan());
        assert!(t.max()[[2, 0, 0]].is_nan());
    }

    #[test]
    fn unknown_target_is_fatal_and_leaves_tensor_alone() {
        let (mut t, reg) = setup(&[1.0]);
        let before = t.clone();
        let err = combine_simulations(
            &mut t,
            &reg,
            &[
                CombinationRule::unit_sum("T", names(1)),
                CombinationRule::mean("MISSING", names(1)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CombineError::UnknownSeries {
                rule: "MISSING".to_string(),
                name: "MISSING".to_string(),
            }
        );
        assert_eq!(t.value()[[1, 0, 0]].to_bits(), before.value()[[1, 0, 0]].to_bits());
    }
}
