//! Kind dispatch from raw arrays into a tensor.

use fluxrec_calendar::YearRange;
use fluxrec_flux::{
    FluxError, FluxTensor, RawUncertainty, SeriesBlock, SeriesKind, SeriesMeta, SeriesRegistry,
};
use ndarray::{Array2, array};

fn codes() -> Vec<String> {
    vec!["FRA".to_string(), "AND".to_string()]
}

#[test]
fn inventory_keeps_percent_error_and_propagates() {
    let meta = SeriesMeta::new("UNFCCC", SeriesKind::Inventory);
    let raw = SeriesKind::Inventory
        .produce(
            &meta,
            codes(),
            array![[1.0, 0.1], [2.0, 0.2]],
            RawUncertainty::percent(array![[10.0, 20.0], [10.0, 20.0]]),
        )
        .unwrap();
    assert!(raw.propagate_error());
    assert_eq!(raw.block().error()[[1, 1]], 20.0);
    assert!(raw.block().min().iter().all(|v| v.is_nan()));
}

#[test]
fn inventory_rejects_bounds() {
    let meta = SeriesMeta::new("UNFCCC", SeriesKind::Inventory);
    let err = SeriesKind::Inventory
        .produce(
            &meta,
            codes(),
            Array2::ones((1, 2)),
            RawUncertainty::bounds(Array2::zeros((1, 2)), Array2::ones((1, 2))),
        )
        .unwrap_err();
    assert!(matches!(err, FluxError::KindMismatch { .. }));
}

#[test]
fn flipped_trendy_swaps_bounds() {
    let meta = SeriesMeta::new("TRENDY", SeriesKind::Trendy).with_flip_sign(true);
    let raw = SeriesKind::Trendy
        .produce(
            &meta,
            codes(),
            array![[2.0, 1.0]],
            RawUncertainty::bounds(array![[1.0, 0.5]], array![[3.0, 1.5]]),
        )
        .unwrap();
    assert!(!raw.propagate_error());
    assert_eq!(raw.block().value()[[0, 0]], -2.0);
    assert_eq!(raw.block().min()[[0, 0]], -3.0);
    assert_eq!(raw.block().max()[[0, 0]], -1.0);
}

#[test]
fn produced_block_lands_in_tensor() {
    let registry = SeriesRegistry::new(vec![
        SeriesMeta::new("A", SeriesKind::BottomUp),
        SeriesMeta::new("B", SeriesKind::TopDown),
    ])
    .unwrap();
    let years = YearRange::new(1990, 1991).unwrap();
    let mut tensor = FluxTensor::new(registry.len(), years, vec!["FMA".to_string()]);

    let b = registry.index_of("B").unwrap();
    let block = SeriesBlock::from_value(array![[0.0], [4.0]]);
    tensor.set_series(b, &block).unwrap();

    assert_eq!(tensor.remap_zero_values(None), 1);
    assert!(tensor.value()[[b, 0, 0]].is_nan());
    assert_eq!(tensor.value()[[b, 1, 0]], 4.0);
    assert!(tensor.series_is_all_nan(registry.index_of("A").unwrap()));
}
