use approx::assert_relative_eq;
use fluxrec_units::{Conversion, Unit, UnitError, convert_in_place, recognised_units};

#[test]
fn every_recognised_unit_parses() {
    for name in recognised_units() {
        assert!(Unit::parse(name).is_ok(), "{name} should parse");
    }
}

#[test]
fn mass_units_convert_among_themselves() {
    let target = Unit::parse("Tg C yr-1").unwrap();
    for name in recognised_units() {
        let unit = Unit::parse(name).unwrap();
        let mut v = vec![1.0];
        let res = convert_in_place(&mut v, name, Conversion::To(target));
        if unit.is_relative() {
            assert!(matches!(res, Err(UnitError::UnsupportedConversion { .. })));
        } else {
            assert!(res.is_ok(), "{name} -> Tg C yr-1");
            assert!(v[0] > 0.0);
        }
    }
}

#[test]
fn error_names_declared_and_target_units() {
    let mut v = vec![1.0];
    let target = Unit::parse("Tg C yr-1").unwrap();
    let err = convert_in_place(&mut v, "percent", Conversion::To(target)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("percent"));
    assert!(msg.contains("Tg C yr-1"));
}

#[test]
fn gram_to_petagram() {
    let mut v = vec![3.0e15];
    convert_in_place(
        &mut v,
        "g C yr-1",
        Conversion::To(Unit::parse("Pg C yr-1").unwrap()),
    )
    .unwrap();
    assert_relative_eq!(v[0], 3.0, epsilon = 1e-12);
}
