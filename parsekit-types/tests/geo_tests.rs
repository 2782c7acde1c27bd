use parsekit_types::{Error, GeoPoint, ToWire};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

// ── Validation ───────────────────────────────────────────────────

#[test]
fn accepts_bounds_inclusive() {
    assert!(GeoPoint::new(90.0, 180.0).is_ok());
    assert!(GeoPoint::new(-90.0, -180.0).is_ok());
}

#[test]
fn rejects_latitude_out_of_bounds() {
    let err = GeoPoint::new(90.5, 0.0).unwrap_err();
    assert!(matches!(err, Error::InvalidGeoPoint(_)));
    assert!(GeoPoint::new(-91.0, 0.0).is_err());
}

#[test]
fn rejects_longitude_out_of_bounds() {
    assert!(GeoPoint::new(0.0, 180.1).is_err());
    assert!(GeoPoint::new(0.0, -200.0).is_err());
}

#[test]
fn rejects_non_finite() {
    assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
}

// ── Wire form ────────────────────────────────────────────────────

#[test]
fn wire_form_is_tagged() {
    let p = GeoPoint::new(40.0, -30.0).unwrap();
    assert_eq!(
        p.to_wire(),
        json!({ "__type": "GeoPoint", "latitude": 40.0, "longitude": -30.0 })
    );
}

// ── Distances ────────────────────────────────────────────────────

#[test]
fn distance_to_self_is_zero() {
    let p = GeoPoint::new(12.5, 45.25).unwrap();
    assert_eq!(p.radians_to(&p), 0.0);
}

#[test]
fn half_circumference_along_equator() {
    let a = GeoPoint::new(0.0, 0.0).unwrap();
    let b = GeoPoint::new(0.0, 180.0).unwrap();
    assert!((a.radians_to(&b) - std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn one_degree_of_latitude_in_km_and_miles() {
    let a = GeoPoint::new(0.0, 0.0).unwrap();
    let b = GeoPoint::new(1.0, 0.0).unwrap();
    assert!((a.kilometers_to(&b) - 111.19).abs() < 0.01);
    assert!((a.miles_to(&b) - 69.09).abs() < 0.01);
}

proptest! {
    #[test]
    fn distance_is_symmetric(
        lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
        lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
    ) {
        let a = GeoPoint::new(lat1, lon1).unwrap();
        let b = GeoPoint::new(lat2, lon2).unwrap();
        prop_assert!((a.radians_to(&b) - b.radians_to(&a)).abs() < 1e-12);
        prop_assert!(a.radians_to(&b) <= std::f64::consts::PI + 1e-12);
    }
}
