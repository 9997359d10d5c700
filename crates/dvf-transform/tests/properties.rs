use dvf_model::{Bounds, FieldGroups};
use dvf_transform::{drop_incomplete, group_by_mutation, validate_range};
use polars::prelude::*;
use proptest::prelude::*;

fn optional_f64() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (-10_000.0f64..3_000_000.0).prop_map(Some)]
}

proptest! {
    #[test]
    fn range_keeps_exactly_the_values_inside(
        values in prop::collection::vec(optional_f64(), 0..64),
        lower in -100.0f64..1000.0,
        width in 1.0f64..1_000_000.0,
    ) {
        let bounds = Bounds::new(lower, lower + width).unwrap();
        let df = DataFrame::new(vec![Series::new("price".into(), &values).into()]).unwrap();
        let out = validate_range(df, "price", bounds).unwrap();

        let expected: Vec<Option<f64>> = values
            .iter()
            .copied()
            .filter(|v| v.is_some_and(|v| bounds.contains(v)))
            .collect();
        let kept: Vec<Option<f64>> = out.column("price").unwrap().f64().unwrap().into_iter().collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn null_filter_postconditions(
        rows in prop::collection::vec(
            (any::<bool>(), optional_f64(), any::<bool>(), optional_f64(), optional_f64()),
            0..48,
        ),
    ) {
        let search: Vec<Option<&str>> = rows.iter().map(|r| r.0.then_some("vente")).collect();
        let price: Vec<Option<f64>> = rows.iter().map(|r| r.1).collect();
        let building: Vec<Option<&str>> = rows.iter().map(|r| r.2.then_some("maison")).collect();
        let surface: Vec<Option<f64>> = rows.iter().map(|r| r.3).collect();
        let rooms: Vec<Option<f64>> = rows.iter().map(|r| r.4).collect();
        let df = df! {
            "typeOfSearch" => search,
            "price" => price,
            "typeOfBuilding" => building,
            "surface" => surface,
            "nbRoom" => rooms,
        }
        .unwrap();

        let out = drop_incomplete(df, &FieldGroups::default()).unwrap();
        prop_assert!(out.height() <= rows.len());
        prop_assert_eq!(out.column("typeOfSearch").unwrap().null_count(), 0);
        prop_assert_eq!(out.column("price").unwrap().null_count(), 0);

        let building = out.column("typeOfBuilding").unwrap().is_not_null();
        let surface = out.column("surface").unwrap().is_not_null();
        let rooms = out.column("nbRoom").unwrap().is_not_null();
        let any_optional = &(&building | &surface) | &rooms;
        prop_assert!(any_optional.all());

        let expected = rows
            .iter()
            .filter(|r| r.0 && r.1.is_some() && (r.2 || r.3.is_some() || r.4.is_some()))
            .count();
        prop_assert_eq!(out.height(), expected);
    }

    #[test]
    fn aggregation_preserves_additive_totals(
        rows in prop::collection::vec((0u8..6, 0.0f64..500.0), 0..40),
    ) {
        let ids: Vec<String> = rows.iter().map(|r| format!("2021-{}", r.0)).collect();
        let surfaces: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let rooms: Vec<Option<f64>> = vec![None; rows.len()];
        let df = df! {
            "idMutation" => ids,
            "surface" => surfaces.clone(),
            "nbRoom" => rooms,
        }
        .unwrap();

        let out = group_by_mutation(df).unwrap();
        let mut distinct: Vec<u8> = rows.iter().map(|r| r.0).collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(out.height(), distinct.len());

        let total: f64 = surfaces.iter().sum();
        let grouped: f64 = out.column("surface").unwrap().f64().unwrap().into_iter().flatten().sum();
        prop_assert!((total - grouped).abs() < 1e-6);
    }
}
