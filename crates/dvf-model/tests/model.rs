use dvf_model::{
    DVF_SCHEMA, DateRendering, FieldGroups, FieldType, OutputFormat, PipelineConfig,
    canonical_names, fields, find_canonical,
};

#[test]
fn canonical_order_matches_mapping() {
    let names = canonical_names(DVF_SCHEMA);
    assert_eq!(names.first(), Some(&fields::ID_MUTATION));
    assert_eq!(names.last(), Some(&fields::LATITUDE));
    assert!(!names.contains(&"plotId"));
    assert!(!names.contains(&"surfacePlot"));
}

#[test]
fn declared_types() {
    let date = find_canonical(DVF_SCHEMA, fields::CREATED_AT).expect("createdAt");
    assert_eq!(date.source, "date_mutation");
    assert!(matches!(date.field_type, FieldType::Date { .. }));

    let street = find_canonical(DVF_SCHEMA, fields::STREET_NUMBER).expect("streetNumber");
    assert_eq!(street.field_type, FieldType::NullableInt);

    let longitude = find_canonical(DVF_SCHEMA, fields::LONGITUDE).expect("longitude");
    assert_eq!(longitude.field_type, FieldType::Text);
}

#[test]
fn default_field_groups() {
    let groups = FieldGroups::default();
    assert_eq!(groups.mandatory, vec!["typeOfSearch", "price"]);
    assert_eq!(groups.optional, vec!["typeOfBuilding", "surface", "nbRoom"]);
}

#[test]
fn config_serializes() {
    let config = PipelineConfig::new(2022)
        .with_target("dvf", "sales")
        .with_output_format(OutputFormat::Json)
        .with_date_rendering(DateRendering::DateEnvelope)
        .with_save(true);
    let json = serde_json::to_string(&config).expect("serialize config");
    let round: PipelineConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(round, config);
    assert_eq!(
        round.download_url(),
        "https://cadastre.data.gouv.fr/data/etalab-dvf/latest/csv/2022/full.csv.gz"
    );
}
