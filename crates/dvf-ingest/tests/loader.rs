use std::io::Write;
use std::path::Path;

use dvf_ingest::{IngestError, read_dvf_table};
use dvf_model::{DVF_SCHEMA, canonical_names};
use polars::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "id_mutation,date_mutation,numero_disposition,nature_mutation,valeur_fonciere,\
adresse_numero,adresse_suffixe,adresse_nom_voie,adresse_code_voie,code_postal,code_commune,\
nom_commune,code_departement,id_parcelle,type_local,surface_reelle_bati,\
nombre_pieces_principales,surface_terrain,longitude,latitude";

fn fixture(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("dvf_2021.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    path
}

const ROW_A: &str = "2021-1,2021-03-14,000001,Vente,250000,12,B,RUE DES LILAS,0420,75011,75111,\
Paris 11e Arrondissement,75,75111000AB0012,Appartement,40,2,,2.3801,48.8589";
const ROW_B: &str = "2021-2,2021-04-02,000001,Vente,180000,,,CHEMIN VERT,0190,33000,33063,\
Bordeaux,33,33063000CD0001,Maison,95.5,,320,-0.5792,44.8378";

#[test]
fn loads_mapped_fields_in_canonical_order() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, &[ROW_A, ROW_B]);

    let df = read_dvf_table(&path).unwrap();
    assert_eq!(df.height(), 2);
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, canonical_names(DVF_SCHEMA));
}

#[test]
fn columns_have_declared_dtypes() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, &[ROW_A, ROW_B]);
    let df = read_dvf_table(&path).unwrap();

    assert_eq!(df.column("idMutation").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("createdAt").unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column("price").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("streetNumber").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("nbRoom").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("longitude").unwrap().dtype(), &DataType::String);

    let street_numbers = df.column("streetNumber").unwrap().i64().unwrap();
    assert_eq!(street_numbers.get(0), Some(12));
    assert_eq!(street_numbers.get(1), None);

    let surfaces = df.column("surface").unwrap().f64().unwrap();
    assert_eq!(surfaces.get(1), Some(95.5));

    let suffixes = df.column("houseNumber").unwrap().str().unwrap();
    assert_eq!(suffixes.get(0), Some("B"));
    assert_eq!(suffixes.get(1), None);
}

#[test]
fn non_numeric_price_is_malformed_input() {
    let dir = TempDir::new().unwrap();
    let bad = ROW_B.replace("180000", "cent mille");
    let path = fixture(&dir, &[ROW_A, &bad]);

    let err = read_dvf_table(&path).unwrap_err();
    match err {
        IngestError::MalformedInput {
            line,
            field,
            value,
            expected,
            ..
        } => {
            assert_eq!(line, 3);
            assert_eq!(field, "valeur_fonciere");
            assert_eq!(value, "cent mille");
            assert_eq!(expected, "float");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparseable_date_is_malformed_input() {
    let dir = TempDir::new().unwrap();
    let bad = ROW_A.replace("2021-03-14", "14/03/2021");
    let path = fixture(&dir, &[&bad]);

    let err = read_dvf_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { expected: "date", .. }));
}

#[test]
fn missing_column_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    std::fs::write(&path, "id_mutation,valeur_fonciere\n2021-1,100\n").unwrap();

    let err = read_dvf_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "date_mutation"));
    assert!(err.is_malformed_input());
}

#[test]
fn absent_file_is_not_found() {
    let err = read_dvf_table(Path::new("/nonexistent/dvf_1900.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
