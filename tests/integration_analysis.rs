//! Integration tests for document parsing and best-match analysis
//!
//! Documents are written to temporary files and go through the same path
//! the CLI uses: CSV parser, document, analyser.

use best_match::batch::{analyse_source, run_batch};
use best_match::parser::{CountryRowMapper, CsvDocumentParser, DocumentParser, WeatherRowMapper};
use best_match::{
    AnalysisConfig, AnalysisError, CountryAnalyser, DocumentAnalyser, DocumentKind,
    DocumentSource, ErrorKind, Locale, Policy, WeatherAnalyser, parse_integer, parse_real,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const WEATHER: &str = "\
Day,MxT,MnT,AvT,AvDP,1HrP TPcpn,PDir,AvSp,Dir,MxS,SkyC,MxR,Mn,R AvSLP
1,88,59,74,53.8,0,280,9.6,270,17,1.6,93,23,1004.5
2,79,63,71,46.5,0,330,8.7,340,23,3.3,70,28,1004.5
3,77,55,66,39.6,0,350,5,350,9,2.8,59,24,1016.8
4,77,59,68,51.1,0,110,9.1,130,12,8.6,62,40,1021.1
5,90,66,78,68.3,0,220,8.3,260,12,6.9,84,55,1014.4
";

const COUNTRIES: &str = "\
Name;Capital;Accession;Population;Area (km²);GDP (US$ M);HDI;MEPs
Austria;Vienna;1995;8926000;83855;447718;0,922;19
Belgium;Brussels;Founder;11566041;30528;529606;0,931;21
Germany;Berlin;Founder;83120520;357386;4230172;0,947;96
Malta;Valletta;2004;514564;316;17.262;0,895;6
Netherlands;Amsterdam;Founder;17.407.585;41.543;1.012.598;0,944;29
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Purpose: the smallest temperature spread wins for weather documents
#[test]
fn test_weather_document_smallest_spread() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "weather.csv", WEATHER);

    let parser = CsvDocumentParser::new(WeatherRowMapper, b',', Locale::US);
    let document = parser.parse_document(&path).unwrap();
    assert_eq!(document.len(), 5);

    let matches = WeatherAnalyser.best_matches(&document).unwrap();
    assert_eq!(matches.ids(), vec!["2"]);
    assert_eq!(matches.best_score(), 16.0);
    assert_eq!(matches.policy(), Policy::Min);
}

/// Purpose: German grouping separators are read as thousands
#[test]
fn test_country_document_highest_density() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "countries.csv", COUNTRIES);

    let parser = CsvDocumentParser::new(CountryRowMapper, b';', Locale::GERMANY);
    let document = parser.parse_document(&path).unwrap();

    let best = CountryAnalyser.best_match(&document).unwrap();
    assert_eq!(best.name(), "Malta");
    assert_eq!(best.population(), 514_564);

    let netherlands = document
        .records()
        .find(|r| r.id() == "Netherlands")
        .and_then(|r| r.downcast_ref::<best_match::CountryRecord>())
        .unwrap();
    assert_eq!(netherlands.population(), 17_407_585);
    assert_eq!(netherlands.area(), 41_543.0);
}

/// Purpose: every record tied for the best score is returned
#[test]
fn test_tied_days_are_all_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "ties.csv",
        "Day,MxT,MnT\n1,10,5\n2,7,2\n3,50,20\n4,31.5,26.5\n",
    );

    let source = DocumentSource::new(&path, DocumentKind::Weather);
    let summary = analyse_source(&source).unwrap();

    assert_eq!(summary.ids, vec!["1", "2", "4"]);
    assert_eq!(summary.best_score, 5.0);
}

/// Purpose: stray empty lines don't change the result
#[test]
fn test_empty_lines_are_ignored() {
    let dir = TempDir::new().unwrap();
    let trailing = write_fixture(&dir, "trailing.csv", "Day,MxT,MnT\n1,10,5\n2,7,2\n3,50,20\n\n");
    let interior = write_fixture(
        &dir,
        "interior.csv",
        "Day,MxT,MnT\n1,10,5\n\n2,7,2\n3,50,20\n\n\n",
    );

    for path in [trailing, interior] {
        let summary = analyse_source(&DocumentSource::new(&path, DocumentKind::Weather)).unwrap();
        assert_eq!(summary.ids, vec!["1", "2"]);
        assert_eq!(summary.entries, 3);
    }
}

/// Purpose: a row with values but none in the required columns fails validation
#[test]
fn test_row_without_required_values_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "gaps.csv", "Day,MxT,MnT,Note\n1,10,5,\n,,,rain\n");

    let parser = CsvDocumentParser::new(WeatherRowMapper, b',', Locale::US);
    let document = parser.parse_document(&path).unwrap();

    let err = WeatherAnalyser.best_matches(&document).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingElement { index: 1 }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

/// Purpose: a document with only a header has no best match
#[test]
fn test_header_only_document_has_no_candidate() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "empty.csv", "Name;Population;Area (km²)\n");

    let parser = CsvDocumentParser::new(CountryRowMapper, b';', Locale::GERMANY);
    let document = parser.parse_document(&path).unwrap();

    let err = CountryAnalyser.best_matches(&document).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoCandidate);
}

/// Purpose: malformed numbers and invalid records are document errors
#[test]
fn test_bad_rows_are_document_errors() {
    let dir = TempDir::new().unwrap();
    let negative = write_fixture(&dir, "negative.csv", "Name;Population;Area (km²)\nX;-5;10\n");
    let overflow = write_fixture(
        &dir,
        "overflow.csv",
        "Name;Population;Area (km²)\nX;92233720368547758079;10\n",
    );

    for path in [negative, overflow] {
        let source = DocumentSource::new(&path, DocumentKind::Countries);
        let err = analyse_source(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Document);
        assert!(err.to_string().contains(&*path.to_string_lossy()));
    }
}

/// Purpose: numbers round-trip through the public parsing API per locale
#[test]
fn test_locale_parsing_through_public_api() {
    assert_eq!(parse_real("1.234,56", &Locale::GERMANY).unwrap(), 1234.56);
    assert_eq!(parse_real("1,234.56", &Locale::US).unwrap(), 1234.56);
    assert_eq!(
        parse_integer("9223372036854775807", &Locale::US).unwrap(),
        i64::MAX
    );
    assert_eq!(
        parse_integer("92233720368547758079", &Locale::US)
            .unwrap_err()
            .kind(),
        ErrorKind::Overflow
    );
    assert_eq!(
        parse_integer("   ", &Locale::US).unwrap_err().kind(),
        ErrorKind::EmptyInput
    );
    assert_eq!(
        parse_integer("12a", &Locale::US).unwrap_err().kind(),
        ErrorKind::Format
    );
}

/// Purpose: batch runs analyse mixed documents and keep going past failures
#[tokio::test]
async fn test_batch_over_mixed_documents() {
    let dir = TempDir::new().unwrap();
    let weather = write_fixture(&dir, "weather.csv", WEATHER);
    let countries = write_fixture(&dir, "countries.csv", COUNTRIES);
    let missing = dir.path().join("missing.csv");

    let config = AnalysisConfig::new()
        .with_sources([
            DocumentSource::new(&weather, DocumentKind::Weather),
            DocumentSource::new(&missing, DocumentKind::Weather),
            DocumentSource::new(&countries, DocumentKind::Countries),
        ])
        .with_max_concurrent(3)
        .with_progress(false);

    let reports = run_batch(&config).await.unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].outcome.as_ref().unwrap().ids, vec!["2"]);
    assert!(!reports[1].is_success());
    assert_eq!(reports[2].outcome.as_ref().unwrap().ids, vec!["Malta"]);
    assert_eq!(reports[2].outcome.as_ref().unwrap().policy, Policy::Max);
}
