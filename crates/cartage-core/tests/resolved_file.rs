use cartage_core::dependency::Dependency;
use cartage_core::resolved::{ParseError, ResolvedCartfile};
use tempfile::TempDir;

const RESOLVED: &str = r#"github "Alamofire/Alamofire" "4.6.0"
github "Moya/Moya" "10.0.2"
github "antitypical/Result" "3.2.4"
"#;

#[test]
fn read_and_write_round_trip_on_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Cartfile.resolved");
    std::fs::write(&path, RESOLVED).unwrap();

    let resolved = ResolvedCartfile::from_path(&path).unwrap();
    assert_eq!(resolved.len(), 3);
    assert_eq!(
        resolved
            .version_of(&Dependency::github("Moya", "Moya"))
            .map(|v| v.raw()),
        Some("10.0.2")
    );

    let copy = tmp.path().join("copy.resolved");
    resolved.write_to(&copy).unwrap();
    assert_eq!(std::fs::read_to_string(&copy).unwrap(), RESOLVED);
}

#[test]
fn missing_file_is_manifest_error() {
    let tmp = TempDir::new().unwrap();
    let err = ResolvedCartfile::from_path(&tmp.path().join("Cartfile.resolved")).unwrap_err();
    assert!(err.to_string().contains("Manifest error"), "got: {err}");
}

#[test]
fn parse_error_names_the_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Cartfile.resolved");
    std::fs::write(&path, "github \"a/A\" \"1.0.0\"\ngithub \"a/A\" \"1.0.1\"\n").unwrap();
    let err = ResolvedCartfile::from_path(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse"), "got: {err}");

    let parse = err.downcast_ref::<ParseError>().unwrap();
    assert_eq!(parse.line(), 2);
}

#[test]
fn parse_error_keeps_its_help() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Cartfile.resolved");
    std::fs::write(&path, "github Alamofire \"4.6.0\"\n").unwrap();
    let err = ResolvedCartfile::from_path(&path).unwrap_err();
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("<kind>"), "got: {help}");
}
