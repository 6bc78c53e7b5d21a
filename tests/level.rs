//! Tests for level ordering and parsing.

use prismalog::Level;

#[test]
fn ordering_matches_severity() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warning);
    assert!(Level::Warning < Level::Error);
    assert!(Level::Error < Level::Critical);
}

#[test]
fn parse_canonical_names() {
    assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("critical".parse::<Level>().unwrap(), Level::Critical);
}

#[test]
fn parse_aliases_and_case() {
    assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("crit".parse::<Level>().unwrap(), Level::Critical);
    assert_eq!("fatal".parse::<Level>().unwrap(), Level::Critical);
    assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
}

#[test]
fn parse_rejects_unknown() {
    assert!("verbose".parse::<Level>().is_err());
    assert!("".parse::<Level>().is_err());
}

#[test]
fn labels_are_uppercase() {
    for level in Level::all() {
        assert_eq!(level.label(), level.as_str().to_uppercase());
    }
}

#[test]
fn display_uses_lowercase_name() {
    assert_eq!(Level::Warning.to_string(), "warning");
}

#[test]
fn all_is_ordered() {
    let all = Level::all();
    assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
}
