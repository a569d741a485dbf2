use super::*;

#[test]
fn from_cookie_defaults_to_system() {
    assert_eq!(Theme::from_cookie(None), Theme::System);
    assert_eq!(Theme::from_cookie(Some("neon")), Theme::System);
    assert_eq!(Theme::from_cookie(Some(" DARK ")), Theme::Dark);
}

#[test]
fn toggled_alternates_between_dark_and_light() {
    assert_eq!(Theme::System.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
}

#[test]
fn html_class_is_prefixed() {
    assert_eq!(Theme::Dark.html_class(), "theme-dark");
    assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
}

#[test]
fn serializes_as_cookie_value() {
    assert_eq!(serde_json::to_value(Theme::Dark).unwrap(), serde_json::json!("dark"));
    let parsed: Theme = serde_json::from_str("\"system\"").unwrap();
    assert_eq!(parsed, Theme::System);
}
