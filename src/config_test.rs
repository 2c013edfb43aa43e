use super::*;

#[test]
fn defaults_match_page_contract() {
    let config = SiteConfig::default();
    assert_eq!(config.theme.storage_key, "theme");
    assert_eq!(config.theme.attribute, "data-theme");
    assert_eq!(config.notifications, NotificationConfig { show_delay_ms: 100, display_ms: 5000, exit_ms: 300 });
    assert_eq!(config.newsletter.latency_ms, 1500);
    assert_eq!(config.newsletter.success_hold_ms, 3000);
    assert_eq!(config.filter.debounce_ms, 300);
    assert_eq!(config.reveal.threshold, 0.1);
    assert_eq!(config.parallax.factor, 0.1);
}

#[test]
fn root_margin_shrinks_bottom_edge() {
    assert_eq!(RevealConfig::default().root_margin(), "0px 0px -50px 0px");
}

#[test]
fn empty_object_yields_defaults() {
    let config = SiteConfig::from_json("{}").expect("empty override should parse");
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn partial_override_keeps_other_fields() {
    let raw = r#"{ "notifications": { "display_ms": 8000 }, "filter": { "card_selector": ".post" } }"#;
    let config = SiteConfig::from_json(raw).expect("partial override should parse");
    assert_eq!(config.notifications.display_ms, 8000);
    assert_eq!(config.notifications.exit_ms, 300);
    assert_eq!(config.filter.card_selector, ".post");
    assert_eq!(config.filter.debounce_ms, 300);
    assert_eq!(config.theme, ThemeConfig::default());
}

#[test]
fn malformed_json_is_parse_error() {
    let err = SiteConfig::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn threshold_outside_unit_range_is_rejected() {
    let err = SiteConfig::from_json(r#"{ "reveal": { "threshold": 1.5 } }"#).expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid { field: "reveal.threshold", .. }));
}

#[test]
fn blank_storage_key_is_rejected() {
    let mut config = SiteConfig::default();
    config.theme.storage_key = "  ".into();
    let err = config.validate().expect_err("should fail");
    assert_eq!(err.to_string(), "invalid config value for theme.storage_key: must not be empty");
}
