use super::*;

fn env(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    let mut config = EnvironmentConfig::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "NO_COLOR" => config.no_color = value,
            "FORCE_COLOR" => config.force_color = value,
            "CLICOLOR" => config.clicolor = value,
            "CI" => config.ci = value,
            other => panic!("unexpected variable {other}"),
        }
    }
    config
}

#[test]
fn test_no_color_disables() {
    let color = env(&[("NO_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_enables() {
    let color = env(&[("FORCE_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_environment_variable_precedence() {
    let color = env(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")])
        .apply_color_config(ColorIntent::Auto);

    // FORCE_COLOR=1 should win, enabling color despite NO_COLOR and CLICOLOR
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_ci_wins_over_everything() {
    let color = env(&[("CI", "true"), ("FORCE_COLOR", "1")]).apply_color_config(ColorIntent::Always);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env(&[("NO_COLOR", "")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_is_ignored() {
    let color = env(&[("FORCE_COLOR", "maybe")]).apply_color_config(ColorIntent::Never);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_clicolor_non_zero_keeps_intent() {
    let color = env(&[("CLICOLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_envy_reads_lowercased_fields() {
    let config: EnvironmentConfig = envy::from_iter(vec![
        ("NO_COLOR".to_string(), "1".to_string()),
        ("CI".to_string(), "true".to_string()),
    ])
    .unwrap();

    assert_eq!(config.no_color.as_deref(), Some("1"));
    assert_eq!(config.ci.as_deref(), Some("true"));
    assert!(config.force_color.is_none());
}
