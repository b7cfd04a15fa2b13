use fieldrunner::config::{FieldConfig, FieldMeasurements};
use fieldrunner::constants::player::RADIUS;
use fieldrunner::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use fieldrunner::error::ConfigError;
use glam::{UVec2, Vec2};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_default_canvas_matches_constants() {
    let config = FieldConfig::default();
    assert_eq!(config.canvas_pixels(), UVec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
    assert_eq!(config.canvas_size(), Vec2::new(450.0, 820.0));
}

#[test]
fn test_default_is_valid() {
    assert_that(&FieldConfig::default().validate()).is_ok();
}

#[test]
fn test_bounds_keep_marker_on_canvas() {
    let config = FieldConfig::default();
    let (min, max) = config.bounds();

    assert_eq!(min, Vec2::splat(RADIUS));
    assert_eq!(max, Vec2::new(450.0 - RADIUS, 820.0 - RADIUS));
    assert_eq!(config.clamp(Vec2::new(-5.0, 9000.0)), Vec2::new(RADIUS, 820.0 - RADIUS));
    assert_eq!(config.clamp(Vec2::new(100.0, 200.0)), Vec2::new(100.0, 200.0));
}

#[test]
fn test_spawn_position() {
    let config = FieldConfig::default();
    assert_eq!(config.halfway_y(), 410.0);
    assert_eq!(config.spawn_position(), Vec2::new(225.0, 435.0));
}

#[test]
fn test_rejects_non_positive_speeds() {
    let config = FieldConfig {
        movement_speed: 0.0,
        ..FieldConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidSpeed {
            name: "movement_speed",
            value: 0.0
        })
    );

    let config = FieldConfig {
        sprint_speed: -1.0,
        ..FieldConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidSpeed {
            name: "sprint_speed",
            value: -1.0
        })
    );
}

#[test]
fn test_rejects_nan_speed() {
    let config = FieldConfig {
        movement_speed: f32::NAN,
        ..FieldConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidSpeed { .. })));
}

#[test]
fn test_rejects_dead_zone_out_of_range() {
    for dead_zone in [-0.1, 1.0, 1.5] {
        let config = FieldConfig {
            dead_zone,
            ..FieldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDeadZone(dead_zone)));
    }
}

#[test]
fn test_rejects_bad_scale() {
    let config = FieldConfig {
        scale: 0.0,
        ..FieldConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::InvalidScale(0.0)));
}

#[test]
fn test_rejects_oversized_radius() {
    let config = FieldConfig {
        radius: 226.0,
        ..FieldConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::RadiusTooLarge { .. })));

    let config = FieldConfig {
        radius: 225.0,
        ..FieldConfig::default()
    };
    assert_that(&config.validate()).is_ok();
}

#[test]
fn test_meters_to_pixels() {
    let config = FieldConfig::default();
    assert_eq!(config.meters(22.0), 110.0);
}

#[test]
fn test_rejects_non_finite_scale() {
    for scale in [f32::NAN, f32::INFINITY, -1.0] {
        let config = FieldConfig {
            scale,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidScale(_))), "scale {scale}");
    }
}

#[test]
fn test_rejects_bad_radius() {
    for radius in [f32::NAN, f32::INFINITY, 0.0, -3.0] {
        let config = FieldConfig {
            radius,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRadius(_))), "radius {radius}");
    }
}

#[test]
fn test_rejects_bad_measurements() {
    let defaults = FieldConfig::default();
    let cases = [
        ("width", FieldMeasurements { width: f32::NAN, ..defaults.measurements }),
        ("length", FieldMeasurements { length: f32::INFINITY, ..defaults.measurements }),
        ("dead_ball", FieldMeasurements { dead_ball: -1.0, ..defaults.measurements }),
        ("margin", FieldMeasurements { margin: f32::NAN, ..defaults.measurements }),
    ];

    for (expected, measurements) in cases {
        let config = FieldConfig { measurements, ..defaults };
        match config.validate() {
            Err(ConfigError::InvalidMeasurement { name, .. }) => assert_eq!(name, expected),
            other => panic!("{expected}: expected InvalidMeasurement, got {other:?}"),
        }
    }
}

#[test]
fn test_validated_config_always_clamps_in_bounds() {
    let config = match FieldConfig::default().validate() {
        Ok(config) => config,
        Err(e) => panic!("{e}"),
    };
    let clamped = config.clamp(Vec2::new(-1.0e9, f32::MAX));

    assert_that(&clamped.is_finite()).is_true();
    assert_eq!(clamped, Vec2::new(RADIUS, 820.0 - RADIUS));
}
