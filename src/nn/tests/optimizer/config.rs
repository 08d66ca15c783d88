/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : AdamW 超参数校验与步长公式测试
 */

use approx::assert_abs_diff_eq;

use crate::errors::ComparisonOperator;
use crate::nn::optimizer::HyperParam;
use crate::nn::{AdamW, AdamWConfig, OptimizerError, ParameterStore};
use crate::tensor::Tensor;

fn build(config: AdamWConfig) -> Result<AdamW, OptimizerError> {
    let mut params = ParameterStore::new();
    let w = params.add(Tensor::new(&[1.0], &[1]));
    AdamW::with_params(&[w], config)
}

#[test]
fn test_default_config() {
    let config = AdamWConfig::default();
    assert_eq!(config.learning_rate, 1e-3);
    assert_eq!(config.beta1, 0.9);
    assert_eq!(config.beta2, 0.999);
    assert_eq!(config.epsilon, 1e-6);
    assert_eq!(config.weight_decay, 0.0);
    assert!(config.bias_correction);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_configs_are_rejected() {
    let base = AdamWConfig::default();

    assert_eq!(
        build(base.with_learning_rate(-0.1)).err(),
        Some(OptimizerError::InvalidConfiguration {
            param: HyperParam::LearningRate,
            value: -0.1,
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
        })
    );
    assert_eq!(
        build(base.with_betas(1.0, 0.999)).err(),
        Some(OptimizerError::InvalidConfiguration {
            param: HyperParam::Beta1,
            value: 1.0,
            operator: ComparisonOperator::LessThan,
            threshold: 1.0,
        })
    );
    assert_eq!(
        build(base.with_betas(0.9, -0.1)).err(),
        Some(OptimizerError::InvalidConfiguration {
            param: HyperParam::Beta2,
            value: -0.1,
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
        })
    );
    assert_eq!(
        build(base.with_epsilon(-1e-9)).err(),
        Some(OptimizerError::InvalidConfiguration {
            param: HyperParam::Epsilon,
            value: -1e-9,
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
        })
    );
}

#[test]
fn test_nan_hyperparameters_are_rejected() {
    let base = AdamWConfig::default();
    assert!(build(base.with_learning_rate(f64::NAN)).is_err());
    assert!(build(base.with_betas(f64::NAN, 0.999)).is_err());
    assert!(build(base.with_betas(0.9, f64::NAN)).is_err());
    assert!(build(base.with_epsilon(f64::NAN)).is_err());
}

#[test]
fn test_boundary_configs_are_accepted() {
    let base = AdamWConfig::default();
    assert!(build(base.with_learning_rate(0.0)).is_ok());
    assert!(build(base.with_betas(0.0, 0.999)).is_ok());
    assert!(build(base.with_betas(0.9, 0.999_999)).is_ok());
    assert!(build(base.with_epsilon(0.0)).is_ok());
    // weight_decay 不做校验
    assert!(build(base.with_weight_decay(-1.0)).is_ok());
}

#[test]
fn test_error_message() {
    let err = AdamWConfig::default()
        .with_learning_rate(-0.1)
        .validate()
        .unwrap_err();
    assert_eq!(err.to_string(), "无效的优化器配置：learning_rate=-0.1，须≥0");
}

#[test]
fn test_step_size_at_first_step() {
    let config = AdamWConfig::default().with_learning_rate(0.01);
    let expected = 0.01 * (1.0_f64 - 0.999).sqrt() / (1.0 - 0.9);
    assert_abs_diff_eq!(config.step_size(1), expected, epsilon = 1e-15);
}

#[test]
fn test_step_size_converges_to_learning_rate() {
    let config = AdamWConfig::default().with_learning_rate(0.01);
    assert_abs_diff_eq!(config.step_size(100_000), 0.01, epsilon = 1e-12);
    assert_abs_diff_eq!(config.step_size(u64::MAX), 0.01, epsilon = 1e-15);
}

#[test]
fn test_step_size_without_bias_correction() {
    let config = AdamWConfig::default()
        .with_learning_rate(0.01)
        .with_bias_correction(false);
    for step in [1, 2, 10, 1000] {
        assert_eq!(config.step_size(step), 0.01);
    }
}

#[test]
fn test_config_from_json() {
    let config =
        AdamWConfig::from_json(r#"{"learning_rate": 0.01, "weight_decay": 0.05}"#).unwrap();
    assert_eq!(
        config,
        AdamWConfig::default()
            .with_learning_rate(0.01)
            .with_weight_decay(0.05)
    );

    // 读入后立即校验
    assert!(matches!(
        AdamWConfig::from_json(r#"{"beta1": 1.5}"#),
        Err(OptimizerError::InvalidConfiguration {
            param: HyperParam::Beta1,
            ..
        })
    ));
    assert!(matches!(
        AdamWConfig::from_json("not json"),
        Err(OptimizerError::Serialization(_))
    ));
}
