use health_gain::core::estimator::{linear_alcohol_gain, linear_smoking_gain};
use health_gain::core::settings::{
    AlcoholModel, LinearAlcoholParams, LinearSmokingParams, ModelSettings, SmokingModel,
};
use health_gain::{AlcoholInput, GainEstimator, Sex, SmokingInput};

fn estimators() -> Vec<GainEstimator> {
    let mut linear = ModelSettings::default();
    linear.alcohol.model = AlcoholModel::Linear;
    linear.smoking.model = SmokingModel::Linear;
    vec![
        GainEstimator::default(),
        GainEstimator::new(linear).unwrap(),
    ]
}

fn alcohol_grid() -> impl Iterator<Item = AlcoholInput> {
    let ages = [15, 28, 45, 70, 90];
    let sexes = [Sex::Male, Sex::Female];
    ages.into_iter().flat_map(move |age| {
        sexes.into_iter().flat_map(move |sex| {
            (0..=7).flat_map(move |current_days| {
                [0, 2, 5, 10].into_iter().flat_map(move |drinks_per_day| {
                    [0, 5, 60].into_iter().flat_map(move |years_drinking| {
                        (0..=7).map(move |target_days| AlcoholInput {
                            age,
                            sex,
                            current_days,
                            drinks_per_day,
                            years_drinking,
                            target_days,
                        })
                    })
                })
            })
        })
    })
}

fn smoking_grid() -> impl Iterator<Item = SmokingInput> {
    let ages = [15, 28, 45, 70, 90];
    let sexes = [Sex::Male, Sex::Female];
    ages.into_iter().flat_map(move |age| {
        sexes.into_iter().flat_map(move |sex| {
            [0, 1, 5, 20, 60].into_iter().flat_map(move |years_smoking| {
                (0..=40).step_by(5).flat_map(move |current_cigarettes| {
                    (0..=40).step_by(5).map(move |target_cigarettes| SmokingInput {
                        age,
                        sex,
                        current_cigarettes,
                        target_cigarettes,
                        years_smoking,
                    })
                })
            })
        })
    })
}

/// 任何合法輸入的酒精估算都不為負，且目標不低於現況時為 0
#[test]
fn test_alcohol_gain_non_negative_and_zero_without_reduction() {
    for estimator in estimators() {
        for input in alcohol_grid() {
            let result = estimator.estimate_alcohol_gain(&input).unwrap();
            assert!(result.months >= 0.0, "negative gain for {:?}", input);
            if input.target_days >= input.current_days {
                assert_eq!(result.months, 0.0, "gain without reduction for {:?}", input);
            }
        }
    }
}

#[test]
fn test_lower_target_never_decreases_alcohol_gain() {
    for estimator in estimators() {
        for input in alcohol_grid().filter(|i| i.target_days > 0) {
            let lower = AlcoholInput {
                target_days: input.target_days - 1,
                ..input.clone()
            };
            let higher_target = estimator.estimate_alcohol_gain(&input).unwrap();
            let lower_target = estimator.estimate_alcohol_gain(&lower).unwrap();
            assert!(
                lower_target.months >= higher_target.months,
                "gain dropped when lowering target for {:?}",
                input
            );
        }
    }
}

#[test]
fn test_smoking_gain_non_negative_and_zero_without_reduction() {
    for estimator in estimators() {
        for input in smoking_grid() {
            let result = estimator.estimate_smoking_gain(&input).unwrap();
            assert!(result.months >= 0.0, "negative gain for {:?}", input);
            if input.target_cigarettes >= input.current_cigarettes {
                assert_eq!(result.months, 0.0, "gain without reduction for {:?}", input);
            }
        }
    }
}

#[test]
fn test_smoking_gain_grows_with_reduction() {
    for estimator in estimators() {
        for input in smoking_grid().filter(|i| i.target_cigarettes == 0) {
            let mut previous = 0.0;
            for current_cigarettes in 0..=40 {
                let months = estimator
                    .estimate_smoking_gain(&SmokingInput {
                        current_cigarettes,
                        ..input.clone()
                    })
                    .unwrap()
                    .months;
                assert!(months >= previous, "gain dropped at {} for {:?}", current_cigarettes, input);
                previous = months;
            }
        }
    }
}

#[test]
fn test_caps_are_never_exceeded() {
    let settings = ModelSettings::default();
    let alcohol_cap = settings.alcohol.risk_ratio.cap_years * 12.0;
    let adjusted_cap = settings.smoking.adjusted.cap_months;
    let linear_cap = settings.smoking.linear.cap_months;

    let estimator = GainEstimator::default();
    for input in alcohol_grid() {
        let result = estimator.estimate_alcohol_gain(&input).unwrap();
        assert!(result.months <= alcohol_cap);
        if result.capped {
            assert_eq!(result.months, alcohol_cap);
        }
    }
    for input in smoking_grid() {
        let adjusted = estimator.estimate_smoking_gain(&input).unwrap();
        assert!(adjusted.months <= adjusted_cap);
        if adjusted.capped {
            assert_eq!(adjusted.months, adjusted_cap);
        }

        let linear = linear_smoking_gain(&input, &LinearSmokingParams::default());
        assert!(linear.months <= linear_cap);
    }
}

#[test]
fn test_linear_boundaries() {
    let alcohol = AlcoholInput {
        age: 40,
        sex: Sex::Female,
        current_days: 7,
        drinks_per_day: 3,
        years_drinking: 10,
        target_days: 0,
    };
    assert_eq!(linear_alcohol_gain(&alcohol, &LinearAlcoholParams::default()).months, 5.6);

    let smoking = |current_cigarettes, target_cigarettes| SmokingInput {
        age: 40,
        sex: Sex::Male,
        current_cigarettes,
        target_cigarettes,
        years_smoking: 10,
    };
    let params = LinearSmokingParams::default();
    assert_eq!(linear_smoking_gain(&smoking(20, 0), &params).months, 96.0);
    assert_eq!(linear_smoking_gain(&smoking(0, 0), &params).months, 0.0);
}

#[test]
fn test_risk_ratio_regression_value() {
    let input = AlcoholInput {
        age: 28,
        sex: Sex::Male,
        current_days: 4,
        drinks_per_day: 2,
        years_drinking: 5,
        target_days: 2,
    };
    let estimator = GainEstimator::default();

    let first = estimator.estimate_alcohol_gain(&input).unwrap();
    let second = estimator.estimate_alcohol_gain(&input).unwrap();
    assert_eq!(first.months, 7.0);
    assert_eq!(first, second);
}
