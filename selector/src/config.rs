use std::str::FromStr;
use std::sync::mpsc::{SendError, Sender};
use std::time::Duration;

use uci::{UciOption, UciOptionType, UciOutput};

use crate::strategy::{Strategy, StrategyKind, StrategyWeights, WorstParams, STRATEGY_NAMES};

const WEIGHT: UciOptionType = UciOptionType::Spin { min: 0, max: 100 };

macro_rules! define_config {
    ($(($field:ident: $type:ty, $uci_name:expr, $uci_type:expr, $default:expr)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub struct SelectorConfig {
            $(pub $field: ConfigParam<$type>,)*
        }

        impl Default for SelectorConfig {
            fn default() -> Self {
                Self {
                    $($field: ConfigParam {
                        value: $default,
                        uci: UciOption { name: $uci_name, option_type: $uci_type },
                    },)*
                }
            }
        }

        impl SelectorConfig {
            fn update_param(&mut self, uci_name: &str, value: &str) -> Result<(), String> {
                $(
                    if uci_name.eq_ignore_ascii_case($uci_name) {
                        return self.$field.update_from_uci(value);
                    }
                )*
                Err(format!("Unknown parameter: {}", uci_name))
            }

            pub fn to_uci(&self, output: &Sender<UciOutput>) -> Result<(), SendError<UciOutput>> {
                $(output.send(UciOutput::Option(self.$field.to_uci()))?;)*
                Ok(())
            }
        }
    };
}

define_config!(
    (strategy: StrategyKind, "Strategy", UciOptionType::Combo { vars: STRATEGY_NAMES }, StrategyKind::Dispatch),

    // Dispatch weights
    (best_weight: u32, "Best Weight", WEIGHT, 3),
    (random_weight: u32, "Random Weight", WEIGHT, 1),
    (worst_weight: u32, "Worst Weight", WEIGHT, 1),
    (capture_weight: u32, "Capture Weight", WEIGHT, 1),

    // Worst move scan
    (worst_slice_ms: u64, "Worst Slice", UciOptionType::Spin { min: 1, max: 5000 }, 100), // Per-candidate time when the clock allows
    (clock_percent: u32, "Clock Fraction", UciOptionType::Spin { min: 1, max: 100 }, 10), // Percent of remaining clock for the whole scan
);

impl SelectorConfig {
    /// Applies a `setoption`. A change that leaves every dispatch weight at
    /// zero is rejected and the previous value kept.
    pub fn update_from_uci(&mut self, uci_name: &str, value: &str) -> Result<(), String> {
        let previous = self.clone();
        self.update_param(uci_name, value)?;

        if let Err(e) = self.weights() {
            *self = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn worst_params(&self) -> WorstParams {
        WorstParams {
            baseline: Duration::from_millis(self.worst_slice_ms.value),
            clock_percent: self.clock_percent.value,
        }
    }

    pub fn weights(&self) -> Result<StrategyWeights, String> {
        StrategyWeights::new(vec![
            (Strategy::Best, self.best_weight.value),
            (Strategy::Random, self.random_weight.value),
            (Strategy::Worst(self.worst_params()), self.worst_weight.value),
            (Strategy::Capture, self.capture_weight.value),
        ])
        .map_err(|e| format!("Invalid strategy weights: {}", e))
    }

    pub fn build_strategy(&self) -> Result<Strategy, String> {
        Ok(match self.strategy.value {
            StrategyKind::Best => Strategy::Best,
            StrategyKind::Random => Strategy::Random,
            StrategyKind::Capture => Strategy::Capture,
            StrategyKind::Worst => Strategy::Worst(self.worst_params()),
            StrategyKind::Dispatch => Strategy::Dispatch(self.weights()?),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ConfigParam<T> {
    pub value: T,
    pub uci: UciOption,
}

impl<T> ConfigParam<T>
where
    T: FromStr + ToString + Clone,
    T::Err: std::fmt::Display,
{
    pub fn update_from_uci(&mut self, value: &str) -> Result<(), String> {
        self.uci.option_type.validate(value)?;

        let new_value = value
            .parse::<T>()
            .map_err(|e| format!("Parse error: {}", e))?;

        self.value = new_value;
        Ok(())
    }

    pub fn to_uci(&self) -> String {
        self.uci.option_type.to_uci(self.uci.name, &self.value)
    }
}
