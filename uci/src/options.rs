#[derive(Debug, Clone)]
pub struct UciOption {
    pub name: &'static str,
    pub option_type: UciOptionType,
}

#[derive(Debug, Clone)]
pub enum UciOptionType {
    Spin { min: i32, max: i32 },
    Combo { vars: &'static [&'static str] },
}

impl UciOptionType {
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            UciOptionType::Spin { min, max } => {
                let parsed = value
                    .parse::<i32>()
                    .map_err(|e| format!("Invalid integer: {}", e))?;
                if parsed < *min || parsed > *max {
                    return Err(format!("Value {} out of range [{}, {}]", parsed, min, max));
                }
                Ok(())
            }
            UciOptionType::Combo { vars } => {
                if vars.iter().any(|v| v.eq_ignore_ascii_case(value)) {
                    Ok(())
                } else {
                    Err(format!("Value {} is not one of {}", value, vars.join(", ")))
                }
            }
        }
    }

    pub fn to_uci<T>(&self, name: &str, current_value: &T) -> String
    where
        T: ToString,
    {
        match self {
            UciOptionType::Spin { min, max } => {
                format!(
                    "option name {} type spin default {} min {} max {}",
                    name,
                    current_value.to_string(),
                    min,
                    max
                )
            }
            UciOptionType::Combo { vars } => {
                let vars: Vec<String> = vars.iter().map(|v| format!("var {}", v)).collect();
                format!(
                    "option name {} type combo default {} {}",
                    name,
                    current_value.to_string(),
                    vars.join(" ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: &[&str] = &["Fast", "Slow"];

    #[test]
    fn test_spin_bounds() {
        let spin = UciOptionType::Spin { min: 1, max: 10 };
        assert!(spin.validate("5").is_ok());
        assert!(spin.validate("0").is_err());
        assert!(spin.validate("eleven").is_err());
    }

    #[test]
    fn test_combo_is_case_insensitive() {
        let combo = UciOptionType::Combo { vars: KINDS };
        assert!(combo.validate("fast").is_ok());
        assert!(combo.validate("Medium").is_err());
    }

    #[test]
    fn test_combo_to_uci() {
        let combo = UciOptionType::Combo { vars: KINDS };
        assert_eq!(
            combo.to_uci("Speed", &"Fast"),
            "option name Speed type combo default Fast var Fast var Slow"
        );
    }
}
