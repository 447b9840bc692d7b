/// Derives `FromStr` for a `ValueEnum` by matching clap's possible values,
/// so every alias accepted on the command line is also accepted in config.
macro_rules! impl_fromstr_for_value_enum {
    ($enum_type:ty, $what:expr) => {
        impl FromStr for $enum_type {
            type Err = $crate::primitives::ConfigError;

            fn from_str(s: &str) -> Result<Self, $crate::primitives::ConfigError> {
                let needle = s.trim();
                Self::value_variants()
                    .iter()
                    .find(|variant| {
                        variant
                            .to_possible_value()
                            .is_some_and(|value| value.matches(needle, true))
                    })
                    .copied()
                    .ok_or_else(|| $crate::primitives::ConfigError::ParseError {
                        value: s.to_string(),
                        reason: format!("invalid {}", $what),
                    })
            }
        }
    };
}

pub(crate) use impl_fromstr_for_value_enum;
