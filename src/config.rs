//! Detector coefficients
//!
//! A [`Config`] fixes the training length and the two blending
//! coefficients of a PEWMA detector. It is validated once, at
//! construction, and is immutable afterwards.

/// Error returned when building a [`Config`] from out-of-range coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `alpha0` outside the open interval (0, 1)
    InvalidAlpha(f64),
    /// `beta` outside the half-open interval [0, 1)
    InvalidBeta(f64),
    /// Training period of zero observations
    InvalidTrainingPeriod(usize),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidAlpha(alpha0) => {
                write!(f, "alpha0 weight is invalid: {} not in (0, 1)", alpha0)
            }
            ConfigError::InvalidBeta(beta) => {
                write!(f, "beta weight is invalid: {} not in [0, 1)", beta)
            }
            ConfigError::InvalidTrainingPeriod(period) => {
                write!(f, "training period is invalid: {} must be positive", period)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Coefficients governing a PEWMA detector
///
/// - `training_period` (T): number of leading observations used for
///   warm-up, and the capacity of the history window.
/// - `alpha0` (α): baseline weight kept on the running estimate once
///   training is complete.
/// - `beta` (β): how strongly the density of a new observation lowers
///   that weight.
///
/// # Example
///
/// ```
/// use pewma::config::{Config, ConfigError};
///
/// let config = Config::new(30, 0.97, 0.5).unwrap();
/// assert_eq!(config.training_period(), 30);
///
/// assert!(matches!(Config::new(30, 1.0, 0.5), Err(ConfigError::InvalidAlpha(_))));
/// assert!(matches!(Config::new(30, 0.97, -0.1), Err(ConfigError::InvalidBeta(_))));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    training_period: usize,
    alpha0: f64,
    beta: f64,
}

impl Config {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidAlpha`] unless `0 < alpha0 < 1`
    /// - [`ConfigError::InvalidBeta`] unless `0 <= beta < 1`
    /// - [`ConfigError::InvalidTrainingPeriod`] if `training_period == 0`
    ///
    /// NaN coefficients fail the same range checks.
    pub fn new(training_period: usize, alpha0: f64, beta: f64) -> Result<Self, ConfigError> {
        let checked = Self::check(training_period, alpha0, beta);
        if let Err(err) = &checked {
            tracing::debug!(training_period, alpha0, beta, error = %err, "rejected pewma config");
        }
        checked
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn check(training_period: usize, alpha0: f64, beta: f64) -> Result<Self, ConfigError> {
        if !(alpha0 > 0.0 && alpha0 < 1.0) {
            return Err(ConfigError::InvalidAlpha(alpha0));
        }
        if !(beta >= 0.0 && beta < 1.0) {
            return Err(ConfigError::InvalidBeta(beta));
        }
        if training_period == 0 {
            return Err(ConfigError::InvalidTrainingPeriod(training_period));
        }
        Ok(Self {
            training_period,
            alpha0,
            beta,
        })
    }

    /// Number of warm-up observations, also the history capacity
    pub fn training_period(&self) -> usize {
        self.training_period
    }

    /// Baseline retention weight after training
    pub fn alpha0(&self) -> f64 {
        self.alpha0
    }

    /// Sensitivity of the retention weight to the observation density
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Config", 3)?;
        state.serialize_field("training_period", &self.training_period)?;
        state.serialize_field("alpha0", &self.alpha0)?;
        state.serialize_field("beta", &self.beta)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct ConfigData {
            training_period: usize,
            alpha0: f64,
            beta: f64,
        }

        let data = ConfigData::deserialize(deserializer)?;
        Config::new(data.training_period, data.alpha0, data.beta).map_err(serde::de::Error::custom)
    }
}
