//! Effective luminosity of a simulated sample.
//!
//! `L = N / (σ × BR [× k] [× corr])`, with σ and N queried strictly and the
//! multiplicative factors leniently (absent factors read as 1.0).
//!
//! Non-positive effective cross sections are not guarded: an unset cross
//! section (−1) yields a negative luminosity, a zero one an infinite or NaN
//! luminosity. Callers range-check with [`is_available_luminosity`].

use crate::resolver::Resolver;
use serde::{Deserialize, Serialize};
use xsec_kernel::XsecError;

/// Which optional factors enter the effective cross section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuminosityOptions {
    pub k_factor: bool,
    pub correction: bool,
}

impl LuminosityOptions {
    pub fn with_k_factor(mut self) -> Self {
        self.k_factor = true;
        self
    }

    pub fn with_correction(mut self) -> Self {
        self.correction = true;
        self
    }
}

/// Every factor that went into one effective luminosity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuminosityBreakdown {
    pub process: String,
    pub energy: String,
    pub period: String,
    pub cross_section: f64,
    pub branching_ratio: f64,
    /// `None` when the k-factor was not requested.
    pub k_factor: Option<f64>,
    /// `None` when the correction was not requested.
    pub correction: Option<f64>,
    pub effective_cross_section: f64,
    pub event_count: f64,
    pub luminosity: f64,
}

impl LuminosityBreakdown {
    pub fn is_available(&self) -> bool {
        is_available_luminosity(self.luminosity)
    }
}

/// Whether a computed luminosity is usable: finite and strictly positive.
pub fn is_available_luminosity(luminosity: f64) -> bool {
    luminosity.is_finite() && luminosity > 0.0
}

impl Resolver<'_> {
    /// Resolve every factor and compose the effective luminosity.
    pub fn luminosity_breakdown(
        &self,
        process: &str,
        energy: &str,
        period: &str,
        options: LuminosityOptions,
    ) -> Result<LuminosityBreakdown, XsecError> {
        let cross_section = self.cross_section(process, energy, period)?;
        let branching_ratio = self.branching_ratio(process, energy, period)?;
        let k_factor = if options.k_factor {
            Some(self.k_factor(process, energy, period)?)
        } else {
            None
        };
        let correction = if options.correction {
            Some(self.correction(process, energy, period)?)
        } else {
            None
        };

        let effective_cross_section = cross_section
            * branching_ratio
            * k_factor.unwrap_or(1.0)
            * correction.unwrap_or(1.0);
        let event_count = self.event_count(process, energy, period)?;
        let luminosity = event_count / effective_cross_section;

        if !is_available_luminosity(luminosity) {
            log::debug!(
                "no usable luminosity for \"{process}\" ({energy}, {period}): \
                 {event_count} / {effective_cross_section} = {luminosity}"
            );
        }

        Ok(LuminosityBreakdown {
            process: process.to_string(),
            energy: energy.to_string(),
            period: period.to_string(),
            cross_section,
            branching_ratio,
            k_factor,
            correction,
            effective_cross_section,
            event_count,
            luminosity,
        })
    }

    /// Event count divided by the effective cross section, in pb⁻¹.
    pub fn effective_luminosity(
        &self,
        process: &str,
        energy: &str,
        period: &str,
        options: LuminosityOptions,
    ) -> Result<f64, XsecError> {
        self.luminosity_breakdown(process, energy, period, options)
            .map(|breakdown| breakdown.luminosity)
    }
}
