//! Decay evolution charts

use common::{QuantityUnit, TimeUnit, YUnit};
use config::EvolutionConfig;
use decay::{log_times, Dataset, Inventory};
use indexmap::IndexMap;
use render::{EvolutionPlot, YScale};
use tracing::{debug, info};

use crate::error::{ApiError, ServiceError};
use crate::models::{EvolutionMetadata, EvolutionRequest, EvolutionResponse, PlotData};
use crate::services::RenderSettings;

/// Values used when a request leaves a field out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionDefaults {
    pub time_period: f64,
    pub time_unit: TimeUnit,
    pub y_unit: YUnit,
    /// Log-spaced sample times per evolution
    pub samples: usize,
}

impl From<&EvolutionConfig> for EvolutionDefaults {
    fn from(config: &EvolutionConfig) -> Self {
        Self {
            time_period: config.default_time_period,
            time_unit: config.default_time_unit,
            y_unit: config.default_y_unit,
            samples: config.samples,
        }
    }
}

impl Default for EvolutionDefaults {
    fn default() -> Self {
        Self::from(&EvolutionConfig::default())
    }
}

pub struct EvolutionService {
    dataset: &'static Dataset,
    settings: RenderSettings,
    defaults: EvolutionDefaults,
}

impl EvolutionService {
    pub fn new(dataset: &'static Dataset, settings: RenderSettings, defaults: EvolutionDefaults) -> Self {
        Self {
            dataset,
            settings,
            defaults,
        }
    }

    pub fn defaults(&self) -> &EvolutionDefaults {
        &self.defaults
    }

    /// Evolve the requested inventory and chart it
    pub fn generate(&self, request: &EvolutionRequest) -> Result<EvolutionResponse, ApiError> {
        self.try_generate(request).map_err(|e| {
            ApiError::validation(format!("Failed to generate evolution plot: {}", e))
        })
    }

    fn try_generate(&self, request: &EvolutionRequest) -> Result<EvolutionResponse, ServiceError> {
        let time_period = request.time_period.unwrap_or(self.defaults.time_period);
        if !time_period.is_finite() || time_period <= 0.0 {
            return Err(ServiceError::InvalidRequest(format!(
                "time_period must be a positive number, got {}",
                time_period
            )));
        }
        let time_unit = request.time_unit.unwrap_or(self.defaults.time_unit);
        let y_unit = request.y_unit.unwrap_or(self.defaults.y_unit);

        let inventory = self.build_inventory(request)?;
        let inputs = inventory.nuclides();

        let span = time_period * time_unit.seconds();
        let times = log_times(span, self.defaults.samples);
        let evolution = inventory.evolve(&times)?;
        let series = evolution.series(y_unit);
        let display_times: Vec<f64> = evolution
            .times()
            .iter()
            .map(|t| t / time_unit.seconds())
            .collect();

        let plot = EvolutionPlot {
            title: format!("Decay Evolution of {}", inputs.join(", ")),
            x_label: time_unit.axis_label(),
            y_label: y_unit.axis_label(),
            times: &display_times,
            series: &series,
            y_scale: YScale::for_unit(y_unit),
        };
        let image = render::render_evolution(&plot, self.settings.evolution_figure, self.settings.dpi)?;

        let nuclides: Vec<String> = evolution
            .nuclide_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        info!(
            inputs = inputs.len(),
            nuclides = nuclides.len(),
            samples = display_times.len(),
            y_unit = y_unit.code(),
            width = image.width,
            height = image.height,
            "Generated evolution plot"
        );

        let decay: IndexMap<String, Vec<f64>> = series
            .into_iter()
            .map(|(name, values)| (name.to_string(), values))
            .collect();

        Ok(EvolutionResponse {
            image: image.to_base64(),
            plot_data: PlotData {
                time: display_times,
                decay,
            },
            metadata: EvolutionMetadata {
                time_unit,
                y_unit,
                nuclides,
            },
        })
    }

    /// Inventory from the complete entries; the first one's unit applies to all
    fn build_inventory(&self, request: &EvolutionRequest) -> Result<Inventory<'static>, ServiceError> {
        let entries: Vec<(&str, f64, Option<QuantityUnit>)> = request
            .nuclides
            .iter()
            .filter_map(|entry| {
                let isotope = entry
                    .isotope
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())?;
                Some((isotope, entry.quantity?, entry.unit))
            })
            .collect();

        let Some(&(_, _, first_unit)) = entries.first() else {
            return Err(ServiceError::InvalidRequest(
                "no valid nuclides provided".to_string(),
            ));
        };
        let unit = first_unit.unwrap_or_default();
        debug!(
            entries = entries.len(),
            skipped = request.nuclides.len() - entries.len(),
            unit = unit.code(),
            "Building inventory"
        );

        let mut inventory = Inventory::new(self.dataset);
        for (isotope, quantity, _) in entries {
            inventory.add(isotope, quantity, unit)?;
        }
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NuclideEntry;
    use render::FigureSize;

    fn service() -> EvolutionService {
        EvolutionService::new(
            Dataset::embedded(),
            RenderSettings {
                dpi: 50,
                chain_figure: FigureSize::new(8.0, 5.0),
                evolution_figure: FigureSize::new(8.0, 4.0),
            },
            EvolutionDefaults {
                samples: 40,
                ..EvolutionDefaults::default()
            },
        )
    }

    fn entry(isotope: &str, quantity: f64, unit: Option<QuantityUnit>) -> NuclideEntry {
        NuclideEntry {
            isotope: Some(isotope.to_string()),
            quantity: Some(quantity),
            unit,
        }
    }

    fn validation_message(err: ApiError) -> String {
        match err {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let defaults = EvolutionDefaults::default();
        assert_eq!(defaults.time_period, 365.0);
        assert_eq!(defaults.time_unit, TimeUnit::Days);
        assert_eq!(defaults.y_unit, YUnit::Quantity(QuantityUnit::Bq));
    }

    #[test]
    fn test_activity_evolution() {
        let request = EvolutionRequest {
            nuclides: vec![entry("Co-60", 1000.0, Some(QuantityUnit::Bq))],
            ..Default::default()
        };
        let response = service().generate(&request).unwrap();

        assert_eq!(response.metadata.time_unit, TimeUnit::Days);
        assert_eq!(response.metadata.nuclides, ["Co-60", "Ni-60"]);
        let time = &response.plot_data.time;
        assert_eq!(time.len(), 40);
        assert!((time[39] - 365.0).abs() < 1e-9);
        assert!((time[0] - 0.365).abs() < 1e-9);

        let co60 = &response.plot_data.decay["Co-60"];
        // One year of Co-60 (5.27 y half-life) keeps about 87.7% of the activity
        let expected = 1000.0 * (-(365.0 / 365.2422) * std::f64::consts::LN_2 / 5.2713).exp();
        assert!((co60[39] - expected).abs() < 1e-6 * 1000.0);
        assert!(response.plot_data.decay["Ni-60"].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_fraction_units_stay_in_unit_interval() {
        let request = EvolutionRequest {
            nuclides: vec![entry("Cs-137", 1.0, None)],
            time_period: Some(30.0),
            time_unit: Some(TimeUnit::Years),
            y_unit: Some(YUnit::ActivityFraction),
        };
        let response = service().generate(&request).unwrap();
        let decay = &response.plot_data.decay;

        for idx in 0..response.plot_data.time.len() {
            let sum: f64 = decay.values().map(|series| series[idx]).sum();
            assert!((sum - 1.0).abs() < 1e-9, "sample {} sums to {}", idx, sum);
        }
        assert!(decay.values().flatten().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_first_unit_applies_to_all() {
        let request = EvolutionRequest {
            nuclides: vec![
                NuclideEntry {
                    isotope: Some("   ".into()),
                    quantity: Some(5.0),
                    unit: Some(QuantityUnit::Ci),
                },
                entry("H-3", 1.0, Some(QuantityUnit::Gram)),
                entry("C-14", 1.0, Some(QuantityUnit::Bq)),
            ],
            y_unit: Some(YUnit::Quantity(QuantityUnit::Gram)),
            ..Default::default()
        };
        let response = service().generate(&request).unwrap();

        // C-14 taken as 1 g too
        let c14 = &response.plot_data.decay["C-14"];
        assert!((c14[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_valid_entries() {
        let request = EvolutionRequest {
            nuclides: vec![
                NuclideEntry::default(),
                NuclideEntry {
                    isotope: Some("Co-60".into()),
                    quantity: None,
                    unit: None,
                },
            ],
            ..Default::default()
        };
        let msg = validation_message(service().generate(&request).unwrap_err());
        assert_eq!(msg, "Failed to generate evolution plot: no valid nuclides provided");

        let empty = EvolutionRequest::default();
        assert!(service().generate(&empty).is_err());
    }

    #[test]
    fn test_inventory_failures() {
        let unknown = EvolutionRequest {
            nuclides: vec![entry("Xx-999", 1.0, None)],
            ..Default::default()
        };
        let msg = validation_message(service().generate(&unknown).unwrap_err());
        assert!(msg.starts_with("Failed to generate evolution plot: "));

        let stable_activity = EvolutionRequest {
            nuclides: vec![entry("Ni-60", 1.0, Some(QuantityUnit::Bq))],
            ..Default::default()
        };
        assert!(service().generate(&stable_activity).is_err());

        let negative = EvolutionRequest {
            nuclides: vec![entry("Co-60", -1.0, None)],
            ..Default::default()
        };
        assert!(service().generate(&negative).is_err());
    }

    #[test]
    fn test_bad_time_period() {
        for period in [0.0, -5.0, f64::NAN] {
            let request = EvolutionRequest {
                nuclides: vec![entry("Co-60", 1.0, None)],
                time_period: Some(period),
                ..Default::default()
            };
            assert!(service().generate(&request).is_err());
        }
    }
}
