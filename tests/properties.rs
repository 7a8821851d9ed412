//! End-to-end properties of the forcing -> GWP -> reveal pipeline.

use approx::assert_relative_eq;
use gwp_pulse::config::PipelineConfig;
use gwp_pulse::pipeline::Pipeline;
use gwp_pulse::substance::Substance;

const SECONDS_PER_YEAR: f64 = 3.15e7;
const EARTH_AREA_M2: f64 = 5.1e14;

fn synthetic_config(n_years: u32) -> PipelineConfig {
    PipelineConfig {
        substances: vec![
            Substance::new("X", "#1f77b4"),
            Substance::new("CO2", "#7f7f7f"),
        ],
        reference: "CO2".to_string(),
        pulse_mass_kg: 1.0,
        seconds_per_year: SECONDS_PER_YEAR,
        earth_area_m2: EARTH_AREA_M2,
        horizons: vec![20.0],
        frame_max: n_years,
        time_max: n_years as f64,
        ..PipelineConfig::default()
    }
}

/// CO2 constant at 1.0 W/m², X constant at 25.0 W/m², timestep 1 year.
fn constant_forcing_csv(n_years: u32) -> String {
    let mut csv = String::from("time(years),X,CO2\n");
    for t in 0..=n_years {
        csv.push_str(&format!("{},25.0,1.0\n", t));
    }
    csv
}

fn decaying_forcing_csv(n_years: u32) -> String {
    let mut csv = String::from("time(years),X,CO2\n");
    for t in 0..=n_years {
        let decay = 0.95f64.powi(t as i32);
        csv.push_str(&format!("{},{},{}\n", t, 25.0 * decay, decay));
    }
    csv
}

#[test]
fn constant_forcing_scenario() {
    let pipeline =
        Pipeline::from_reader(constant_forcing_csv(40).as_bytes(), synthetic_config(40)).unwrap();
    let derived = pipeline.derived();

    // Row 0 of the integral is one year's worth of seconds times area.
    assert_relative_eq!(
        derived.integrated()[[0, 1]],
        SECONDS_PER_YEAR * EARTH_AREA_M2
    );
    assert_relative_eq!(
        derived.integrated()[[0, 0]],
        25.0 * SECONDS_PER_YEAR * EARTH_AREA_M2
    );

    for row in 0..derived.n_rows() {
        assert_relative_eq!(derived.gwp_at(row, 0), 25.0);
        assert_relative_eq!(derived.gwp_at(row, 1), 1.0);
    }
}

#[test]
fn integral_matches_running_sum_of_raw_series() {
    let pipeline =
        Pipeline::from_reader(decaying_forcing_csv(100).as_bytes(), synthetic_config(100)).unwrap();
    let table = pipeline.table();
    let derived = pipeline.derived();

    for substance in 0..2 {
        let mut running = 0.0;
        for row in 0..table.n_rows() {
            running += table.values()[[row, substance]];
            assert_relative_eq!(
                derived.integrated()[[row, substance]],
                running * SECONDS_PER_YEAR * EARTH_AREA_M2,
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn reference_gwp_is_unity_for_decaying_series() {
    let pipeline =
        Pipeline::from_reader(decaying_forcing_csv(100).as_bytes(), synthetic_config(100)).unwrap();
    for row in 0..pipeline.derived().n_rows() {
        assert_relative_eq!(pipeline.derived().gwp_at(row, 1), 1.0);
    }
}

#[test]
fn horizon_20_annotation_reads_25() {
    let pipeline =
        Pipeline::from_reader(constant_forcing_csv(40).as_bytes(), synthetic_config(40)).unwrap();
    let mapping = pipeline.linear_mapping().unwrap();
    let mut reveal = pipeline.reveal(&mapping);

    let mut annotations = Vec::new();
    for frame in 0..40 {
        if let Some(instructions) = reveal.advance(frame).unwrap() {
            for annotation in instructions.annotations {
                annotations.push((annotation.horizon.years(), annotation.labels[0].text.clone()));
            }
        }
    }

    assert_eq!(annotations, vec![(20.0, "25".to_string())]);
}

#[test]
fn restart_replays_all_crossings() {
    let pipeline =
        Pipeline::from_reader(constant_forcing_csv(40).as_bytes(), synthetic_config(40)).unwrap();
    let mapping = pipeline.linear_mapping().unwrap();
    let mut reveal = pipeline.reveal(&mapping);

    let sweep = |reveal: &mut gwp_pulse::reveal::RevealStateMachine<'_>| {
        let mut fired = Vec::new();
        for frame in 0..=40 {
            if let Some(instructions) = reveal.advance(frame).unwrap() {
                fired.extend(
                    instructions
                        .annotations
                        .iter()
                        .map(|a| (a.horizon.years(), a.labels[0].text.clone())),
                );
            }
        }
        fired
    };

    let first_run = sweep(&mut reveal);
    assert!(reveal.is_terminal());

    reveal.reset();
    let second_run = sweep(&mut reveal);

    assert_eq!(first_run, second_run);
    assert_eq!(first_run.len(), 1);
}
