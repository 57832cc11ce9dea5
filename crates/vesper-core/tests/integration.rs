//! Integration tests for vesper-core primitives working together.
//!
//! Cascaded diffusion, sample-accurate delay verification, modulated reads
//! against a sine reference, and the bandwidth/damping filters in front of a
//! delay line.

use vesper_core::{DelayLine, DiffusionStage, Interpolation, OnePole, diffuse};

const TAU: f32 = core::f32::consts::TAU;

fn generate_sine(cycles_per_sample: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * cycles_per_sample * n as f32))
        .collect()
}

fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

fn impulse_response(stages: &mut [DiffusionStage], len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| {
            let mut x = if n == 0 { 1.0 } else { 0.0 };
            for stage in stages.iter_mut() {
                x = stage.process(x);
            }
            x
        })
        .collect()
}

// ============================================================================
// 1. Diffusion cascades
// ============================================================================

#[test]
fn cascaded_diffusers_preserve_energy() {
    // Same layout as the reverb's input diffusion at 29761 Hz.
    let mut stages = [
        DiffusionStage::new(142.0, 0.75),
        DiffusionStage::new(107.0, 0.75),
        DiffusionStage::new(379.0, 0.625),
        DiffusionStage::new(277.0, 0.625),
    ];
    let ir = impulse_response(&mut stages, 60_000);
    let energy: f32 = ir.iter().map(|y| y * y).sum();
    assert!(
        (energy - 1.0).abs() < 1e-3,
        "all-pass cascade should keep unit energy, got {energy}"
    );
}

#[test]
fn cascaded_diffusers_spread_the_impulse() {
    let mut stages = [
        DiffusionStage::new(142.0, 0.75),
        DiffusionStage::new(107.0, 0.75),
    ];
    let ir = impulse_response(&mut stages, 4000);
    let nonzero = ir.iter().filter(|y| y.abs() > 1e-6).count();
    assert!(nonzero > 20, "expected a dense response, got {nonzero} taps");
}

#[test]
fn diffuse_and_stage_agree() {
    let mut line = DelayLine::with_length(31.0);
    let mut stage = DiffusionStage::new(31.0, 0.6);
    for x in generate_sine(0.013, 500) {
        assert_eq!(diffuse(&mut line, x, 0.6), stage.process(x));
    }
}

// ============================================================================
// 2. Delay accuracy
// ============================================================================

#[test]
fn push_then_read_is_one_shorter() {
    let mut line = DelayLine::with_length(50.0);
    let mut out = Vec::new();
    for n in 0..120 {
        line.push(if n == 0 { 1.0 } else { 0.0 });
        out.push(line.current_output());
    }
    assert_eq!(out.iter().position(|&y| y == 1.0), Some(49));
}

#[test]
fn grown_line_delays_sine_exactly() {
    let mut line = DelayLine::new();
    line.set_length(3000.0);

    let input = generate_sine(0.001, 10_000);
    let mut output = Vec::with_capacity(input.len());
    for &x in &input {
        output.push(line.current_output());
        line.push(x);
    }

    for n in 3000..input.len() {
        assert_eq!(output[n], input[n - 3000], "sample {n}");
    }
}

// ============================================================================
// 3. Modulation
// ============================================================================

#[test]
fn modulated_read_tracks_sine() {
    let mut line = DelayLine::with_length(672.0);
    line.set_modulation(16.0, 1.0 / 48000.0);
    line.set_interpolation(Interpolation::Linear);

    let input = generate_sine(0.0005, 48_000);
    let mut output = Vec::with_capacity(input.len());
    for &x in &input {
        output.push(line.current_output());
        line.push(x);
    }

    let settled = &output[2000..];
    let ratio = rms(settled) / rms(&input[2000..]);
    assert!(
        (ratio - 1.0).abs() < 0.02,
        "a slowly modulated delay should keep the level, ratio {ratio}"
    );
}

#[test]
fn allpass_interpolation_keeps_level_of_low_sine() {
    let mut line = DelayLine::with_length(200.37);
    let input = generate_sine(0.002, 20_000);
    let mut output = Vec::with_capacity(input.len());
    for &x in &input {
        output.push(line.current_output());
        line.push(x);
    }
    let ratio = rms(&output[1000..]) / rms(&input[1000..]);
    assert!((ratio - 1.0).abs() < 0.01, "ratio {ratio}");
}

// ============================================================================
// 4. Filters feeding delays
// ============================================================================

#[test]
fn bandwidth_filter_then_delay() {
    // c = 1 - bandwidth, bandwidth 0.9995
    let mut bandwidth = OnePole::new(1.0 - 0.9995);
    let mut line = DelayLine::with_length(20.0);

    let mut out = 0.0;
    for _ in 0..500 {
        out = line.current_output();
        line.push(bandwidth.process(1.0));
    }
    assert!((out - 1.0).abs() < 1e-3);
}

#[test]
fn full_damping_freezes_tank_input() {
    let mut damping = OnePole::new(1.0);
    for x in generate_sine(0.01, 100) {
        assert_eq!(damping.process(x), 0.0);
    }
}
