use std::f64::consts::PI;

use pitch_core::analysis::{Analyzer, AnalyzerConfig};
use pitch_core::tuning::NoteTable;
use pitch_core::{Error, PitchReading};

fn sine_window(frequency: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * PI * frequency * i as f64 / sample_rate).sin())
        .collect()
}

fn low_rate_analyzer() -> Analyzer {
    let config = AnalyzerConfig::new(2000.0, 2048).unwrap();
    Analyzer::new(config, NoteTable::concert_a440().clone())
}

#[test]
fn config_rejects_broken_startup_parameters() {
    assert!(matches!(
        AnalyzerConfig::new(0.0, 2048),
        Err(Error::InvalidSampleRate { .. })
    ));
    assert!(matches!(
        AnalyzerConfig::new(f64::NAN, 2048),
        Err(Error::InvalidSampleRate { .. })
    ));
    assert!(matches!(
        AnalyzerConfig::new(44100.0, 0),
        Err(Error::InvalidWindowSize { .. })
    ));
    assert!(matches!(
        AnalyzerConfig::new(44100.0, 1000),
        Err(Error::InvalidWindowSize { .. })
    ));
}

#[test]
fn default_config_matches_the_capture_constants() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.sample_rate(), 44_100.0);
    assert_eq!(config.window_size(), 2048);
    assert!((config.window_duration_secs() - 2048.0 / 44_100.0).abs() < 1e-12);
}

#[test]
fn full_cycle_maps_a_200hz_sine_to_g3() {
    // A 200 Hz sine at 2000 Hz over 2048 samples peaks in bin 205, i.e.
    // about 200.20 Hz, whose nearest concert-pitch note is G3.
    let analyzer = low_rate_analyzer();
    let window = sine_window(200.0, 2000.0, 2048);

    let reading = analyzer.analyze(&window).unwrap();

    let frequency = reading.dominant_frequency.expect("pitch detected");
    assert!((frequency - 205.0 * 2000.0 / 2048.0).abs() < 1e-9);

    assert_eq!(reading.left_note.as_deref(), Some("F#3"));
    assert_eq!(reading.center_note.as_deref(), Some("G3"));
    assert_eq!(reading.right_note.as_deref(), Some("G#3"));
    // 200.20 Hz is sharp of G3 (196.00 Hz): high in the slot range but
    // short of the G#3 boundary.
    assert_eq!(reading.offset_index, Some(7));
}

#[test]
fn silence_yields_an_empty_reading() {
    let analyzer = low_rate_analyzer();
    let reading = analyzer.analyze(&vec![0.0; 2048]).unwrap();
    assert_eq!(reading, PitchReading::silent());
}

#[test]
fn wrong_window_length_fails_the_cycle_recoverably() {
    let analyzer = low_rate_analyzer();

    // Wrong length produces no partial reading...
    assert_eq!(
        analyzer.analyze(&vec![0.0; 1000]),
        Err(Error::InvalidInputSize { len: 1000 })
    );
    // ...and a power of two that is not the configured window fails too.
    assert_eq!(
        analyzer.analyze(&vec![0.0; 1024]),
        Err(Error::InvalidInputSize { len: 1024 })
    );

    // The next well-formed buffer analyzes normally.
    let reading = analyzer
        .analyze(&sine_window(200.0, 2000.0, 2048))
        .unwrap();
    assert!(reading.dominant_frequency.is_some());
}

#[test]
fn bin_aligned_tone_maps_to_its_note() {
    // 500 Hz is bin-aligned (bin 512) and sits closest to B4 (493.88 Hz).
    let analyzer = low_rate_analyzer();
    let reading = analyzer
        .analyze(&sine_window(500.0, 2000.0, 2048))
        .unwrap();

    let frequency = reading.dominant_frequency.expect("pitch detected");
    assert!((frequency - 500.0).abs() < 1e-9);
    assert_eq!(reading.center_note.as_deref(), Some("B4"));
    assert!(reading.offset_index.is_some());
}
