//! Demo session: WAV in, knob commands out.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use voxpad::analysis::analyze;
use voxpad::dispatch::{plan, CommandSink, KnobMap, StdoutSink};
use voxpad::engine::Tuning;
use voxpad::formant::VoiceProfile;
use voxpad::io::read_mono_wav;
use voxpad::session::{ControlEvent, Session};

pub fn run(wav_path: &str, profile_name: &str, tuning_path: Option<&str>) -> EyreResult<()> {
    let tuning = match tuning_path {
        Some(path) => {
            let doc = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read tuning file {path}"))?;
            Tuning::from_toml_str(&doc)?
        }
        None => Tuning::default(),
    };
    let profile = VoiceProfile::get(profile_name)?;

    let clip = read_mono_wav(wav_path)?;
    println!("=== voxpad ===");
    println!("Clip: {} ({:.2} s at {} Hz)", wav_path, clip.duration_secs(), clip.sample_rate);

    let fingerprint = analyze(&clip.samples, clip.sample_rate, &tuning)?;
    println!(
        "Fingerprint: pad=({:.3}, {:.3})  centroid={:.0} Hz  confidence={:.2}{}",
        fingerprint.pad.x(),
        fingerprint.pad.y(),
        fingerprint.centroid_hz,
        fingerprint.confidence,
        if fingerprint.is_confident() { "" } else { "  (low)" },
    );

    // Without hardware attached, the profile canon stands in for a captured
    // base preset.
    let mut session = Session::new(tuning);
    // Capture first: every recompute-bearing event needs a base in place.
    session.handle(ControlEvent::CaptureBase(profile.canonical))?;
    session.handle(ControlEvent::ProfileSelected(profile.name))?;
    session.handle(ControlEvent::FingerprintReady(fingerprint))?;
    session.handle(ControlEvent::SnapToFingerprint)?;

    let request = session
        .handle(ControlEvent::ToggleRequested)?
        .ok_or_else(|| eyre!("toggle produced no dispatch"))?;

    println!();
    println!("Processed preset at the fingerprint's pad point ({}):", profile.name.as_str());
    let mut sink = StdoutSink;
    for cmd in plan(None, &request.vector, request.force_full, &KnobMap::default()) {
        sink.send(&cmd)?;
    }

    Ok(())
}
