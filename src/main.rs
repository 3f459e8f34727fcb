//! Offline effect demo: renders a test tone through a chosen effect and
//! bounces the result to a WAV file.
//!
//! Usage: stompbox <overdrive|distortion|fuzz|tremolo|chorus|delay|reverb|compressor>

#[cfg(feature = "bounce")]
fn main() -> anyhow::Result<()> {
    use anyhow::bail;
    use stompbox::controls::{ControlFrame, KNOB_4, KNOB_6};
    use stompbox::effects::{
        Chorus, Compressor, Delay, Distortion, Effect, Fuzz, Overdrive, Reverb, Tremolo,
    };
    use stompbox::pedal::Pedal;
    use stompbox::utils::init_logger;

    const SAMPLE_RATE: u32 = 48000;
    const RENDER_SECONDS: u32 = 3;

    init_logger();

    let name = std::env::args().nth(1).unwrap_or_else(|| "tremolo".to_string());
    let effect: Box<dyn Effect> = match name.as_str() {
        "overdrive" => Box::new(Overdrive::new(SAMPLE_RATE)),
        "distortion" => Box::new(Distortion::new(SAMPLE_RATE)),
        "fuzz" => Box::new(Fuzz::new(SAMPLE_RATE)),
        "tremolo" => Box::new(Tremolo::new(SAMPLE_RATE)),
        "chorus" => Box::new(Chorus::new(SAMPLE_RATE)),
        "delay" => Box::new(Delay::new(SAMPLE_RATE)),
        "reverb" => Box::new(Reverb::new(SAMPLE_RATE)),
        "compressor" => Box::new(Compressor::new(SAMPLE_RATE)),
        other => bail!("unknown effect '{}'", other),
    };

    let mut pedal = Pedal::new();
    pedal.set_effect(effect);

    // Mid positions everywhere, full level and an audible wet share
    let mut frame = ControlFrame::default();
    frame.knobs[KNOB_4] = 0.8;
    frame.knobs[KNOB_6] = 0.7;
    pedal.update_controls(&frame);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let path = format!("{}.wav", name);
    let mut writer = hound::WavWriter::create(&path, spec)?;

    log::info!("rendering {}s of '{}' to {}", RENDER_SECONDS, name, path);

    // Plucked-string stand-in: a 220 Hz tone with an exponential decay,
    // retriggered once per second.
    let total = SAMPLE_RATE * RENDER_SECONDS;
    for i in 0..total {
        let t = (i % SAMPLE_RATE) as f32 / SAMPLE_RATE as f32;
        let tone = (2.0 * std::f32::consts::PI * 220.0 * t).sin();
        let envelope = (-4.0 * t).exp();
        let sample = pedal.process(tone * envelope * 0.5);
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    log::info!("done");
    Ok(())
}

#[cfg(not(feature = "bounce"))]
fn main() {
    println!("This binary is only available with the 'bounce' feature enabled.");
}
