// Controller behavior: bypass passthrough, footswitch toggling and LED
// plumbing around a real effect.

use stompbox::controls::{ControlFrame, FOOTSWITCH_1, KNOB_2, KNOB_4, KNOB_6};
use stompbox::effects::{Compressor, Tremolo};
use stompbox::pedal::Pedal;

#[test]
fn bypassed_pedal_is_transparent() {
    let mut pedal = Pedal::new();
    pedal.set_effect(Box::new(Tremolo::new(48000)));

    let mut frame = ControlFrame::default();
    frame.knobs[KNOB_2] = 1.0;
    frame.knobs[KNOB_4] = 1.0;
    frame.knobs[KNOB_6] = 1.0;
    frame.footswitch_edge[FOOTSWITCH_1] = true; // engage bypass
    pedal.update_controls(&frame);
    assert!(pedal.is_bypassed());

    for i in 0..4800 {
        let input = ((i as f32) * 0.02).sin();
        assert_eq!(pedal.process(input), input, "bypass must be bit-transparent");
    }
}

#[test]
fn footswitch_engages_effect_again() {
    let mut pedal = Pedal::new();
    pedal.set_effect(Box::new(Tremolo::new(48000)));

    let mut frame = ControlFrame::default();
    frame.knobs[KNOB_2] = 1.0;
    frame.knobs[KNOB_4] = 1.0;
    frame.knobs[KNOB_6] = 1.0;

    // Press twice: bypass on, then off again
    frame.footswitch_edge[FOOTSWITCH_1] = true;
    pedal.update_controls(&frame);
    pedal.update_controls(&frame);
    frame.footswitch_edge[FOOTSWITCH_1] = false;
    pedal.update_controls(&frame);
    assert!(!pedal.is_bypassed());

    // Engaged tremolo at full depth modulates a constant input
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for _ in 0..48000 {
        let out = pedal.process(1.0);
        min = min.min(out);
        max = max.max(out);
    }
    assert!(max - min > 0.5, "engaged effect should modulate: {}..{}", min, max);
}

#[test]
fn led_reflects_effect_state() {
    let mut pedal = Pedal::new();
    pedal.set_effect(Box::new(Compressor::new(48000)));

    let frame = ControlFrame::default();
    pedal.update_controls(&frame);
    let led_idle = pedal.led();
    assert!(led_idle >= 0.0 && led_idle <= 1.0);

    // Drive the compressor into reduction, then refresh controls so the
    // LED picks up the meter.
    for _ in 0..48000 {
        pedal.process(1.0);
    }
    pedal.update_controls(&frame);
    assert!(
        pedal.led() < led_idle,
        "compressor LED should dim under reduction: {} -> {}",
        led_idle,
        pedal.led()
    );
}
