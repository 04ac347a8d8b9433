use memorama_core::FeedbackSink;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType, SpeechSynthesisUtterance};

/// One sine tone in a cue sequence; `delay` offsets it from the cue start.
struct Tone {
    freq: f32,
    volume: f32,
    duration: f64,
    delay: f64,
}

const fn tone(freq: f32, volume: f32, duration: f64, delay: f64) -> Tone {
    Tone {
        freq,
        volume,
        duration,
        delay,
    }
}

const FLIP: &[Tone] = &[tone(600.0, 0.1, 0.05, 0.0)];
const SUCCESS: &[Tone] = &[tone(800.0, 0.15, 0.1, 0.0), tone(1000.0, 0.15, 0.1, 0.1)];
const FAIL: &[Tone] = &[tone(400.0, 0.15, 0.1, 0.0), tone(300.0, 0.15, 0.1, 0.1)];
const GAME_START: &[Tone] = &[
    tone(500.0, 0.1, 0.08, 0.0),
    tone(600.0, 0.1, 0.08, 0.1),
    tone(700.0, 0.1, 0.08, 0.2),
];
const GAME_WON: &[Tone] = &[
    tone(800.0, 0.15, 0.15, 0.0),
    tone(1000.0, 0.15, 0.15, 0.1),
    tone(1200.0, 0.15, 0.15, 0.2),
];

/// Tone and speech cues over the platform audio APIs.
///
/// Every cue is best-effort: platform failures are logged and swallowed so
/// missing audio or speech support never blocks gameplay.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct WebAudioFeedback;

impl WebAudioFeedback {
    fn play_tones(&self, tones: &[Tone]) {
        if let Err(err) = try_play_tones(tones) {
            log::debug!("audio feedback not available: {:?}", err);
        }
    }
}

fn try_play_tones(tones: &[Tone]) -> Result<(), JsValue> {
    let ctx = AudioContext::new()?;

    for tone in tones {
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(tone.freq);

        let start = ctx.current_time() + tone.delay;
        gain.gain().set_value_at_time(tone.volume, start)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, start + tone.duration)?;

        osc.start_with_when(start)?;
        osc.stop_with_when(start + tone.duration)?;
    }

    Ok(())
}

fn try_narrate(text: &str) -> Result<(), JsValue> {
    let synth = gloo::utils::window().speech_synthesis()?;

    let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
    utterance.set_lang("es-ES");
    // slow rate so elderly listeners can follow
    utterance.set_rate(0.8);
    utterance.set_pitch(1.0);
    utterance.set_volume(1.0);

    // replace any in-flight narration
    synth.cancel();
    synth.speak(&utterance);
    Ok(())
}

impl FeedbackSink for WebAudioFeedback {
    fn play_flip(&self) {
        self.play_tones(FLIP);
    }

    fn play_success(&self) {
        self.play_tones(SUCCESS);
    }

    fn play_fail(&self) {
        self.play_tones(FAIL);
    }

    fn play_game_start(&self) {
        self.play_tones(GAME_START);
    }

    fn play_game_won(&self) {
        self.play_tones(GAME_WON);
    }

    fn narrate(&self, text: &str) {
        if let Err(err) = try_narrate(text) {
            log::debug!("speech synthesis not available: {:?}", err);
        }
    }
}
