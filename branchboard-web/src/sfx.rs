//! Best-effort sound effect playback.
//!
//! Mirrors the audio collaborator contract: accepts one or more sound
//! sources, plays them simultaneously or in sequence, and never reports
//! failure to the caller. A lock flag drops invocations that arrive while
//! a previous batch is still playing.

use js_sys::{Function, Promise};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::dom;

pub const MERIT_SFX: &str = "audio/merit.mp3";
pub const DEMERIT_SFX: &str = "audio/demerit.mp3";

/// Ceiling on how long one sound may hold the lock if `ended` never fires.
const SOUND_TIMEOUT_MS: i32 = 10_000;

thread_local! {
    static SOUND_LOCK: Cell<bool> = const { Cell::new(false) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Simultaneous,
    Sequence,
}

/// Fire-and-forget playback. Returns immediately; the batch runs on the
/// browser task queue and releases the lock when every sound has ended,
/// errored, or timed out.
pub fn play(sounds: Vec<String>, mode: PlayMode) {
    if sounds.is_empty() || SOUND_LOCK.with(Cell::get) {
        return;
    }
    SOUND_LOCK.with(|lock| lock.set(true));
    spawn_local(async move {
        match mode {
            PlayMode::Sequence => {
                for src in &sounds {
                    if let Some(done) = start_one(src) {
                        let _ = done.await;
                    }
                }
            }
            PlayMode::Simultaneous => {
                // start everything first, then wait for the stragglers
                let waits: Vec<Option<JsFuture>> =
                    sounds.iter().map(|src| start_one(src)).collect();
                for done in waits.into_iter().flatten() {
                    let _ = done.await;
                }
            }
        }
        SOUND_LOCK.with(|lock| lock.set(false));
    });
}

/// Convenience for the one-shot counter sounds.
pub fn play_counter(merit: bool) {
    let src = if merit { MERIT_SFX } else { DEMERIT_SFX };
    play(vec![src.to_string()], PlayMode::Simultaneous);
}

/// Kick off a single sound and hand back a future resolving when it
/// finishes by any route. `None` when the element cannot even be built.
fn start_one(src: &str) -> Option<JsFuture> {
    let audio = HtmlAudioElement::new_with_src(src).ok()?;

    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });
    let resolve = resolve_slot?;

    // resolving twice is harmless, so one callback serves ended, error,
    // autoplay rejection and the safety timeout
    let finish = Closure::<dyn FnMut(JsValue)>::new(move |_reason: JsValue| {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });
    let finish_fn: &Function = finish.as_ref().unchecked_ref();

    let _ = audio.add_event_listener_with_callback("ended", finish_fn);
    let _ = audio.add_event_listener_with_callback("error", finish_fn);
    let _ = dom::window()
        .set_timeout_with_callback_and_timeout_and_arguments_0(finish_fn, SOUND_TIMEOUT_MS);

    match audio.play() {
        Ok(play_promise) => {
            let _ = play_promise.catch(&finish);
        }
        Err(_) => {
            let _ = finish_fn.call0(&JsValue::UNDEFINED);
        }
    }
    finish.forget();

    Some(JsFuture::from(promise))
}
