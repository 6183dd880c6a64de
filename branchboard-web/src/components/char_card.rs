//! One character card: stat inputs, triangles, session counters, death
//! overlay and the back-face text fields.

use branchboard_core::{CharId, Character, Counter, Field};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{dom, files, sfx};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub id: CharId,
    pub character: Character,
    pub top_merit: bool,
    pub top_demerit: bool,
    pub on_adjust: Callback<(CharId, Counter, i32)>,
    pub on_set_field: Callback<(CharId, Field)>,
    pub on_toggle_dead: Callback<CharId>,
    pub on_remove: Callback<CharId>,
    pub on_export: Callback<CharId>,
}

fn text_input(
    id: CharId,
    on_set_field: &Callback<(CharId, Field)>,
    make: fn(String) -> Field,
) -> Callback<InputEvent> {
    let cb = on_set_field.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            cb.emit((id, make(input.value())));
        }
    })
}

fn number_input(
    id: CharId,
    on_set_field: &Callback<(CharId, Field)>,
    make: fn(u32) -> Field,
) -> Callback<InputEvent> {
    let cb = on_set_field.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            cb.emit((id, make(input.value().trim().parse().unwrap_or(0))));
        }
    })
}

fn area_input(
    id: CharId,
    on_set_field: &Callback<(CharId, Field)>,
    make: fn(String) -> Field,
) -> Callback<InputEvent> {
    let cb = on_set_field.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
            cb.emit((id, make(area.value())));
        }
    })
}

#[function_component(CharCard)]
pub fn char_card(p: &Props) -> Html {
    let id = p.id;
    let c = &p.character;

    let mut class = Classes::from("char");
    let tint = c.tint().class();
    if !tint.is_empty() {
        class.push(tint);
    }
    if c.dead {
        class.push("dead");
    }
    if p.top_merit {
        class.push("star");
        class.push("top-merit");
    }
    if p.top_demerit {
        class.push("tilt");
        class.push("crooked");
        class.push("top-demerit");
    }

    let raise = |which: Counter| {
        let on_adjust = p.on_adjust.clone();
        Callback::from(move |_: MouseEvent| {
            sfx::play_counter(which == Counter::Merit);
            on_adjust.emit((id, which, 1));
        })
    };
    let lower = |which: Counter| {
        let on_adjust = p.on_adjust.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_adjust.emit((id, which, -1));
        })
    };

    let on_remove = {
        let cb = p.on_remove.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let on_toggle_dead = {
        let cb = p.on_toggle_dead.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let on_export = {
        let cb = p.on_export.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };

    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
    let ondrop = {
        let on_set_field = p.on_set_field.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            let Some(file) = e.data_transfer().and_then(|dt| dt.files()).and_then(|f| f.get(0))
            else {
                return;
            };
            if !file.type_().starts_with("image") {
                return;
            }
            let on_set_field = on_set_field.clone();
            spawn_local(async move {
                match files::read_file_as_data_url(&file).await {
                    Ok(data_url) => on_set_field.emit((id, Field::Icon(data_url))),
                    Err(err) => dom::console_error(&format!("icon drop failed: {err}")),
                }
            });
        })
    };

    html! {
        <div {class}>
            <button class="remove-btn" onclick={on_remove}>{ "X" }</button>
            <img src={c.icon_or_placeholder().to_string()} alt="" {ondragover} {ondrop} />
            <div class="stat">
                <span class="label">{ "NAME" }</span>
                <input class="value" value={c.name.clone()}
                    oninput={text_input(id, &p.on_set_field, Field::Name)} />
            </div>
            <div class="stat">
                <span class="label">{ "ANOMALY" }</span>
                <input class="value" value={c.anomaly.clone()}
                    oninput={text_input(id, &p.on_set_field, Field::Anomaly)} />
            </div>
            <div class="stat">
                <span class="label">{ "REALITY" }</span>
                <input class="value" value={c.reality.clone()}
                    oninput={text_input(id, &p.on_set_field, Field::Reality)} />
            </div>
            <div class="stat">
                <span class="label">{ "COMPETENCY" }</span>
                <input class="value" value={c.competency.clone()}
                    oninput={text_input(id, &p.on_set_field, Field::Competency)} />
            </div>
            <div class="tracker-row">
                <div class="triangle" data-type="merit"
                    onclick={raise(Counter::Merit)} oncontextmenu={lower(Counter::Merit)}>
                    { c.merit }
                </div>
                <input class="counter-input merit" type="number"
                    value={c.session_merit.to_string()}
                    oninput={number_input(id, &p.on_set_field, Field::SessionMerit)} />
                <div class="triangle-down" data-type="demerit"
                    onclick={raise(Counter::Demerit)} oncontextmenu={lower(Counter::Demerit)}>
                    { c.demerit }
                </div>
                <input class="counter-input demerit" type="number"
                    value={c.session_demerit.to_string()}
                    oninput={number_input(id, &p.on_set_field, Field::SessionDemerit)} />
            </div>
            <div class="back-face">
                <span class="label">{ "PRIME DIRECTIVE" }</span>
                <textarea value={c.prime_directive.clone()}
                    oninput={area_input(id, &p.on_set_field, Field::PrimeDirective)} />
                <span class="label">{ "ENCOURAGED BEHAVIOR" }</span>
                <textarea value={c.encouraged_behavior.clone()}
                    oninput={area_input(id, &p.on_set_field, Field::EncouragedBehavior)} />
            </div>
            if c.dead {
                <div class="death-overlay">{ "SICK LEAVE" }</div>
            }
            if p.top_merit {
                <div class="thumb">{ "\u{1F44D}" }</div>
                <div class="shine-overlay" aria-hidden="true"></div>
            }
            if p.top_demerit {
                <div class="vignette-overlay" aria-hidden="true"></div>
            }
            <button class="death-btn" title="Toggle death state" onclick={on_toggle_dead}>{ "\u{2716}" }</button>
            <button class="agent-export-btn" title="Export character" onclick={on_export}>{ "\u{2913}" }</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(character: Character, top_merit: bool) -> Props {
        Props {
            id: CharId::default(),
            character,
            top_merit,
            top_demerit: false,
            on_adjust: Callback::noop(),
            on_set_field: Callback::noop(),
            on_toggle_dead: Callback::noop(),
            on_remove: Callback::noop(),
            on_export: Callback::noop(),
        }
    }

    #[test]
    fn dead_card_shows_overlay_and_class() {
        let character = Character {
            dead: true,
            ..Character::named("Petey")
        };
        let html = block_on(LocalServerRenderer::<CharCard>::with_props(props(character, false)).render());
        assert!(html.contains("SICK LEAVE"));
        assert!(html.contains("dead"));
        assert!(html.contains("Petey"));
    }

    #[test]
    fn top_merit_card_gets_star_and_thumb() {
        let character = Character {
            merit: 7,
            ..Character::default()
        };
        let html = block_on(LocalServerRenderer::<CharCard>::with_props(props(character, true)).render());
        assert!(html.contains("star"));
        assert!(html.contains("shine-overlay"));
        assert!(html.contains("\u{1F44D}"));
    }
}
