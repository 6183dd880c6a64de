//! Branch header: name field plus the witness and chaos counters.
//!
//! Left click raises a counter, right click lowers it, matching the
//! card triangles.

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub branch_name: String,
    pub witness: u32,
    pub chaos: u32,
    pub on_branch_change: Callback<String>,
    /// +1 or -1 per interaction.
    pub on_witness: Callback<i32>,
    pub on_chaos: Callback<i32>,
}

fn counter_handlers(cb: &Callback<i32>) -> (Callback<MouseEvent>, Callback<MouseEvent>) {
    let raise = {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(1))
    };
    let lower = {
        let cb = cb.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(-1);
        })
    };
    (raise, lower)
}

#[function_component(WorldBar)]
pub fn world_bar(p: &Props) -> Html {
    let oninput = {
        let cb = p.on_branch_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };

    let (witness_up, witness_down) = counter_handlers(&p.on_witness);
    let (chaos_up, chaos_down) = counter_handlers(&p.on_chaos);

    html! {
        <header class="world-bar">
            <input class="branch-name" placeholder="Branch name"
                value={p.branch_name.clone()} {oninput} />
            <div class="world-counter witness" title="Witness"
                onclick={witness_up} oncontextmenu={witness_down}>
                <span class="label">{ "WITNESS" }</span>
                <span class="value">{ p.witness }</span>
            </div>
            <div class="world-counter chaos" title="Chaos"
                onclick={chaos_up} oncontextmenu={chaos_down}>
                <span class="label">{ "CHAOS" }</span>
                <span class="value">{ p.chaos }</span>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_branch_name_and_counters() {
        let props = Props {
            branch_name: "MDR".to_string(),
            witness: 4,
            chaos: 81,
            on_branch_change: Callback::noop(),
            on_witness: Callback::noop(),
            on_chaos: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<WorldBar>::with_props(props).render());
        assert!(html.contains("MDR"));
        assert!(html.contains("WITNESS"));
        assert!(html.contains(">4<"));
        assert!(html.contains(">81<"));
    }
}
