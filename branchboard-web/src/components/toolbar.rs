//! Board-level controls: add card, reset, settings export and the two
//! file-import pickers.

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_add: Callback<()>,
    pub on_reset_board: Callback<()>,
    pub on_export_settings: Callback<()>,
    /// Invoked with the file input once the user picked a settings file.
    pub on_settings_file: Callback<HtmlInputElement>,
    /// Invoked with the file input once the user picked an agent file.
    pub on_agent_file: Callback<HtmlInputElement>,
}

fn unit_click(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_: MouseEvent| cb.emit(()))
}

fn open_picker(node: &NodeRef) -> Callback<MouseEvent> {
    let node = node.clone();
    Callback::from(move |_: MouseEvent| {
        if let Some(input) = node.cast::<HtmlInputElement>() {
            input.click();
        }
    })
}

fn picker_changed(node: &NodeRef, cb: &Callback<HtmlInputElement>) -> Callback<Event> {
    let node = node.clone();
    let cb = cb.clone();
    Callback::from(move |_: Event| {
        if let Some(input) = node.cast::<HtmlInputElement>() {
            cb.emit(input);
        }
    })
}

#[function_component(Toolbar)]
pub fn toolbar(p: &Props) -> Html {
    let settings_ref = use_node_ref();
    let agent_ref = use_node_ref();

    html! {
        <nav class="toolbar">
            <button class="add-char" onclick={unit_click(&p.on_add)}>{ "Add character" }</button>
            <button class="reset-board" onclick={unit_click(&p.on_reset_board)}>{ "Reset board" }</button>
            <button class="export-settings" onclick={unit_click(&p.on_export_settings)}>{ "Export settings" }</button>
            <button class="import-settings" onclick={open_picker(&settings_ref)}>{ "Import settings" }</button>
            <button class="import-agent" onclick={open_picker(&agent_ref)}>{ "Import character" }</button>
            <input ref={settings_ref.clone()} type="file" accept=".json,application/json"
                class="hidden-picker" onchange={picker_changed(&settings_ref, &p.on_settings_file)} />
            <input ref={agent_ref.clone()} type="file" accept=".json,application/json"
                class="hidden-picker" onchange={picker_changed(&agent_ref, &p.on_agent_file)} />
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_all_controls() {
        let props = Props {
            on_add: Callback::noop(),
            on_reset_board: Callback::noop(),
            on_export_settings: Callback::noop(),
            on_settings_file: Callback::noop(),
            on_agent_file: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Toolbar>::with_props(props).render());
        assert!(html.contains("Add character"));
        assert!(html.contains("Export settings"));
        assert!(html.contains("Import character"));
        assert!(html.contains("type=\"file\""));
    }
}
