//! Task list, the add-task form and the target-chooser overlay.

use branchboard_core::{CharId, Character, Task, TaskKind, TaskMode};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub tasks: Vec<Task>,
    /// Roster in display order, for the chooser overlay.
    pub characters: Vec<(CharId, Character)>,
    pub on_create: Callback<(String, TaskKind, i64, TaskMode)>,
    pub on_delete: Callback<String>,
    pub on_execute: Callback<(String, CharId)>,
    pub on_reset: Callback<()>,
}

#[function_component(TaskPanel)]
pub fn task_panel(p: &Props) -> Html {
    // Task id waiting for a target; `Some` shows the chooser overlay.
    let pending = use_state(|| Option::<String>::None);

    let title_ref = use_node_ref();
    let amount_ref = use_node_ref();
    let kind_ref = use_node_ref();
    let mode_ref = use_node_ref();

    let on_add = {
        let on_create = p.on_create.clone();
        let title_ref = title_ref.clone();
        let amount_ref = amount_ref.clone();
        let kind_ref = kind_ref.clone();
        let mode_ref = mode_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(title_input) = title_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let title = title_input.value().trim().to_string();
            if title.is_empty() {
                return;
            }
            let amount = amount_ref
                .cast::<HtmlInputElement>()
                .and_then(|input| input.value().trim().parse::<i64>().ok())
                .unwrap_or(1);
            let kind = kind_ref
                .cast::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<TaskKind>().ok())
                .unwrap_or(TaskKind::Merit);
            let mode = mode_ref
                .cast::<HtmlSelectElement>()
                .map(|select| TaskMode::from_input(&select.value()))
                .unwrap_or_default();

            on_create.emit((title, kind, amount, mode));
            title_input.set_value("");
        })
    };

    let on_reset = {
        let cb = p.on_reset.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let close_chooser = {
        let pending = pending.clone();
        Callback::from(move |_: MouseEvent| pending.set(None))
    };

    let task_cards = p.tasks.iter().map(|task| {
        let inert = task.is_inert();
        let onclick = {
            let pending = pending.clone();
            let id = task.id.clone();
            Callback::from(move |_: MouseEvent| {
                if !inert {
                    pending.set(Some(id.clone()));
                }
            })
        };
        let ondelete = {
            let cb = p.on_delete.clone();
            let id = task.id.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                cb.emit(id.clone());
            })
        };
        let mut class = Classes::from("task-card");
        class.push(task.kind.as_str());
        if inert {
            class.push("used");
        }
        html! {
            <div key={task.id.clone()} {class} {onclick}>
                <span class="task-icon">{ task.icon.clone() }</span>
                <span class="task-title">{ task.title.clone() }</span>
                <span class="task-amount">{ format!("x{}", task.amount) }</span>
                if task.mode == TaskMode::Once {
                    <span class="task-mode">{ if inert { "spent" } else { "once" } }</span>
                }
                <button class="task-delete" title="Delete task" onclick={ondelete}>{ "X" }</button>
            </div>
        }
    });

    let chooser = pending.as_ref().map(|task_id| {
        let rows = p.characters.iter().enumerate().map(|(index, (id, character))| {
            let label = if character.name.is_empty() {
                format!("Char {}", index + 1)
            } else {
                character.name.clone()
            };
            let onclick = {
                let on_execute = p.on_execute.clone();
                let pending = pending.clone();
                let task_id = task_id.clone();
                let id = *id;
                Callback::from(move |_: MouseEvent| {
                    pending.set(None);
                    on_execute.emit((task_id.clone(), id));
                })
            };
            html! {
                <button key={id.to_string()} class="chooser-row" {onclick}>{ label }</button>
            }
        });
        html! {
            <div class="chooser-overlay" onclick={close_chooser.clone()}>
                <div class="chooser" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                    <span class="chooser-title">{ "Apply to whom?" }</span>
                    { for rows }
                    <button class="chooser-cancel" onclick={close_chooser.clone()}>{ "Cancel" }</button>
                </div>
            </div>
        }
    });

    html! {
        <section class="task-panel">
            <div class="task-list">
                { for task_cards }
            </div>
            <div class="task-form">
                <input ref={title_ref} class="task-form-title" placeholder="Task title" />
                <select ref={kind_ref} class="task-form-kind">
                    <option value="merit" selected=true>{ "merit" }</option>
                    <option value="demerit">{ "demerit" }</option>
                </select>
                <input ref={amount_ref} class="task-form-amount" type="number" min="1" value="1" />
                <select ref={mode_ref} class="task-form-mode">
                    <option value="infinite" selected=true>{ "infinite" }</option>
                    <option value="once">{ "once" }</option>
                </select>
                <button class="task-form-add" onclick={on_add}>{ "Add task" }</button>
                <button class="task-form-reset" onclick={on_reset}>{ "Clear tasks" }</button>
            </div>
            if let Some(overlay) = chooser {
                { overlay }
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(tasks: Vec<Task>) -> Props {
        Props {
            tasks,
            characters: Vec::new(),
            on_create: Callback::noop(),
            on_delete: Callback::noop(),
            on_execute: Callback::noop(),
            on_reset: Callback::noop(),
        }
    }

    fn task(id: &str, title: &str, used: bool, mode: TaskMode) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            kind: TaskKind::Merit,
            amount: 2,
            used,
            mode,
            icon: TaskKind::Merit.icon().to_string(),
        }
    }

    #[test]
    fn renders_task_cards_with_amounts() {
        let html = block_on(
            LocalServerRenderer::<TaskPanel>::with_props(props(vec![task(
                "task-1",
                "Clean desk",
                false,
                TaskMode::Infinite,
            )]))
            .render(),
        );
        assert!(html.contains("Clean desk"));
        assert!(html.contains("x2"));
        assert!(!html.contains("used"));
    }

    #[test]
    fn spent_once_task_is_marked_used() {
        let html = block_on(
            LocalServerRenderer::<TaskPanel>::with_props(props(vec![task(
                "task-1",
                "One shot",
                true,
                TaskMode::Once,
            )]))
            .render(),
        );
        assert!(html.contains("used"));
        assert!(html.contains("spent"));
    }
}
