//! Root component: owns the board reducer and wires the components to it.

use branchboard_core::{TaskKind, settings_file_name};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{CharCard, TaskPanel, Toolbar, WorldBar};
use crate::state::{Action, BoardState};
use crate::{dom, files, sfx};

fn dispatch_map<T: 'static>(
    state: &UseReducerHandle<BoardState>,
    to_action: fn(T) -> Action,
) -> Callback<T> {
    let state = state.clone();
    Callback::from(move |input| state.dispatch(to_action(input)))
}

#[allow(clippy::cast_possible_truncation, clippy::too_many_lines)]
#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(BoardState::bootstrap);

    let on_adjust = dispatch_map(&state, |(id, which, delta)| {
        Action::AdjustCounter(id, which, delta)
    });
    let on_set_field = dispatch_map(&state, |(id, field)| Action::SetField(id, field));
    let on_toggle_dead = dispatch_map(&state, Action::ToggleDead);
    let on_remove = dispatch_map(&state, Action::RemoveCharacter);
    let on_delete_task = dispatch_map(&state, Action::DeleteTask);
    let on_branch_change = dispatch_map(&state, Action::SetBranchName);

    let on_add = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(Action::AddCharacter))
    };
    let on_reset_board = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(Action::ResetCharacters))
    };
    let on_reset_tasks = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(Action::ResetTasks))
    };
    let on_create_task = {
        let state = state.clone();
        Callback::from(move |(title, kind, amount, mode)| {
            state.dispatch(Action::CreateTask {
                title,
                kind,
                amount,
                mode,
            });
        })
    };

    // Apply the state change at once; the per-step sounds run on their
    // own timeline so a long task does not delay the counters.
    let on_execute_task = {
        let state = state.clone();
        Callback::from(move |(task_id, target): (String, _)| {
            if let Some(task) = state.board.tasks().get(&task_id) {
                if !task.is_inert() {
                    let times = task.amount.max(1);
                    let merit = task.kind == TaskKind::Merit;
                    spawn_local(async move {
                        for step in 0..times {
                            if step > 0 {
                                let _ = dom::sleep_ms(120).await;
                            }
                            sfx::play_counter(merit);
                        }
                    });
                }
            }
            state.dispatch(Action::ExecuteTask { task_id, target });
        })
    };

    let on_witness = {
        let state = state.clone();
        Callback::from(move |delta: i32| {
            state.dispatch(if delta >= 0 {
                Action::IncrementWitness
            } else {
                Action::DecrementWitness
            });
        })
    };
    let on_chaos = {
        let state = state.clone();
        Callback::from(move |delta: i32| {
            state.dispatch(if delta >= 0 {
                Action::IncrementChaos
            } else {
                Action::DecrementChaos
            });
        })
    };

    let on_export_settings = {
        let state = state.clone();
        Callback::from(move |()| {
            let Some(payload) = state.board.export_settings() else {
                dom::alert("Settings could not be read for export.");
                return;
            };
            files::download_json(&settings_file_name(&files::timestamp_stamp()), &payload);
        })
    };
    let on_export_agent = {
        let state = state.clone();
        Callback::from(move |id| {
            let created = js_sys::Date::now() as i64;
            if let Some((file_name, payload)) = state.board.export_agent(id, created) {
                files::download_json(&file_name, &payload);
            }
        })
    };

    let import_via = |wrap: fn(String) -> Action| {
        let state = state.clone();
        Callback::from(move |input: HtmlInputElement| {
            let Some(guard) = files::begin_import() else {
                return;
            };
            let state = state.clone();
            spawn_local(async move {
                let _guard = guard;
                match files::read_selected_file(&input).await {
                    Ok(text) => state.dispatch(wrap(text)),
                    Err(err) => dom::alert(&format!("Could not read the file: {err}")),
                }
                // allow picking the same file again
                input.set_value("");
            });
        })
    };
    let on_settings_file = import_via(Action::ApplySettings);
    let on_agent_file = import_via(Action::ApplyAgent);

    let board = &state.board;
    let cards = board.characters().iter().map(|(id, character)| {
        html! {
            <CharCard
                key={id.to_string()}
                {id}
                character={character.clone()}
                top_merit={board.characters().is_top_merit(id)}
                top_demerit={board.characters().is_top_demerit(id)}
                on_adjust={on_adjust.clone()}
                on_set_field={on_set_field.clone()}
                on_toggle_dead={on_toggle_dead.clone()}
                on_remove={on_remove.clone()}
                on_export={on_export_agent.clone()}
            />
        }
    });
    let roster: Vec<_> = board
        .characters()
        .iter()
        .map(|(id, character)| (id, character.clone()))
        .collect();

    html! {
        <main class="board">
            <WorldBar
                branch_name={board.world().branch_name.clone()}
                witness={board.world().witness}
                chaos={board.world().chaos}
                {on_branch_change}
                {on_witness}
                {on_chaos}
            />
            <Toolbar
                {on_add}
                {on_reset_board}
                {on_export_settings}
                {on_settings_file}
                {on_agent_file}
            />
            <div class="char-grid">
                { for cards }
            </div>
            <TaskPanel
                tasks={board.tasks().to_tasks()}
                characters={roster}
                on_create={on_create_task}
                on_delete={on_delete_task}
                on_execute={on_execute_task}
                on_reset={on_reset_tasks}
            />
        </main>
    }
}
