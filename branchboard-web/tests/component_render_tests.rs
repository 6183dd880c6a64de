use branchboard_core::{Character, Task, TaskKind, TaskMode};
use futures::executor::block_on;
use yew::{Callback, LocalServerRenderer};

use branchboard_web::components::char_card::CharCard;
use branchboard_web::components::task_panel::TaskPanel;
use branchboard_web::components::toolbar::Toolbar;
use branchboard_web::components::world_bar::WorldBar;

fn card_props(character: Character, top_merit: bool, top_demerit: bool) -> branchboard_web::components::char_card::Props {
    branchboard_web::components::char_card::Props {
        id: branchboard_core::CharId::default(),
        character,
        top_merit,
        top_demerit,
        on_adjust: Callback::noop(),
        on_set_field: Callback::noop(),
        on_toggle_dead: Callback::noop(),
        on_remove: Callback::noop(),
        on_export: Callback::noop(),
    }
}

#[test]
fn char_card_renders_tint_and_fields() {
    let character = Character {
        merit: 3,
        demerit: 1,
        anomaly: "spectral".to_string(),
        ..Character::named("Helly")
    };
    let props = card_props(character, false, false);
    let html = block_on(LocalServerRenderer::<CharCard>::with_props(props).render());
    assert!(html.contains("Helly"));
    assert!(html.contains("spectral"));
    assert!(html.contains("char merit"));
    assert!(html.contains("PRIME DIRECTIVE"));
    assert!(!html.contains("death-overlay"));
}

#[test]
fn top_demerit_card_is_crooked_and_vignetted() {
    let character = Character {
        demerit: 9,
        ..Character::named("Dylan")
    };
    let props = card_props(character, false, true);
    let html = block_on(LocalServerRenderer::<CharCard>::with_props(props).render());
    assert!(html.contains("crooked"));
    assert!(html.contains("vignette-overlay"));
    assert!(!html.contains("shine-overlay"));
}

#[test]
fn empty_icon_falls_back_to_placeholder() {
    let props = card_props(Character::named("Mark"), false, false);
    let html = block_on(LocalServerRenderer::<CharCard>::with_props(props).render());
    assert!(html.contains(branchboard_core::PLACEHOLDER_ICON));
}

#[test]
fn task_panel_lists_tasks_and_form() {
    let props = branchboard_web::components::task_panel::Props {
        tasks: vec![
            Task {
                id: "task-1".to_string(),
                title: "Refine the numbers".to_string(),
                kind: TaskKind::Merit,
                amount: 3,
                used: false,
                mode: TaskMode::Infinite,
                icon: TaskKind::Merit.icon().to_string(),
            },
            Task {
                id: "task-2".to_string(),
                title: "Break protocol".to_string(),
                kind: TaskKind::Demerit,
                amount: 1,
                used: false,
                mode: TaskMode::Once,
                icon: TaskKind::Demerit.icon().to_string(),
            },
        ],
        characters: Vec::new(),
        on_create: Callback::noop(),
        on_delete: Callback::noop(),
        on_execute: Callback::noop(),
        on_reset: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<TaskPanel>::with_props(props).render());
    assert!(html.contains("Refine the numbers"));
    assert!(html.contains("Break protocol"));
    assert!(html.contains("x3"));
    assert!(html.contains("once"));
    assert!(html.contains("Add task"));
    // no task was chosen, so no chooser overlay
    assert!(!html.contains("chooser-overlay"));
}

#[test]
fn world_bar_and_toolbar_render_controls() {
    let world_props = branchboard_web::components::world_bar::Props {
        branch_name: "Lumon PE".to_string(),
        witness: 2,
        chaos: 55,
        on_branch_change: Callback::noop(),
        on_witness: Callback::noop(),
        on_chaos: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<WorldBar>::with_props(world_props).render());
    assert!(html.contains("Lumon PE"));
    assert!(html.contains("CHAOS"));

    let toolbar_props = branchboard_web::components::toolbar::Props {
        on_add: Callback::noop(),
        on_reset_board: Callback::noop(),
        on_export_settings: Callback::noop(),
        on_settings_file: Callback::noop(),
        on_agent_file: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Toolbar>::with_props(toolbar_props).render());
    assert!(html.contains("Import settings"));
    assert!(html.contains("accept=\".json,application/json\""));
}
