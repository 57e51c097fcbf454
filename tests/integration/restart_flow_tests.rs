//! Agent-side restart flow: triggers, hand-off, fallbacks, and auto-resume.

use auto_reloader::agent::{
    HookDecision, LoadState, MenuEvent, MenuKind, ResumeOutcome, RESUME_FAILED_MESSAGE,
};
use auto_reloader::handoff::{HandoffEnvironmentValue, RestartRequest};
use auto_reloader::AppError;

use super::test_helpers::{agent, orchestrator, FakeHost, FakeSpawner, HostCall, TEST_PID};

const SAVE_PATH: &str = r"C:\Users\me\Documents\My Games\Skyrim Special Edition\Saves\Save 9 - Riverwood.ess";

fn boot_into_game(agent: &mut auto_reloader::agent::Agent<FakeSpawner>, host: &mut FakeHost) {
    agent.on_plugin_loaded(host);
    agent.on_input_loaded(host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::LoadingMenu), host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::MainMenu), host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::LoadingMenu), host);
}

#[test]
fn first_load_from_main_menu_proceeds_in_process() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    agent.on_input_loaded(&mut host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::LoadingMenu), &mut host);

    assert_eq!(agent.on_load_requested(SAVE_PATH, &mut host), HookDecision::Proceed);
    assert!(agent.orchestrator().spawner().spawned.borrow().is_empty());
    assert!(!host.quit_requested());
}

#[test]
fn load_after_game_entered_restarts_with_save_stem() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    boot_into_game(&mut agent, &mut host);
    assert_eq!(agent.load_state().state(), LoadState::Resumed);

    assert_eq!(agent.on_load_requested(SAVE_PATH, &mut host), HookDecision::Restarting);

    let spawned = agent.orchestrator().spawner().spawned.borrow();
    assert_eq!(spawned.len(), 1);
    let request = &spawned[0];
    assert_eq!(request.origin_process_id, TEST_PID);
    assert_eq!(request.target_save_name.as_deref(), Some("Save 9 - Riverwood"));
    assert_eq!(
        request.origin_command_line,
        "skse64_loader.exe -forcesteamloader -priority normal"
    );
    assert!(host.quit_requested());
}

#[test]
fn handed_off_request_reaches_companion_intact() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    boot_into_game(&mut agent, &mut host);
    agent.on_load_requested(SAVE_PATH, &mut host);

    let sent = agent.orchestrator().spawner().spawned.borrow()[0].clone();
    let received = RestartRequest::parse(&sent.to_command_line()).unwrap();
    assert_eq!(received, sent);
}

#[test]
fn fade_to_main_menu_restarts_without_save() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    boot_into_game(&mut agent, &mut host);

    assert_eq!(agent.on_fade_to_main_menu(&mut host), HookDecision::Restarting);
    let spawned = agent.orchestrator().spawner().spawned.borrow();
    assert_eq!(spawned[0].target_save_name, None);
    assert!(spawned[0].to_arguments().iter().all(|arg| arg != "--filename"));
}

#[test]
fn spawn_failure_keeps_game_running() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::failing());
    let mut host = FakeHost::default();
    boot_into_game(&mut agent, &mut host);

    assert_eq!(agent.on_load_requested(SAVE_PATH, &mut host), HookDecision::Proceed);
    assert_eq!(agent.on_fade_to_main_menu(&mut host), HookDecision::Proceed);
    assert!(!host.quit_requested());
    assert!(!agent.orchestrator().is_restart_pending());
}

#[test]
fn second_restart_request_is_not_handed_off_again() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    boot_into_game(&mut agent, &mut host);

    assert_eq!(agent.on_load_requested(SAVE_PATH, &mut host), HookDecision::Restarting);
    assert_eq!(agent.on_fade_to_main_menu(&mut host), HookDecision::Restarting);
    assert_eq!(agent.orchestrator().spawner().spawned.borrow().len(), 1);
    let quits = host.calls.iter().filter(|call| **call == HostCall::RequestQuit).count();
    assert_eq!(quits, 1);
}

#[test]
fn orchestrator_reports_pending_restart() {
    let mut orchestrator = orchestrator(FakeSpawner::default());
    let mut host = FakeHost::default();
    orchestrator.request_restart(Some("A"), &mut host).unwrap();

    let err = orchestrator.request_restart(Some("B"), &mut host).unwrap_err();
    assert!(matches!(err, AppError::RestartPending(_)), "got {err:?}");
}

#[test]
fn orchestrator_propagates_spawn_error_without_quitting() {
    let mut orchestrator = orchestrator(FakeSpawner::failing());
    let mut host = FakeHost::default();
    let err = orchestrator.request_restart(None, &mut host).unwrap_err();
    assert!(matches!(err, AppError::Spawn(_)));
    assert!(host.calls.is_empty());
}

#[test]
fn restarted_process_hides_menu_and_resumes_save() {
    let mut agent = agent(HandoffEnvironmentValue::AutoLoad("MySave".into()), FakeSpawner::default());
    let mut host = FakeHost::default();

    agent.on_plugin_loaded(&mut host);
    agent.on_input_loaded(&mut host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::LoadingMenu), &mut host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::MainMenu), &mut host);
    let outcome = agent.on_data_loaded(&mut host);

    assert_eq!(outcome, ResumeOutcome::Loaded("MySave".into()));
    assert_eq!(
        host.calls,
        vec![
            HostCall::DisableIntroMovie,
            HostCall::AddMenuSink,
            HostCall::MainMenuVisible(false),
            HostCall::LoadSave("MySave".into()),
        ]
    );
}

#[test]
fn failed_resume_restores_menu_and_does_not_restart() {
    let mut agent = agent(HandoffEnvironmentValue::AutoLoad("Broken".into()), FakeSpawner::default());
    let mut host = FakeHost {
        fail_load: true,
        ..FakeHost::default()
    };

    let outcome = agent.on_data_loaded(&mut host);

    assert!(matches!(outcome, ResumeOutcome::Failed(AppError::ResumeLoad(_))));
    assert_eq!(
        host.calls,
        vec![
            HostCall::LoadSave("Broken".into()),
            HostCall::MainMenuVisible(true),
            HostCall::Notify(RESUME_FAILED_MESSAGE.into()),
        ]
    );
    assert!(agent.orchestrator().spawner().spawned.borrow().is_empty());
}

#[test]
fn normal_boot_does_not_touch_intro_or_load() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    agent.on_plugin_loaded(&mut host);
    assert_eq!(agent.on_data_loaded(&mut host), ResumeOutcome::NotRequested);
    assert!(host.calls.is_empty());
}

#[test]
fn skip_intro_boot_disables_movie_only() {
    let mut agent = agent(HandoffEnvironmentValue::SkipIntro, FakeSpawner::default());
    let mut host = FakeHost::default();
    agent.on_plugin_loaded(&mut host);
    agent.on_input_loaded(&mut host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::MainMenu), &mut host);
    assert_eq!(agent.on_data_loaded(&mut host), ResumeOutcome::NotRequested);
    assert_eq!(host.calls, vec![HostCall::DisableIntroMovie, HostCall::AddMenuSink]);
}

#[test]
fn closing_and_unrelated_menus_are_ignored() {
    let mut agent = agent(HandoffEnvironmentValue::Unset, FakeSpawner::default());
    let mut host = FakeHost::default();
    agent.on_input_loaded(&mut host);
    agent.on_menu_event(&MenuEvent::closed(MenuKind::LoadingMenu), &mut host);
    agent.on_menu_event(&MenuEvent::opened(MenuKind::Other("Journal Menu".into())), &mut host);
    assert_eq!(agent.load_state().loading_screens_seen(), 0);
}
