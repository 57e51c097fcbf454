//! Unit tests for the loading-screen state machine.

use auto_reloader::agent::{AgentContext, GameHost, LoadState, LoadStateMachine, MenuEventSink};
use auto_reloader::handoff::HandoffEnvironmentValue;
use auto_reloader::Result;

#[derive(Debug, Default)]
struct CountingHost {
    sinks_added: u32,
    sinks_removed: u32,
    menu_visibility: Vec<bool>,
}

impl GameHost for CountingHost {
    fn add_menu_sink(&mut self) {
        self.sinks_added += 1;
    }
    fn remove_menu_sink(&mut self) {
        self.sinks_removed += 1;
    }
    fn set_main_menu_visible(&mut self, visible: bool) {
        self.menu_visibility.push(visible);
    }
    fn load_save(&mut self, _save_name: &str) -> Result<()> {
        Ok(())
    }
    fn notify(&mut self, _message: &str) {}
    fn request_quit(&mut self) {}
    fn disable_intro_movie(&mut self) {}
}

fn attached() -> (LoadStateMachine, CountingHost) {
    let mut host = CountingHost::default();
    let mut machine = LoadStateMachine::new();
    machine.attach(&mut host);
    (machine, host)
}

#[test]
fn starts_awaiting_first_menu() {
    let machine = LoadStateMachine::default();
    assert_eq!(machine.state(), LoadState::AwaitingFirstMenu);
    assert_eq!(machine.loading_screens_seen(), 0);
    assert!(!machine.restart_on_load());
    assert!(!machine.is_attached());
}

#[test]
fn first_loading_screen_is_main_menu_bootstrap() {
    let (mut machine, mut host) = attached();
    machine.on_loading_menu_open(&AgentContext::default(), &mut host);

    assert_eq!(machine.state(), LoadState::Counting);
    assert!(!machine.restart_on_load());
    assert_eq!(host.sinks_removed, 0);
}

#[test]
fn second_loading_screen_resumes_and_detaches() {
    let (mut machine, mut host) = attached();
    let ctx = AgentContext::default();
    machine.on_loading_menu_open(&ctx, &mut host);
    machine.on_loading_menu_open(&ctx, &mut host);

    assert_eq!(machine.state(), LoadState::Resumed);
    assert!(machine.restart_on_load());
    assert!(machine.is_detached());
    assert_eq!(host.sinks_removed, 1);
}

#[test]
fn resumed_exactly_once_and_never_regresses() {
    let (mut machine, mut host) = attached();
    let ctx = AgentContext::default();
    let mut transitions = 0;
    let mut previous = machine.state();

    for _ in 0..10 {
        machine.on_loading_menu_open(&ctx, &mut host);
        if machine.state() == LoadState::Resumed && previous != LoadState::Resumed {
            transitions += 1;
        }
        assert!(
            !(previous == LoadState::Resumed && machine.state() != LoadState::Resumed),
            "state regressed from Resumed"
        );
        previous = machine.state();
    }

    assert_eq!(transitions, 1);
    assert_eq!(machine.loading_screens_seen(), 2, "events after detaching are ignored");
    assert_eq!(host.sinks_removed, 1);
}

#[test]
fn detaching_twice_has_no_further_effect() {
    let (mut machine, mut host) = attached();
    assert!(machine.detach(&mut host));
    assert!(!machine.detach(&mut host));
    assert!(!machine.detach(&mut host));
    assert_eq!(host.sinks_removed, 1);
}

#[test]
fn attach_is_only_performed_once() {
    let (mut machine, mut host) = attached();
    machine.attach(&mut host);
    assert_eq!(host.sinks_added, 1);

    machine.detach(&mut host);
    machine.attach(&mut host);
    assert_eq!(host.sinks_added, 1, "a detached machine stays detached");
}

#[test]
fn events_before_attach_are_ignored() {
    let mut host = CountingHost::default();
    let mut machine = LoadStateMachine::new();
    machine.on_loading_menu_open(&AgentContext::default(), &mut host);
    assert_eq!(machine.loading_screens_seen(), 0);
    assert_eq!(machine.state(), LoadState::AwaitingFirstMenu);
}

#[test]
fn main_menu_hidden_in_auto_load_mode() {
    let (mut machine, mut host) = attached();
    let ctx = AgentContext::new(HandoffEnvironmentValue::AutoLoad("MySave".into()));
    machine.on_main_menu_open(&ctx, &mut host);
    assert_eq!(host.menu_visibility, vec![false]);
}

#[test]
fn main_menu_left_alone_otherwise() {
    let (mut machine, mut host) = attached();
    machine.on_main_menu_open(&AgentContext::default(), &mut host);
    machine.on_main_menu_open(&AgentContext::new(HandoffEnvironmentValue::SkipIntro), &mut host);
    assert!(host.menu_visibility.is_empty());
}
