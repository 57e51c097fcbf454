//! Unit tests for building the loader command line.

use auto_reloader::launch::loader_log::parse_log;
use auto_reloader::launch::{
    LaunchLineBuilder, LaunchLineSpec, LaunchOption, LaunchOptionSource, LoaderLog,
    FLAG_FORCE_STEAM_LOADER,
};
use auto_reloader::platform::PriorityClass;
use auto_reloader::{AppError, Result};

/// Source backed by an in-memory log.
struct InMemoryLog(&'static str);

impl LaunchOptionSource for InMemoryLog {
    fn launch_options(&self) -> Result<Vec<LaunchOption>> {
        parse_log(self.0.as_bytes())
    }
}

struct Unreadable;

impl LaunchOptionSource for Unreadable {
    fn launch_options(&self) -> Result<Vec<LaunchOption>> {
        Err(AppError::LaunchLineRead("permission denied".into()))
    }
}

fn builder(source: impl LaunchOptionSource + 'static) -> LaunchLineBuilder {
    LaunchLineBuilder::new("skse64_loader.exe", Box::new(source))
}

#[test]
fn alternate_exe_and_dll_example() {
    let line = builder(InMemoryLog(
        "launching alternate exe(C:\\Game\\Alt.exe)\nlaunching alternate dll(C:\\Game\\Alt.dll)\n",
    ))
    .build(PriorityClass::Normal);

    assert_eq!(
        line.to_string(),
        r"skse64_loader.exe -altexe C:\Game\Alt.exe -altdll C:\Game\Alt.dll -priority normal"
    );
}

#[test]
fn no_recognised_lines_gives_loader_and_priority_only() {
    let line = builder(InMemoryLog("nothing useful here\n")).build(PriorityClass::High);
    assert_eq!(line.tokens(), ["skse64_loader.exe", "-priority", "high"]);
}

#[test]
fn unreadable_log_degrades_to_minimal_line() {
    let line = builder(Unreadable).build(PriorityClass::Normal);
    assert_eq!(line.to_string(), "skse64_loader.exe -priority normal");
}

#[test]
fn missing_log_file_degrades_to_minimal_line() {
    let dir = tempfile::tempdir().unwrap();
    let source = LoaderLog::new(Some(dir.path().join("absent.log")));
    let line = builder(source).build(PriorityClass::BelowNormal);
    assert_eq!(line.to_string(), "skse64_loader.exe -priority below_normal");
}

#[test]
fn single_forced_loader_line_appears_once_among_many_alternates() {
    let line = builder(InMemoryLog(
        "forcing steam loader\n\
         launching alternate exe(a.exe)\n\
         launching alternate dll(b.dll)\n\
         launching alternate exe(c.exe)\n\
         launching alternate dll(d.dll)\n",
    ))
    .build(PriorityClass::Normal);

    let forced = line
        .tokens()
        .iter()
        .filter(|token| token.as_str() == FLAG_FORCE_STEAM_LOADER)
        .count();
    assert_eq!(forced, 1);
    assert_eq!(
        line.to_string(),
        "skse64_loader.exe -forcesteamloader -altexe a.exe -altdll b.dll -altexe c.exe -altdll d.dll -priority normal"
    );
}

#[test]
fn priority_flag_is_always_last() {
    for class in PriorityClass::ALL {
        let line = builder(InMemoryLog("forcing steam loader\n")).build(class);
        assert_eq!(line.arguments().last().map(String::as_str), Some(class.name()));
    }
}

#[test]
fn spec_exposes_program_and_arguments() {
    let mut line = LaunchLineSpec::new("loader.exe");
    line.extend(["-priority".to_owned(), "idle".to_owned()]);
    assert_eq!(line.program(), "loader.exe");
    assert_eq!(line.arguments(), ["-priority", "idle"]);
}
