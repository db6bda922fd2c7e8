//! End-to-end command tests against a temporary database.

use super::helpers::Workspace;
use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

#[rstest]
fn places_lists_the_launch_catalogue(workspace: Workspace) {
    let output = workspace.run_ok(&["places"]);
    assert_eq!(output.lines().count(), 10);
    assert!(output.contains("Red Square (Landmarks)"));
}

#[rstest]
fn places_json_is_parseable(workspace: Workspace) {
    let output = workspace.run_ok(&["places", "--category", "Nature", "--json"]);
    let places: Vec<serde_json::Value> = serde_json::from_str(&output).expect("json output");
    assert_eq!(places.len(), 2);
}

#[rstest]
fn favorites_filter_follows_toggles(workspace: Workspace) {
    workspace.run_ok(&["favorite", "3"]);
    let output = workspace.run_ok(&["places", "--favorites"]);
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("[favorite]"));

    workspace.run_ok(&["favorite", "3", "--remove"]);
    let output = workspace.run_ok(&["places", "--favorites"]);
    assert_eq!(output.trim(), "No places found.");
}

#[rstest]
fn thin_search_prints_web_link(workspace: Workspace) {
    let output = workspace.run_ok(&["search", "geysers"]);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    let link = lines.last().expect("web line");
    assert!(link.starts_with("Search the web: geysers: https://www.google.com/search?q="));
}

#[rstest]
fn unknown_place_is_reported(workspace: Workspace) {
    let err = workspace.run(&["place", "999"]).expect_err("missing place");
    match err {
        CliError::PlaceNotFound { id } => assert_eq!(id, 999),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn seed_is_idempotent(workspace: Workspace) {
    let first = workspace.run_ok(&["seed"]);
    let second = workspace.run_ok(&["seed"]);
    assert_eq!(first.trim(), "Installed 2 predefined places.");
    assert_eq!(second.trim(), "Installed 0 predefined places.");
}

#[rstest]
fn duplicate_registration_fails(workspace: Workspace) {
    workspace.run_ok(&[
        "register",
        "--email",
        "ann@example.com",
        "--password",
        "pw",
        "--username",
        "Ann",
    ]);
    let err = workspace
        .run(&[
            "register",
            "--email",
            "ann@example.com",
            "--password",
            "other",
            "--username",
            "Ann",
        ])
        .expect_err("duplicate email");
    assert_eq!(
        err.to_string(),
        "registration failed: a user with this email already exists"
    );
}

#[rstest]
fn login_reports_outcome(workspace: Workspace) {
    let err = workspace
        .run(&["login", "--email", "user@example.com", "--password", "wrong"])
        .expect_err("bad password");
    assert_eq!(err.to_string(), "login failed: invalid email or password");
    assert!(workspace.run(&["whoami"]).is_err());

    let output = workspace.run_ok(&[
        "login",
        "--email",
        "user@example.com",
        "--password",
        "password",
    ]);
    assert_eq!(output.trim(), "Logged in as User.");
}

#[rstest]
fn whoami_requires_login(workspace: Workspace) {
    let err = workspace.run(&["whoami"]).expect_err("not logged in");
    assert!(matches!(err, CliError::NotLoggedIn));

    workspace.login_default_user();
    workspace.run_ok(&["preferences", "museums, parks"]);
    let output = workspace.run_ok(&["whoami"]);
    assert!(output.starts_with("User <user@example.com>"));
    assert!(output.contains("preferences: museums, parks"));

    workspace.run_ok(&["logout"]);
    assert!(workspace.run(&["whoami"]).is_err());
}

#[rstest]
fn route_lifecycle(workspace: Workspace) {
    workspace.login_default_user();
    let created = workspace.run_ok(&["route-create", "--name", "Stroll", "--to", "1"]);
    assert!(created.starts_with("Created #1 Stroll:"), "{created}");
    assert!(created.contains("3 min"));

    let shown = workspace.run_ok(&["route-show", "1"]);
    let lines: Vec<_> = shown.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.last().is_some_and(|line| line.contains("Red Square")));

    workspace.run_ok(&["route-offline", "1"]);
    let offline = workspace.run_ok(&["places", "--offline"]);
    assert!(offline.contains("Red Square"));

    workspace.run_ok(&["route-delete", "1"]);
    assert_eq!(workspace.run_ok(&["routes"]).trim(), "No routes yet.");
}

#[rstest]
fn routes_are_private_to_their_owner(workspace: Workspace) {
    workspace.login_default_user();
    workspace.run_ok(&["route-create", "--name", "Mine", "--from", "5", "--to", "1"]);
    workspace.run_ok(&[
        "register",
        "--email",
        "bob@example.com",
        "--password",
        "pw",
        "--username",
        "Bob",
    ]);
    let err = workspace.run(&["route-show", "1"]).expect_err("other user's route");
    assert!(matches!(err, CliError::RouteNotFound { id: 1 }));
}

#[rstest]
fn blank_route_name_is_rejected(workspace: Workspace) {
    workspace.login_default_user();
    let err = workspace
        .run(&["route-create", "--name", " ", "--to", "1"])
        .expect_err("blank name");
    assert_eq!(
        err.to_string(),
        "creating route failed: route name must not be empty"
    );
}
