//! Behavioural tests for route planning against the SQLite store.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use waymark_app::{AppConfig, AppContainer, RoutesViewModel};
use waymark_core::{DEFAULT_CURRENT_LOCATION, Place, RouteId};

/// Shared state for route planning scenarios.
#[derive(Debug)]
struct RouteWorld {
    _temp_dir: TempDir,
    container: AppContainer,
    view_model: RefCell<RoutesViewModel>,
    route_id: RefCell<Option<RouteId>>,
}

impl RouteWorld {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .expect("temp dir should be UTF-8");
        let container = AppContainer::open(&AppConfig::in_dir(&root)).expect("open app");
        let user = container
            .users()
            .login("user@example.com", "password")
            .expect("default user login");
        let view_model = container.routes_view_model(user.id);
        Self {
            _temp_dir: temp_dir,
            container,
            view_model: RefCell::new(view_model),
            route_id: RefCell::new(None),
        }
    }

    fn place(&self, name: &str) -> Place {
        self.view_model
            .borrow()
            .state()
            .available_places
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .expect("place should be in the catalogue")
    }

    fn plan(&self, start: &Place, end: &Place) {
        let id = self
            .view_model
            .borrow_mut()
            .create_route("Test walk", start, end);
        self.route_id.replace(id);
    }

    fn selected_place_names(&self) -> Vec<String> {
        self.view_model
            .borrow()
            .state()
            .selected_route_places
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }
}

#[fixture]
fn world() -> RouteWorld {
    RouteWorld::new()
}

#[given("an application with the launch catalogue")]
fn given_catalogue(world: &RouteWorld) {
    assert_eq!(world.view_model.borrow().state().available_places.len(), 10);
}

#[when("I plan a route from my current location to Red Square")]
fn plan_from_here(world: &RouteWorld) {
    let here = Place::current_location(DEFAULT_CURRENT_LOCATION);
    let end = world.place("Red Square");
    world.plan(&here, &end);
}

#[when("I plan a route from Tretyakov Gallery to Red Square")]
fn plan_between_places(world: &RouteWorld) {
    let start = world.place("Tretyakov Gallery");
    let end = world.place("Red Square");
    world.plan(&start, &end);
}

#[when("I keep the route offline")]
fn keep_offline(world: &RouteWorld) {
    let id = world.route_id.borrow().expect("route should be planned");
    world.view_model.borrow_mut().toggle_offline(id, true);
}

#[then("the route visits only Red Square")]
fn visits_red_square(world: &RouteWorld) {
    assert_eq!(world.selected_place_names(), vec!["Red Square"]);
}

#[then("the route takes three minutes")]
fn three_minutes(world: &RouteWorld) {
    let view_model = world.view_model.borrow();
    let route = view_model
        .state()
        .selected_route
        .as_ref()
        .expect("route should be selected");
    assert_eq!(route.estimated_minutes, 3);
}

#[then("both places are available offline")]
fn places_offline(world: &RouteWorld) {
    let mut offline: Vec<_> = world
        .container
        .places()
        .offline_places()
        .expect("offline places")
        .into_iter()
        .map(|p| p.name)
        .collect();
    offline.sort();
    assert_eq!(offline, vec!["Red Square", "Tretyakov Gallery"]);
}

#[scenario(path = "tests/features/route_planning.feature", index = 0)]
fn walk_from_current_location(world: RouteWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_planning.feature", index = 1)]
fn offline_route_cascades(world: RouteWorld) {
    let _ = world;
}
