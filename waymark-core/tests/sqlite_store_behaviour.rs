//! Behavioural tests for `SqliteStore` using rstest-bdd.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use waymark_core::{
    NewRoute, NewUser, PlaceStore, RouteId, RouteStore, SqliteStore, UserId, UserStore,
    seed::launch_catalogue,
};

/// Shared state for SQLite store scenarios.
#[derive(Debug)]
struct StoreWorld {
    temp_dir: TempDir,
    store: RefCell<Option<SqliteStore>>,
    inserted_users: RefCell<Vec<Option<UserId>>>,
    route_id: RefCell<Option<RouteId>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            store: RefCell::new(None),
            inserted_users: RefCell::new(Vec::new()),
            route_id: RefCell::new(None),
        }
    }

    fn db_path(&self) -> Utf8PathBuf {
        let root = Utf8PathBuf::from_path_buf(self.temp_dir.path().to_path_buf())
            .expect("temp dir should be UTF-8");
        root.join("nested/waymark.db")
    }

    fn open(&self) {
        self.store.replace(None);
        let store = SqliteStore::open(&self.db_path()).expect("open SQLite store");
        self.store.replace(Some(store));
    }

    fn with_store<T>(&self, f: impl FnOnce(&SqliteStore) -> T) -> T {
        let borrowed = self.store.borrow();
        let store = borrowed
            .as_ref()
            .expect("store should be opened before use");
        f(store)
    }

    fn insert_user(&self, user: &NewUser) {
        let id = self.with_store(|store| store.insert_user(user).expect("insert user"));
        self.inserted_users.borrow_mut().push(id);
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

#[given("a temporary directory for the database")]
fn given_temp_dir(world: &StoreWorld) {
    assert!(!world.db_path().exists());
}

#[when("I open the SQLite store")]
fn open_store(world: &StoreWorld) {
    world.open();
}

#[when("I reopen the SQLite store")]
fn reopen_store(world: &StoreWorld) {
    world.open();
}

#[when("I mark Lake Baikal as a favorite")]
fn mark_baikal(world: &StoreWorld) {
    world.with_store(|store| {
        let baikal = store
            .all_places()
            .expect("list places")
            .into_iter()
            .find(|p| p.name == "Lake Baikal")
            .expect("Lake Baikal is seeded");
        store.set_favorite(baikal.id, true).expect("mark favorite");
    });
}

#[when("I insert a user with email ann@example.com")]
fn insert_ann(world: &StoreWorld) {
    world.insert_user(&NewUser::new("ann@example.com", "secret", "Ann"));
}

#[when("I insert another user with email ann@example.com")]
fn insert_ann_again(world: &StoreWorld) {
    world.insert_user(&NewUser::new("ann@example.com", "other", "Someone else"));
}

#[when("I store a route visiting three places out of order")]
fn store_route(world: &StoreWorld) {
    let id = world.with_store(|store| {
        store
            .insert_route(&NewRoute::new("Zigzag", 1, vec![7, 3, 5], 12.5, 150))
            .expect("insert route")
    });
    world.route_id.replace(Some(id));
}

#[then("the launch catalogue is listed in order")]
fn then_catalogue(world: &StoreWorld) {
    let names: Vec<String> = world.with_store(|store| {
        store
            .all_places()
            .expect("list places")
            .into_iter()
            .map(|p| p.name)
            .collect()
    });
    let expected: Vec<String> = launch_catalogue().into_iter().map(|p| p.name).collect();
    assert_eq!(names, expected);
}

#[then("Lake Baikal is the only favorite")]
fn then_only_baikal(world: &StoreWorld) {
    let favorites = world.with_store(|store| store.favorite_places().expect("favorites"));
    let names: Vec<_> = favorites.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Lake Baikal"]);
}

#[then("the catalogue was not seeded twice")]
fn then_not_reseeded(world: &StoreWorld) {
    let count = world.with_store(|store| store.all_places().expect("list places").len());
    assert_eq!(count, launch_catalogue().len());
}

#[then("the second insert is ignored")]
fn then_second_ignored(world: &StoreWorld) {
    let inserted = world.inserted_users.borrow();
    assert_eq!(inserted.len(), 2);
    assert!(inserted.first().is_some_and(Option::is_some));
    assert_eq!(inserted.get(1), Some(&None));
}

#[then("exactly one user is stored")]
fn then_one_user(world: &StoreWorld) {
    let users = world.with_store(|store| store.all_users().expect("users"));
    assert_eq!(users.len(), 1);
    assert_eq!(users.first().map(|u| u.username.as_str()), Some("Ann"));
}

#[then("the stored route lists the places in the order given")]
fn then_route_order(world: &StoreWorld) {
    let id = world.route_id.borrow().expect("route should be stored");
    let route = world.with_store(|store| {
        store
            .route_by_id(id)
            .expect("load route")
            .expect("route exists")
    });
    assert_eq!(route.place_ids, vec![7, 3, 5]);
    assert_eq!(route.estimated_minutes, 150);
    assert!(!route.offline_available);
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 0)]
fn fresh_database_is_seeded(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 1)]
fn flags_survive_reopen(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 2)]
fn duplicate_email_ignored(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 3)]
fn route_order_preserved(world: StoreWorld) {
    let _ = world;
}
