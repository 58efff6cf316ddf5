//! End-to-end routing behavior: matching, typed params, layout chains,
//! navigation, and history traversal.

use std::cell::RefCell;
use std::rc::Rc;

use serial_test::serial;

use corridor::component::View;
use corridor::reactive::{Effect, with_runtime};
use corridor::router::{
	NavigationError, ParamError, RawParams, Route, RouteKind, RouteParams, Router, use_router,
};

#[derive(Debug)]
struct UserParams {
	id: u32,
}

impl RouteParams for UserParams {
	const NAMES: &'static [&'static str] = &["id"];

	fn from_raw(raw: &RawParams) -> Result<Self, ParamError> {
		Ok(Self { id: raw.parse("id")? })
	}
}

fn fresh() {
	corridor::router::reset_history();
	corridor::router::remove_router();
}

fn page(path: &str, label: &str) -> Route {
	let label = label.to_string();
	Route::build(path)
		.component(move || View::text(label.clone()))
		.register()
		.unwrap()
}

fn layout(path: &str, label: &str) -> Route {
	let label = label.to_string();
	Route::build(path)
		.layout()
		.component(move || View::text(label.clone()))
		.register()
		.unwrap()
}

#[test]
#[serial]
fn static_route_matches_exactly() {
	fresh();
	let router = Router::builder()
		.route(page("/about", "about"))
		.mount()
		.unwrap();

	router.go_to_url("/about").unwrap();
	assert_eq!(router.active_routes().len(), 1);
	assert_eq!(router.active_routes()[0].kind(), RouteKind::Static);

	router.go_to_url("/about/team").unwrap();
	assert!(router.active_routes().is_empty());
}

#[test]
#[serial]
fn parameterized_route_decodes_typed_params() {
	fresh();
	let router = Router::builder()
		.route(
			Route::build("/users/:id")
				.params::<UserParams>()
				.component(|| View::text("user"))
				.register()
				.unwrap(),
		)
		.mount()
		.unwrap();

	router.go_to_url("/users/42").unwrap();
	assert_eq!(router.raw_params().get("id"), Some("42"));
	assert_eq!(router.params::<UserParams>().unwrap().id, 42);

	router.go_to_url("/users/abc").unwrap();
	let err = router.params::<UserParams>().unwrap_err();
	assert!(matches!(err, ParamError::Parse { .. }));
}

#[test]
#[serial]
fn registration_order_breaks_overlap_ties() {
	fresh();
	let router = Router::builder()
		.route(page("/users/new", "new user form"))
		.route(
			Route::build("/users/:id")
				.params::<UserParams>()
				.component(|| View::text("user detail"))
				.register()
				.unwrap(),
		)
		.mount()
		.unwrap();

	router.go_to_url("/users/new").unwrap();
	assert_eq!(router.active_routes()[0].pattern().raw(), "/users/new");
	assert!(router.raw_params().is_empty());

	router.go_to_url("/users/7").unwrap();
	assert_eq!(router.active_routes()[0].pattern().raw(), "/users/:id");
	assert_eq!(router.params::<UserParams>().unwrap().id, 7);
}

#[test]
#[serial]
fn layout_chain_activates_shallow_to_deep() {
	fresh();
	let router = Router::builder()
		.route(layout("/", "root shell"))
		.route(layout("/admin", "admin shell"))
		.route(page("/admin/users", "admin users"))
		.mount()
		.unwrap();

	router.go_to_url("/admin/users").unwrap();
	let routes = router.active_routes();
	let rendered: Vec<String> = routes
		.iter()
		.map(|route| route.render().render_to_string())
		.collect();
	assert_eq!(rendered, vec!["root shell", "admin shell", "admin users"]);
}

#[test]
#[serial]
fn sibling_layout_stays_inactive() {
	fresh();
	let router = Router::builder()
		.route(layout("/admin", "admin shell"))
		.route(layout("/shop", "shop shell"))
		.route(page("/admin/users", "admin users"))
		.mount()
		.unwrap();

	router.go_to_url("/admin/users").unwrap();
	let routes = router.active_routes();
	assert_eq!(routes.len(), 2);
	assert_eq!(routes[0].pattern().raw(), "/admin");
	assert_eq!(routes[1].pattern().raw(), "/admin/users");
}

#[test]
#[serial]
fn navigate_with_interpolates_and_validates() {
	fresh();
	let router = Router::builder()
		.route(
			Route::build("/users/:id")
				.params::<UserParams>()
				.component(|| View::text("user"))
				.register()
				.unwrap(),
		)
		.mount()
		.unwrap();

	router.navigate_with("/users/:id", &[("id", "9")]).unwrap();
	assert_eq!(router.current_path(), "/users/9");
	assert_eq!(router.params::<UserParams>().unwrap().id, 9);

	let err = router.navigate_with("/users/:id", &[]).unwrap_err();
	assert_eq!(
		err,
		NavigationError::MissingParam {
			path: "/users/:id".to_string(),
			name: "id".to_string()
		}
	);
	// Failed interpolation must not move the router.
	assert_eq!(router.current_path(), "/users/9");
}

#[test]
#[serial]
fn back_and_forward_replay_navigations() {
	fresh();
	let router = Router::builder()
		.route(page("/a", "a"))
		.route(page("/b", "b"))
		.route(page("/c", "c"))
		.mount()
		.unwrap();

	router.go_to_url("/a").unwrap();
	router.go_to_url("/b").unwrap();
	router.go_to_url("/c").unwrap();

	router.back().unwrap();
	assert_eq!(router.current_path(), "/b");
	router.back().unwrap();
	assert_eq!(router.current_path(), "/a");
	router.forward().unwrap();
	assert_eq!(router.current_path(), "/b");
}

#[test]
#[serial]
fn replace_overwrites_the_current_entry() {
	fresh();
	let router = Router::builder()
		.route(page("/a", "a"))
		.route(page("/b", "b"))
		.mount()
		.unwrap();

	router.go_to_url("/a").unwrap();
	router.replace("/b").unwrap();
	assert_eq!(router.current_path(), "/b");

	router.back().unwrap();
	assert_eq!(router.current_path(), "/");
}

#[test]
#[serial]
fn navigation_signals_drive_effects() {
	fresh();
	let router = Router::builder()
		.route(page("/a", "a"))
		.route(page("/b", "b"))
		.mount()
		.unwrap();

	let seen = Rc::new(RefCell::new(Vec::new()));
	let seen_clone = Rc::clone(&seen);
	let router_clone = Rc::clone(&router);
	let _effect = Effect::new(move || {
		seen_clone.borrow_mut().push(router_clone.current_path());
	});

	router.go_to_url("/a").unwrap();
	with_runtime(|rt| rt.flush_updates());
	router.go_to_url("/b").unwrap();
	with_runtime(|rt| rt.flush_updates());

	let seen = seen.borrow();
	assert!(seen.contains(&"/a".to_string()));
	assert!(seen.contains(&"/b".to_string()));
}

#[test]
#[serial]
fn mounted_router_is_reachable_from_context() {
	fresh();
	let router = Router::builder()
		.route(page("/about", "about"))
		.mount()
		.unwrap();

	let from_context = use_router().expect("router should be in context");
	assert!(Rc::ptr_eq(&router, &from_context));

	router.unmount();
	assert!(use_router().is_none());
}

#[test]
#[serial]
fn not_found_component_renders_on_miss() {
	fresh();
	let router = Router::builder()
		.route(page("/about", "about"))
		.not_found(|| View::text("404"))
		.mount()
		.unwrap();

	router.go_to_url("/missing").unwrap();
	assert_eq!(router.render_current().render_to_string(), "404");

	router.go_to_url("/about").unwrap();
	assert_eq!(router.render_current().render_to_string(), "about");
}
