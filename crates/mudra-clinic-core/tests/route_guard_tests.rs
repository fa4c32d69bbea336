//! Property tests for route access decisions.

use proptest::prelude::*;
use proptest::sample::select;

use mudra_clinic_core::models::{Clinic, Role, User};
use mudra_clinic_core::routing::{navigation_menu, Navigator, CAPABILITIES};
use mudra_clinic_core::{Access, Route, RouteGuard};

const ROUTES: [Route; 13] = [
    Route::Root,
    Route::Login,
    Route::Unauthorized,
    Route::Dashboard,
    Route::Appointments,
    Route::NewAppointment,
    Route::Stock,
    Route::Lab,
    Route::Patients,
    Route::Reports,
    Route::Audit,
    Route::Settings,
    Route::NotFound,
];

fn user(role: Role) -> User {
    User::new("9", "Test User", "test@mudraclinic.com", role)
}

fn roles() -> impl Strategy<Value = Role> {
    select(Role::ALL.to_vec())
}

fn clinics() -> impl Strategy<Value = Clinic> {
    select(vec![Clinic::Dental, Clinic::Meditouch])
}

fn routes() -> impl Strategy<Value = Route> {
    select(ROUTES.to_vec())
}

proptest! {
    #[test]
    fn guard_agrees_with_capability_table(role in roles(), clinic in clinics(), route in routes()) {
        let staff = user(role);
        let access = RouteGuard::authorize(Some(&staff), clinic, route);

        let expected = if route.is_public() {
            Access::Granted
        } else if route == Route::Root {
            Access::Redirect(Route::Dashboard)
        } else {
            let capability = route.capability().unwrap();
            if !capability.allows_role(role) {
                Access::Redirect(Route::Unauthorized)
            } else if !capability.allows_clinic(clinic) {
                Access::Redirect(Route::Dashboard)
            } else {
                Access::Granted
            }
        };
        prop_assert_eq!(access, expected);
    }

    #[test]
    fn anonymous_users_only_reach_public_pages(clinic in clinics(), route in routes()) {
        let access = RouteGuard::authorize(None, clinic, route);
        if route.is_public() {
            prop_assert!(access.is_granted());
        } else if route == Route::Root {
            prop_assert_eq!(access, Access::Redirect(Route::Dashboard));
        } else {
            prop_assert_eq!(access, Access::Redirect(Route::Login));
        }
    }

    #[test]
    fn navigation_always_lands_on_a_granted_page(
        role in proptest::option::of(roles()),
        clinic in clinics(),
        hops in proptest::collection::vec(routes(), 1..8),
    ) {
        let staff = role.map(user);
        let mut navigator = Navigator::new();
        for route in hops {
            let landed = navigator.navigate(route, staff.as_ref(), clinic);
            prop_assert!(RouteGuard::authorize(staff.as_ref(), clinic, landed).is_granted());
            prop_assert_eq!(navigator.current(), landed);
        }
    }

    #[test]
    fn clinic_switch_never_strands_the_user(
        role in roles(),
        route in routes(),
        from in clinics(),
        to in clinics(),
    ) {
        let staff = user(role);
        let mut navigator = Navigator::new();
        navigator.navigate(route, Some(&staff), from);
        let landed = navigator.revalidate(Some(&staff), to);
        prop_assert!(RouteGuard::authorize(Some(&staff), to, landed).is_granted());
    }

    #[test]
    fn menu_only_lists_reachable_pages(role in roles(), clinic in clinics()) {
        let staff = user(role);
        for item in navigation_menu(Some(&staff), clinic) {
            prop_assert!(RouteGuard::authorize(Some(&staff), clinic, item.route).is_granted());
        }
    }

    #[test]
    fn unknown_paths_parse_to_not_found(segment in "[a-z]{1,12}") {
        let path = format!("/x-{}", segment);
        prop_assert_eq!(Route::parse(&path), Route::NotFound);
    }
}

#[test]
fn test_menu_covers_every_granted_menu_route() {
    for role in Role::ALL {
        for clinic in [Clinic::Dental, Clinic::Meditouch] {
            let staff = user(role);
            let menu: Vec<Route> = navigation_menu(Some(&staff), clinic)
                .into_iter()
                .map(|item| item.route)
                .collect();
            for capability in CAPABILITIES.iter().filter(|c| c.menu.is_some()) {
                let route = capability.route;
                let granted = RouteGuard::authorize(Some(&staff), clinic, route).is_granted();
                assert_eq!(menu.contains(&route), granted, "{role} {clinic} {route}");
            }
        }
    }
}

const OK: Access = Access::Granted;
const NO: Access = Access::Redirect(Route::Unauthorized);
const HOME: Access = Access::Redirect(Route::Dashboard);

/// Expected access per route, written out by hand.
/// Columns: admin, doctor, receptionist, inventory; Dental then Meditouch.
#[rustfmt::skip]
const EXPECTED: [(Route, [Access; 4], [Access; 4]); 13] = [
    (Route::Root,           [HOME, HOME, HOME, HOME], [HOME, HOME, HOME, HOME]),
    (Route::Login,          [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
    (Route::Unauthorized,   [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
    (Route::Dashboard,      [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
    (Route::Appointments,   [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
    (Route::NewAppointment, [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
    (Route::Stock,          [OK,   NO,   NO,   OK],   [HOME, NO,   NO,   HOME]),
    (Route::Lab,            [OK,   OK,   OK,   NO],   [HOME, HOME, HOME, NO]),
    (Route::Patients,       [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
    (Route::Reports,        [OK,   NO,   NO,   NO],   [OK,   NO,   NO,   NO]),
    (Route::Audit,          [OK,   NO,   NO,   NO],   [OK,   NO,   NO,   NO]),
    (Route::Settings,       [OK,   NO,   NO,   NO],   [OK,   NO,   NO,   NO]),
    (Route::NotFound,       [OK,   OK,   OK,   OK],   [OK,   OK,   OK,   OK]),
];

#[test]
fn test_guard_matches_written_access_matrix() {
    assert_eq!(EXPECTED.map(|(route, _, _)| route), ROUTES);
    for (route, dental, meditouch) in EXPECTED {
        for (clinic, row) in [(Clinic::Dental, dental), (Clinic::Meditouch, meditouch)] {
            for (role, expected) in Role::ALL.into_iter().zip(row) {
                let staff = user(role);
                let access = RouteGuard::authorize(Some(&staff), clinic, route);
                assert_eq!(access, expected, "{role} {clinic} {route}");
            }
        }
    }
}

#[test]
fn test_staff_denied_outside_their_role() {
    let receptionist = user(Role::Receptionist);
    let inventory = user(Role::Inventory);
    let doctor = user(Role::Doctor);
    let admin = user(Role::Admin);

    assert_eq!(RouteGuard::authorize(Some(&receptionist), Clinic::Dental, Route::Settings), NO);
    assert_eq!(RouteGuard::authorize(Some(&inventory), Clinic::Dental, Route::Reports), NO);
    assert_eq!(RouteGuard::authorize(Some(&doctor), Clinic::Dental, Route::Stock), NO);
    assert_eq!(RouteGuard::authorize(Some(&admin), Clinic::Meditouch, Route::Lab), HOME);
}
