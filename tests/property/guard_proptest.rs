//! Property-based tests for the access decision pipeline

use std::collections::BTreeSet;

use chrono::Utc;
use proptest::prelude::*;

use opsdesk::backend::auth::access::{evaluate, AccessDenied, Admission, RouteAccess};
use opsdesk::backend::auth::{PublicIdentity, TokenCodec};
use opsdesk::shared::{Permission, Role};

const SECRET: &str = "guard-property-secret-32-bytes-long";
const NOW: i64 = 1_700_000_000;

fn roles() -> impl Strategy<Value = Vec<Role>> {
    proptest::sample::subsequence(Role::ALL.to_vec(), 0..=Role::ALL.len())
}

fn permissions() -> impl Strategy<Value = Vec<Permission>> {
    proptest::sample::subsequence(Permission::ALL.to_vec(), 0..=Permission::ALL.len())
}

/// Route requirements live for the whole program, as they do in the router
fn route(
    public: bool,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    require_all: bool,
) -> RouteAccess {
    let base = if public {
        RouteAccess::public()
    } else {
        RouteAccess::authenticated()
    };
    let access = base
        .with_roles(roles.leak())
        .with_permissions(permissions.leak());
    if require_all {
        access.require_all_permissions()
    } else {
        access
    }
}

fn token_for(roles: &[Role], permissions: &[Permission]) -> String {
    let now = Utc::now();
    let identity = PublicIdentity {
        id: 42,
        email: "prop@ops.local".to_string(),
        display_name: "Prop".to_string(),
        roles: roles.iter().copied().collect(),
        permissions: permissions.iter().copied().collect(),
        area: "default".to_string(),
        created_at: now,
        updated_at: now,
    };
    TokenCodec::new(SECRET, 3600).issue_at(&identity, NOW).unwrap()
}

/// Straight set-algebra statement of the access rules
fn reference_allows(
    access: &RouteAccess,
    held_roles: &BTreeSet<Role>,
    held_permissions: &BTreeSet<Permission>,
    require_all: bool,
) -> bool {
    let required_roles: BTreeSet<Role> = access.roles.iter().copied().collect();
    let required_permissions: BTreeSet<Permission> = access.permissions.iter().copied().collect();

    let roles_ok =
        required_roles.is_empty() || !required_roles.is_disjoint(held_roles);
    let permissions_ok = required_permissions.is_empty()
        || if require_all {
            required_permissions.is_subset(held_permissions)
        } else {
            !required_permissions.is_disjoint(held_permissions)
        };
    roles_ok && permissions_ok
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_evaluate_matches_reference(
        required_roles in roles(),
        required_permissions in permissions(),
        held_roles in roles(),
        held_permissions in permissions(),
        require_all in any::<bool>(),
    ) {
        let access = route(false, required_roles, required_permissions, require_all);
        let header = format!("Bearer {}", token_for(&held_roles, &held_permissions));
        let codec = TokenCodec::new(SECRET, 3600);

        let held_roles: BTreeSet<Role> = held_roles.into_iter().collect();
        let held_permissions: BTreeSet<Permission> = held_permissions.into_iter().collect();
        let expected = reference_allows(&access, &held_roles, &held_permissions, require_all);

        match evaluate(&access, Some(header.as_str()), &codec, NOW) {
            Ok(Admission::Admitted(principal)) => {
                prop_assert!(expected);
                prop_assert_eq!(principal.user_id, 42);
                prop_assert_eq!(principal.roles, held_roles);
            }
            Ok(Admission::Public) => prop_assert!(false, "non-public route admitted as public"),
            Err(denied) => {
                prop_assert!(!expected, "denied: {}", denied);
                prop_assert!(!denied.is_unauthenticated());
            }
        }
    }

    #[test]
    fn test_role_check_runs_before_permission_check(
        required_roles in roles(),
        held_roles in roles(),
        held_permissions in permissions(),
    ) {
        let access = route(false, required_roles, vec![Permission::ManageUsers], true);
        let header = format!("Bearer {}", token_for(&held_roles, &held_permissions));
        let codec = TokenCodec::new(SECRET, 3600);

        let role_ok = access.roles.is_empty()
            || access.roles.iter().any(|r| held_roles.contains(r));
        let result = evaluate(&access, Some(header.as_str()), &codec, NOW);
        if !role_ok {
            prop_assert!(
                matches!(result, Err(AccessDenied::Role { .. })),
                "expected a role denial, got {:?}",
                result
            );
        }
    }

    #[test]
    fn test_public_routes_admit_any_header(
        header in proptest::option::of(".{0,64}"),
        required_roles in roles(),
        required_permissions in permissions(),
    ) {
        let access = route(true, required_roles, required_permissions, false);
        let codec = TokenCodec::new(SECRET, 3600);
        prop_assert_eq!(
            evaluate(&access, header.as_deref(), &codec, NOW),
            Ok(Admission::Public)
        );
    }

    #[test]
    fn test_bad_headers_are_unauthenticated(header in proptest::option::of("[A-Za-z ]{0,32}")) {
        let codec = TokenCodec::new(SECRET, 3600);
        let result = evaluate(&RouteAccess::authenticated(), header.as_deref(), &codec, NOW);
        prop_assert!(
            matches!(result, Err(ref denied) if denied.is_unauthenticated()),
            "expected an authentication failure, got {:?}",
            result
        );
    }
}
