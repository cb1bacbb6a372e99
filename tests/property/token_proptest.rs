//! Property-based tests for token issue and decode

use std::collections::BTreeSet;

use chrono::Utc;
use proptest::prelude::*;

use opsdesk::backend::auth::{PublicIdentity, TokenCodec, TokenError, TokenRejection};
use opsdesk::shared::{Permission, Role};

const SECRET: &str = "property-test-secret-32-bytes-long!";

fn identity(
    id: i64,
    email: String,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
) -> PublicIdentity {
    let now = Utc::now();
    PublicIdentity {
        id,
        email,
        display_name: "Property".to_string(),
        roles: roles.into_iter().collect(),
        permissions: permissions.into_iter().collect(),
        area: "default".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn roles() -> impl Strategy<Value = Vec<Role>> {
    proptest::sample::subsequence(Role::ALL.to_vec(), 0..=Role::ALL.len())
}

fn permissions() -> impl Strategy<Value = Vec<Permission>> {
    proptest::sample::subsequence(Permission::ALL.to_vec(), 0..=Permission::ALL.len())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_issued_claims_round_trip(
        id in 1i64..i64::MAX / 2,
        email in "[a-z]{1,12}@[a-z]{1,8}\\.[a-z]{2,3}",
        roles in roles(),
        permissions in permissions(),
        now in 1_000_000_000i64..2_000_000_000,
        ttl in 1i64..86_400,
    ) {
        let codec = TokenCodec::new(SECRET, ttl);
        let identity = identity(id, email, roles, permissions);
        let token = codec.issue_at(&identity, now).unwrap();

        let claims = codec.decode_at(&token, now).unwrap();
        prop_assert_eq!(claims.sub, identity.id);
        prop_assert_eq!(&claims.email, &identity.email);
        prop_assert_eq!(&claims.roles, &identity.roles);
        prop_assert_eq!(&claims.permissions, &identity.permissions);
        prop_assert_eq!(claims.iat, now);
        prop_assert_eq!(claims.exp, now + ttl);
    }

    #[test]
    fn test_expiry_boundary(
        now in 1_000_000_000i64..2_000_000_000,
        ttl in 1i64..86_400,
        offset in 0i64..172_800,
    ) {
        let codec = TokenCodec::new(SECRET, ttl);
        let identity = identity(7, "edge@ops.local".to_string(), vec![Role::User], vec![]);
        let token = codec.issue_at(&identity, now).unwrap();

        let result = codec.decode_at(&token, now + offset);
        if offset < ttl {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result.unwrap_err(),
                TokenError::InvalidToken(TokenRejection::Expired)
            );
        }
    }

    #[test]
    fn test_foreign_key_never_verifies(other in "[a-zA-Z0-9]{32,48}") {
        prop_assume!(other != SECRET);
        let identity = identity(1, "a@b.cd".to_string(), vec![Role::Admin], vec![]);
        let token = TokenCodec::new(&other, 60).issue_at(&identity, 1_700_000_000).unwrap();

        let result = TokenCodec::new(SECRET, 60).decode_at(&token, 1_700_000_000);
        prop_assert_eq!(
            result.unwrap_err(),
            TokenError::InvalidToken(TokenRejection::BadSignature)
        );
    }

    #[test]
    fn test_tag_sets_are_deduplicated(roles in proptest::collection::vec(0usize..8, 0..16)) {
        let roles: Vec<Role> = roles.into_iter().map(|i| Role::ALL[i]).collect();
        let expected: BTreeSet<Role> = roles.iter().copied().collect();

        let codec = TokenCodec::new(SECRET, 60);
        let token = codec
            .issue_at(&identity(3, "dup@ops.local".to_string(), roles, vec![]), 1_700_000_000)
            .unwrap();
        prop_assert_eq!(codec.decode_at(&token, 1_700_000_000).unwrap().roles, expected);
    }
}
