// src/services/access_control.rs
//
// The access-control evaluator. Pure functions over a catalog snapshot:
// callers (middleware guards, handlers) fetch the snapshot through
// `RbacRepository` and evaluate here, so the same rules run identically for
// every request. Every function degrades to deny on missing user, missing
// role or unknown code; nothing in this module errors.

use crate::models::{auth::User, rbac::Permission, rbac::Role};

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_STAFF: &str = "staff";

// The fixed hierarchy. Unknown codes (including custom role codes) rank
// below staff.
pub fn role_level(code: &str) -> u8 {
    match code {
        ROLE_SUPER_ADMIN => 4,
        ROLE_ADMIN => 3,
        ROLE_MANAGER => 2,
        ROLE_STAFF => 1,
        _ => 0,
    }
}

// The role and permission catalogs, fetched in one shot per evaluation.
#[derive(Debug, Clone, Default)]
pub struct AccessSnapshot {
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl AccessSnapshot {
    fn resolve_role(&self, user: &User) -> Option<&Role> {
        let role_id = user.role_id?;
        self.roles.iter().find(|r| r.id == role_id)
    }
}

// Coarse hierarchy check: the user qualifies if their level is at or above
// the level of ANY requested role (a floor, not an exact match).
pub fn has_role(user: Option<&User>, required: &[&str]) -> bool {
    let Some(user) = user else { return false };
    let user_level = role_level(&user.role);
    required.iter().any(|role| user_level >= role_level(role))
}

// Fine-grained check against permission codes. super_admin bypasses the
// catalog entirely; everyone else needs a resolvable role whose permission
// set covers at least one of the requested codes.
pub fn has_permission(user: Option<&User>, snapshot: &AccessSnapshot, codes: &[&str]) -> bool {
    let Some(user) = user else { return false };
    if user.role == ROLE_SUPER_ADMIN {
        return true;
    }
    let Some(role) = snapshot.resolve_role(user) else {
        return false;
    };
    codes.iter().any(|code| {
        snapshot
            .permissions
            .iter()
            .any(|p| p.code == *code && role.permissions.contains(&p.id))
    })
}

// The resolved role's full permission set, for rendering permitted-action
// affordances. Empty when unauthenticated or unresolved.
pub fn user_permissions<'s>(user: Option<&User>, snapshot: &'s AccessSnapshot) -> Vec<&'s Permission> {
    let Some(user) = user else { return Vec::new() };
    let Some(role) = snapshot.resolve_role(user) else {
        return Vec::new();
    };
    snapshot
        .permissions
        .iter()
        .filter(|p| role.permissions.contains(&p.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rbac::PermissionModule;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn user(role: &str, role_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test user".into(),
            email: "test@example.com".into(),
            password_hash: String::new(),
            role: role.into(),
            role_id,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn permission(id: Uuid, code: &str) -> Permission {
        Permission {
            id,
            name: code.into(),
            code: code.into(),
            module: PermissionModule::Inventory,
            action: None,
            description: String::new(),
        }
    }

    fn snapshot_with_role(role_id: Uuid, granted: &[Uuid], catalog: Vec<Permission>) -> AccessSnapshot {
        AccessSnapshot {
            roles: vec![Role {
                id: role_id,
                name: "Clerk".into(),
                code: "clerk".into(),
                description: None,
                permissions: granted.to_vec(),
                is_system: false,
                created_at: Utc::now(),
            }],
            permissions: catalog,
        }
    }

    #[test]
    fn no_user_is_denied_everywhere() {
        let snapshot = AccessSnapshot::default();
        assert!(!has_role(None, &[ROLE_STAFF]));
        assert!(!has_permission(None, &snapshot, &["inventory:read"]));
        assert!(user_permissions(None, &snapshot).is_empty());
    }

    #[rstest]
    #[case("super_admin", 4)]
    #[case("admin", 3)]
    #[case("manager", 2)]
    #[case("staff", 1)]
    #[case("warehouse_clerk", 0)]
    #[case("", 0)]
    fn hierarchy_levels(#[case] code: &str, #[case] level: u8) {
        assert_eq!(role_level(code), level);
    }

    #[test]
    fn role_check_is_a_floor_with_or_semantics() {
        let manager = user(ROLE_MANAGER, None);
        // qualifies via staff even though admin alone would fail
        assert!(has_role(Some(&manager), &[ROLE_ADMIN, ROLE_STAFF]));
        assert!(!has_role(Some(&manager), &[ROLE_ADMIN]));
        assert!(!has_role(Some(&manager), &[ROLE_ADMIN, ROLE_SUPER_ADMIN]));
        assert!(has_role(Some(&manager), &[ROLE_MANAGER, ROLE_ADMIN]));
    }

    #[test]
    fn admin_passes_manager_floor() {
        let admin = user(ROLE_ADMIN, None);
        assert!(has_role(Some(&admin), &[ROLE_MANAGER]));
        assert!(!has_role(Some(&admin), &[ROLE_SUPER_ADMIN]));
    }

    #[test]
    fn unknown_role_code_ranks_below_staff() {
        let custom = user("warehouse_clerk", None);
        assert!(!has_role(Some(&custom), &[ROLE_STAFF]));
    }

    #[test]
    fn super_admin_bypasses_the_catalog() {
        // no role_id, empty catalogs: still allowed
        let su = user(ROLE_SUPER_ADMIN, None);
        let snapshot = AccessSnapshot::default();
        assert!(has_permission(Some(&su), &snapshot, &["anything:at-all"]));
    }

    #[test]
    fn permission_requires_resolvable_role() {
        let staff = user(ROLE_STAFF, None);
        let snapshot = AccessSnapshot::default();
        assert!(!has_permission(Some(&staff), &snapshot, &["inventory:read"]));

        // role_id pointing at a role the snapshot does not contain
        let orphan = user(ROLE_STAFF, Some(Uuid::new_v4()));
        assert!(!has_permission(Some(&orphan), &snapshot, &["inventory:read"]));
    }

    #[test]
    fn permission_intersection_with_or_semantics() {
        let role_id = Uuid::new_v4();
        let read_id = Uuid::new_v4();
        let write_id = Uuid::new_v4();
        let snapshot = snapshot_with_role(
            role_id,
            &[read_id],
            vec![
                permission(read_id, "inventory:read"),
                permission(write_id, "inventory:create"),
            ],
        );
        let clerk = user(ROLE_STAFF, Some(role_id));

        assert!(has_permission(Some(&clerk), &snapshot, &["inventory:read"]));
        assert!(!has_permission(Some(&clerk), &snapshot, &["inventory:create"]));
        // any matching code suffices
        assert!(has_permission(
            Some(&clerk),
            &snapshot,
            &["inventory:create", "inventory:read"]
        ));
        // unknown codes deny rather than error
        assert!(!has_permission(Some(&clerk), &snapshot, &["no:such-code"]));
    }

    #[test]
    fn user_permissions_lists_the_full_granted_set() {
        let role_id = Uuid::new_v4();
        let read_id = Uuid::new_v4();
        let write_id = Uuid::new_v4();
        let other_id = Uuid::new_v4();
        let snapshot = snapshot_with_role(
            role_id,
            &[read_id, write_id],
            vec![
                permission(read_id, "inventory:read"),
                permission(write_id, "inventory:create"),
                permission(other_id, "orders:read"),
            ],
        );
        let clerk = user(ROLE_STAFF, Some(role_id));

        let granted = user_permissions(Some(&clerk), &snapshot);
        let codes: Vec<&str> = granted.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["inventory:read", "inventory:create"]);
    }
}
