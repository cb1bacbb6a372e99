//! Roles and Permissions
//!
//! The two independent authorization axes. Both are closed sets: a role
//! names a job function, a permission names a granted capability.
//!
//! The wire names match the ones stored in the `users` table and embedded
//! in access tokens (`"Admin"`, `"VIEW_ROUTES"`, ...).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Job function of an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    TransportSupervisor,
    Driver,
    GeneralServices,
    ItStaff,
    Cleaning,
    CivilWorks,
    User,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::TransportSupervisor,
        Role::Driver,
        Role::GeneralServices,
        Role::ItStaff,
        Role::Cleaning,
        Role::CivilWorks,
        Role::User,
    ];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::TransportSupervisor => "TransportSupervisor",
            Role::Driver => "Driver",
            Role::GeneralServices => "GeneralServices",
            Role::ItStaff => "ItStaff",
            Role::Cleaning => "Cleaning",
            Role::CivilWorks => "CivilWorks",
            Role::User => "User",
        }
    }

    /// Lowest-privilege role set handed out on registration
    pub fn defaults() -> BTreeSet<Role> {
        BTreeSet::from([Role::User])
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| SharedError::unknown_tag("role", s))
    }
}

/// Capability granted to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewDashboard,
    ViewRoutes,
    ViewTripReports,
    ManageFleet,
    ManageMaintenance,
    ViewServiceReports,
    ManageTickets,
    ManageUsers,
}

impl Permission {
    /// Every permission, in declaration order
    pub const ALL: [Permission; 8] = [
        Permission::ViewDashboard,
        Permission::ViewRoutes,
        Permission::ViewTripReports,
        Permission::ManageFleet,
        Permission::ManageMaintenance,
        Permission::ViewServiceReports,
        Permission::ManageTickets,
        Permission::ManageUsers,
    ];

    /// Wire name of the permission
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "VIEW_DASHBOARD",
            Permission::ViewRoutes => "VIEW_ROUTES",
            Permission::ViewTripReports => "VIEW_TRIP_REPORTS",
            Permission::ManageFleet => "MANAGE_FLEET",
            Permission::ManageMaintenance => "MANAGE_MAINTENANCE",
            Permission::ViewServiceReports => "VIEW_SERVICE_REPORTS",
            Permission::ManageTickets => "MANAGE_TICKETS",
            Permission::ManageUsers => "MANAGE_USERS",
        }
    }

    /// Lowest-privilege permission set handed out on registration
    pub fn defaults() -> BTreeSet<Permission> {
        BTreeSet::from([Permission::ViewDashboard])
    }

    /// Every permission as a set (bootstrap administrator)
    pub fn all() -> BTreeSet<Permission> {
        Permission::ALL.into_iter().collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| SharedError::unknown_tag("permission", s))
    }
}

/// Parse a list of wire names into a set, failing on the first unknown tag
pub fn parse_tags<T, I, S>(values: I) -> Result<BTreeSet<T>, SharedError>
where
    T: FromStr<Err = SharedError> + Ord,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(|v| v.as_ref().parse()).collect()
}

/// Render a set back into wire names (store columns)
pub fn tag_names<T: fmt::Display>(values: &BTreeSet<T>) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
