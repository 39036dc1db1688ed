//! Role and permission model.
//!
//! The role to permission table is plain data held by [`AccessPolicy`]. There
//! is no hierarchy between roles and no wildcard permission: a role holds
//! exactly the permissions listed for it.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use encore_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Account roles. A role is assigned once per user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// DJ managing their own clients and events.
    Dj,
    /// Client invited to an event by a DJ.
    Client,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Dj => "dj",
            Self::Client => "client",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Admin, Role::Dj, Role::Client];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "dj" => Ok(Self::Dj),
            "client" => Ok(Self::Client),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Permissions enforced by route guards and application policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows creating events.
    CreateEvents,
    /// Allows editing events.
    EditEvents,
    /// Allows deleting events.
    DeleteEvents,
    /// Allows listing the events a DJ owns.
    ViewOwnEvents,
    /// Allows listing every event on the platform.
    ViewAllEvents,
    /// Allows listing the events a client was invited to.
    ViewInvitedEvents,
    /// Allows listing every user account.
    ViewAllUsers,
    /// Allows managing user accounts.
    ManageUsers,
    /// Allows editing user accounts.
    EditUsers,
    /// Allows deleting user accounts.
    DeleteUsers,
    /// Allows reading planning, music and timeline forms.
    ViewPlanning,
    /// Allows editing planning, music and timeline forms.
    EditPlanning,
    /// Allows uploading event documents.
    UploadDocuments,
    /// Allows inviting clients to events.
    SendInvitations,
    /// Allows using the conversational intake.
    UseChat,
    /// Allows opening the dashboard.
    ViewDashboard,
    /// Allows changing system-wide settings.
    ManageSystem,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateEvents => "create_events",
            Self::EditEvents => "edit_events",
            Self::DeleteEvents => "delete_events",
            Self::ViewOwnEvents => "view_own_events",
            Self::ViewAllEvents => "view_all_events",
            Self::ViewInvitedEvents => "view_invited_events",
            Self::ViewAllUsers => "view_all_users",
            Self::ManageUsers => "manage_users",
            Self::EditUsers => "edit_users",
            Self::DeleteUsers => "delete_users",
            Self::ViewPlanning => "view_planning",
            Self::EditPlanning => "edit_planning",
            Self::UploadDocuments => "upload_documents",
            Self::SendInvitations => "send_invitations",
            Self::UseChat => "use_chat",
            Self::ViewDashboard => "view_dashboard",
            Self::ManageSystem => "manage_system",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::CreateEvents,
            Permission::EditEvents,
            Permission::DeleteEvents,
            Permission::ViewOwnEvents,
            Permission::ViewAllEvents,
            Permission::ViewInvitedEvents,
            Permission::ViewAllUsers,
            Permission::ManageUsers,
            Permission::EditUsers,
            Permission::DeleteUsers,
            Permission::ViewPlanning,
            Permission::EditPlanning,
            Permission::UploadDocuments,
            Permission::SendInvitations,
            Permission::UseChat,
            Permission::ViewDashboard,
            Permission::ManageSystem,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|permission| permission.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewAllEvents,
    Permission::ViewAllUsers,
    Permission::ManageUsers,
    Permission::EditUsers,
    Permission::DeleteUsers,
    Permission::ViewPlanning,
    Permission::ViewDashboard,
    Permission::ManageSystem,
];

const DJ_PERMISSIONS: &[Permission] = &[
    Permission::CreateEvents,
    Permission::EditEvents,
    Permission::DeleteEvents,
    Permission::ViewOwnEvents,
    Permission::EditPlanning,
    Permission::ViewPlanning,
    Permission::UploadDocuments,
    Permission::SendInvitations,
    Permission::ViewDashboard,
];

const CLIENT_PERMISSIONS: &[Permission] = &[
    Permission::ViewInvitedEvents,
    Permission::ViewPlanning,
    Permission::UseChat,
    Permission::ViewDashboard,
];

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();

/// Immutable role to permission table.
///
/// Build it once with [`AccessPolicy::standard`] (or [`AccessPolicy::from_grants`]
/// for tests and alternative deployments) and pass it to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl AccessPolicy {
    /// Returns the platform policy table.
    #[must_use]
    pub fn standard() -> Self {
        let grants = [
            (Role::Admin, ADMIN_PERMISSIONS),
            (Role::Dj, DJ_PERMISSIONS),
            (Role::Client, CLIENT_PERMISSIONS),
        ]
        .into_iter()
        .map(|(role, permissions)| (role, permissions.iter().copied().collect()))
        .collect();

        Self { grants }
    }

    /// Creates a policy from explicit grants.
    ///
    /// Every role must be present with at least one permission.
    pub fn from_grants(
        grants: impl IntoIterator<Item = (Role, Vec<Permission>)>,
    ) -> AppResult<Self> {
        let mut table: BTreeMap<Role, BTreeSet<Permission>> = BTreeMap::new();
        for (role, permissions) in grants {
            table.entry(role).or_default().extend(permissions);
        }

        for role in Role::all() {
            if table.get(role).is_none_or(BTreeSet::is_empty) {
                return Err(AppError::Validation(format!(
                    "role '{}' must be granted at least one permission",
                    role.as_str()
                )));
            }
        }

        Ok(Self { grants: table })
    }

    /// Returns the permissions held by a typed role.
    #[must_use]
    pub fn permissions_for(&self, role: Role) -> &BTreeSet<Permission> {
        self.grants.get(&role).unwrap_or(&NO_PERMISSIONS)
    }

    /// Returns the permissions held by a role transport value.
    ///
    /// Unknown roles hold no permissions.
    #[must_use]
    pub fn role_permissions(&self, role: &str) -> BTreeSet<Permission> {
        Role::from_str(role)
            .map(|role| self.permissions_for(role).clone())
            .unwrap_or_default()
    }

    /// Returns whether the role holds the permission.
    #[must_use]
    pub fn has_permission(&self, role: &str, permission: Permission) -> bool {
        Role::from_str(role).is_ok_and(|role| self.permissions_for(role).contains(&permission))
    }

    /// Returns whether the role holds a permission given as a transport value.
    ///
    /// Unknown permission tokens are never held.
    #[must_use]
    pub fn has_permission_value(&self, role: &str, permission: &str) -> bool {
        Permission::from_str(permission)
            .is_ok_and(|permission| self.has_permission(role, permission))
    }

    /// Returns whether the role holds at least one of the permissions.
    #[must_use]
    pub fn has_any_permission(&self, role: &str, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .any(|permission| self.has_permission(role, *permission))
    }

    /// Returns whether the role holds every one of the permissions.
    #[must_use]
    pub fn has_all_permissions(&self, role: &str, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .all(|permission| self.has_permission(role, *permission))
    }

    /// Derives named capability flags for a role.
    ///
    /// The flags are recomputed from the table on every call.
    #[must_use]
    pub fn capabilities(&self, role: &str) -> Capabilities {
        let typed_role = Role::from_str(role).ok();
        let has = |permission| self.has_permission(role, permission);

        Capabilities {
            can_view_all_events: has(Permission::ViewAllEvents),
            can_create_events: has(Permission::CreateEvents),
            can_edit_events: has(Permission::EditEvents),
            can_delete_events: has(Permission::DeleteEvents),
            can_view_own_events: has(Permission::ViewOwnEvents),
            can_view_invited_events: has(Permission::ViewInvitedEvents),
            can_view_all_users: has(Permission::ViewAllUsers),
            can_manage_users: has(Permission::ManageUsers),
            can_edit_users: has(Permission::EditUsers),
            can_delete_users: has(Permission::DeleteUsers),
            can_view_planning: has(Permission::ViewPlanning),
            can_edit_planning: has(Permission::EditPlanning),
            can_upload_documents: has(Permission::UploadDocuments),
            can_send_invitations: has(Permission::SendInvitations),
            can_use_chat: has(Permission::UseChat),
            can_view_dashboard: has(Permission::ViewDashboard),
            can_manage_system: has(Permission::ManageSystem),
            is_admin: typed_role == Some(Role::Admin),
            is_dj: typed_role == Some(Role::Dj),
            is_client: typed_role == Some(Role::Client),
        }
    }

    /// Returns the surfaces a role may open, in declaration order.
    ///
    /// A surface is accessible when the role holds at least one of the
    /// permissions required by that surface (logical OR).
    #[must_use]
    pub fn accessible_surfaces(&self, role: &str) -> Vec<Surface> {
        Surface::all()
            .iter()
            .filter(|surface| self.can_access_surface(role, **surface))
            .copied()
            .collect()
    }

    /// Returns whether the role may open a surface.
    #[must_use]
    pub fn can_access_surface(&self, role: &str, surface: Surface) -> bool {
        self.has_any_permission(role, surface.required_permissions())
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Capability flags derived from a role, consumed by conditional UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Role holds `view_all_events`.
    pub can_view_all_events: bool,
    /// Role holds `create_events`.
    pub can_create_events: bool,
    /// Role holds `edit_events`.
    pub can_edit_events: bool,
    /// Role holds `delete_events`.
    pub can_delete_events: bool,
    /// Role holds `view_own_events`.
    pub can_view_own_events: bool,
    /// Role holds `view_invited_events`.
    pub can_view_invited_events: bool,
    /// Role holds `view_all_users`.
    pub can_view_all_users: bool,
    /// Role holds `manage_users`.
    pub can_manage_users: bool,
    /// Role holds `edit_users`.
    pub can_edit_users: bool,
    /// Role holds `delete_users`.
    pub can_delete_users: bool,
    /// Role holds `view_planning`.
    pub can_view_planning: bool,
    /// Role holds `edit_planning`.
    pub can_edit_planning: bool,
    /// Role holds `upload_documents`.
    pub can_upload_documents: bool,
    /// Role holds `send_invitations`.
    pub can_send_invitations: bool,
    /// Role holds `use_chat`.
    pub can_use_chat: bool,
    /// Role holds `view_dashboard`.
    pub can_view_dashboard: bool,
    /// Role holds `manage_system`.
    pub can_manage_system: bool,
    /// Role is `admin`.
    pub is_admin: bool,
    /// Role is `dj`.
    pub is_dj: bool,
    /// Role is `client`.
    pub is_client: bool,
}

/// Guarded application areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Landing dashboard.
    Dashboard,
    /// Event listings.
    Events,
    /// Event create/edit screens.
    EventEditor,
    /// Client roster.
    Clients,
    /// Invitation management.
    Invitations,
    /// Read-only planning, music and timeline forms.
    Planning,
    /// Editable planning, music and timeline forms.
    PlanningEditor,
    /// Conversational intake.
    Chat,
    /// User administration.
    UserAdmin,
    /// System settings.
    SystemSettings,
}

impl Surface {
    /// Returns a stable route value for this surface.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Events => "events",
            Self::EventEditor => "event_editor",
            Self::Clients => "clients",
            Self::Invitations => "invitations",
            Self::Planning => "planning",
            Self::PlanningEditor => "planning_editor",
            Self::Chat => "chat",
            Self::UserAdmin => "user_admin",
            Self::SystemSettings => "system_settings",
        }
    }

    /// Returns all surfaces in navigation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Surface] = &[
            Surface::Dashboard,
            Surface::Events,
            Surface::EventEditor,
            Surface::Clients,
            Surface::Invitations,
            Surface::Planning,
            Surface::PlanningEditor,
            Surface::Chat,
            Surface::UserAdmin,
            Surface::SystemSettings,
        ];

        ALL
    }

    /// Returns the permissions that open this surface; any one suffices.
    #[must_use]
    pub fn required_permissions(&self) -> &'static [Permission] {
        match self {
            Self::Dashboard => &[Permission::ViewDashboard],
            Self::Events => &[
                Permission::ViewAllEvents,
                Permission::ViewOwnEvents,
                Permission::ViewInvitedEvents,
            ],
            Self::EventEditor => &[Permission::CreateEvents, Permission::EditEvents],
            Self::Clients => &[Permission::SendInvitations, Permission::ViewAllUsers],
            Self::Invitations => &[Permission::SendInvitations],
            Self::Planning => &[Permission::ViewPlanning],
            Self::PlanningEditor => &[Permission::EditPlanning],
            Self::Chat => &[Permission::UseChat],
            Self::UserAdmin => &[Permission::ManageUsers],
            Self::SystemSettings => &[Permission::ManageSystem],
        }
    }
}

impl FromStr for Surface {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|surface| surface.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown surface value '{value}'")))
    }
}
