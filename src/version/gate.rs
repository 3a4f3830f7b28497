//! Operation → minimum version table

use super::types::ApiVersion;
use crate::error::{Error, Result};
use std::fmt;

/// Every server operation the client can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Server
    ServerInfoGet,

    // Auth
    SignIn,
    SignOut,
    SwitchSite,

    // Users
    UsersGet,
    UsersGetById,
    UsersAdd,
    UsersAddAll,
    UsersUpdate,
    UsersRemove,
    UsersPopulateWorkbooks,
    UsersPopulateGroups,

    // Sites
    SitesGet,
    SitesGetById,
    SitesGetByName,
    SitesGetByContentUrl,
    SitesCreate,
    SitesUpdate,
    SitesDelete,
    SitesEncryptExtracts,
    SitesDecryptExtracts,
    SitesReencryptExtracts,

    // Group sets
    GroupSetsGet,
    GroupSetsGetById,
    GroupSetsCreate,
    GroupSetsUpdate,
    GroupSetsDelete,
    GroupSetsAddGroup,
    GroupSetsRemoveGroup,

    // Data alerts
    DataAlertsGet,
    DataAlertsGetById,
    DataAlertsUpdate,
    DataAlertsDelete,
    DataAlertsAddUser,
    DataAlertsDeleteUser,

    // Tags
    TagsAdd,
    TagsDelete,
    TagsBatchAdd,
    TagsBatchDelete,
}

impl Operation {
    /// Minimum REST API version that supports this operation
    pub const fn min_version(self) -> ApiVersion {
        use Operation::*;
        match self {
            SignIn | SignOut | SwitchSite => ApiVersion::new(2, 0),

            ServerInfoGet => ApiVersion::new(2, 4),

            UsersGet | UsersGetById | UsersAdd | UsersAddAll | UsersUpdate | UsersRemove
            | UsersPopulateWorkbooks => ApiVersion::new(2, 0),
            UsersPopulateGroups => ApiVersion::new(3, 7),

            SitesGet | SitesGetById | SitesGetByName | SitesGetByContentUrl | SitesCreate
            | SitesUpdate | SitesDelete => ApiVersion::new(2, 0),
            SitesEncryptExtracts | SitesDecryptExtracts | SitesReencryptExtracts => {
                ApiVersion::new(3, 5)
            }

            GroupSetsGet | GroupSetsGetById | GroupSetsCreate | GroupSetsUpdate
            | GroupSetsDelete | GroupSetsAddGroup | GroupSetsRemoveGroup => ApiVersion::new(3, 22),

            DataAlertsGet | DataAlertsGetById | DataAlertsUpdate | DataAlertsDelete
            | DataAlertsAddUser | DataAlertsDeleteUser => ApiVersion::new(3, 2),

            TagsAdd | TagsDelete => ApiVersion::new(2, 0),
            TagsBatchAdd | TagsBatchDelete => ApiVersion::new(3, 9),
        }
    }

    /// Dotted name used in logs and errors
    pub const fn name(self) -> &'static str {
        use Operation::*;
        match self {
            ServerInfoGet => "server_info.get",
            SignIn => "auth.sign_in",
            SignOut => "auth.sign_out",
            SwitchSite => "auth.switch_site",
            UsersGet => "users.get",
            UsersGetById => "users.get_by_id",
            UsersAdd => "users.add",
            UsersAddAll => "users.add_all",
            UsersUpdate => "users.update",
            UsersRemove => "users.remove",
            UsersPopulateWorkbooks => "users.populate_workbooks",
            UsersPopulateGroups => "users.populate_groups",
            SitesGet => "sites.get",
            SitesGetById => "sites.get_by_id",
            SitesGetByName => "sites.get_by_name",
            SitesGetByContentUrl => "sites.get_by_content_url",
            SitesCreate => "sites.create",
            SitesUpdate => "sites.update",
            SitesDelete => "sites.delete",
            SitesEncryptExtracts => "sites.encrypt_extracts",
            SitesDecryptExtracts => "sites.decrypt_extracts",
            SitesReencryptExtracts => "sites.reencrypt_extracts",
            GroupSetsGet => "groupsets.get",
            GroupSetsGetById => "groupsets.get_by_id",
            GroupSetsCreate => "groupsets.create",
            GroupSetsUpdate => "groupsets.update",
            GroupSetsDelete => "groupsets.delete",
            GroupSetsAddGroup => "groupsets.add_group",
            GroupSetsRemoveGroup => "groupsets.remove_group",
            DataAlertsGet => "data_alerts.get",
            DataAlertsGetById => "data_alerts.get_by_id",
            DataAlertsUpdate => "data_alerts.update",
            DataAlertsDelete => "data_alerts.delete",
            DataAlertsAddUser => "data_alerts.add_user_to_alert",
            DataAlertsDeleteUser => "data_alerts.delete_user_from_alert",
            TagsAdd => "tags.add",
            TagsDelete => "tags.delete",
            TagsBatchAdd => "tags.batch_add",
            TagsBatchDelete => "tags.batch_delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fail if `negotiated` is older than the operation's minimum version
pub fn check(operation: Operation, negotiated: ApiVersion) -> Result<()> {
    let required = operation.min_version();
    if negotiated < required {
        return Err(Error::EndpointUnavailable {
            operation: operation.name().to_string(),
            required: required.to_string(),
            current: negotiated.to_string(),
        });
    }
    Ok(())
}
