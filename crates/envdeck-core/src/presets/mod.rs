//! Pipeline configuration of every dashboard list page.
//!
//! Filter keys and sort fields use the camelCase names of the record fields they act on.

use std::{fmt, str::FromStr};

use envdeck_model::{
    AccessKey, AccessKeyStatus, Application, ChangeKind, EnvValueChange, EnvVariable, Group,
    Permission, PermissionAction, PermissionResource, Role, SortDirection,
};

use crate::{
    error::CoreError,
    pipeline::{ListPipeline, compare_instant, compare_text, contains_ignore_case},
};

/// Dashboard pages backed by a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Applications,
    Variables,
    AccessKeys,
    Groups,
    Roles,
    Permissions,
    History,
}

impl ViewKind {
    pub const ALL: [ViewKind; 7] = [
        ViewKind::Applications,
        ViewKind::Variables,
        ViewKind::AccessKeys,
        ViewKind::Groups,
        ViewKind::Roles,
        ViewKind::Permissions,
        ViewKind::History,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Applications => "applications",
            ViewKind::Variables => "variables",
            ViewKind::AccessKeys => "access-keys",
            ViewKind::Groups => "groups",
            ViewKind::Roles => "roles",
            ViewKind::Permissions => "permissions",
            ViewKind::History => "history",
        }
    }
}

impl FromStr for ViewKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "applications" | "apps" => Ok(ViewKind::Applications),
            "variables" | "env" => Ok(ViewKind::Variables),
            "access-keys" | "keys" => Ok(ViewKind::AccessKeys),
            "groups" => Ok(ViewKind::Groups),
            "roles" => Ok(ViewKind::Roles),
            "permissions" => Ok(ViewKind::Permissions),
            "history" | "audit" => Ok(ViewKind::History),
            _ => Err(CoreError::UnknownView(s.to_string())),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn opt_contains(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|v| contains_ignore_case(v, term))
}

/// Applications page.
///
/// Search: name, description, owner. Filters: `owner`. Default sort: `name`.
pub fn applications() -> ListPipeline<Application> {
    ListPipeline::new(ViewKind::Applications.as_str())
        .with_search(|a: &Application, term| {
            contains_ignore_case(&a.name, term)
                || opt_contains(a.description.as_deref(), term)
                || opt_contains(a.owner.as_deref(), term)
        })
        .with_filter("owner", |a: &Application, v| {
            a.owner.as_deref().is_some_and(|o| o.eq_ignore_ascii_case(v))
        })
        .with_sort("name", SortDirection::Asc, |a: &Application, b: &Application| {
            compare_text(&a.name, &b.name)
        })
        .with_sort("createdAt", SortDirection::Desc, |a: &Application, b: &Application| {
            compare_instant(Some(a.created_at), Some(b.created_at))
        })
        .with_sort("updatedAt", SortDirection::Desc, |a: &Application, b: &Application| {
            compare_instant(Some(a.updated_at), Some(b.updated_at))
        })
        .with_default_sort("name")
}

/// Environment variables page.
///
/// Values take part in search only when they are not secret.
/// Filters: `environment`, `applicationId`, `secret` (`true`/`false`). Default sort: `key`.
pub fn variables() -> ListPipeline<EnvVariable> {
    ListPipeline::new(ViewKind::Variables.as_str())
        .with_search(|v: &EnvVariable, term| {
            contains_ignore_case(&v.key, term)
                || contains_ignore_case(&v.environment, term)
                || (!v.secret && contains_ignore_case(&v.value, term))
        })
        .with_filter("environment", |v: &EnvVariable, env| {
            v.environment.eq_ignore_ascii_case(env)
        })
        .with_filter("applicationId", |v: &EnvVariable, id| {
            v.application_id.as_str() == id
        })
        .with_filter("secret", |v: &EnvVariable, flag| {
            flag.parse::<bool>().is_ok_and(|secret| secret == v.secret)
        })
        .with_sort("key", SortDirection::Asc, |a: &EnvVariable, b: &EnvVariable| {
            compare_text(&a.key, &b.key)
        })
        .with_sort("environment", SortDirection::Asc, |a: &EnvVariable, b: &EnvVariable| {
            compare_text(&a.environment, &b.environment)
        })
        .with_sort("updatedAt", SortDirection::Desc, |a: &EnvVariable, b: &EnvVariable| {
            compare_instant(Some(a.updated_at), Some(b.updated_at))
        })
        .with_default_sort("key")
}

/// Access keys page.
///
/// The key material itself is never searched.
/// Filters: `applicationId`, `status`. Default sort: newest first.
pub fn access_keys() -> ListPipeline<AccessKey> {
    ListPipeline::new(ViewKind::AccessKeys.as_str())
        .with_search(|k: &AccessKey, term| contains_ignore_case(&k.name, term))
        .with_filter("applicationId", |k: &AccessKey, id| {
            k.application_id.as_str() == id
        })
        .with_filter("status", |k: &AccessKey, status| {
            status
                .parse::<AccessKeyStatus>()
                .is_ok_and(|status| status == k.status)
        })
        .with_sort("name", SortDirection::Asc, |a: &AccessKey, b: &AccessKey| {
            compare_text(&a.name, &b.name)
        })
        .with_sort("createdAt", SortDirection::Desc, |a: &AccessKey, b: &AccessKey| {
            compare_instant(Some(a.created_at), Some(b.created_at))
        })
        .with_sort("lastUsedAt", SortDirection::Desc, |a: &AccessKey, b: &AccessKey| {
            compare_instant(a.last_used_at, b.last_used_at)
        })
        .with_default_sort("createdAt")
}

/// Groups page.
pub fn groups() -> ListPipeline<Group> {
    ListPipeline::new(ViewKind::Groups.as_str())
        .with_search(|g: &Group, term| {
            contains_ignore_case(&g.name, term) || opt_contains(g.description.as_deref(), term)
        })
        .with_sort("name", SortDirection::Asc, |a: &Group, b: &Group| {
            compare_text(&a.name, &b.name)
        })
        .with_sort("memberCount", SortDirection::Desc, |a: &Group, b: &Group| {
            a.member_count.cmp(&b.member_count)
        })
        .with_sort("createdAt", SortDirection::Desc, |a: &Group, b: &Group| {
            compare_instant(Some(a.created_at), Some(b.created_at))
        })
        .with_default_sort("name")
}

/// Roles page.
pub fn roles() -> ListPipeline<Role> {
    ListPipeline::new(ViewKind::Roles.as_str())
        .with_search(|r: &Role, term| {
            contains_ignore_case(&r.name, term) || opt_contains(r.description.as_deref(), term)
        })
        .with_sort("name", SortDirection::Asc, |a: &Role, b: &Role| {
            compare_text(&a.name, &b.name)
        })
        .with_sort("permissionCount", SortDirection::Desc, |a: &Role, b: &Role| {
            a.permission_count.cmp(&b.permission_count)
        })
        .with_sort("createdAt", SortDirection::Desc, |a: &Role, b: &Role| {
            compare_instant(Some(a.created_at), Some(b.created_at))
        })
        .with_default_sort("name")
}

/// Permissions page.
///
/// Filters: `resource`, `action`; values that do not parse match nothing.
pub fn permissions() -> ListPipeline<Permission> {
    ListPipeline::new(ViewKind::Permissions.as_str())
        .with_search(|p: &Permission, term| {
            contains_ignore_case(&p.name, term)
                || opt_contains(p.description.as_deref(), term)
                || contains_ignore_case(p.resource.as_str(), term)
                || contains_ignore_case(p.action.as_str(), term)
        })
        .with_filter("resource", |p: &Permission, v| {
            v.parse::<PermissionResource>()
                .is_ok_and(|resource| resource == p.resource)
        })
        .with_filter("action", |p: &Permission, v| {
            v.parse::<PermissionAction>()
                .is_ok_and(|action| action == p.action)
        })
        .with_sort("name", SortDirection::Asc, |a: &Permission, b: &Permission| {
            compare_text(&a.name, &b.name)
        })
        .with_sort("resource", SortDirection::Asc, |a: &Permission, b: &Permission| {
            compare_text(a.resource.as_str(), b.resource.as_str())
        })
        .with_sort("action", SortDirection::Asc, |a: &Permission, b: &Permission| {
            compare_text(a.action.as_str(), b.action.as_str())
        })
        .with_default_sort("name")
}

/// Audit history of environment value changes; newest change first by default.
///
/// Filters: `environment`, `applicationId`, `kind`.
pub fn history() -> ListPipeline<EnvValueChange> {
    ListPipeline::new(ViewKind::History.as_str())
        .with_search(|c: &EnvValueChange, term| {
            contains_ignore_case(&c.key, term) || contains_ignore_case(&c.changed_by, term)
        })
        .with_filter("environment", |c: &EnvValueChange, env| {
            c.environment.eq_ignore_ascii_case(env)
        })
        .with_filter("applicationId", |c: &EnvValueChange, id| {
            c.application_id.as_str() == id
        })
        .with_filter("kind", |c: &EnvValueChange, kind| {
            kind.parse::<ChangeKind>().is_ok_and(|kind| kind == c.kind)
        })
        .with_sort("changedAt", SortDirection::Desc, |a: &EnvValueChange, b: &EnvValueChange| {
            compare_instant(Some(a.changed_at), Some(b.changed_at))
        })
        .with_sort("key", SortDirection::Asc, |a: &EnvValueChange, b: &EnvValueChange| {
            compare_text(&a.key, &b.key)
        })
        .with_sort("changedBy", SortDirection::Asc, |a: &EnvValueChange, b: &EnvValueChange| {
            compare_text(&a.changed_by, &b.changed_by)
        })
        .with_default_sort("changedAt")
}
